use std::sync::Arc;

use carhire_core::{DepotPair, Location, Search, SearchError, Supplier};

use super::map_data;
use crate::encoding::Params;
use crate::endpoint::Endpoint;
use crate::error::{CarHireError, Result};
use crate::request::RequestDescriptor;
use crate::wire;

/// `pickUpLocationType` / `returnLocationType` values
fn location_type(location: &Location) -> u8 {
    if location.is_airport {
        1
    } else {
        2
    }
}

/// Nearest pickup and return depots for every supplier
///
/// Pairs for suppliers outside the search's supplier limit are dropped.
pub fn nearest_depots(
    search: &Search,
    alias: &str,
    suppliers: Arc<Vec<Supplier>>,
) -> Result<RequestDescriptor<Vec<DepotPair>>> {
    let (Some(pickup), Some(dropoff)) = (&search.pickup_location, &search.return_location) else {
        let missing = if search.pickup_location.is_none() {
            SearchError::PickupLocation
        } else {
            SearchError::ReturnLocation
        };
        return Err(CarHireError::Validation(missing.to_string()));
    };

    let params = Params::new()
        .with("alias", alias)
        .with("pickupCoordinate", pickup.coordinate.comma_separated())
        .with("returnCoordinate", dropoff.coordinate.comma_separated())
        .with("pickUpLocationType", location_type(pickup))
        .with("returnLocationType", location_type(dropoff))
        .with("byPassDefaultRadius", "0")
        .with("showByPassedDepots", "0");

    let search = search.clone();
    let descriptor = RequestDescriptor::query(Endpoint::NearestDepot, move |body| {
        let mut pairs = map_data(&body, |data| wire::depot_pairs(data, &suppliers))?;
        pairs.retain(|pair| search.includes_supplier(&pair.supplier));
        Ok(pairs)
    })
    .params(params);
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::samples;
    use carhire_core::{Coordinate, DateRange};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn suppliers() -> Arc<Vec<Supplier>> {
        Arc::new(wire::suppliers(&samples::supplier_list()["data"]))
    }

    fn airport_search() -> Search {
        let mut airport = Location::new(
            "Sydney Airport",
            "NSW, Australia",
            "AU",
            Coordinate::new(-33.9399, 151.1753),
        );
        airport.airport_code = Some("SYD".to_string());
        let mut search = Search::at(airport, DateRange::default());
        search.return_location = Some(Location::new(
            "Sydney",
            "NSW, Australia",
            "AU",
            Coordinate::new(-33.8688, 151.2093),
        ));
        search
    }

    #[test]
    fn test_params() {
        let request = nearest_depots(&airport_search(), "acme", suppliers()).unwrap();
        let params = request.parameters();
        assert_eq!(params.get("pickupCoordinate"), Some(&json!("-33.9399,151.1753")));
        assert_eq!(params.get("pickUpLocationType"), Some(&json!(1)));
        assert_eq!(params.get("returnLocationType"), Some(&json!(2)));
        assert_eq!(params.get("byPassDefaultRadius"), Some(&json!("0")));
        assert_eq!(params.get("alias"), Some(&json!("acme")));
    }

    #[test]
    fn test_missing_location() {
        let mut search = airport_search();
        search.return_location = None;
        let err = nearest_depots(&search, "acme", suppliers()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a Return Location");
    }

    #[test]
    fn test_limit_to_suppliers() {
        let mut search = airport_search();
        search.limit_to_suppliers = vec![Supplier::new("AV", "Avis", "")];

        let pairs = nearest_depots(&search, "acme", suppliers())
            .unwrap()
            .decode(samples::depots(&["HZ", "AV", "EC"]))
            .unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].supplier.code, "AV");
    }

    #[test]
    fn test_envelope_error() {
        let err = nearest_depots(&airport_search(), "acme", suppliers())
            .unwrap()
            .decode(json!({"message": "Invalid code"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid code");
    }
}
