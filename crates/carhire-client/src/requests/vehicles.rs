use carhire_core::{DepotPair, Search, SearchResponse};
use serde_json::json;

use super::{map_data, with_trip_dates};
use crate::encoding::Params;
use crate::endpoint::Endpoint;
use crate::request::RequestDescriptor;
use crate::wire;

/// Vehicles available from one supplier's depot pair
pub fn search_vehicles(
    search: &Search,
    depots: DepotPair,
    alias: &str,
) -> RequestDescriptor<SearchResponse> {
    let params = Params::new()
        .with("debug", "true")
        .with("supplierCode", depots.supplier.code.as_str())
        .with("driverCountryCode", search.residency.code.as_str())
        .with("driverAge", search.age.value())
        .with(
            "pickUpDepot",
            json!({
                "depotCode": depots.pickup_depot.code,
                "countryCode": depots.pickup_depot.country_code(),
            }),
        )
        .with(
            "returnDepot",
            json!({
                "depotCode": depots.return_depot.code,
                "countryCode": depots.return_depot.country_code(),
            }),
        )
        .with("alias", alias);
    let params = with_trip_dates(params, &search.date_range);

    RequestDescriptor::query(Endpoint::SearchVehicles, move |body| {
        map_data(&body, |data| wire::search_response(data, depots))
    })
    .params(params)
}
