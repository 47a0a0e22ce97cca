use carhire_core::{DepotPair, PendingBooking, Search, SearchResult};
use tracing::debug;

use super::{map_data, with_trip_dates};
use crate::encoding::Params;
use crate::endpoint::Endpoint;
use crate::request::RequestDescriptor;
use crate::wire;

/// Full quote for a selected search result
pub fn pending_booking(
    search: &Search,
    result: &SearchResult,
    depots: &DepotPair,
) -> RequestDescriptor<PendingBooking> {
    let params = Params::new()
        .with("supplierCode", result.supplier.code.as_str())
        .with("driverCountryCode", search.residency.code.as_str())
        .with("driverAge", search.age.value())
        .with("pickUpDepotCode", depots.pickup_depot.code.as_str())
        .with("returnDepotCode", depots.return_depot.code.as_str())
        .with("carCategoryCode", result.code.as_str());
    let params = with_trip_dates(params, &search.date_range);

    let search = search.clone();
    let depots = depots.clone();
    RequestDescriptor::query(Endpoint::SearchVehicle, move |body| {
        map_data(&body, |data| {
            let vehicle = data.as_object()?.values().next()?;
            wire::pending_booking(vehicle, &depots, &search)
                .map_err(|e| debug!(error = %e, "Pending booking has an unexpected shape"))
                .ok()
                .flatten()
        })
    })
    .params(params)
}
