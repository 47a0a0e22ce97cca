use carhire_core::{PendingBooking, SupplierTerm};

use super::{map_data, with_trip_dates};
use crate::encoding::Params;
use crate::endpoint::Endpoint;
use crate::request::RequestDescriptor;
use crate::wire;

fn terms_request(endpoint: Endpoint, params: Params) -> RequestDescriptor<Vec<SupplierTerm>> {
    RequestDescriptor::query(endpoint, |body| map_data(&body, wire::terms)).params(params)
}

/// Terms and conditions attached to a confirmed booking
pub fn booking_terms(booking_id: i64) -> RequestDescriptor<Vec<SupplierTerm>> {
    terms_request(
        Endpoint::BookingTerms,
        Params::new().with("bookingID", booking_id),
    )
}

/// Supplier terms and conditions for a quote
pub fn supplier_terms(pending: &PendingBooking) -> RequestDescriptor<Vec<SupplierTerm>> {
    let params = Params::new()
        .with("supplier", pending.result.supplier.code.as_str())
        .with("countryOfResidence", pending.residency.code.as_str())
        .with("driverAge", pending.age.value())
        .with("pickUpLocationCode", pending.depots.pickup_depot.code.as_str())
        .with("returnLocationCode", pending.depots.return_depot.code.as_str())
        .with("carCategoryCode", pending.result.code.as_str())
        .with("rateID", pending.result.rate_id.as_str());
    terms_request(
        Endpoint::SupplierTerms,
        with_trip_dates(params, &pending.date_range),
    )
}
