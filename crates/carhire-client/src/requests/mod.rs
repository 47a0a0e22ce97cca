//! Request descriptors for each API operation
//!
//! Every function here only describes a call: its endpoint, parameters and
//! the decoder that turns the response envelope into a model. Nothing is
//! sent until the descriptor is handed to the executor.

mod alias;
mod bookings;
mod depots;
mod locations;
mod pending;
mod suppliers;
mod terms;
mod vehicles;

pub use alias::alias;
pub use bookings::{cancel_booking, create_booking, fetch_booking};
pub use depots::nearest_depots;
pub use locations::top_locations;
pub use pending::pending_booking;
pub use suppliers::supplier_list;
pub use terms::{booking_terms, supplier_terms};
pub use vehicles::search_vehicles;

use carhire_core::dates::{api_date, api_time};
use carhire_core::DateRange;
use serde_json::Value;

use crate::encoding::Params;
use crate::error::Result;
use crate::request::{envelope_data, envelope_error};

/// Add the pickup and return date and time parameters
fn with_trip_dates(params: Params, range: &DateRange) -> Params {
    params
        .with("pickUpDate", api_date(&range.start))
        .with("pickUpTime", api_time(&range.start))
        .with("returnDate", api_date(&range.end))
        .with("returnTime", api_time(&range.end))
}

/// Map the envelope's `data`, falling back to the envelope error
fn map_data<T>(body: &Value, map: impl FnOnce(&Value) -> Option<T>) -> Result<T> {
    let data = envelope_data(body)?;
    map(data).ok_or_else(|| envelope_error(body))
}
