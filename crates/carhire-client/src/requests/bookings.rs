use std::sync::Arc;

use carhire_core::{amount_string, Booking, PendingBooking, PendingExtra, Supplier};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::with_trip_dates;
use crate::encoding::{ParameterEncoding, Params};
use crate::endpoint::Endpoint;
use crate::error::{CarHireError, Result, UNKNOWN_ERROR};
use crate::request::{envelope_error, envelope_message, HttpMethod, RequestDescriptor};
use crate::wire;

/// Sent as `requestURL` to identify the SDK as the booking channel
const REQUEST_SOURCE: &str = "iphone";

/// Sent in place of empty extras or fees
const NULL_PARAM: &str = "null";

fn decode_booking(body: &Value, suppliers: &[Supplier]) -> Option<Booking> {
    let data = body.get("data").filter(|data| data.is_object())?;
    wire::booking(data, suppliers)
        .map_err(|e| debug!(error = %e, "Booking has an unexpected shape"))
        .ok()
        .flatten()
}

// =============================================================================
// Create
// =============================================================================

fn equipment_entry(extra: &PendingExtra) -> Value {
    let max_quantity: Map<String, Value> = (0..extra.max_quantity)
        .map(|slot| (slot.to_string(), json!(NULL_PARAM)))
        .collect();

    let mut entry = json!({
        "extrasID": extra.id,
        "name": extra.name,
        "price": amount_string(&extra.price),
        "maxQuantity": max_quantity,
        "quantity": extra.quantity_requested,
    });
    if let (Some(max_price), Some(map)) = (&extra.max_price, entry.as_object_mut()) {
        map.insert("maxPrice".to_string(), json!(amount_string(max_price)));
    }
    entry
}

fn equipment_list(pending: &PendingBooking) -> Value {
    if pending.extras.is_empty() {
        return json!(NULL_PARAM);
    }
    let list: Map<String, Value> = pending
        .extras
        .iter()
        .map(|extra| (extra.id.to_string(), equipment_entry(extra)))
        .collect();
    Value::Object(list)
}

/// Fees go over the wire as a JSON encoded string
fn fees_param(pending: &PendingBooking) -> Result<Value> {
    if pending.fees.is_empty() {
        return Ok(json!(NULL_PARAM));
    }
    let fees: Vec<Value> = pending
        .fees
        .iter()
        .map(|fee| {
            let amount = amount_string(&fee.amount);
            json!({
                "amount": amount,
                "description": fee.description,
                "xrsBaseAmount": amount,
            })
        })
        .collect();
    let encoded =
        serde_json::to_string(&fees).map_err(|e| CarHireError::Encoding(e.to_string()))?;
    Ok(Value::String(encoded))
}

/// Submit a pending booking
pub fn create_booking(
    pending: &PendingBooking,
    alias: &str,
    suppliers: Arc<Vec<Supplier>>,
) -> Result<RequestDescriptor<Booking>> {
    let result = &pending.result;
    let driver = &pending.driver;

    let mut params = Params::new()
        .with("requestURL", REQUEST_SOURCE)
        .with("alias", alias)
        .with("supplierCode", pending.depots.supplier.code.as_str())
        .with("countryOfResidence", pending.residency.code.as_str())
        .with("driverAge", pending.age.value())
        .with("pickUpDepotCode", pending.depots.pickup_depot.code.as_str())
        .with("returnDepotCode", pending.depots.return_depot.code.as_str())
        .with("carCategoryCode", result.code.as_str())
        .with("agree", true)
        .with("newsletter", false)
        .with("sendSms", true)
        .with("sendEmail", true)
        .with("sippID", pending.sipp_id)
        .with("title", json!(driver.title))
        .with("firstName", json!(driver.first_name))
        .with("lastName", json!(driver.last_name))
        .with("email", json!(driver.email))
        .with("phoneNumber", json!(driver.international_phone_number()))
        .with("totalCost", amount_string(&result.cost.total))
        .with("currencyCode", result.cost.currency.as_str())
        .with("rateID", result.rate_id.as_str())
        .with("vehicleImage", result.image_url.as_str())
        .with("mileage", result.mileage.as_str())
        .with(
            "vehicleDetails",
            json!({
                "vehicleClassID": pending.class_id,
                "vehicleCategoryID": pending.category_id,
                "transmissionType": result.features.transmission.code,
                "airConditioned": result.features.air_conditioning,
            }),
        )
        .with("equipmentList", equipment_list(pending))
        .with("fees", fees_param(pending)?);
    if let Some(flight_number) = &pending.flight_number {
        params.insert("flightNumber", flight_number.as_str());
    }
    let params = with_trip_dates(params, &pending.date_range);

    let descriptor = RequestDescriptor::new(Endpoint::CreateBooking, move |body| {
        decode_booking(&body, &suppliers).ok_or_else(|| envelope_error(&body))
    })
    .params(params);
    Ok(descriptor)
}

// =============================================================================
// Cancel
// =============================================================================

/// Cancel a booking with the supplier
pub fn cancel_booking(booking: &Booking) -> RequestDescriptor<()> {
    RequestDescriptor::new(Endpoint::CancelBooking, |body| {
        match body.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(()),
            _ => Err(envelope_error(&body)),
        }
    })
    .method(HttpMethod::Post)
    .encoding(ParameterEncoding::UrlQuery)
    .params(
        Params::new()
            .with("bookingID", booking.id)
            .with("supplierConfirmation", booking.supplier_confirmation.as_str()),
    )
}

// =============================================================================
// Fetch
// =============================================================================

/// Why a lookup by confirmation and last name found nothing
fn lookup_error(body: &Value) -> CarHireError {
    if let Some(message) = envelope_message(body) {
        return CarHireError::api(message);
    }
    let Some(fields) = body.get("message").and_then(Value::as_object) else {
        return CarHireError::decode(UNKNOWN_ERROR);
    };

    let has_errors = |field: &str| {
        fields
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty())
    };
    let message = if has_errors("lastName") {
        "No matching booking for Lastname"
    } else if has_errors("supplierConfirmation") {
        "No matching booking for Booking confirmation number"
    } else {
        "No Booking found, please try again."
    };
    CarHireError::api(message)
}

/// Look up a booking by its confirmation number and the driver's last name
pub fn fetch_booking(
    confirmation: &str,
    last_name: &str,
    suppliers: Arc<Vec<Supplier>>,
) -> RequestDescriptor<Booking> {
    RequestDescriptor::query(Endpoint::GetBooking, move |body| {
        decode_booking(&body, &suppliers).ok_or_else(|| lookup_error(&body))
    })
    .params(
        Params::new()
            .with("supplierConfirmation", confirmation)
            .with("lastName", last_name),
    )
}
