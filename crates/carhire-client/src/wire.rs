//! JSON wire shapes of the API
//!
//! Each response payload is deserialized into a private wire struct and
//! then converted into the core model. Malformed entries inside a list are
//! skipped with a warning; the rest of the list is still returned.

use std::str::FromStr;

use carhire_core::dates::parse_api_date_time;
use carhire_core::{
    AgeGroup, BookedDriver, BookedExtra, Booking, BookingStatus, Coordinate, Cost, Country,
    DateRange, Depot, DepotPair, Driver, Features, Fee, Location, Luggage, PendingBooking,
    PendingExtra, Search, SearchResponse, SearchResult, Supplier, SupplierTerm, Transmission,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

// =============================================================================
// Helpers
// =============================================================================

/// Items of an array, or the values of an object
pub(crate) fn entries(data: &Value) -> Vec<&Value> {
    match data {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

fn parse<W: DeserializeOwned>(value: &Value) -> Result<W, serde_json::Error> {
    W::deserialize(value)
}

/// Convert every entry, skipping the ones that don't fit
fn decode_each<'a, W, T, I, F>(kind: &'static str, values: I, mut convert: F) -> Vec<T>
where
    W: DeserializeOwned,
    I: IntoIterator<Item = &'a Value>,
    F: FnMut(W) -> Option<T>,
{
    values
        .into_iter()
        .filter_map(|value| match parse::<W>(value) {
            Ok(wire) => {
                let converted = convert(wire);
                if converted.is_none() {
                    warn!(kind, "Skipping entry with invalid values");
                }
                converted
            }
            Err(e) => {
                warn!(kind, error = %e, "Skipping malformed entry");
                None
            }
        })
        .collect()
}

fn decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Image URLs sometimes arrive scheme relative (`//cdn...`)
fn image_url(url: String) -> String {
    if url.contains("http") {
        url
    } else {
        format!("https:{}", url)
    }
}

fn find_supplier(suppliers: &[Supplier], code: &str) -> Option<Supplier> {
    suppliers.iter().find(|supplier| supplier.code == code).cloned()
}

// =============================================================================
// Suppliers
// =============================================================================

#[derive(Deserialize)]
struct WireSupplier {
    code: String,
    name: String,
    image: String,
}

pub(crate) fn suppliers(data: &Value) -> Vec<Supplier> {
    decode_each("supplier", entries(data), |wire: WireSupplier| {
        Some(Supplier::new(wire.code, wire.name, wire.image))
    })
}

// =============================================================================
// Depots
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDepotCandidates {
    #[serde(default)]
    pick_up_depot: Vec<Value>,
    #[serde(default)]
    return_depot: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDepot {
    depot_code: String,
    distance: f64,
    original_distance: f64,
    metadata: WireDepotMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDepotMetadata {
    name: String,
    address: String,
    city: String,
    country_code: String,
    is_airport: bool,
    phone_number: String,
    latitude: f64,
    longitude: f64,
}

fn depot_location(
    name: &str,
    address: &str,
    city: &str,
    country_code: String,
    is_airport: bool,
    coordinate: Coordinate,
) -> Location {
    let mut location = Location::new(
        name,
        format!("{}, {}", address, city),
        country_code,
        coordinate,
    );
    location.is_airport = is_airport;
    location
}

fn depot_candidates(supplier_code: &str, values: &[Value]) -> Vec<Depot> {
    decode_each("depot", values, |wire: WireDepot| {
        let meta = wire.metadata;
        let location = depot_location(
            &meta.name,
            &meta.address,
            &meta.city,
            meta.country_code,
            meta.is_airport,
            Coordinate::new(meta.latitude, meta.longitude),
        );
        Some(Depot {
            code: wire.depot_code,
            name: meta.name,
            phone: meta.phone_number,
            supplier_code: supplier_code.to_string(),
            location,
            distance: Some(wire.distance),
            original_distance: Some(wire.original_distance),
        })
    })
}

/// Nearest depot pair per known supplier
///
/// `None` when `data` is not an object keyed by supplier code. Suppliers
/// that are unknown or lack candidates for either leg are left out.
pub(crate) fn depot_pairs(data: &Value, suppliers: &[Supplier]) -> Option<Vec<DepotPair>> {
    let by_supplier = data.as_object()?;

    let pairs = by_supplier
        .iter()
        .filter_map(|(code, value)| {
            let Some(supplier) = find_supplier(suppliers, code) else {
                warn!(supplier = %code, "Skipping depots for unknown supplier");
                return None;
            };
            let candidates = match parse::<WireDepotCandidates>(value) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(supplier = %code, error = %e, "Skipping malformed depot candidates");
                    return None;
                }
            };
            DepotPair::nearest(
                supplier,
                depot_candidates(code, &candidates.pick_up_depot),
                depot_candidates(code, &candidates.return_depot),
            )
        })
        .collect();
    Some(pairs)
}

// =============================================================================
// Vehicles
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVehicle {
    name: String,
    vehicle_image: String,
    mileage: String,
    category: String,
    category_code: String,
    #[serde(rename = "rateID")]
    rate_id: String,
    pick_up_depot_code: Option<String>,
    return_depot_code: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCost {
    vehicle_cost: WireVehicleCost,
    currency_code: String,
    per_day_price: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVehicleCost {
    total_cost: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFeatures {
    transmission: WireTransmission,
    #[serde(default)]
    has_air_conditioning: bool,
    #[serde(default)]
    door_count: u32,
    #[serde(default)]
    seat_count: u32,
    #[serde(default)]
    luggage: WireLuggage,
}

#[derive(Deserialize)]
struct WireTransmission {
    code: String,
    name: String,
}

#[derive(Deserialize, Default)]
struct WireLuggage {
    #[serde(default)]
    small: u32,
    #[serde(default)]
    large: u32,
}

fn cost(value: &Value) -> Result<Option<Cost>, serde_json::Error> {
    let wire: WireCost = parse(value)?;
    Ok(decimal(wire.vehicle_cost.total_cost).map(|total| Cost {
        total,
        per_day: wire.per_day_price.and_then(decimal),
        currency: wire.currency_code,
    }))
}

fn features(value: &Value) -> Result<Features, serde_json::Error> {
    let wire: WireFeatures = parse(value)?;
    Ok(Features {
        air_conditioning: wire.has_air_conditioning,
        transmission: Transmission {
            code: wire.transmission.code,
            name: wire.transmission.name,
        },
        doors: wire.door_count,
        seats: wire.seat_count,
        luggage: Luggage {
            small: wire.luggage.small,
            large: wire.luggage.large,
        },
    })
}

fn search_result(
    value: &Value,
    supplier: &Supplier,
) -> Result<Option<SearchResult>, serde_json::Error> {
    let wire: WireVehicle = parse(value)?;
    let Some(cost) = cost(value)? else {
        return Ok(None);
    };
    Ok(Some(SearchResult {
        name: wire.name,
        image_url: image_url(wire.vehicle_image),
        mileage: wire.mileage,
        category: wire.category,
        code: wire.category_code,
        rate_id: wire.rate_id,
        cost,
        features: features(value)?,
        supplier: supplier.clone(),
        pickup_code: wire.pick_up_depot_code,
        return_code: wire.return_depot_code,
    }))
}

/// Results for one depot pair; `data` may be an object or an array
pub(crate) fn search_response(data: &Value, depots: DepotPair) -> Option<SearchResponse> {
    if !(data.is_object() || data.is_array()) {
        return None;
    }

    let results = entries(data)
        .into_iter()
        .filter_map(|value| match search_result(value, &depots.supplier) {
            Ok(result) => result,
            Err(e) => {
                warn!(supplier = %depots.supplier.code, error = %e, "Skipping malformed result");
                None
            }
        })
        .collect();

    Some(SearchResponse { depots, results })
}

// =============================================================================
// Pending booking
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePendingDetails {
    sipp_id: i64,
    vehicle_category: WireId,
    vehicle_class: WireId,
    #[serde(default)]
    fees: Vec<Value>,
    #[serde(default)]
    extras: Vec<Value>,
}

#[derive(Deserialize)]
struct WireId {
    id: i64,
}

#[derive(Deserialize)]
struct WireFee {
    amount: f64,
    description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePendingExtra {
    id: u32,
    name: String,
    price: f64,
    max_quantity: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    max_price: Option<String>,
}

fn fees(values: &[Value]) -> Vec<Fee> {
    decode_each("fee", values, |wire: WireFee| {
        Some(Fee {
            amount: decimal(wire.amount)?,
            description: wire.description,
        })
    })
}

fn pending_extras(values: &[Value]) -> Vec<PendingExtra> {
    decode_each("extra", values, |wire: WirePendingExtra| {
        Some(PendingExtra {
            id: wire.id,
            name: wire.name,
            description: wire.description.unwrap_or_default(),
            price: decimal(wire.price)?,
            max_price: wire
                .max_price
                .as_deref()
                .and_then(|price| Decimal::from_str(price).ok()),
            max_quantity: wire.max_quantity,
            quantity_requested: 0,
        })
    })
}

/// Detailed quote for a selected result
pub(crate) fn pending_booking(
    value: &Value,
    depots: &DepotPair,
    search: &Search,
) -> Result<Option<PendingBooking>, serde_json::Error> {
    let details: WirePendingDetails = parse(value)?;
    let Some(result) = search_result(value, &depots.supplier)? else {
        return Ok(None);
    };

    let driver = Driver {
        phone_country_prefix: search.residency.phone_prefix.clone(),
        ..Driver::default()
    };

    Ok(Some(PendingBooking {
        result,
        depots: depots.clone(),
        date_range: search.date_range,
        age: search.age,
        residency: search.residency.clone(),
        fees: fees(&details.fees),
        extras: pending_extras(&details.extras),
        driver,
        flight_number: None,
        class_id: details.vehicle_class.id,
        category_id: details.vehicle_category.id,
        sipp_id: details.sipp_id,
    }))
}

// =============================================================================
// Bookings
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBooking {
    #[serde(rename = "bookingID")]
    booking_id: i64,
    confirmation: String,
    supplier_code: String,
    name: String,
    vehicle_image: String,
    mileage: String,
    driver: WireBookedDriver,
    booking_status: WireBookingStatus,
    pickup_depot: WireBookingDepot,
    return_depot: WireBookingDepot,
    pick_up: WireDateTime,
    #[serde(rename = "return")]
    return_at: WireDateTime,
    #[serde(default)]
    fees: Vec<Value>,
    #[serde(default)]
    extras: Vec<Value>,
    flight_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBookedDriver {
    country_code: String,
    driver_age: u64,
    title: String,
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
}

#[derive(Deserialize)]
struct WireBookingStatus {
    id: i64,
    name: String,
    description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBookingDepot {
    code: String,
    name: String,
    address: String,
    city: String,
    country_code: String,
    is_airport: bool,
    geo_location: WireGeoLocation,
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Deserialize)]
struct WireGeoLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct WireDateTime {
    date: String,
    time: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBookedExtra {
    #[serde(rename = "extraID")]
    extra_id: u32,
    extra_name: String,
    description: String,
    pivot: WirePivot,
}

#[derive(Deserialize)]
struct WirePivot {
    quantity: u32,
    price: String,
}

/// Cancelled bookings carry this status id
const CANCELLED_STATUS_ID: i64 = 3;

fn booking_depot(wire: WireBookingDepot, supplier_code: &str) -> Depot {
    let location = depot_location(
        &wire.name,
        &wire.address,
        &wire.city,
        wire.country_code,
        wire.is_airport,
        Coordinate::new(wire.geo_location.latitude, wire.geo_location.longitude),
    );
    Depot {
        code: wire.code,
        name: wire.name,
        phone: wire.phone_number.unwrap_or_default(),
        supplier_code: supplier_code.to_string(),
        location,
        distance: None,
        original_distance: None,
    }
}

fn booked_extras(values: &[Value]) -> Vec<BookedExtra> {
    decode_each("booked extra", values, |wire: WireBookedExtra| {
        Some(BookedExtra {
            id: wire.extra_id,
            name: wire.extra_name,
            description: wire.description,
            price: Decimal::from_str(&wire.pivot.price).ok()?,
            quantity: wire.pivot.quantity,
        })
    })
}

/// A confirmed booking
///
/// `Ok(None)` when the booking is well formed JSON but references an
/// unknown supplier or carries unusable values.
pub(crate) fn booking(
    value: &Value,
    suppliers: &[Supplier],
) -> Result<Option<Booking>, serde_json::Error> {
    let wire: WireBooking = parse(value)?;
    let Some(cost) = cost(value)? else {
        return Ok(None);
    };
    let features = features(value)?;

    let Some(supplier) = find_supplier(suppliers, &wire.supplier_code) else {
        warn!(supplier = %wire.supplier_code, "Booking references an unknown supplier");
        return Ok(None);
    };
    let Some(age) = AgeGroup::from_value(wire.driver.driver_age) else {
        return Ok(None);
    };
    let (Some(start), Some(end)) = (
        parse_api_date_time(&wire.pick_up.date, &wire.pick_up.time),
        parse_api_date_time(&wire.return_at.date, &wire.return_at.time),
    ) else {
        return Ok(None);
    };

    let depots = DepotPair::new(
        supplier,
        booking_depot(wire.pickup_depot, &wire.supplier_code),
        booking_depot(wire.return_depot, &wire.supplier_code),
    );

    Ok(Some(Booking {
        id: wire.booking_id,
        supplier_confirmation: wire.confirmation,
        vehicle_name: wire.name,
        image_url: image_url(wire.vehicle_image),
        mileage: wire.mileage,
        driver: BookedDriver {
            residency: Country::new(wire.driver.country_code),
            age,
            title: wire.driver.title,
            first_name: wire.driver.first_name,
            last_name: wire.driver.last_name,
            email: wire.driver.email,
            phone_number: wire.driver.phone,
        },
        cost,
        fees: fees(&wire.fees),
        extras: booked_extras(&wire.extras),
        features,
        date_range: DateRange::new(start, end),
        depots,
        status: BookingStatus {
            name: wire.booking_status.name,
            text: wire.booking_status.description,
            is_cancelled: wire.booking_status.id == CANCELLED_STATUS_ID,
        },
        flight_number: wire.flight_number,
    }))
}

// =============================================================================
// Terms
// =============================================================================

#[derive(Deserialize)]
struct WireTerms {
    terms: Vec<Value>,
}

#[derive(Deserialize)]
struct WireTerm {
    title: String,
    description: String,
    #[serde(rename = "supplierURL", default)]
    supplier_url: Option<String>,
    #[serde(default)]
    ordinal: i64,
}

/// Terms ordered by their ordinal
pub(crate) fn terms(data: &Value) -> Option<Vec<SupplierTerm>> {
    let wire: WireTerms = parse(data).ok()?;
    let mut terms = decode_each("term", &wire.terms, |term: WireTerm| {
        Some(SupplierTerm {
            title: term.title,
            text: term.description,
            supplier_url: term.supplier_url,
            order: term.ordinal,
        })
    });
    terms.sort_by_key(|term| term.order);
    Some(terms)
}

// =============================================================================
// Locations
// =============================================================================

/// The two shapes the top locations endpoint returns
#[derive(Deserialize)]
#[serde(untagged)]
enum WireLocation {
    #[serde(rename_all = "camelCase")]
    Top {
        latitude: String,
        longitude: String,
        full_location_name: String,
        display_name: String,
        country_name: String,
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        is_airport: bool,
    },
    #[serde(rename_all = "camelCase")]
    Search {
        latitude: String,
        longitude: String,
        location: String,
        name: String,
        country_name: String,
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        is_airport: bool,
    },
}

fn location(wire: WireLocation) -> Option<Location> {
    let (latitude, longitude, title, subtitle, country, code, is_airport) = match wire {
        WireLocation::Top {
            latitude,
            longitude,
            full_location_name,
            display_name,
            country_name,
            code,
            is_airport,
        } => (
            latitude,
            longitude,
            display_name,
            full_location_name,
            country_name,
            code,
            is_airport,
        ),
        WireLocation::Search {
            latitude,
            longitude,
            location,
            name,
            country_name,
            code,
            is_airport,
        } => (latitude, longitude, name, location, country_name, code, is_airport),
    };

    let coordinate = Coordinate::new(
        latitude.trim().parse().ok()?,
        longitude.trim().parse().ok()?,
    );
    let mut location = Location::new(title, subtitle, country, coordinate);
    location.is_airport = is_airport;
    location.airport_code = code;
    Some(location)
}

pub(crate) fn locations(data: &Value) -> Vec<Location> {
    decode_each("location", entries(data), location)
}


#[cfg(test)]
mod tests {
    use super::samples;
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn known_suppliers() -> Vec<Supplier> {
        suppliers(&samples::supplier_list()["data"])
    }

    #[test]
    fn test_suppliers_skip_malformed() {
        let data = json!([
            {"code": "HZ", "name": "Hertz", "image": "x"},
            {"code": "AV", "name": "Avis"},
            "junk"
        ]);
        let list = suppliers(&data);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].code, "HZ");
    }

    #[test]
    fn test_depot_pairs_pick_nearest() {
        let body = samples::depots(&["HZ", "AV"]);
        let pairs = depot_pairs(&body["data"], &known_suppliers()).unwrap();

        assert_eq!(pairs.len(), 2);
        let hz = pairs.iter().find(|p| p.supplier.code == "HZ").unwrap();
        assert_eq!(hz.pickup_depot.code, "HZ2");
        assert_eq!(hz.return_depot.code, "HZ3");
        assert_eq!(hz.pickup_depot.location.subtitle, "1 Airport Dr, Mascot");
        assert!(hz.pickup_depot.location.is_airport);
        assert_eq!(hz.pickup_depot.country_code(), "AU");
    }

    #[test]
    fn test_depot_pairs_drop_unknown_and_empty() {
        let data = json!({
            "ZZ": {"pickUpDepot": [samples::depot("Z1", 1.0)], "returnDepot": [samples::depot("Z2", 1.0)]},
            "HZ": {"pickUpDepot": [], "returnDepot": [samples::depot("H2", 1.0)]},
            "AV": {"pickUpDepot": [samples::depot("A1", 1.0)], "returnDepot": [samples::depot("A2", 1.0)]}
        });
        let pairs = depot_pairs(&data, &known_suppliers()).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].supplier.code, "AV");

        assert!(depot_pairs(&json!([]), &known_suppliers()).is_none());
    }

    #[test]
    fn test_search_response_from_object_and_array() {
        let depots = DepotPair::new(
            Supplier::new("HZ", "Hertz", ""),
            depot_candidates("HZ", &[samples::depot("SYD", 1.0)]).remove(0),
            depot_candidates("HZ", &[samples::depot("SYD", 1.0)]).remove(0),
        );

        let body = samples::vehicles(&[("Yaris", 99.5), ("Corolla", 150.0)]);
        let response = search_response(&body["data"], depots.clone()).unwrap();
        assert_eq!(response.results.len(), 2);

        let car = &response.results[0];
        assert_eq!(car.image_url, "https://img.test/car.png");
        assert_eq!(car.cost.total, Decimal::new(995, 1));
        assert_eq!(car.cost.per_day, Some(Decimal::new(335, 1)));
        assert_eq!(car.features.luggage.large, 2);
        assert_eq!(car.supplier.code, "HZ");

        let array = json!([samples::vehicle("Yaris", 99.5), {"name": "broken"}]);
        let response = search_response(&array, depots.clone()).unwrap();
        assert_eq!(response.results.len(), 1);

        assert!(search_response(&json!("nope"), depots).is_none());
    }

    #[test]
    fn test_pending_booking() {
        let supplier = Supplier::new("HZ", "Hertz", "");
        let depot = depot_candidates("HZ", &[samples::depot("SYD", 1.0)]).remove(0);
        let depots = DepotPair::new(supplier, depot.clone(), depot);
        let search = Search::default();

        let pending = pending_booking(&samples::pending_vehicle(), &depots, &search)
            .unwrap()
            .unwrap();
        assert_eq!(pending.sipp_id, 11);
        assert_eq!(pending.category_id, 7);
        assert_eq!(pending.class_id, 3);
        assert_eq!(pending.fees.len(), 1);
        assert_eq!(pending.extras.len(), 2);
        assert_eq!(pending.extras[1].max_price, Some(Decimal::new(4500, 2)));
        assert_eq!(pending.driver.phone_country_prefix.as_deref(), Some("+61"));
        assert_eq!(pending.result.name, "Toyota Corolla or similar");
    }

    #[test]
    fn test_booking() {
        let booking = booking(&samples::booking(1), &known_suppliers())
            .unwrap()
            .unwrap();
        assert_eq!(booking.id, 4242);
        assert_eq!(booking.supplier_confirmation, "HZ123456");
        assert_eq!(booking.driver.full_name(), "Mr Sam Driver");
        assert_eq!(booking.driver.age, AgeGroup::Thirty);
        assert!(!booking.status.is_cancelled);
        assert_eq!(booking.depots.supplier.name, "Hertz");
        assert_eq!(booking.extras[0].price, Decimal::new(1500, 2));
        assert_eq!(booking.flight_number.as_deref(), Some("QF123"));
        assert_eq!(
            booking.pickup_time().format("%Y-%m-%d %H:%M").to_string(),
            "2026-11-02 10:00"
        );
    }

    #[test]
    fn test_cancelled_booking_and_unknown_supplier() {
        let cancelled = booking(&samples::booking(3), &known_suppliers())
            .unwrap()
            .unwrap();
        assert!(cancelled.status.is_cancelled);

        assert!(booking(&samples::booking(1), &[]).unwrap().is_none());
        assert!(booking(&json!({"bookingID": 1}), &known_suppliers()).is_err());
    }

    #[test]
    fn test_terms_sorted_by_ordinal() {
        let data = json!({"terms": [
            {"title": "Fuel", "description": "Full to full", "ordinal": 3},
            {"title": "Age", "description": "21+", "ordinal": 1, "supplierURL": "https://hz.test"},
            {"title": "Broken"}
        ]});
        let terms = terms(&data).unwrap();
        let titles: Vec<_> = terms.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Age", "Fuel"]);
        assert_eq!(terms[0].supplier_url.as_deref(), Some("https://hz.test"));

        assert!(super::terms(&json!([])).is_none());
    }

    #[test]
    fn test_locations_both_shapes() {
        let data = json!([
            {
                "latitude": "-33.9399", "longitude": "151.1753",
                "fullLocationName": "Sydney Airport, NSW, Australia",
                "displayName": "Sydney Airport", "countryName": "Australia",
                "code": "SYD", "isAirport": true
            },
            {
                "latitude": "-27.4698", "longitude": "153.0251",
                "location": "Brisbane, QLD, Australia", "name": "Brisbane",
                "countryName": "Australia"
            },
            {"latitude": "north", "longitude": "1", "location": "x", "name": "x", "countryName": "x"}
        ]);
        let list = locations(&data);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "Sydney Airport");
        assert_eq!(list[0].airport_code.as_deref(), Some("SYD"));
        assert!(list[0].is_airport);
        assert_eq!(list[1].subtitle, "Brisbane, QLD, Australia");
        assert!(!list[1].is_airport);
    }
}
