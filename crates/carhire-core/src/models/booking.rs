//! Pending and confirmed bookings

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeGroup, Cost, Country, DateRange, DepotPair, Features, SearchResult};
use crate::error::{ModelError, ModelResult};

/// Extra ids that are child or booster seats
const SEAT_EXTRA_IDS: [u32; 3] = [2, 3, 4];
/// Combined seat extras allowed on one booking
const MAX_SEATS_PER_BOOKING: u32 = 2;

/// One line of a fee breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Decimal,
    pub description: String,
}

/// An optional extra offered with a pending booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingExtra {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    pub max_quantity: u32,
    #[serde(default)]
    pub quantity_requested: u32,
}

impl PendingExtra {
    pub fn is_seat(&self) -> bool {
        SEAT_EXTRA_IDS.contains(&self.id)
    }
}

/// Outcome of asking for more of an extra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraRequestStatus {
    Completed,
    OverMaxQuantity,
    OverTotalSeatsAllowed,
}

/// Driver fields that fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverDetail {
    Title,
    FirstName,
    LastName,
    Email,
    Phone,
}

/// Editable driver details attached to a pending booking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub phone_country_prefix: Option<String>,
}

impl Driver {
    /// "Title First Last", or empty until all three are set
    pub fn full_name(&self) -> String {
        match (&self.title, &self.first_name, &self.last_name) {
            (Some(title), Some(first), Some(last)) => format!("{} {} {}", title, first, last),
            _ => String::new(),
        }
    }

    /// Every missing or blank field
    pub fn invalid_details(&self) -> Vec<DriverDetail> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        [
            (DriverDetail::Title, &self.title),
            (DriverDetail::FirstName, &self.first_name),
            (DriverDetail::LastName, &self.last_name),
            (DriverDetail::Email, &self.email),
            (DriverDetail::Phone, &self.phone_number),
        ]
        .into_iter()
        .filter(|(_, value)| blank(value))
        .map(|(detail, _)| detail)
        .collect()
    }

    /// Phone number with the country prefix, e.g. "+61414444444"
    ///
    /// Numbers already carrying the prefix are left alone. Australian
    /// numbers lose their trunk `0`.
    pub fn international_phone_number(&self) -> Option<String> {
        let prefix = self.phone_country_prefix.as_deref()?;
        let phone = self.phone_number.as_deref()?;

        if phone.contains(prefix) {
            return Some(phone.to_string());
        }
        let phone = match phone.strip_prefix('0') {
            Some(rest) if prefix == "+61" => rest,
            _ => phone,
        };
        Some(format!("{}{}", prefix, phone))
    }
}

/// A detailed quote for one vehicle, ready to be submitted as a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingBooking {
    pub result: SearchResult,
    pub depots: DepotPair,
    pub date_range: DateRange,
    pub age: AgeGroup,
    pub residency: Country,
    pub fees: Vec<Fee>,
    pub extras: Vec<PendingExtra>,
    pub driver: Driver,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    pub class_id: i64,
    pub category_id: i64,
    pub sipp_id: i64,
}

impl PendingBooking {
    /// Change the requested quantity of an extra
    ///
    /// An amount of zero removes the extra.
    pub fn request_extra(&mut self, extra_id: u32, amount: u32) -> ModelResult<ExtraRequestStatus> {
        let seats = self.total_seats_requested();
        let extra = self
            .extras
            .iter_mut()
            .find(|extra| extra.id == extra_id)
            .ok_or(ModelError::ExtraNotFound(extra_id))?;

        if amount == 0 {
            extra.quantity_requested = 0;
            return Ok(ExtraRequestStatus::Completed);
        }
        if amount + extra.quantity_requested > extra.max_quantity {
            return Ok(ExtraRequestStatus::OverMaxQuantity);
        }
        if extra.is_seat() && amount + extra.quantity_requested + seats > MAX_SEATS_PER_BOOKING {
            return Ok(ExtraRequestStatus::OverTotalSeatsAllowed);
        }

        extra.quantity_requested += amount;
        Ok(ExtraRequestStatus::Completed)
    }

    /// Seats requested across all seat extras
    pub fn total_seats_requested(&self) -> u32 {
        self.extras
            .iter()
            .filter(|extra| extra.is_seat())
            .map(|extra| extra.quantity_requested)
            .sum()
    }

    /// Attach a flight number so the depot holds the car for a delayed flight
    pub fn add_flight_number(&mut self, flight_number: &str) -> ModelResult<()> {
        if !is_valid_flight_number(flight_number) {
            return Err(ModelError::InvalidFlightNumber(flight_number.to_string()));
        }
        self.flight_number = Some(flight_number.to_string());
        Ok(())
    }
}

/// Two letters then three digits, five to seven characters overall
pub fn is_valid_flight_number(flight_number: &str) -> bool {
    let chars: Vec<char> = flight_number.chars().collect();
    if !(5..=7).contains(&chars.len()) {
        return false;
    }
    chars[..2].iter().all(|c| c.is_alphabetic()) && chars[2..5].iter().all(|c| c.is_ascii_digit())
}

/// Driver details recorded on a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedDriver {
    pub residency: Country,
    pub age: AgeGroup,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl BookedDriver {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.title, self.first_name, self.last_name)
    }
}

/// An extra included in a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedExtra {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatus {
    pub name: String,
    pub text: String,
    pub is_cancelled: bool,
}

/// A booking confirmed with the supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub supplier_confirmation: String,
    pub vehicle_name: String,
    pub image_url: String,
    pub mileage: String,
    pub driver: BookedDriver,
    pub cost: Cost,
    pub fees: Vec<Fee>,
    pub extras: Vec<BookedExtra>,
    pub features: Features,
    pub date_range: DateRange,
    pub depots: DepotPair,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
}

impl Booking {
    pub fn pickup_time(&self) -> NaiveDateTime {
        self.date_range.start
    }

    pub fn return_time(&self) -> NaiveDateTime {
        self.date_range.end
    }
}
