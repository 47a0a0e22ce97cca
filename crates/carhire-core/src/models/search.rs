//! Search input and validation

use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Location, Supplier};
use crate::dates;

/// Driver age bracket
///
/// The discriminant is the age sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeGroup {
    TwentyOne = 21,
    TwentyFive = 25,
    #[default]
    Thirty = 30,
    Seventy = 70,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::TwentyOne,
        AgeGroup::TwentyFive,
        AgeGroup::Thirty,
        AgeGroup::Seventy,
    ];

    /// Age value used in requests
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|age| u64::from(age.value()) == value)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgeGroup::TwentyOne => "21 - 24",
            AgeGroup::TwentyFive => "25 - 29",
            AgeGroup::Thirty => "30 - 69",
            AgeGroup::Seventy => "70+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Country of residence of the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166 alpha-2 code
    pub code: String,
    /// International dialling prefix, e.g. "+61"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_prefix: Option<String>,
}

impl Country {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            phone_prefix: None,
        }
    }

    pub fn with_phone_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.phone_prefix = Some(prefix.into());
        self
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::new("AU").with_phone_prefix("+61")
    }
}

/// Pickup and return times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The default range relative to `now`
    pub fn starting_after(now: NaiveDateTime) -> Self {
        let (start, end) = dates::default_range(now);
        Self { start, end }
    }

    /// Whether the return day is not before the pickup day
    pub fn is_ordered(&self) -> bool {
        self.end.date() >= self.start.date()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::starting_after(Local::now().naive_local())
    }
}

/// Reasons a search cannot be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    PickupLocation,
    ReturnLocation,
    Date,
}

impl SearchError {
    pub fn message(self) -> &'static str {
        match self {
            SearchError::PickupLocation => "Please enter a Pickup Location",
            SearchError::ReturnLocation => "Please enter a Return Location",
            SearchError::Date => "Return Date must be after pickup date",
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything needed to search for vehicles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub age: AgeGroup,
    pub residency: Country,
    pub pickup_location: Option<Location>,
    pub return_location: Option<Location>,
    /// Only search these suppliers; empty means all
    #[serde(default)]
    pub limit_to_suppliers: Vec<Supplier>,
    pub date_range: DateRange,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up and return at the same place
    pub fn at(location: Location, date_range: DateRange) -> Self {
        Self {
            pickup_location: Some(location.clone()),
            return_location: Some(location),
            date_range,
            ..Self::default()
        }
    }

    /// All problems preventing this search, in display order
    pub fn errors(&self) -> Vec<SearchError> {
        let mut errors = Vec::new();
        if self.pickup_location.is_none() {
            errors.push(SearchError::PickupLocation);
        }
        if self.return_location.is_none() {
            errors.push(SearchError::ReturnLocation);
        }
        if !self.date_range.is_ordered() {
            errors.push(SearchError::Date);
        }
        errors
    }

    pub fn validate(&self) -> Result<(), Vec<SearchError>> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whether results from `supplier` are wanted
    pub fn includes_supplier(&self, supplier: &Supplier) -> bool {
        self.limit_to_suppliers.is_empty() || self.limit_to_suppliers.contains(supplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_api_date_time;
    use crate::models::Coordinate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sydney() -> Location {
        Location::new("Sydney", "NSW", "AU", Coordinate::new(-33.86, 151.2))
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            parse_api_date_time(start, "10:00").unwrap(),
            parse_api_date_time(end, "09:00").unwrap(),
        )
    }

    #[test]
    fn test_missing_pickup_only() {
        let search = Search {
            return_location: Some(sydney()),
            date_range: range("2024-03-01", "2024-03-04"),
            ..Search::default()
        };
        assert_eq!(search.validate(), Err(vec![SearchError::PickupLocation]));
    }

    #[test]
    fn test_return_before_pickup() {
        let search = Search::at(sydney(), range("2024-03-04", "2024-03-01"));
        assert_eq!(search.validate(), Err(vec![SearchError::Date]));
    }

    #[test]
    fn test_same_day_return_is_valid() {
        // Earlier time on the same day still passes, only dates are compared
        let search = Search::at(sydney(), range("2024-03-01", "2024-03-01"));
        assert!(search.validate().is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let search = Search {
            date_range: range("2024-03-04", "2024-03-01"),
            ..Search::default()
        };
        let messages: Vec<_> = search.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Please enter a Pickup Location",
                "Please enter a Return Location",
                "Return Date must be after pickup date",
            ]
        );
    }

    #[rstest]
    #[case(AgeGroup::TwentyOne, 21, "21 - 24")]
    #[case(AgeGroup::TwentyFive, 25, "25 - 29")]
    #[case(AgeGroup::Thirty, 30, "30 - 69")]
    #[case(AgeGroup::Seventy, 70, "70+")]
    fn test_age_groups(#[case] age: AgeGroup, #[case] value: u8, #[case] name: &str) {
        assert_eq!(age.value(), value);
        assert_eq!(age.display_name(), name);
        assert_eq!(AgeGroup::from_value(u64::from(value)), Some(age));
    }

    #[test]
    fn test_supplier_limit() {
        let hertz = Supplier::new("HZ", "Hertz", "");
        let avis = Supplier::new("AV", "Avis", "");

        let mut search = Search::new();
        assert!(search.includes_supplier(&hertz));

        search.limit_to_suppliers = vec![avis.clone()];
        assert!(!search.includes_supplier(&hertz));
        assert!(search.includes_supplier(&avis));
    }

    #[test]
    fn test_default_residency() {
        let search = Search::new();
        assert_eq!(search.residency.code, "AU");
        assert_eq!(search.residency.phone_prefix.as_deref(), Some("+61"));
        assert_eq!(search.age, AgeGroup::Thirty);
    }
}
