//! Endpoint registry
//!
//! Every operation maps to a path under one of the API systems. A full URL
//! is `{domain}/{system prefix}/{path}`.

use crate::error::{CarHireError, Result};

/// Backend system an endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiSystem {
    /// The JSON REST API
    Json,
}

impl ApiSystem {
    pub fn prefix(self) -> &'static str {
        match self {
            ApiSystem::Json => "json",
        }
    }
}

/// Logical API operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Account details, used to fetch the alias during setup
    Details,
    NearestDepot,
    SearchVehicles,
    SearchVehicle,
    CreateBooking,
    CancelBooking,
    AllBookings,
    GetBooking,
    SupplierTerms,
    SupplierList,
    BookingTerms,
    TopLocations,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Details => "v1.2",
            Endpoint::NearestDepot => "v1.2/search/nearest-depot-pair",
            Endpoint::SearchVehicles => "v1.2/search/vehicles",
            Endpoint::SearchVehicle => "v1.2/search/vehicle",
            Endpoint::CreateBooking => "v1.2/booking/create",
            Endpoint::CancelBooking => "v1.2/booking/cancel",
            Endpoint::AllBookings => "v1.2/booking/all",
            Endpoint::GetBooking => "v1.2/booking",
            Endpoint::SupplierTerms => "v1.2/supplier/terms",
            Endpoint::SupplierList => "v1.2/supplier/list",
            Endpoint::BookingTerms => "v1.2/booking/terms",
            Endpoint::TopLocations => "v1.2/search/toplocations",
        }
    }

    pub fn system(self) -> ApiSystem {
        ApiSystem::Json
    }

    /// The bootstrap request, the only one allowed before the client is ready
    pub fn is_bootstrap(self) -> bool {
        self == Endpoint::Details
    }

    /// Full URL against the configured domain
    pub fn resolve(self, domain: Option<&str>) -> Result<String> {
        let domain = domain
            .map(|d| d.trim().trim_end_matches('/'))
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                CarHireError::configuration(
                    "No domain has been set, call setup with the API domain first",
                )
            })?;

        Ok(format!(
            "{}/{}/{}",
            domain,
            self.system().prefix(),
            self.path()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(
            Endpoint::Details.resolve(Some("https://x.test")).unwrap(),
            "https://x.test/json/v1.2"
        );
        assert_eq!(
            Endpoint::NearestDepot.resolve(Some("https://x.test/")).unwrap(),
            "https://x.test/json/v1.2/search/nearest-depot-pair"
        );
    }

    #[test]
    fn test_missing_domain_is_configuration_error() {
        for domain in [None, Some(""), Some("  ")] {
            let err = Endpoint::SupplierList.resolve(domain).unwrap_err();
            assert!(matches!(err, CarHireError::Configuration(_)));
        }
    }

    #[test]
    fn test_only_details_is_bootstrap() {
        assert!(Endpoint::Details.is_bootstrap());
        assert!(!Endpoint::SupplierList.is_bootstrap());
        assert!(!Endpoint::TopLocations.is_bootstrap());
    }
}
