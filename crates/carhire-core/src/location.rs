//! Location provider seam
//!
//! Device positioning and place search are platform services. The client
//! only needs the narrow surface below; the default implementation in
//! `carhire-client` answers from the API's top-locations list.

use async_trait::async_trait;

use crate::models::{Coordinate, Location};

/// Source of locations for building a search
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// The device's current position, if known
    async fn current_location(&self) -> Option<Coordinate>;

    /// Free text location search
    async fn search_locations(&self, query: &str) -> Vec<Location>;

    /// Resolve an IATA airport code to a location
    async fn resolve_airport(&self, code: &str) -> Option<Location>;
}
