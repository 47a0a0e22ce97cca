//! Location provider backed by the API's top locations list

use async_trait::async_trait;
use carhire_core::{Coordinate, Location, LocationProvider};
use tracing::warn;

use crate::client::CarHireClient;

/// Resolves airports from the cached top locations list and searches
/// through the API
///
/// It has no access to a device position, so `current_location` is always
/// `None`.
#[derive(Debug, Clone)]
pub struct TopLocationsProvider {
    client: CarHireClient,
}

impl TopLocationsProvider {
    pub fn new(client: CarHireClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LocationProvider for TopLocationsProvider {
    async fn current_location(&self) -> Option<Coordinate> {
        None
    }

    async fn search_locations(&self, query: &str) -> Vec<Location> {
        self.client
            .search_locations(query)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, query, "Location search failed");
                Vec::new()
            })
    }

    async fn resolve_airport(&self, code: &str) -> Option<Location> {
        let locations = self
            .client
            .top_locations()
            .await
            .map_err(|e| warn!(error = %e, "Could not load top locations"))
            .ok()?;
        locations.find_airport(code).cloned()
    }
}
