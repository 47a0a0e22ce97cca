//! Depots and the pickup/return pair chosen for a supplier

use serde::{Deserialize, Serialize};

use super::{Location, Supplier};

/// A supplier's physical pickup or return location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    /// Depot code, unique within the supplier
    pub code: String,
    pub name: String,
    pub phone: String,
    /// Code of the owning supplier
    pub supplier_code: String,
    pub location: Location,
    /// Distance from the searched location, present on depot search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_distance: Option<f64>,
}

impl Depot {
    /// Country code of the depot's location
    pub fn country_code(&self) -> &str {
        &self.location.country
    }
}

/// The pickup and return depots chosen for one supplier in one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotPair {
    pub supplier: Supplier,
    pub pickup_depot: Depot,
    pub return_depot: Depot,
}

impl DepotPair {
    pub fn new(supplier: Supplier, pickup_depot: Depot, return_depot: Depot) -> Self {
        Self {
            supplier,
            pickup_depot,
            return_depot,
        }
    }

    /// Pick the nearest pickup and return depot independently
    ///
    /// Returns `None` when either candidate list is empty. Ties keep the
    /// candidate that came first.
    pub fn nearest(supplier: Supplier, pickups: Vec<Depot>, returns: Vec<Depot>) -> Option<Self> {
        let pickup_depot = nearest_depot(pickups)?;
        let return_depot = nearest_depot(returns)?;
        Some(Self::new(supplier, pickup_depot, return_depot))
    }
}

fn nearest_depot(candidates: Vec<Depot>) -> Option<Depot> {
    candidates.into_iter().min_by(|a, b| {
        a.distance
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance.unwrap_or(f64::INFINITY))
    })
}
