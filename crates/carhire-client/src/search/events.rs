//! Search progress events

use carhire_core::{DepotPair, SearchResult, SearchResults, Supplier};

use crate::error::CarHireError;

/// Progress of a running search
#[derive(Debug)]
pub enum SearchEvent {
    /// Depot pairs that will be searched, sent once before any supplier event
    DepotsFound(Vec<DepotPair>),

    /// One supplier's vehicles
    SupplierResults {
        supplier: Supplier,
        results: Vec<SearchResult>,
    },

    /// One supplier's vehicle search failed; the search carries on
    SupplierFailed {
        supplier: Supplier,
        error: CarHireError,
    },

    /// Every supplier has answered. Terminal.
    Finished(SearchResults),

    /// The search stopped before any vehicle search was sent. Terminal.
    Failed(CarHireError),
}

impl SearchEvent {
    /// Whether no further events follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchEvent::Finished(_) | SearchEvent::Failed(_))
    }
}
