//! Vehicle search results

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DepotPair, Supplier};

/// Price of a result or booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_day: Option<Decimal>,
    /// ISO 4217 currency code
    pub currency: String,
}

/// Render an amount with at most two decimal places and no trailing zeros
pub fn amount_string(value: &Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transmission {
    /// e.g. "AT"
    pub code: String,
    /// e.g. "Automatic Transmission"
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Luggage {
    pub small: u32,
    pub large: u32,
}

/// Vehicle features shown alongside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub air_conditioning: bool,
    pub transmission: Transmission,
    pub doors: u32,
    pub seats: u32,
    pub luggage: Luggage,
}

/// One priced vehicle offered by a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Vehicle name, e.g. "Toyota Corolla or similar"
    pub name: String,
    pub image_url: String,
    pub mileage: String,
    pub category: String,
    /// Category code used to request a pending booking
    pub code: String,
    pub rate_id: String,
    pub cost: Cost,
    pub features: Features,
    pub supplier: Supplier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<String>,
}

/// Results of one supplier's vehicle search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub depots: DepotPair,
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn supplier(&self) -> &Supplier {
        &self.depots.supplier
    }
}

/// Aggregate of every supplier response in a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub responses: Vec<SearchResponse>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, response: SearchResponse) {
        self.responses.push(response);
    }

    /// Every result from every response, cheapest first
    pub fn all(&self) -> Vec<&SearchResult> {
        let mut all: Vec<_> = self.responses.iter().flat_map(|r| &r.results).collect();
        all.sort_by(|a, b| a.cost.total.cmp(&b.cost.total));
        all
    }

    /// The response a result came from, matched by supplier
    pub fn response_for(&self, result: &SearchResult) -> Option<&SearchResponse> {
        self.responses
            .iter()
            .find(|response| response.supplier() == &result.supplier)
    }

    /// Number of supplier responses
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
