//! Supplier models

use serde::{Deserialize, Serialize};

/// A car rental company taking part in the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Supplier code, e.g. "HZ"
    pub code: String,
    /// Display name
    pub name: String,
    /// Logo URL
    pub image_url: String,
}

impl Supplier {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

/// Suppliers are identified by their code
impl PartialEq for Supplier {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Supplier {}
