//! Supplier terms and conditions

use serde::{Deserialize, Serialize};

/// One section of a supplier's terms and conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierTerm {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_url: Option<String>,
    /// Position in the document
    pub order: i64,
}
