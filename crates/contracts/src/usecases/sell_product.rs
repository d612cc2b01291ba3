use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Payload of `POST /api/products/:code/sell`.
#[derive(Debug, Clone, Deserialize)]
pub struct SellRequest {
    pub quantity: i64,
    pub sell_price: i64,
    /// Date-only string; defaults to today when absent.
    #[serde(default)]
    pub sell_date: Option<String>,
}

/// Sale result. `product` is present as long as the record still exists —
/// including the partial-success case where the depleted record could not be
/// removed.
#[derive(Debug, Clone, Serialize)]
pub struct SellResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}
