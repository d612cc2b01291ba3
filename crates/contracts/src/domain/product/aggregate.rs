use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::normalize;
use super::patch::ProductPatch;

// ============================================================================
// Status
// ============================================================================

/// Stock state of an item: freshly arrived (`yangi`) or carried over from a
/// previous intake (`ostatka`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Yangi,
    Ostatka,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Yangi => "yangi",
            ProductStatus::Ostatka => "ostatka",
        }
    }

    /// Recognizes the two live values, case-insensitively; anything else
    /// reads as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "yangi" => Some(ProductStatus::Yangi),
            "ostatka" => Some(ProductStatus::Ostatka),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// A single inventory record. The whole collection is serialized to one JSON
/// document, so field names stay snake_case to match the persisted store and
/// the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-generated, stamped once at creation, never changed.
    pub id: String,
    /// Client-chosen external identifier; most operations address by it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub title: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub purchase_price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub color: String,
    /// Always a sequence in storage; legacy documents holding a raw string
    /// are re-normalized on read.
    #[serde(default, deserialize_with = "de_size")]
    pub size: Vec<String>,
    #[serde(default, deserialize_with = "de_status", skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    /// Nonzero signals the unit has recorded a sale.
    #[serde(default)]
    pub sold_price: i64,
    #[serde(default)]
    pub sold_date: String,
    /// Path under the public images prefix; preserved across updates that
    /// supply no new image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub creation_date: String,
}

fn de_size<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize::parse_size(&value))
}

fn de_status<'de, D>(deserializer: D) -> Result<Option<ProductStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => ProductStatus::parse(&s),
        _ => None,
    })
}

impl Product {
    /// Builds a new record from a raw create payload. `title` and `price`
    /// must be supplied; everything else defaults. The id derives from the
    /// creation instant (millisecond timestamp), the creation date is
    /// date-only.
    pub fn new_for_insert(raw: &Value, now: DateTime<Utc>) -> Result<Self, String> {
        if !normalize::is_supplied(raw.get("title")) || !normalize::is_supplied(raw.get("price")) {
            return Err("Missing required fields (title, price)".into());
        }

        let mut product = Product {
            id: now.timestamp_millis().to_string(),
            code: raw.get("code").and_then(normalize::non_empty_string),
            title: String::new(),
            price: 0,
            purchase_price: 0,
            stock: 0,
            color: String::new(),
            size: Vec::new(),
            status: None,
            sold_price: 0,
            sold_date: String::new(),
            image: None,
            creation_date: now.format("%Y-%m-%d").to_string(),
        };
        product.apply_patch(&ProductPatch::from_value(raw));
        Ok(product)
    }

    /// Shallow-merge: only supplied fields change. `id`, `code` and
    /// `creation_date` are not part of the patch and stay as stored.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(purchase_price) = patch.purchase_price {
            self.purchase_price = purchase_price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(size) = &patch.size {
            self.size = size.clone();
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        if let Some(sold_price) = patch.sold_price {
            self.sold_price = sold_price;
        }
        if let Some(sold_date) = &patch.sold_date {
            self.sold_date = sold_date.clone();
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
    }

    /// Case-insensitive substring match across the searchable fields.
    /// Fields a record does not carry simply do not match; they never abort
    /// the scan.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.color.to_lowercase().contains(&q)
            || self
                .code
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&q))
            || self.status.is_some_and(|s| s.as_str().contains(&q))
            || self.size.join(",").to_lowercase().contains(&q)
    }
}
