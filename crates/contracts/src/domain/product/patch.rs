use serde_json::Value;

use super::aggregate::ProductStatus;
use super::normalize;

/// Field-level patch over a stored product. Only fields present in the raw
/// payload are set. `id`, `code` and `creation_date` have no counterpart
/// here — that is what keeps them immutable through the update path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub purchase_price: Option<i64>,
    pub stock: Option<i64>,
    pub color: Option<String>,
    pub size: Option<Vec<String>>,
    pub status: Option<ProductStatus>,
    pub sold_price: Option<i64>,
    pub sold_date: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Coerces the supplied fields of a loosely-typed payload.
    pub fn from_value(raw: &Value) -> Self {
        let int_field = |name: &str| {
            raw.get(name)
                .filter(|v| !v.is_null())
                .map(normalize::coerce_int)
        };
        ProductPatch {
            title: normalize::opt_text(raw.get("title")),
            price: int_field("price"),
            purchase_price: int_field("purchase_price"),
            // stock never goes negative
            stock: int_field("stock").map(|n| n.max(0)),
            color: normalize::opt_text(raw.get("color")),
            size: raw
                .get("size")
                .filter(|v| !v.is_null())
                .map(normalize::parse_size),
            status: normalize::opt_text(raw.get("status"))
                .and_then(|s| ProductStatus::parse(&s)),
            sold_price: int_field("sold_price"),
            sold_date: normalize::opt_text(raw.get("sold_date")),
            image: normalize::opt_text(raw.get("image")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_fields_stay_unset() {
        let patch = ProductPatch::from_value(&json!({ "title": "Ko'ylak" }));
        assert_eq!(patch.title.as_deref(), Some("Ko'ylak"));
        assert_eq!(patch.stock, None);
        assert_eq!(patch.price, None);
        assert_eq!(patch.image, None);
    }

    #[test]
    fn numeric_strings_coerce() {
        let patch = ProductPatch::from_value(&json!({
            "price": "150000",
            "stock": "8",
            "sold_price": "abc",
        }));
        assert_eq!(patch.price, Some(150_000));
        assert_eq!(patch.stock, Some(8));
        assert_eq!(patch.sold_price, Some(0));
    }

    #[test]
    fn negative_stock_clamps_to_zero() {
        let patch = ProductPatch::from_value(&json!({ "stock": -3 }));
        assert_eq!(patch.stock, Some(0));
    }

    #[test]
    fn code_in_payload_is_not_part_of_the_patch() {
        // The struct has no code field; a payload naming one is discarded.
        let patch = ProductPatch::from_value(&json!({ "code": "P-001", "stock": 2 }));
        assert_eq!(patch.stock, Some(2));
    }

    #[test]
    fn unknown_status_reads_as_absent() {
        let patch = ProductPatch::from_value(&json!({ "status": "eskirgan" }));
        assert_eq!(patch.status, None);
        let patch = ProductPatch::from_value(&json!({ "status": " Yangi " }));
        assert_eq!(patch.status, Some(ProductStatus::Yangi));
    }
}
