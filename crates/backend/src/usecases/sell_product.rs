use chrono::Utc;
use contracts::domain::product::Product;
use contracts::usecases::sell_product::SellRequest;
use serde_json::json;

use crate::domain::product::error::ProductError;
use crate::domain::product::service;
use crate::shared::data::store::ProductStore;

/// Outcome of the two-step sale. The stock update and the follow-up delete
/// are separate store writes with no atomicity between them; when the delete
/// fails after a successful update, the zero-stock record stays behind and
/// the caller is told so instead of rolling back.
#[derive(Debug, Clone)]
pub enum SaleOutcome {
    /// Stock remains; the record was updated in place.
    Completed { product: Product },
    /// Stock hit zero and the record was removed.
    SoldOutRemoved,
    /// Stock hit zero but the follow-up delete failed; the zero-stock
    /// record is still present.
    SoldOutRemovalFailed { product: Product },
}

/// Records a sale for the product addressed by `code`: validates the
/// quantity against current stock, stamps the sale price and date through a
/// regular update, and removes the record once stock is depleted.
pub async fn sell(
    store: &ProductStore,
    code: &str,
    request: &SellRequest,
) -> Result<SaleOutcome, ProductError> {
    let product = service::get_by_code(store, code).await?;

    if request.quantity <= 0 {
        return Err(ProductError::Validation(
            "Sotish miqdorini to'g'ri kiriting".into(),
        ));
    }
    if request.quantity > product.stock {
        return Err(ProductError::Validation(
            "Ombor ichida buncha mahsulot yo'q".into(),
        ));
    }

    let remaining = product.stock - request.quantity;
    let sell_date = request
        .sell_date
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    let updated = service::update_by_code(
        store,
        code,
        &json!({
            "stock": remaining,
            "sold_price": request.sell_price,
            "sold_date": sell_date,
        }),
        None,
    )
    .await?;

    if remaining > 0 {
        return Ok(SaleOutcome::Completed { product: updated });
    }

    match service::delete_by_code(store, code).await {
        Ok(()) => Ok(SaleOutcome::SoldOutRemoved),
        Err(e) => {
            tracing::warn!("Sold-out product {} could not be removed: {}", code, e);
            Ok(SaleOutcome::SoldOutRemovalFailed { product: updated })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store(tag: &str) -> ProductStore {
        let dir = std::env::temp_dir().join(format!("sale-tests-{}-{}", std::process::id(), tag));
        let _ = std::fs::remove_dir_all(&dir);
        ProductStore::new(dir.join("products.json"))
    }

    async fn seed(store: &ProductStore, stock: i64) {
        service::create(
            store,
            &json!({ "title": "Shim", "price": 180_000, "code": "SH-1", "stock": stock }),
            None,
        )
        .await
        .unwrap();
    }

    fn request(quantity: i64) -> SellRequest {
        SellRequest {
            quantity,
            sell_price: 200_000,
            sell_date: Some("2024-05-17".into()),
        }
    }

    #[tokio::test]
    async fn partial_sale_updates_stock_and_sale_fields() {
        let store = temp_store("partial");
        seed(&store, 5).await;

        let outcome = sell(&store, "SH-1", &request(3)).await.unwrap();

        let product = match outcome {
            SaleOutcome::Completed { product } => product,
            other => panic!("expected completed sale, got {other:?}"),
        };
        assert_eq!(product.stock, 2);
        assert_eq!(product.sold_price, 200_000);
        assert_eq!(product.sold_date, "2024-05-17");

        // still retrievable
        let stored = service::get_by_code(&store, "SH-1").await.unwrap();
        assert_eq!(stored.stock, 2);
    }

    #[tokio::test]
    async fn selling_out_removes_the_record() {
        let store = temp_store("sold-out");
        seed(&store, 5).await;

        let outcome = sell(&store, "SH-1", &request(5)).await.unwrap();

        assert!(matches!(outcome, SaleOutcome::SoldOutRemoved));
        let err = service::get_by_code(&store, "SH-1").await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn rejects_non_positive_quantity_without_mutation() {
        let store = temp_store("zero-quantity");
        seed(&store, 5).await;

        let err = sell(&store, "SH-1", &request(0)).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));

        let stored = service::get_by_code(&store, "SH-1").await.unwrap();
        assert_eq!(stored.stock, 5);
        assert_eq!(stored.sold_price, 0);
    }

    #[tokio::test]
    async fn rejects_quantity_above_stock_without_mutation() {
        let store = temp_store("over-stock");
        seed(&store, 5).await;

        let err = sell(&store, "SH-1", &request(6)).await.unwrap_err();
        match err {
            ProductError::Validation(msg) => {
                assert_eq!(msg, "Ombor ichida buncha mahsulot yo'q")
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let stored = service::get_by_code(&store, "SH-1").await.unwrap();
        assert_eq!(stored.stock, 5);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let store = temp_store("unknown-code");
        let err = sell(&store, "NOPE", &request(1)).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }
}
