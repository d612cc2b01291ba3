use chrono::Utc;
use contracts::domain::product::{Product, ProductPatch};
use serde_json::Value;

use super::error::ProductError;
use crate::shared::data::store::ProductStore;

/// Returns the full collection, unfiltered. Filtering belongs to the search
/// operation or the client.
pub async fn list_all(store: &ProductStore) -> Vec<Product> {
    store.load_all().await
}

pub async fn get_by_code(store: &ProductStore, code: &str) -> Result<Product, ProductError> {
    store
        .load_all()
        .await
        .into_iter()
        .find(|p| p.code.as_deref() == Some(code))
        .ok_or_else(|| ProductError::NotFound("Product not found".into()))
}

/// Normalizes the raw payload, stamps id and creation date, checks the
/// supplied code for collision, appends and persists. An uploaded image path
/// overrides any image field in the payload.
pub async fn create(
    store: &ProductStore,
    raw: &Value,
    image: Option<String>,
) -> Result<Product, ProductError> {
    let mut products = store.load_all().await;

    let mut product =
        Product::new_for_insert(raw, Utc::now()).map_err(ProductError::Validation)?;
    if image.is_some() {
        product.image = image;
    }

    if let Some(code) = &product.code {
        if products.iter().any(|p| p.code.as_deref() == Some(code.as_str())) {
            return Err(ProductError::Validation(
                "Product code already exists".into(),
            ));
        }
    }

    products.push(product.clone());
    store.save_all(&products).await.map_err(ProductError::Store)?;

    Ok(product)
}

/// Shallow-merges the supplied fields onto the stored record. The code in
/// the path addresses the record; a code in the payload is discarded by the
/// patch type, so identity never changes here.
pub async fn update_by_code(
    store: &ProductStore,
    code: &str,
    raw: &Value,
    image: Option<String>,
) -> Result<Product, ProductError> {
    let mut products = store.load_all().await;

    let index = products
        .iter()
        .position(|p| p.code.as_deref() == Some(code))
        .ok_or_else(|| ProductError::NotFound("Product not found".into()))?;

    let mut patch = ProductPatch::from_value(raw);
    if image.is_some() {
        patch.image = image;
    }

    products[index].apply_patch(&patch);
    let updated = products[index].clone();

    store.save_all(&products).await.map_err(ProductError::Store)?;

    Ok(updated)
}

pub async fn delete_by_code(store: &ProductStore, code: &str) -> Result<(), ProductError> {
    let mut products = store.load_all().await;

    let index = products
        .iter()
        .position(|p| p.code.as_deref() == Some(code))
        .ok_or_else(|| ProductError::NotFound("Product not found".into()))?;

    products.remove(index);
    store.save_all(&products).await.map_err(ProductError::Store)?;

    Ok(())
}

/// Legacy deletion path for clients that still address records by the
/// generated id.
pub async fn delete_by_id(store: &ProductStore, id: &str) -> Result<(), ProductError> {
    let mut products = store.load_all().await;

    let index = products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ProductError::NotFound("Product not found".into()))?;

    products.remove(index);
    store.save_all(&products).await.map_err(ProductError::Store)?;

    Ok(())
}

/// Linear scan, case-insensitive substring match across the searchable
/// fields of each record.
pub async fn search(store: &ProductStore, query: &str) -> Vec<Product> {
    store
        .load_all()
        .await
        .into_iter()
        .filter(|p| p.matches_query(query))
        .collect()
}
