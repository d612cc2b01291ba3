use std::path::{Path, PathBuf};

use anyhow::Context;
use contracts::domain::product::Product;

/// Persistence boundary for the full product collection: one JSON document,
/// always read and rewritten as a unit. Single writer assumed; concurrent
/// read-modify-write is last-write-wins.
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole collection. A missing document is a fresh store and
    /// an unreadable or corrupt one is reported and treated the same —
    /// callers always get a usable (possibly empty) collection.
    pub async fn load_all(&self) -> Vec<Product> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read product store {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(
                    "Product store {} is corrupt, starting empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Replaces the persisted collection. The document is written to a
    /// temporary sibling and renamed into place, so a failed write can never
    /// be read back as a truncated collection.
    pub async fn save_all(&self, products: &[Product]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating store directory {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(products).context("serializing product collection")?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn temp_store(tag: &str) -> ProductStore {
        let dir = std::env::temp_dir().join(format!("store-tests-{}-{}", std::process::id(), tag));
        let _ = std::fs::remove_dir_all(&dir);
        ProductStore::new(dir.join("products.json"))
    }

    fn sample(title: &str, code: &str) -> Product {
        Product::new_for_insert(
            &json!({ "title": title, "price": "100", "code": code }),
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let store = temp_store("missing");
        assert!(store.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let store = temp_store("corrupt");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), b"{ not json").unwrap();
        assert!(store.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = temp_store("round-trip");
        let products = vec![sample("Shim", "P-1"), sample("Ko'ylak", "P-2")];

        store.save_all(&products).await.unwrap();
        let loaded = store.load_all().await;

        assert_eq!(loaded, products);
        // no temp sibling left behind
        assert!(!store.path().with_extension("json.tmp").exists());
    }
}
