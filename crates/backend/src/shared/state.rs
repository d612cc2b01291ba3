use crate::shared::config::{self, Config};
use crate::shared::data::store::ProductStore;
use crate::shared::images::ImageStore;

/// Application state handed to every handler through axum's `State`
/// extractor. There is no ambient global behind the request path; everything
/// a handler touches is reachable from here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ProductStore,
    pub images: ImageStore,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: ProductStore::new(config::resolve_path(&config.storage.products_file)),
            images: ImageStore::new(config::resolve_path(&config.storage.images_dir)),
        }
    }
}
