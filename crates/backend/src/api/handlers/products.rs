use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::product::Product;
use serde_json::{json, Value};

use crate::api::extract::{self, UploadedFile};
use crate::domain::product::error::ProductError;
use crate::domain::product::service;
use crate::shared::state::AppState;

/// GET /api/products
pub async fn list_all(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(service::list_all(&state.store).await)
}

/// GET /api/products/:code
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Product>, ProductError> {
    service::get_by_code(&state.store, &code).await.map(Json)
}

/// POST /api/products — multipart form or JSON, optional `productImage` file.
pub async fn create(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<Value>), ProductError> {
    let (raw, upload) = extract::product_payload(req).await?;
    let image = store_upload(&state, upload).await?;

    let product = service::create(&state.store, &raw, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "product": product })),
    ))
}

/// PATCH /api/products/:code — JSON or multipart; omitted fields stay as
/// stored.
pub async fn update_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    req: Request,
) -> Result<Json<Value>, ProductError> {
    let (raw, upload) = extract::product_payload(req).await?;
    let image = store_upload(&state, upload).await?;

    let product = service::update_by_code(&state.store, &code, &raw, image).await?;

    Ok(Json(
        json!({ "message": "Mahsulot muvaffaqiyatli yangilandi", "product": product }),
    ))
}

/// DELETE /api/products/:code
pub async fn delete_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ProductError> {
    service::delete_by_code(&state.store, &code).await?;
    Ok(Json(json!({ "message": "Mahsulot muvaffaqiyatli o'chirildi" })))
}

/// DELETE /api/products/id/:id — legacy route for clients that address
/// records by the generated id.
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ProductError> {
    service::delete_by_id(&state.store, &id).await?;
    Ok(Json(json!({ "message": "Mahsulot muvaffaqiyatli o'chirildi" })))
}

/// GET /api/products/search/:query
pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Json<Vec<Product>> {
    Json(service::search(&state.store, &query).await)
}

async fn store_upload(
    state: &AppState,
    upload: Option<UploadedFile>,
) -> Result<Option<String>, ProductError> {
    match upload {
        Some(file) => {
            let path = state
                .images
                .save(&file.file_name, &file.content_type, &file.bytes)
                .await?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}
