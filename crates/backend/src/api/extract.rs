use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::{Map, Value};

use crate::domain::product::error::ProductError;
use crate::shared::images::{ImageError, MAX_IMAGE_BYTES};

/// Request body ceiling: the image limit plus headroom for the form fields.
/// Oversized images are still rejected with their own message by the image
/// intake; this only keeps arbitrary bodies bounded.
pub const MAX_BODY_BYTES: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// One uploaded file part, held in memory until the image intake accepts it.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Product payloads arrive either as a JSON body or as a multipart form
/// (text fields plus an optional `productImage` file). Both shapes reduce to
/// one raw JSON object for the normalizer, plus the optional upload.
pub async fn product_payload(
    req: Request,
) -> Result<(Value, Option<UploadedFile>), ProductError> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        multipart_payload(req).await
    } else {
        json_payload(req).await
    }
}

async fn json_payload(req: Request) -> Result<(Value, Option<UploadedFile>), ProductError> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| ProductError::Validation(format!("Unreadable request body: {e}")))?;

    if bytes.is_empty() {
        return Ok((Value::Object(Map::new()), None));
    }

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ProductError::Validation(format!("Invalid JSON body: {e}")))?;

    Ok((value, None))
}

async fn multipart_payload(req: Request) -> Result<(Value, Option<UploadedFile>), ProductError> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ProductError::Validation(format!("Invalid multipart body: {e}")))?;

    let mut fields = Map::new();
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProductError::Validation(format!("Rasm yuklashda xatolik: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            if upload.is_some() {
                return Err(ImageError::TooManyFiles.into());
            }
            if name != "productImage" {
                return Err(ProductError::Validation(format!(
                    "Unexpected file field: {name}"
                )));
            }
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ProductError::Validation(format!("Rasm yuklashda xatolik: {e}")))?;
            upload = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ProductError::Validation(format!("Unreadable form field: {e}")))?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok((Value::Object(fields), upload))
}
