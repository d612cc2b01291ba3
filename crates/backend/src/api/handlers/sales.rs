use axum::extract::{Path, State};
use axum::Json;
use contracts::usecases::sell_product::{SellRequest, SellResponse};

use crate::domain::product::error::ProductError;
use crate::shared::state::AppState;
use crate::usecases::sell_product::{self, SaleOutcome};

/// POST /api/products/:code/sell — records a sale; a depleted product is
/// removed afterwards, and a failed removal is reported as partial success.
pub async fn sell(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<SellRequest>,
) -> Result<Json<SellResponse>, ProductError> {
    let outcome = sell_product::sell(&state.store, &code, &request).await?;

    let response = match outcome {
        SaleOutcome::Completed { product } => SellResponse {
            message: format!("{} dona mahsulot sotildi!", request.quantity),
            product: Some(product),
        },
        SaleOutcome::SoldOutRemoved => SellResponse {
            message: format!(
                "{} dona sotildi va mahsulot tugagani uchun o'chirildi!",
                request.quantity
            ),
            product: None,
        },
        SaleOutcome::SoldOutRemovalFailed { product } => SellResponse {
            message: format!(
                "{} dona mahsulot sotildi! (Lekin o'chirishda xatolik)",
                request.quantity
            ),
            product: Some(product),
        },
    };

    Ok(Json(response))
}
