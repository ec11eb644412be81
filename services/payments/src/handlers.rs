use axum::{extract::State, response::Json};

use tutorlink_auth::Claims;
use tutorlink_common::{ApiResponse, AppError, EarningsSummary, Payment, UserRole};

use crate::{history, AppState};

// Health check
pub async fn health_check() -> Result<Json<ApiResponse<String>>, AppError> {
    Ok(Json(ApiResponse::success("Payments service is healthy".to_string())))
}

pub async fn get_payment_history(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<Vec<Payment>>>, AppError> {
    let payments =
        history::fetch_payment_history(&state.db_pool, claims.user_id()?, claims.role).await;
    Ok(Json(ApiResponse::success(payments)))
}

pub async fn get_earnings(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<EarningsSummary>>, AppError> {
    if claims.role != UserRole::Teacher {
        return Err(AppError::Authorization(
            "earnings are only available to teachers".to_string(),
        ));
    }
    let summary = history::fetch_earnings(&state.db_pool, claims.user_id()?).await;
    Ok(Json(ApiResponse::success(summary)))
}
