use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use tutorlink_auth::Claims;
use tutorlink_common::{ApiResponse, AppError, Notification, UserRole};

use crate::{
    models::{CreateNotificationRequest, MarkAllResponse, UnreadCountResponse},
    store, AppState,
};

// Health check
pub async fn health_check() -> Result<Json<ApiResponse<String>>, AppError> {
    Ok(Json(ApiResponse::success("Notifications service is healthy".to_string())))
}

pub async fn list_notifications(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<Vec<Notification>>>, AppError> {
    let notifications = store::fetch_notifications(&state.db_pool, claims.user_id()?).await;
    Ok(Json(ApiResponse::success(notifications)))
}

pub async fn get_unread_count(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, AppError> {
    let unread = store::unread_count(&state.db_pool, claims.user_id()?).await;
    Ok(Json(ApiResponse::success(UnreadCountResponse { unread })))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    claims: Claims,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    store::mark_read(&state.db_pool, claims.user_id()?, notification_id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<MarkAllResponse>>, AppError> {
    let updated = store::mark_all_read(&state.db_pool, claims.user_id()?).await?;
    Ok(Json(ApiResponse::success(MarkAllResponse { updated })))
}

/// Internal producer endpoint, admin only; booking events from other
/// services write rows directly.
pub async fn create_notification(
    State(state): State<AppState>,
    claims: Claims,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if claims.role != UserRole::Admin {
        return Err(AppError::Authorization(
            "only admins may create notifications directly".to_string(),
        ));
    }
    store::create_notification(
        &state.db_pool,
        request.user_id,
        &request.title,
        &request.message,
        request.notification_type,
        request.related_id,
    )
    .await?;
    Ok(Json(ApiResponse::success(())))
}
