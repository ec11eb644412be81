use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use tutorlink_auth::Claims;
use tutorlink_common::{ApiResponse, AppError, LearningModule, Lesson, LessonStats};

use crate::{
    booking, fetch,
    models::{CreateBookingRequest, LessonWindow, UpdateStatusRequest},
    modules, AppState,
};

// Health check
pub async fn health_check() -> Result<Json<ApiResponse<String>>, AppError> {
    Ok(Json(ApiResponse::success("Lessons service is healthy".to_string())))
}

pub async fn get_upcoming_lessons(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<Vec<Lesson>>>, AppError> {
    let lessons = fetch::fetch_lessons(
        &state.db_pool,
        claims.user_id()?,
        claims.role,
        LessonWindow::Upcoming,
    )
    .await;
    Ok(Json(ApiResponse::success(lessons)))
}

pub async fn get_past_lessons(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<Vec<Lesson>>>, AppError> {
    let lessons = fetch::fetch_lessons(
        &state.db_pool,
        claims.user_id()?,
        claims.role,
        LessonWindow::Past,
    )
    .await;
    Ok(Json(ApiResponse::success(lessons)))
}

pub async fn get_lesson_stats(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<ApiResponse<LessonStats>>, AppError> {
    let stats = fetch::fetch_lesson_stats(&state.db_pool, claims.user_id()?, claims.role).await;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn create_booking(
    State(state): State<AppState>,
    claims: Claims,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<Lesson>>, AppError> {
    let lesson = booking::create_booking(
        &state.db_pool,
        &state.email_service,
        claims.user_id()?,
        &request,
    )
    .await?;
    Ok(Json(ApiResponse::success(lesson)))
}

pub async fn update_lesson_status(
    State(state): State<AppState>,
    claims: Claims,
    Path(lesson_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Lesson>>, AppError> {
    let lesson = booking::change_status(
        &state.db_pool,
        &state.email_service,
        claims.user_id()?,
        lesson_id,
        request.status,
    )
    .await?;
    Ok(Json(ApiResponse::success(lesson)))
}

pub async fn get_learning_modules(
    State(state): State<AppState>,
    _claims: Claims,
) -> Result<Json<ApiResponse<Vec<LearningModule>>>, AppError> {
    let modules = modules::fetch_modules(&state.db_pool).await;
    Ok(Json(ApiResponse::success(modules)))
}
