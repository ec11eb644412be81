use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use tutorlink_auth::auth_middleware;

use crate::{handlers, AppState};

pub fn create_routes(state: AppState) -> Router {
    let authenticated = Router::new()
        // Lesson endpoints
        .route("/lessons/upcoming", get(handlers::get_upcoming_lessons))
        .route("/lessons/past", get(handlers::get_past_lessons))
        .route("/lessons/stats", get(handlers::get_lesson_stats))
        .route("/lessons/:id/status", put(handlers::update_lesson_status))
        // Booking endpoints
        .route("/bookings", post(handlers::create_booking))
        // Learning modules
        .route("/modules", get(handlers::get_learning_modules))
        .layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(authenticated)
        .with_state(state)
}
