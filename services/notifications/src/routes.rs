use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use tutorlink_auth::auth_middleware;

use crate::{handlers, AppState};

pub fn create_routes(state: AppState) -> Router {
    let authenticated = Router::new()
        // Notification endpoints
        .route("/notifications", get(handlers::list_notifications))
        .route("/notifications", post(handlers::create_notification))
        .route("/notifications/unread", get(handlers::get_unread_count))
        .route("/notifications/:id/read", put(handlers::mark_notification_read))
        .route("/notifications/read-all", put(handlers::mark_all_read))
        .layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(authenticated)
        .with_state(state)
}
