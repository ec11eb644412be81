use axum::{middleware, routing::get, Router};

use tutorlink_auth::auth_middleware;

use crate::{handlers, AppState};

pub fn create_routes(state: AppState) -> Router {
    let authenticated = Router::new()
        // Payment endpoints (read-only: rows come from the processor)
        .route("/payments/history", get(handlers::get_payment_history))
        .route("/payments/earnings", get(handlers::get_earnings))
        .layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(authenticated)
        .with_state(state)
}
