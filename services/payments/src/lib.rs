pub mod config;
pub mod handlers;
pub mod history;
pub mod mapper;
pub mod routes;

use tutorlink_auth::JwtService;

use crate::config::PaymentsConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: PaymentsConfig,
    pub db_pool: sqlx::PgPool,
    pub jwt_service: JwtService,
}
