pub mod config;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod routes;
pub mod store;

use tutorlink_auth::JwtService;

use crate::config::NotificationsConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: NotificationsConfig,
    pub db_pool: sqlx::PgPool,
    pub jwt_service: JwtService,
}
