pub mod booking;
pub mod config;
pub mod email;
pub mod fetch;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod modules;
pub mod notify;
pub mod profiles;
pub mod routes;

use tutorlink_auth::JwtService;

use crate::config::LessonsConfig;
use crate::email::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub config: LessonsConfig,
    pub db_pool: sqlx::PgPool,
    pub jwt_service: JwtService,
    pub email_service: EmailService,
}
