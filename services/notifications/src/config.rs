use serde::{Deserialize, Serialize};

use tutorlink_common::{DatabaseConfig, JwtConfig, ServerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl NotificationsConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("NOTIFICATIONS_PORT", 8002),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}
