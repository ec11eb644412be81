use serde::{Deserialize, Serialize};

use tutorlink_common::{DatabaseConfig, JwtConfig, ServerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl PaymentsConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("PAYMENTS_PORT", 8003),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}
