use serde::{Deserialize, Serialize};

use tutorlink_common::{DatabaseConfig, JwtConfig, ServerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonsConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub from_name: String,
    pub from_email: String,
    /// Fixed resolve delay of the mock provider.
    pub mock_delay_ms: u64,
}

impl LessonsConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("LESSONS_PORT", 8001),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            email: EmailConfig {
                from_name: std::env::var("EMAIL_FROM_NAME")
                    .unwrap_or_else(|_| "TutorLink".to_string()),
                from_email: std::env::var("EMAIL_FROM_ADDRESS")
                    .unwrap_or_else(|_| "noreply@tutorlink.dev".to_string()),
                mock_delay_ms: std::env::var("EMAIL_MOCK_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(200),
            },
        }
    }
}
