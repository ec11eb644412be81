pub mod connection;
pub mod diagnostics;
pub mod migrations;
pub mod models;
pub mod notifications;
pub mod probe;
pub mod resolve;
pub mod strategy;

pub use connection::{create_pool, DbPool};
pub use diagnostics::{schema_report, SchemaReport};
pub use migrations::{MigrationRunner, MigrationStatus};
pub use notifications::{insert_notification, resolve_notification_shape, NotificationShape};
pub use probe::{ColumnProber, ProbeColumns};
pub use resolve::SchemaResolver;
pub use strategy::{classify_db_error, is_schema_drift, FallbackReport, SchemaErrorKind};
