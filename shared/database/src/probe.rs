use async_trait::async_trait;
use sqlx::PgPool;

use tutorlink_common::AppError;

use crate::strategy::{classify_db_error, SchemaErrorKind};

/// Seam for column probing so the resolver can be exercised with fakes.
#[async_trait]
pub trait ProbeColumns: Send + Sync {
    /// `Ok(false)` means exactly "the column does not exist"; every other
    /// failure (missing table, network, auth) is propagated as an error.
    async fn column_exists(&self, table: &str, column: &str) -> Result<bool, AppError>;
}

/// Probes a live schema with a zero-row trial read. One round trip per call,
/// no caching, matching the one-probe-per-question semantics of the access
/// layer this replaces.
#[derive(Clone)]
pub struct ColumnProber {
    pool: PgPool,
}

impl ColumnProber {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProbeColumns for ColumnProber {
    async fn column_exists(&self, table: &str, column: &str) -> Result<bool, AppError> {
        if !valid_identifier(table) || !valid_identifier(column) {
            return Err(AppError::Validation(format!(
                "invalid identifier in probe: {}.{}",
                table, column
            )));
        }

        // Identifiers cannot be bound, so they are validated above and quoted
        // here. LIMIT 0 keeps the probe from reading any rows.
        let sql = format!(r#"SELECT "{}" FROM "{}" LIMIT 0"#, column, table);
        match sqlx::query(&sql).execute(&self.pool).await {
            Ok(_) => Ok(true),
            Err(err) => probe_outcome(classify_db_error(&err), err),
        }
    }
}

/// Maps a failed probe to its verdict. Only "undefined column" means the
/// column is absent; anything else is a real failure and must not be
/// conflated with absence.
pub(crate) fn probe_outcome(kind: SchemaErrorKind, err: sqlx::Error) -> Result<bool, AppError> {
    match kind {
        SchemaErrorKind::UndefinedColumn => Ok(false),
        SchemaErrorKind::UndefinedTable | SchemaErrorKind::Other => Err(AppError::Database(err)),
    }
}

fn valid_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_column_probes_as_absent() {
        let outcome = probe_outcome(SchemaErrorKind::UndefinedColumn, sqlx::Error::RowNotFound);
        assert_eq!(outcome.unwrap(), false);
    }

    #[test]
    fn undefined_table_propagates() {
        let outcome = probe_outcome(SchemaErrorKind::UndefinedTable, sqlx::Error::RowNotFound);
        assert!(outcome.is_err());
    }

    #[test]
    fn other_failures_never_read_as_absent() {
        let outcome = probe_outcome(SchemaErrorKind::Other, sqlx::Error::PoolTimedOut);
        assert!(outcome.is_err());
    }

    #[test]
    fn identifier_validation_rejects_injection() {
        assert!(valid_identifier("notifications"));
        assert!(valid_identifier("related_entity_id"));
        assert!(!valid_identifier(""));
        assert!(!valid_identifier("users; DROP TABLE users"));
        assert!(!valid_identifier(r#"users""#));
    }
}
