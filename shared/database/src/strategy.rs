use tutorlink_common::AppError;

/// SQLSTATE for "undefined_column".
pub const UNDEFINED_COLUMN: &str = "42703";
/// SQLSTATE for "undefined_table" (also raised for missing views).
pub const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    UndefinedColumn,
    UndefinedTable,
    /// Anything that is not a schema-shape problem: network, auth,
    /// constraint violations, timeouts. Must never be mistaken for drift.
    Other,
}

pub fn classify_db_error(err: &sqlx::Error) -> SchemaErrorKind {
    match err.as_database_error().and_then(|db| db.code()) {
        Some(code) if code == UNDEFINED_COLUMN => SchemaErrorKind::UndefinedColumn,
        Some(code) if code == UNDEFINED_TABLE => SchemaErrorKind::UndefinedTable,
        _ => SchemaErrorKind::Other,
    }
}

/// True when the error is schema drift (missing column or table/view) rather
/// than a real failure. Drift conditions trigger fallback strategies; other
/// failures are recorded but still fall through on read paths.
pub fn is_schema_drift(err: &AppError) -> bool {
    match err {
        AppError::Database(db) => !matches!(classify_db_error(db), SchemaErrorKind::Other),
        _ => false,
    }
}

pub fn is_undefined_table(err: &AppError) -> bool {
    match err {
        AppError::Database(db) => classify_db_error(db) == SchemaErrorKind::UndefinedTable,
        _ => false,
    }
}

#[derive(Debug)]
struct FailedStrategy {
    strategy: &'static str,
    drift: bool,
    error: String,
}

/// Structured capture of a fallback chain: each failed strategy is recorded
/// by name so a degraded-to-empty read still leaves a usable trace in logs.
#[derive(Debug)]
pub struct FallbackReport {
    context: &'static str,
    attempts: Vec<FailedStrategy>,
}

impl FallbackReport {
    pub fn new(context: &'static str) -> Self {
        Self {
            context,
            attempts: Vec::new(),
        }
    }

    pub fn record(&mut self, strategy: &'static str, error: &AppError) {
        let drift = is_schema_drift(error);
        if drift {
            tracing::debug!(context = self.context, strategy, "schema drift, trying next strategy: {}", error);
        } else {
            tracing::warn!(context = self.context, strategy, "strategy failed: {}", error);
        }
        self.attempts.push(FailedStrategy {
            strategy,
            drift,
            error: error.to_string(),
        });
    }

    pub fn attempts(&self) -> usize {
        self.attempts.len()
    }

    /// Log the whole chain when a read path has exhausted every strategy and
    /// is about to return an empty/default result.
    pub fn log_degraded(&self) {
        for attempt in &self.attempts {
            tracing::warn!(
                context = self.context,
                strategy = attempt.strategy,
                drift = attempt.drift,
                "exhausted strategy: {}",
                attempt.error
            );
        }
        tracing::warn!(
            context = self.context,
            strategies = self.attempts.len(),
            "all strategies failed, degrading to empty result"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_drift() {
        assert!(!is_schema_drift(&AppError::Internal("boom".to_string())));
        assert!(!is_schema_drift(&AppError::Validation("bad".to_string())));
    }

    #[test]
    fn io_style_database_errors_classify_as_other() {
        // RowNotFound carries no SQLSTATE, so it must not look like drift.
        let err = sqlx::Error::RowNotFound;
        assert_eq!(classify_db_error(&err), SchemaErrorKind::Other);
        assert!(!is_schema_drift(&AppError::Database(err)));
    }

    #[test]
    fn report_counts_recorded_attempts() {
        let mut report = FallbackReport::new("lessons.upcoming");
        assert_eq!(report.attempts(), 0);
        report.record("rpc", &AppError::Internal("a".to_string()));
        report.record("direct", &AppError::Internal("b".to_string()));
        assert_eq!(report.attempts(), 2);
        report.log_degraded();
    }
}
