use tutorlink_common::AppError;

use crate::probe::ProbeColumns;

/// Picks the physical column backing a logical field on a drifted schema.
/// Candidates are tried in priority order: current-schema name first, legacy
/// names after.
pub struct SchemaResolver<P> {
    prober: P,
}

impl<P: ProbeColumns> SchemaResolver<P> {
    pub fn new(prober: P) -> Self {
        Self { prober }
    }

    /// First candidate the prober confirms, or `None` when no candidate
    /// exists. Probe failures other than "column absent" propagate.
    pub async fn resolve(
        &self,
        table: &str,
        candidates: &[&str],
    ) -> Result<Option<String>, AppError> {
        for candidate in candidates {
            if self.prober.column_exists(table, candidate).await? {
                return Ok(Some((*candidate).to_string()));
            }
        }
        Ok(None)
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use async_trait::async_trait;

    use super::*;

    /// Fake prober: a set of existing `table.column` pairs plus a set of
    /// columns whose probe blows up with a non-schema error.
    struct FakeProber {
        existing: HashSet<(&'static str, &'static str)>,
        failing: HashSet<(&'static str, &'static str)>,
    }

    impl FakeProber {
        fn with_columns(columns: &[(&'static str, &'static str)]) -> Self {
            Self {
                existing: columns.iter().copied().collect(),
                failing: HashSet::new(),
            }
        }
    }

    #[async_trait]
    impl ProbeColumns for FakeProber {
        async fn column_exists(&self, table: &str, column: &str) -> Result<bool, AppError> {
            if self.failing.iter().any(|(t, c)| *t == table && *c == column) {
                return Err(AppError::Internal("connection refused".to_string()));
            }
            Ok(self.existing.iter().any(|(t, c)| *t == table && *c == column))
        }
    }

    #[tokio::test]
    async fn prefers_the_first_candidate_when_both_exist() {
        let prober = FakeProber::with_columns(&[
            ("notifications", "related_id"),
            ("notifications", "related_entity_id"),
        ]);
        let resolver = SchemaResolver::new(prober);
        let resolved = resolver
            .resolve("notifications", &["related_id", "related_entity_id"])
            .await
            .unwrap();
        assert_eq!(resolved.as_deref(), Some("related_id"));
    }

    #[tokio::test]
    async fn falls_back_to_the_legacy_name() {
        let prober = FakeProber::with_columns(&[("notifications", "related_entity_id")]);
        let resolver = SchemaResolver::new(prober);
        let resolved = resolver
            .resolve("notifications", &["related_id", "related_entity_id"])
            .await
            .unwrap();
        assert_eq!(resolved.as_deref(), Some("related_entity_id"));
    }

    #[tokio::test]
    async fn reports_none_when_no_candidate_exists() {
        let prober = FakeProber::with_columns(&[]);
        let resolver = SchemaResolver::new(prober);
        let resolved = resolver
            .resolve("notifications", &["related_id", "related_entity_id"])
            .await
            .unwrap();
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn non_schema_probe_failures_propagate() {
        let mut prober = FakeProber::with_columns(&[("notifications", "related_entity_id")]);
        prober.failing.insert(("notifications", "related_id"));
        let resolver = SchemaResolver::new(prober);
        let result = resolver
            .resolve("notifications", &["related_id", "related_entity_id"])
            .await;
        // The failure must surface instead of silently resolving the legacy
        // candidate.
        assert!(result.is_err());
    }
}
