use serde::Serialize;

use tutorlink_common::AppError;

use crate::probe::ProbeColumns;
use crate::strategy::is_undefined_table;

/// Logical schema the services expect. Each logical column lists its
/// candidate physical names in priority order, current-generation name
/// first, so a database on either side of the drift still resolves.
pub const EXPECTED_SCHEMA: &[(&str, &[&[&str]])] = &[
    ("users", &[&["user_id"], &["email"], &["role"]]),
    (
        "profiles",
        &[&["user_id"], &["first_name"], &["last_name"], &["avatar_url"]],
    ),
    (
        "bookings",
        &[
            &["id"],
            &["subject"],
            &["lesson_date"],
            &["start_time"],
            &["end_time"],
            &["status"],
            &["teacher_id"],
            &["student_id"],
        ],
    ),
    (
        "notifications",
        &[
            &["id"],
            &["user_id"],
            &["title"],
            &["message"],
            &["notification_type"],
            &["is_read"],
            &["related_id", "related_entity_id"],
        ],
    ),
    (
        "payments",
        &[
            &["id"],
            &["amount"],
            &["currency"],
            &["status"],
            &["booking_id"],
            &["payout_date"],
        ],
    ),
    (
        "learning_modules",
        &[&["id"], &["name"], &["subject"], &["level"], &["lesson_count"]],
    ),
];

#[derive(Debug, Serialize)]
pub struct ColumnReport {
    /// Current-generation name of the logical column.
    pub column: String,
    /// The candidate that actually resolved, `None` when no candidate
    /// exists in the live schema.
    pub resolved: Option<String>,
}

impl ColumnReport {
    pub fn present(&self) -> bool {
        self.resolved.is_some()
    }
}

#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: String,
    pub present: bool,
    pub columns: Vec<ColumnReport>,
}

#[derive(Debug, Serialize)]
pub struct SchemaReport {
    pub tables: Vec<TableReport>,
}

impl SchemaReport {
    pub fn missing_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| !t.present)
            .map(|t| t.table.as_str())
            .collect()
    }

    /// Logical columns where no candidate resolved.
    pub fn missing_columns(&self) -> Vec<String> {
        self.tables
            .iter()
            .filter(|t| t.present)
            .flat_map(|t| {
                t.columns
                    .iter()
                    .filter(|c| !c.present())
                    .map(move |c| format!("{}.{}", t.table, c.column))
            })
            .collect()
    }

    /// Logical columns resolved through a legacy candidate name.
    pub fn legacy_columns(&self) -> Vec<String> {
        self.tables
            .iter()
            .flat_map(|t| {
                t.columns
                    .iter()
                    .filter(|c| c.resolved.as_deref().is_some_and(|r| r != c.column))
                    .map(move |c| {
                        format!(
                            "{}.{} (as {})",
                            t.table,
                            c.column,
                            c.resolved.as_deref().unwrap_or_default()
                        )
                    })
            })
            .collect()
    }
}

impl std::fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for table in &self.tables {
            if !table.present {
                writeln!(f, "{}: MISSING", table.table)?;
                continue;
            }
            let absent: Vec<&str> = table
                .columns
                .iter()
                .filter(|c| !c.present())
                .map(|c| c.column.as_str())
                .collect();
            let legacy: Vec<String> = table
                .columns
                .iter()
                .filter(|c| c.resolved.as_deref().is_some_and(|r| r != c.column))
                .map(|c| {
                    format!("{} (as {})", c.column, c.resolved.as_deref().unwrap_or_default())
                })
                .collect();
            if absent.is_empty() && legacy.is_empty() {
                writeln!(f, "{}: ok", table.table)?;
            } else {
                if !absent.is_empty() {
                    writeln!(f, "{}: missing columns {}", table.table, absent.join(", "))?;
                }
                if !legacy.is_empty() {
                    writeln!(f, "{}: legacy columns {}", table.table, legacy.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

/// Walks the expected logical schema with the prober. Each logical column
/// is probed through its candidate list and counts as missing only when no
/// candidate resolves. A missing table is a finding, not an error; any
/// other probe failure propagates.
pub async fn schema_report<P: ProbeColumns>(prober: &P) -> Result<SchemaReport, AppError> {
    let mut tables = Vec::with_capacity(EXPECTED_SCHEMA.len());
    'tables: for (table, columns) in EXPECTED_SCHEMA {
        let mut column_reports = Vec::with_capacity(columns.len());
        for candidates in *columns {
            let mut resolved = None;
            for candidate in *candidates {
                match prober.column_exists(table, candidate).await {
                    Ok(true) => {
                        resolved = Some((*candidate).to_string());
                        break;
                    }
                    Ok(false) => {}
                    Err(err) if is_undefined_table(&err) => {
                        tables.push(TableReport {
                            table: (*table).to_string(),
                            present: false,
                            columns: Vec::new(),
                        });
                        continue 'tables;
                    }
                    Err(err) => return Err(err),
                }
            }
            column_reports.push(ColumnReport {
                column: candidates[0].to_string(),
                resolved,
            });
        }
        tables.push(TableReport {
            table: (*table).to_string(),
            present: true,
            columns: column_reports,
        });
    }
    Ok(SchemaReport { tables })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// A fully migrated database: every current-generation column exists,
    /// the legacy notification column does not.
    struct MigratedProber;

    #[async_trait]
    impl ProbeColumns for MigratedProber {
        async fn column_exists(&self, table: &str, column: &str) -> Result<bool, AppError> {
            Ok(!(table == "notifications" && column == "related_entity_id"))
        }
    }

    /// A database stopped before the rename migration: has
    /// related_entity_id, lacks related_id and title.
    struct LegacyProber;

    #[async_trait]
    impl ProbeColumns for LegacyProber {
        async fn column_exists(&self, table: &str, column: &str) -> Result<bool, AppError> {
            if table == "notifications" && (column == "related_id" || column == "title") {
                return Ok(false);
            }
            Ok(true)
        }
    }

    #[tokio::test]
    async fn fully_migrated_schema_reports_clean() {
        let report = schema_report(&MigratedProber).await.unwrap();
        assert!(report.missing_tables().is_empty());
        assert_eq!(report.missing_columns(), Vec::<String>::new());
        assert!(report.legacy_columns().is_empty());
    }

    #[tokio::test]
    async fn legacy_schema_resolves_related_and_reports_title_missing() {
        let report = schema_report(&LegacyProber).await.unwrap();
        assert_eq!(report.missing_columns(), vec!["notifications.title".to_string()]);
        assert_eq!(
            report.legacy_columns(),
            vec!["notifications.related_id (as related_entity_id)".to_string()]
        );
        assert!(report.missing_tables().is_empty());
    }
}
