use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::{AppError, NotificationType};

use crate::probe::{ColumnProber, ProbeColumns};
use crate::resolve::SchemaResolver;

/// Which optional columns the live notifications table actually has.
#[derive(Debug, Clone)]
pub struct NotificationShape {
    /// Resolved related column: `related_id` on current databases,
    /// `related_entity_id` on legacy ones, `None` when neither exists.
    pub related_column: Option<String>,
    pub has_title: bool,
}

pub async fn resolve_notification_shape(pool: &PgPool) -> Result<NotificationShape, AppError> {
    shape_from_resolver(&SchemaResolver::new(ColumnProber::new(pool.clone()))).await
}

async fn shape_from_resolver<P: ProbeColumns>(
    resolver: &SchemaResolver<P>,
) -> Result<NotificationShape, AppError> {
    let related_column = resolver
        .resolve("notifications", &["related_id", "related_entity_id"])
        .await?;
    let has_title = resolver
        .prober()
        .column_exists("notifications", "title")
        .await?;
    Ok(NotificationShape {
        related_column,
        has_title,
    })
}

/// Insert column/placeholder lists for a resolved shape. Column names come
/// from a fixed candidate list, safe to interpolate.
fn insert_sql(shape: &NotificationShape) -> String {
    let mut columns = vec!["user_id", "message", "notification_type"];
    if shape.has_title {
        columns.push("title");
    }
    if let Some(column) = shape.related_column.as_deref() {
        columns.push(column);
    }
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO notifications ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Inserts an in-app notification row through the resolved shape, so event
/// producers work against both schema generations.
pub async fn insert_notification(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    message: &str,
    notification_type: NotificationType,
    related_id: Option<Uuid>,
) -> Result<(), AppError> {
    let shape = resolve_notification_shape(pool).await?;
    let sql = insert_sql(&shape);

    let mut query = sqlx::query(&sql)
        .bind(user_id)
        .bind(message)
        .bind(notification_type.as_str());
    if shape.has_title {
        query = query.bind(title);
    }
    if shape.related_column.is_some() {
        query = query.bind(related_id);
    }

    query.execute(pool).await.map_err(AppError::Database)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use async_trait::async_trait;

    use super::*;

    struct FixedProber {
        existing: HashSet<&'static str>,
    }

    #[async_trait]
    impl ProbeColumns for FixedProber {
        async fn column_exists(&self, table: &str, column: &str) -> Result<bool, AppError> {
            assert_eq!(table, "notifications");
            Ok(self.existing.contains(column))
        }
    }

    #[tokio::test]
    async fn current_schema_resolves_related_id_and_title() {
        let resolver = SchemaResolver::new(FixedProber {
            existing: ["related_id", "title"].into_iter().collect(),
        });
        let shape = shape_from_resolver(&resolver).await.unwrap();
        assert_eq!(shape.related_column.as_deref(), Some("related_id"));
        assert!(shape.has_title);
    }

    #[tokio::test]
    async fn legacy_schema_resolves_the_old_column_without_title() {
        let resolver = SchemaResolver::new(FixedProber {
            existing: ["related_entity_id"].into_iter().collect(),
        });
        let shape = shape_from_resolver(&resolver).await.unwrap();
        assert_eq!(shape.related_column.as_deref(), Some("related_entity_id"));
        assert!(!shape.has_title);
    }

    #[test]
    fn insert_sql_matches_the_resolved_columns() {
        let full = insert_sql(&NotificationShape {
            related_column: Some("related_id".to_string()),
            has_title: true,
        });
        assert_eq!(
            full,
            "INSERT INTO notifications (user_id, message, notification_type, title, related_id) \
             VALUES ($1, $2, $3, $4, $5)"
        );

        let legacy = insert_sql(&NotificationShape {
            related_column: Some("related_entity_id".to_string()),
            has_title: false,
        });
        assert!(legacy.contains("related_entity_id"));
        assert!(!legacy.contains("title"));

        let bare = insert_sql(&NotificationShape {
            related_column: None,
            has_title: false,
        });
        assert_eq!(
            bare,
            "INSERT INTO notifications (user_id, message, notification_type) VALUES ($1, $2, $3)"
        );
    }
}
