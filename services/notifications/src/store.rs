use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::{AppError, Notification, NotificationType};
use tutorlink_database::models::NotificationRow;
use tutorlink_database::{resolve_notification_shape, FallbackReport, NotificationShape};

use crate::mapper::notification_from_row;

/// Builds the select list for a resolved shape. Absent columns are selected
/// as typed NULLs so one row type covers every schema generation.
fn select_sql(shape: &NotificationShape) -> String {
    let title = if shape.has_title { "title" } else { "NULL::text AS title" };
    let related = match &shape.related_column {
        Some(column) => format!("{} AS related_id", column),
        None => "NULL::uuid AS related_id".to_string(),
    };
    format!(
        "SELECT id, user_id, {}, message, notification_type, is_read, created_at, {} \
         FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        title, related
    )
}

/// Lists a user's notifications, newest first. Degrades to empty on an
/// exhausted chain, matching the other read paths.
pub async fn fetch_notifications(pool: &PgPool, user_id: Uuid) -> Vec<Notification> {
    let mut report = FallbackReport::new("notifications.list");

    match resolved_select(pool, user_id).await {
        Ok(rows) => return rows.into_iter().map(notification_from_row).collect(),
        Err(err) => report.record("resolved_select", &err),
    }

    // Schema probing itself failed; try the minimal shape every generation
    // of the table has had.
    match minimal_select(pool, user_id).await {
        Ok(rows) => rows.into_iter().map(notification_from_row).collect(),
        Err(err) => {
            report.record("minimal_select", &err);
            report.log_degraded();
            Vec::new()
        }
    }
}

async fn resolved_select(pool: &PgPool, user_id: Uuid) -> Result<Vec<NotificationRow>, AppError> {
    let shape = resolve_notification_shape(pool).await?;
    sqlx::query_as::<_, NotificationRow>(&select_sql(&shape))
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::Database)
}

async fn minimal_select(pool: &PgPool, user_id: Uuid) -> Result<Vec<NotificationRow>, AppError> {
    sqlx::query_as::<_, NotificationRow>(
        "SELECT id, user_id, NULL::text AS title, message, notification_type, is_read, created_at, \
                NULL::uuid AS related_id \
         FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)
}

pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|err| {
        tracing::warn!(user_id = %user_id, "unread count failed, degrading to 0: {}", err);
        0
    })
}

/// Write path: propagates failures. Scoped to the owning user so one user
/// cannot mark another's notifications.
pub async fn mark_read(pool: &PgPool, user_id: Uuid, notification_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(AppError::Database)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("notification {}", notification_id)));
    }
    Ok(())
}

pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
    let result =
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE")
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(AppError::Database)?;
    Ok(result.rows_affected())
}

/// Insert through the resolved shape, so event producers work against both
/// schema generations. Delegates to the shared drift-aware insert.
pub async fn create_notification(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    message: &str,
    notification_type: NotificationType,
    related_id: Option<Uuid>,
) -> Result<(), AppError> {
    tutorlink_database::insert_notification(pool, user_id, title, message, notification_type, related_id)
        .await
}
