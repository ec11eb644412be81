use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::NotificationType;
use tutorlink_database::insert_notification;

/// Side-effect notification for write paths: a failed insert must not fail
/// the booking that triggered it. The insert itself resolves the live
/// notifications schema generation.
pub async fn notify_best_effort(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    message: &str,
    notification_type: NotificationType,
    related_id: Option<Uuid>,
) {
    if let Err(err) =
        insert_notification(pool, user_id, title, message, notification_type, related_id).await
    {
        tracing::warn!(user_id = %user_id, "notification insert failed: {}", err);
    }
}
