use tutorlink_common::{Notification, NotificationType};
use tutorlink_database::models::NotificationRow;

/// Substituted when the live schema predates the `title` column.
pub const DEFAULT_TITLE: &str = "Notification";

/// Normalizes a row from whichever schema generation the store resolved.
/// `related_id` is already aliased from the resolved source column.
pub fn notification_from_row(row: NotificationRow) -> Notification {
    Notification {
        id: row.id,
        user_id: row.user_id,
        title: row.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        message: row.message,
        notification_type: NotificationType::parse_lenient(&row.notification_type),
        is_read: row.is_read,
        created_at: row.created_at,
        related_id: row.related_id,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn row() -> NotificationRow {
        NotificationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: None,
            message: "Your lesson starts in one hour".to_string(),
            notification_type: "lesson_reminder".to_string(),
            is_read: false,
            created_at: Utc::now(),
            related_id: None,
        }
    }

    #[test]
    fn missing_title_maps_to_literal_notification() {
        let notification = notification_from_row(row());
        assert_eq!(notification.title, "Notification");
    }

    #[test]
    fn present_title_is_kept() {
        let mut r = row();
        r.title = Some("Lesson reminder".to_string());
        let notification = notification_from_row(r);
        assert_eq!(notification.title, "Lesson reminder");
    }

    #[test]
    fn related_id_resolved_from_legacy_column_passes_through() {
        // The store aliases related_entity_id to related_id on legacy
        // schemas; the mapper must carry the value unchanged.
        let related = Uuid::new_v4();
        let mut r = row();
        r.related_id = Some(related);
        let notification = notification_from_row(r);
        assert_eq!(notification.related_id, Some(related));
    }

    #[test]
    fn unknown_type_degrades_to_system() {
        let mut r = row();
        r.notification_type = "carrier_pigeon".to_string();
        let notification = notification_from_row(r);
        assert_eq!(notification.notification_type, NotificationType::System);
    }
}
