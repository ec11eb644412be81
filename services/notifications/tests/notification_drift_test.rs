use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use tutorlink_common::{DatabaseConfig, NotificationType};
use tutorlink_database::{create_pool, MigrationRunner};
use tutorlink_notifications::store;

#[tokio::test]
async fn store_works_on_both_schema_generations() {
    // Skip test if no database is available
    if std::env::var("DATABASE_URL").is_err() {
        println!("Skipping database test - DATABASE_URL not set");
        return;
    }

    let mut config = DatabaseConfig::from_env();
    config.database = "tutorlink_notifications_test".to_string();
    config.max_connections = 5;

    let admin_config = DatabaseConfig {
        database: "postgres".to_string(),
        ..config.clone()
    };
    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&admin_config.connection_string())
        .await
        .expect("Failed to connect to admin database");
    sqlx::query(&format!("DROP DATABASE IF EXISTS {} WITH (FORCE)", config.database))
        .execute(&admin_pool)
        .await
        .expect("Failed to drop test database");

    let pool = create_pool(&config).await.expect("Failed to create test pool");
    MigrationRunner::new(pool.clone())
        .run_all_migrations()
        .await
        .expect("Failed to run migrations");

    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (user_id, email, role) VALUES ($1, 'sam@example.com', 'student')")
        .bind(user_id)
        .execute(&pool)
        .await
        .expect("Failed to insert user");

    // Current-generation schema: title and related_id round-trip
    let lesson_id = Uuid::new_v4();
    store::create_notification(
        &pool,
        user_id,
        "Lesson confirmed",
        "Your Mathematics lesson is confirmed",
        NotificationType::BookingConfirmation,
        Some(lesson_id),
    )
    .await
    .expect("Failed to create notification");

    let current = store::fetch_notifications(&pool, user_id).await;
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].title, "Lesson confirmed");
    assert_eq!(current[0].related_id, Some(lesson_id));
    assert_eq!(current[0].notification_type, NotificationType::BookingConfirmation);

    // Rewind the table to its legacy shape
    sqlx::query("ALTER TABLE notifications RENAME COLUMN related_id TO related_entity_id")
        .execute(&pool)
        .await
        .expect("Failed to rename column");
    sqlx::query("ALTER TABLE notifications DROP COLUMN title")
        .execute(&pool)
        .await
        .expect("Failed to drop title");

    // Reads resolve the legacy column and substitute the default title
    let legacy = store::fetch_notifications(&pool, user_id).await;
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy[0].title, "Notification");
    assert_eq!(legacy[0].related_id, Some(lesson_id));

    // Writes land in the legacy column too
    let second_lesson = Uuid::new_v4();
    store::create_notification(
        &pool,
        user_id,
        "ignored on legacy schema",
        "Reminder",
        NotificationType::LessonReminder,
        Some(second_lesson),
    )
    .await
    .expect("Failed to create legacy notification");

    let after = store::fetch_notifications(&pool, user_id).await;
    assert_eq!(after.len(), 2);
    assert!(after.iter().any(|n| n.related_id == Some(second_lesson)));

    // Unread bookkeeping is shape-independent
    assert_eq!(store::unread_count(&pool, user_id).await, 2);
    let updated = store::mark_all_read(&pool, user_id).await.expect("mark all");
    assert_eq!(updated, 2);
    assert_eq!(store::unread_count(&pool, user_id).await, 0);
}
