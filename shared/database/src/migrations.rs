use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::AppError;

pub struct MigrationRunner {
    pool: PgPool,
}

impl MigrationRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_all_migrations(&self) -> Result<(), AppError> {
        tracing::info!("Starting database migrations...");

        let migrator = sqlx::migrate!("./migrations");
        migrator.run(&self.pool).await.map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::info!("All migrations completed successfully");
        Ok(())
    }

    pub async fn check_migration_status(&self) -> Result<MigrationStatus, AppError> {
        use sqlx::migrate::Migrate;

        let migrator = sqlx::migrate!("./migrations");
        let mut conn = self.pool.acquire().await.map_err(AppError::Database)?;
        conn.ensure_migrations_table()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let applied = conn
            .list_applied_migrations()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let total_migrations = migrator.migrations.len();
        let applied_count = applied.len();
        let pending_count = total_migrations.saturating_sub(applied_count);

        Ok(MigrationStatus {
            total: total_migrations,
            applied: applied_count,
            pending: pending_count,
            is_up_to_date: pending_count == 0,
        })
    }

    /// Demo data for local development: one teacher, one student, one
    /// confirmed booking between them.
    pub async fn seed_sample_data(&self) -> Result<(), AppError> {
        let teacher_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind("teacher@tutorlink.dev")
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if teacher_exists {
            tracing::info!("Sample data already present, skipping seed");
            return Ok(());
        }

        let teacher_id = Uuid::new_v4();
        let student_id = Uuid::new_v4();

        sqlx::query("INSERT INTO users (user_id, email, role) VALUES ($1, $2, $3), ($4, $5, $6)")
            .bind(teacher_id)
            .bind("teacher@tutorlink.dev")
            .bind("teacher")
            .bind(student_id)
            .bind("student@tutorlink.dev")
            .bind("student")
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO profiles (user_id, first_name, last_name) VALUES ($1, $2, $3), ($4, $5, $6)",
        )
        .bind(teacher_id)
        .bind("Maria")
        .bind("Alvarez")
        .bind(student_id)
        .bind("Sam")
        .bind("Okafor")
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        sqlx::query(
            r#"
            INSERT INTO bookings (id, subject, lesson_date, start_time, end_time, status, teacher_id, student_id)
            VALUES ($1, $2, CURRENT_DATE + 1, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind("Mathematics")
        .bind("14:00")
        .bind("15:00")
        .bind("confirmed")
        .bind(teacher_id)
        .bind(student_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        tracing::info!("Sample data seeded");
        Ok(())
    }
}

#[derive(Debug)]
pub struct MigrationStatus {
    pub total: usize,
    pub applied: usize,
    pub pending: usize,
    pub is_up_to_date: bool,
}

impl std::fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Migrations: {}/{} applied, {} pending",
            self.applied, self.total, self.pending
        )
    }
}
