use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::{AppError, Lesson, LessonStats, UserRole};
use tutorlink_database::models::{BookingRow, LessonStatsRow, LessonSummaryRow};
use tutorlink_database::FallbackReport;

use crate::mapper::{lesson_from_booking, lesson_from_summary, sort_lessons};
use crate::models::LessonWindow;
use crate::profiles::fetch_display_profiles;

/// Fetches a user's lessons for one calendar window. Strategy chain: the
/// server-side lesson function first, the base `bookings` table plus batched
/// profile resolution second. Never errors: when every strategy fails the
/// chain is logged and the caller gets an empty list.
pub async fn fetch_lessons(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
    window: LessonWindow,
) -> Vec<Lesson> {
    let mut report = FallbackReport::new(window.context());

    match lesson_rpc(pool, user_id, role, window).await {
        Ok(rows) => {
            let mut lessons: Vec<Lesson> = rows.into_iter().map(lesson_from_summary).collect();
            sort_lessons(&mut lessons, window);
            return lessons;
        }
        Err(err) => report.record("lesson_rpc", &err),
    }

    match direct_query(pool, user_id, role, window).await {
        Ok(rows) => {
            let mut user_ids: Vec<Uuid> = Vec::with_capacity(rows.len() * 2);
            for row in &rows {
                user_ids.push(row.teacher_id);
                user_ids.push(row.student_id);
            }
            let profiles = fetch_display_profiles(pool, &user_ids, &mut report).await;
            let mut lessons: Vec<Lesson> = rows
                .into_iter()
                .map(|row| lesson_from_booking(row, &profiles))
                .collect();
            sort_lessons(&mut lessons, window);
            lessons
        }
        Err(err) => {
            report.record("direct_query", &err);
            report.log_degraded();
            Vec::new()
        }
    }
}

async fn lesson_rpc(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
    window: LessonWindow,
) -> Result<Vec<LessonSummaryRow>, AppError> {
    let sql = match window {
        LessonWindow::Upcoming => "SELECT * FROM get_upcoming_lessons($1, $2)",
        LessonWindow::Past => "SELECT * FROM get_past_lessons($1, $2)",
    };
    sqlx::query_as::<_, LessonSummaryRow>(sql)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_all(pool)
        .await
        .map_err(AppError::Database)
}

async fn direct_query(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
    window: LessonWindow,
) -> Result<Vec<BookingRow>, AppError> {
    // Role picks the foreign key; the window partitions on the calendar day,
    // so a lesson later today still counts as upcoming.
    let fk = match role {
        UserRole::Teacher => "teacher_id",
        UserRole::Student | UserRole::Admin => "student_id",
    };
    let (cmp, order) = match window {
        LessonWindow::Upcoming => (">=", "ASC"),
        LessonWindow::Past => ("<", "DESC"),
    };
    let sql = format!(
        "SELECT id, subject, lesson_date, start_time, end_time, status, teacher_id, student_id, created_at \
         FROM bookings WHERE {fk} = $1 AND lesson_date {cmp} CURRENT_DATE \
         ORDER BY lesson_date {order}, start_time {order}",
    );
    sqlx::query_as::<_, BookingRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::Database)
}

/// Lesson counters for a profile header. Same degrade-to-default policy as
/// the list fetch.
pub async fn fetch_lesson_stats(pool: &PgPool, user_id: Uuid, role: UserRole) -> LessonStats {
    let mut report = FallbackReport::new("lessons.stats");

    match stats_rpc(pool, user_id, role).await {
        Ok(row) => return stats_from_row(row),
        Err(err) => report.record("stats_rpc", &err),
    }

    match stats_direct(pool, user_id, role).await {
        Ok(row) => stats_from_row(row),
        Err(err) => {
            report.record("stats_direct", &err);
            report.log_degraded();
            LessonStats::default()
        }
    }
}

async fn stats_rpc(pool: &PgPool, user_id: Uuid, role: UserRole) -> Result<LessonStatsRow, AppError> {
    sqlx::query_as::<_, LessonStatsRow>("SELECT * FROM get_lesson_stats($1, $2)")
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(pool)
        .await
        .map_err(AppError::Database)
}

async fn stats_direct(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
) -> Result<LessonStatsRow, AppError> {
    let fk = match role {
        UserRole::Teacher => "teacher_id",
        UserRole::Student | UserRole::Admin => "student_id",
    };
    let sql = format!(
        "SELECT COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE lesson_date >= CURRENT_DATE AND status <> 'cancelled') AS upcoming, \
                COUNT(*) FILTER (WHERE status = 'completed') AS completed, \
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled \
         FROM bookings WHERE {fk} = $1",
    );
    sqlx::query_as::<_, LessonStatsRow>(&sql)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(AppError::Database)
}

fn stats_from_row(row: LessonStatsRow) -> LessonStats {
    LessonStats {
        total: row.total,
        upcoming: row.upcoming,
        completed: row.completed,
        cancelled: row.cancelled,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    /// Pure restatement of the window predicate used in the SQL above; keeps
    /// the partition property visible without a database.
    fn in_window(lesson_date: NaiveDate, today: NaiveDate, window: LessonWindow) -> bool {
        match window {
            LessonWindow::Upcoming => lesson_date >= today,
            LessonWindow::Past => lesson_date < today,
        }
    }

    #[test]
    fn windows_partition_the_calendar() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let days = [
            today - chrono::Days::new(2),
            today - chrono::Days::new(1),
            today,
            today + chrono::Days::new(1),
        ];
        for day in days {
            let upcoming = in_window(day, today, LessonWindow::Upcoming);
            let past = in_window(day, today, LessonWindow::Past);
            // Disjoint and covering.
            assert!(upcoming != past, "day {day} must be in exactly one window");
        }
    }

    #[test]
    fn same_day_counts_as_upcoming() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(in_window(today, today, LessonWindow::Upcoming));
        assert!(!in_window(today, today, LessonWindow::Past));
    }

    #[test]
    fn stats_row_maps_field_for_field() {
        let stats = stats_from_row(LessonStatsRow {
            total: 10,
            upcoming: 3,
            completed: 5,
            cancelled: 2,
        });
        assert_eq!(stats.total, 10);
        assert_eq!(stats.upcoming, 3);
        assert_eq!(stats.completed, 5);
        assert_eq!(stats.cancelled, 2);
    }
}
