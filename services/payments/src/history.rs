use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::{AppError, EarningsSummary, Payment, UserRole};
use tutorlink_database::models::{EarningsRow, PaymentRow};
use tutorlink_database::FallbackReport;

use crate::mapper::{earnings_from_row, payment_from_row};

/// Payment history, newest first. Read-only: rows are written by the
/// external payment processor. View first, base tables second, empty list
/// when the chain is exhausted.
pub async fn fetch_payment_history(pool: &PgPool, user_id: Uuid, role: UserRole) -> Vec<Payment> {
    let mut report = FallbackReport::new("payments.history");

    match history_view(pool, user_id, role).await {
        Ok(rows) => return rows.into_iter().map(payment_from_row).collect(),
        Err(err) => report.record("history_view", &err),
    }

    match base_tables(pool, user_id, role).await {
        Ok(rows) => rows.into_iter().map(payment_from_row).collect(),
        Err(err) => {
            report.record("history_base_tables", &err);
            report.log_degraded();
            Vec::new()
        }
    }
}

fn role_fk(role: UserRole) -> &'static str {
    match role {
        UserRole::Teacher => "teacher_id",
        UserRole::Student | UserRole::Admin => "student_id",
    }
}

async fn history_view(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
) -> Result<Vec<PaymentRow>, AppError> {
    let sql = format!(
        "SELECT id, amount, currency, status, booking_id, created_at, payout_date, payment_method, \
                teacher_name, student_name, lesson_subject, lesson_date \
         FROM payment_history_view WHERE {} = $1 ORDER BY created_at DESC",
        role_fk(role)
    );
    sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::Database)
}

async fn base_tables(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
) -> Result<Vec<PaymentRow>, AppError> {
    let sql = format!(
        r#"
        SELECT
            pay.id, pay.amount, pay.currency, pay.status, pay.booking_id,
            pay.created_at, pay.payout_date, pay.payment_method,
            NULLIF(TRIM(CONCAT(tp.first_name, ' ', tp.last_name)), '') AS teacher_name,
            NULLIF(TRIM(CONCAT(sp.first_name, ' ', sp.last_name)), '') AS student_name,
            b.subject AS lesson_subject,
            b.lesson_date
        FROM payments pay
        JOIN bookings b ON b.id = pay.booking_id
        LEFT JOIN profiles tp ON tp.user_id = b.teacher_id
        LEFT JOIN profiles sp ON sp.user_id = b.student_id
        WHERE b.{} = $1
        ORDER BY pay.created_at DESC
        "#,
        role_fk(role)
    );
    sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::Database)
}

/// Teacher earnings rollup: the `get_teacher_earnings` function first, a
/// direct aggregate second, zeroed summary when both fail.
pub async fn fetch_earnings(pool: &PgPool, teacher_id: Uuid) -> EarningsSummary {
    let mut report = FallbackReport::new("payments.earnings");

    match earnings_rpc(pool, teacher_id).await {
        Ok(row) => return earnings_from_row(row),
        Err(err) => report.record("earnings_rpc", &err),
    }

    match earnings_direct(pool, teacher_id).await {
        Ok(row) => earnings_from_row(row),
        Err(err) => {
            report.record("earnings_direct", &err);
            report.log_degraded();
            EarningsSummary::default()
        }
    }
}

async fn earnings_rpc(pool: &PgPool, teacher_id: Uuid) -> Result<EarningsRow, AppError> {
    sqlx::query_as::<_, EarningsRow>("SELECT * FROM get_teacher_earnings($1)")
        .bind(teacher_id)
        .fetch_one(pool)
        .await
        .map_err(AppError::Database)
}

async fn earnings_direct(pool: &PgPool, teacher_id: Uuid) -> Result<EarningsRow, AppError> {
    sqlx::query_as::<_, EarningsRow>(
        r#"
        SELECT
            SUM(pay.amount) FILTER (WHERE pay.status <> 'refunded') AS total_earned,
            SUM(pay.amount) FILTER (WHERE pay.status = 'pending_payout') AS pending_payout,
            SUM(pay.amount) FILTER (WHERE pay.status = 'payout_completed') AS completed_payouts,
            COUNT(*) AS lesson_count
        FROM payments pay
        JOIN bookings b ON b.id = pay.booking_id
        WHERE b.teacher_id = $1
        "#,
    )
    .bind(teacher_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::Database)
}
