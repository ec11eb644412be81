use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fully joined lesson row as returned by the `get_upcoming_lessons` /
/// `get_past_lessons` SQL functions. Display fields are nullable: a booking
/// can outlive its profiles.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonSummaryRow {
    pub id: Uuid,
    pub subject: String,
    pub lesson_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub teacher_name: Option<String>,
    pub student_name: Option<String>,
    pub teacher_avatar: Option<String>,
    pub student_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Bare booking row from the base table, used by the direct-query fallback.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub subject: String,
    pub lesson_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DisplayProfileRow {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Notification row in whichever shape the resolved schema produced. The
/// select aliases the resolved related column to `related_id` and fills
/// `title` with NULL when the column is absent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub related_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub booking_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub payout_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub teacher_name: Option<String>,
    pub student_name: Option<String>,
    pub lesson_subject: Option<String>,
    pub lesson_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LearningModuleRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub subject: String,
    pub level: String,
    pub lesson_count: i32,
    pub progress: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonStatsRow {
    pub total: i64,
    pub upcoming: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// Aggregates come back NULL on empty sets, hence the options.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EarningsRow {
    pub total_earned: Option<Decimal>,
    pub pending_payout: Option<Decimal>,
    pub completed_payouts: Option<Decimal>,
    pub lesson_count: Option<i64>,
}
