use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "teacher" => Ok(UserRole::Teacher),
            "admin" => Ok(UserRole::Admin),
            other => Err(crate::AppError::Validation(format!("unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Pending => "pending",
            LessonStatus::Confirmed => "confirmed",
            LessonStatus::Completed => "completed",
            LessonStatus::Cancelled => "cancelled",
            LessonStatus::Rescheduled => "rescheduled",
        }
    }

    /// Lenient parse for rows read back from the database. Unknown strings
    /// degrade to `Pending` so list reads never fail on a bad row.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(LessonStatus::Pending)
    }
}

impl std::str::FromStr for LessonStatus {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LessonStatus::Pending),
            "confirmed" => Ok(LessonStatus::Confirmed),
            "completed" => Ok(LessonStatus::Completed),
            "cancelled" => Ok(LessonStatus::Cancelled),
            "rescheduled" => Ok(LessonStatus::Rescheduled),
            other => Err(crate::AppError::Validation(format!("unknown lesson status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    LessonReminder,
    BookingConfirmation,
    Message,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::LessonReminder => "lesson_reminder",
            NotificationType::BookingConfirmation => "booking_confirmation",
            NotificationType::Message => "message",
            NotificationType::System => "system",
        }
    }

    /// Unknown types read back from old rows degrade to `System`.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "lesson_reminder" => NotificationType::LessonReminder,
            "booking_confirmation" => NotificationType::BookingConfirmation,
            "message" => NotificationType::Message,
            _ => NotificationType::System,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    PendingPayout,
    PayoutCompleted,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::PendingPayout => "pending_payout",
            PaymentStatus::PayoutCompleted => "payout_completed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub id: Uuid,
    pub subject: String,
    pub date: NaiveDate,
    /// Wall-clock "HH:MM"; sorted lexicographically, which matches
    /// chronological order for zero-padded 24h times.
    pub start_time: String,
    pub end_time: String,
    pub status: LessonStatus,
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub teacher_name: String,
    pub student_name: String,
    pub teacher_avatar: Option<String>,
    pub student_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonStats {
    pub total: i64,
    pub upcoming: i64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub related_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub booking_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub payout_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub teacher_name: String,
    pub student_name: String,
    pub lesson_subject: String,
    pub lesson_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub total_earned: Decimal,
    pub pending_payout: Decimal,
    pub completed_payouts: Decimal,
    pub lesson_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningModule {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub level: String,
    pub lesson_count: i32,
    pub progress: Option<i32>,
}

// Common response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_status_round_trips_known_values() {
        for status in [
            LessonStatus::Pending,
            LessonStatus::Confirmed,
            LessonStatus::Completed,
            LessonStatus::Cancelled,
            LessonStatus::Rescheduled,
        ] {
            assert_eq!(status.as_str().parse::<LessonStatus>().unwrap(), status);
        }
    }

    #[test]
    fn lenient_status_parse_degrades_to_pending() {
        assert_eq!(LessonStatus::parse_lenient("no_show"), LessonStatus::Pending);
        assert_eq!(LessonStatus::parse_lenient(""), LessonStatus::Pending);
        assert_eq!(LessonStatus::parse_lenient("confirmed"), LessonStatus::Confirmed);
    }

    #[test]
    fn notification_type_lenient_parse_degrades_to_system() {
        assert_eq!(NotificationType::parse_lenient("payment_alert"), NotificationType::System);
        assert_eq!(
            NotificationType::parse_lenient("booking_confirmation"),
            NotificationType::BookingConfirmation
        );
    }
}
