use rust_decimal::Decimal;

use tutorlink_common::{EarningsSummary, Payment, PaymentStatus};
use tutorlink_database::models::{EarningsRow, PaymentRow};

pub const UNKNOWN_TEACHER: &str = "Unknown Teacher";
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

/// Payments are written by an external processor, so defend against status
/// strings this code never produced. Money not recognizably settled is
/// bucketed as pending payout.
pub fn parse_status(s: &str) -> PaymentStatus {
    match s {
        "paid" => PaymentStatus::Paid,
        "pending_payout" => PaymentStatus::PendingPayout,
        "payout_completed" => PaymentStatus::PayoutCompleted,
        "refunded" => PaymentStatus::Refunded,
        other => {
            tracing::warn!("unknown payment status {:?}, treating as pending payout", other);
            PaymentStatus::PendingPayout
        }
    }
}

pub fn payment_from_row(row: PaymentRow) -> Payment {
    Payment {
        id: row.id,
        amount: row.amount,
        currency: row.currency,
        status: parse_status(&row.status),
        booking_id: row.booking_id,
        created_at: row.created_at,
        payout_date: row.payout_date,
        payment_method: row.payment_method,
        teacher_name: row.teacher_name.unwrap_or_else(|| UNKNOWN_TEACHER.to_string()),
        student_name: row.student_name.unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
        lesson_subject: row.lesson_subject.unwrap_or_default(),
        lesson_date: row.lesson_date,
    }
}

/// SQL aggregates return NULL over empty sets; normalize to zeroes.
pub fn earnings_from_row(row: EarningsRow) -> EarningsSummary {
    EarningsSummary {
        total_earned: row.total_earned.unwrap_or(Decimal::ZERO),
        pending_payout: row.pending_payout.unwrap_or(Decimal::ZERO),
        completed_payouts: row.completed_payouts.unwrap_or(Decimal::ZERO),
        lesson_count: row.lesson_count.unwrap_or(0),
    }
}
