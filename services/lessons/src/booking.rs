use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::{AppError, Lesson, LessonStatus, NotificationType};
use tutorlink_database::models::BookingRow;
use tutorlink_database::FallbackReport;

use crate::email::EmailService;
use crate::mapper::lesson_from_booking;
use crate::models::CreateBookingRequest;
use crate::notify::notify_best_effort;
use crate::profiles::fetch_display_profiles;

/// Write path: validation and database failures propagate to the caller,
/// unlike the read paths.
pub async fn create_booking(
    pool: &PgPool,
    email_service: &EmailService,
    student_id: Uuid,
    request: &CreateBookingRequest,
) -> Result<Lesson, AppError> {
    validate_booking(request, Utc::now().date_naive())?;

    let row = sqlx::query_as::<_, BookingRow>(
        r#"
        INSERT INTO bookings (subject, lesson_date, start_time, end_time, status, teacher_id, student_id)
        VALUES ($1, $2, $3, $4, 'pending', $5, $6)
        RETURNING id, subject, lesson_date, start_time, end_time, status, teacher_id, student_id, created_at
        "#,
    )
    .bind(request.subject.trim())
    .bind(request.lesson_date)
    .bind(&request.start_time)
    .bind(&request.end_time)
    .bind(request.teacher_id)
    .bind(student_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::Database)?;

    let mut report = FallbackReport::new("booking.create");
    let profiles =
        fetch_display_profiles(pool, &[row.teacher_id, row.student_id], &mut report).await;
    let lesson = lesson_from_booking(row, &profiles);

    notify_best_effort(
        pool,
        lesson.teacher_id,
        "New booking request",
        &format!(
            "{} requested a {} lesson on {} at {}",
            lesson.student_name, lesson.subject, lesson.date, lesson.start_time
        ),
        NotificationType::BookingConfirmation,
        Some(lesson.id),
    )
    .await;

    send_email_best_effort(pool, email_service, lesson.teacher_id, &lesson, Mail::Confirmation).await;

    Ok(lesson)
}

/// Status transition performed by the lesson's teacher or student.
pub async fn change_status(
    pool: &PgPool,
    email_service: &EmailService,
    actor_id: Uuid,
    lesson_id: Uuid,
    new_status: LessonStatus,
) -> Result<Lesson, AppError> {
    let row = sqlx::query_as::<_, BookingRow>(
        "SELECT id, subject, lesson_date, start_time, end_time, status, teacher_id, student_id, created_at \
         FROM bookings WHERE id = $1",
    )
    .bind(lesson_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::NotFound(format!("lesson {}", lesson_id)))?;

    if actor_id != row.teacher_id && actor_id != row.student_id {
        return Err(AppError::Authorization(
            "only the lesson's teacher or student may change its status".to_string(),
        ));
    }

    let current: LessonStatus = row.status.parse()?;
    if !transition_allowed(current, new_status) {
        return Err(AppError::Conflict(format!(
            "cannot move lesson from {} to {}",
            current.as_str(),
            new_status.as_str()
        )));
    }

    let updated = sqlx::query_as::<_, BookingRow>(
        "UPDATE bookings SET status = $1 WHERE id = $2 \
         RETURNING id, subject, lesson_date, start_time, end_time, status, teacher_id, student_id, created_at",
    )
    .bind(new_status.as_str())
    .bind(lesson_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::Database)?;

    let mut report = FallbackReport::new("booking.status");
    let profiles =
        fetch_display_profiles(pool, &[updated.teacher_id, updated.student_id], &mut report).await;
    let lesson = lesson_from_booking(updated, &profiles);

    // The counterparty gets notified, not the actor.
    let counterparty = if actor_id == lesson.teacher_id {
        lesson.student_id
    } else {
        lesson.teacher_id
    };

    match new_status {
        LessonStatus::Confirmed => {
            notify_best_effort(
                pool,
                counterparty,
                "Lesson confirmed",
                &format!(
                    "Your {} lesson on {} at {} is confirmed",
                    lesson.subject, lesson.date, lesson.start_time
                ),
                NotificationType::BookingConfirmation,
                Some(lesson.id),
            )
            .await;
            send_email_best_effort(pool, email_service, counterparty, &lesson, Mail::Confirmation)
                .await;
        }
        LessonStatus::Cancelled => {
            notify_best_effort(
                pool,
                counterparty,
                "Lesson cancelled",
                &format!(
                    "Your {} lesson on {} at {} was cancelled",
                    lesson.subject, lesson.date, lesson.start_time
                ),
                NotificationType::System,
                Some(lesson.id),
            )
            .await;
            send_email_best_effort(pool, email_service, counterparty, &lesson, Mail::Cancellation)
                .await;
        }
        _ => {}
    }

    Ok(lesson)
}

pub fn validate_booking(request: &CreateBookingRequest, today: NaiveDate) -> Result<(), AppError> {
    if request.subject.trim().is_empty() {
        return Err(AppError::Validation("subject must not be empty".to_string()));
    }
    if !valid_time(&request.start_time) || !valid_time(&request.end_time) {
        return Err(AppError::Validation(
            "times must be zero-padded 24h HH:MM".to_string(),
        ));
    }
    if request.end_time <= request.start_time {
        return Err(AppError::Validation(
            "end time must be after start time".to_string(),
        ));
    }
    if request.lesson_date < today {
        return Err(AppError::Validation(
            "lesson date must not be in the past".to_string(),
        ));
    }
    Ok(())
}

/// Legal status moves. Completed and cancelled are terminal.
pub fn transition_allowed(from: LessonStatus, to: LessonStatus) -> bool {
    use LessonStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Pending, Rescheduled)
            | (Confirmed, Completed)
            | (Confirmed, Cancelled)
            | (Confirmed, Rescheduled)
            | (Rescheduled, Confirmed)
            | (Rescheduled, Cancelled)
    )
}

pub fn valid_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if ![0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit()) {
        return false;
    }
    let (hh, mm) = (&s[0..2], &s[3..5]);
    match (hh.parse::<u8>(), mm.parse::<u8>()) {
        (Ok(h), Ok(m)) => h < 24 && m < 60,
        _ => false,
    }
}

enum Mail {
    Confirmation,
    Cancellation,
}

async fn send_email_best_effort(
    pool: &PgPool,
    email_service: &EmailService,
    user_id: Uuid,
    lesson: &Lesson,
    kind: Mail,
) {
    let email = sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await;
    let Ok(Some(address)) = email else {
        tracing::warn!(user_id = %user_id, "no email address for mock send");
        return;
    };
    let sent = match kind {
        Mail::Confirmation => email_service.send_booking_confirmation(&address, lesson).await,
        Mail::Cancellation => email_service.send_cancellation_notice(&address, lesson).await,
    };
    if let Err(err) = sent {
        tracing::warn!(user_id = %user_id, "mock email failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateBookingRequest {
        CreateBookingRequest {
            teacher_id: Uuid::new_v4(),
            subject: "Mathematics".to_string(),
            lesson_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            start_time: "14:00".to_string(),
            end_time: "15:00".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_booking(&request(), today()).is_ok());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let mut req = request();
        req.subject = "   ".to_string();
        assert!(validate_booking(&req, today()).is_err());
    }

    #[test]
    fn malformed_times_are_rejected() {
        for bad in ["2pm", "14:0", "24:00", "14:60", "1400", "14-00"] {
            let mut req = request();
            req.start_time = bad.to_string();
            assert!(validate_booking(&req, today()).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn end_must_follow_start() {
        let mut req = request();
        req.start_time = "15:00".to_string();
        req.end_time = "14:00".to_string();
        assert!(validate_booking(&req, today()).is_err());

        req.end_time = "15:00".to_string();
        assert!(validate_booking(&req, today()).is_err());
    }

    #[test]
    fn past_dates_are_rejected_but_today_is_allowed() {
        let mut req = request();
        req.lesson_date = today() - chrono::Days::new(1);
        assert!(validate_booking(&req, today()).is_err());

        req.lesson_date = today();
        assert!(validate_booking(&req, today()).is_ok());
    }

    #[test]
    fn terminal_states_allow_no_transitions() {
        use LessonStatus::*;
        for to in [Pending, Confirmed, Completed, Cancelled, Rescheduled] {
            assert!(!transition_allowed(Completed, to));
            assert!(!transition_allowed(Cancelled, to));
        }
    }

    #[test]
    fn pending_can_be_confirmed_or_cancelled() {
        use LessonStatus::*;
        assert!(transition_allowed(Pending, Confirmed));
        assert!(transition_allowed(Pending, Cancelled));
        assert!(!transition_allowed(Pending, Completed));
    }

    #[test]
    fn only_confirmed_lessons_complete() {
        use LessonStatus::*;
        assert!(transition_allowed(Confirmed, Completed));
        assert!(!transition_allowed(Rescheduled, Completed));
    }
}
