use std::time::Duration;

use tutorlink_common::{AppError, Lesson};

use crate::config::EmailConfig;

/// Stand-in for a transactional email provider: logs the message and
/// resolves after a fixed delay. The call sites and signatures are the ones
/// a real provider integration would keep.
#[derive(Clone)]
pub struct EmailService {
    from: String,
    delay: Duration,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            from: format!("{} <{}>", config.from_name, config.from_email),
            delay: Duration::from_millis(config.mock_delay_ms),
        }
    }

    pub async fn send_booking_confirmation(&self, to: &str, lesson: &Lesson) -> Result<(), AppError> {
        tracing::info!(
            from = %self.from,
            to,
            subject = %lesson.subject,
            date = %lesson.date,
            start = %lesson.start_time,
            "mock email: booking confirmation"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    pub async fn send_cancellation_notice(&self, to: &str, lesson: &Lesson) -> Result<(), AppError> {
        tracing::info!(
            from = %self.from,
            to,
            subject = %lesson.subject,
            date = %lesson.date,
            "mock email: lesson cancelled"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    pub async fn send_lesson_reminder(&self, to: &str, lesson: &Lesson) -> Result<(), AppError> {
        tracing::info!(
            from = %self.from,
            to,
            subject = %lesson.subject,
            date = %lesson.date,
            start = %lesson.start_time,
            "mock email: lesson reminder"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use tutorlink_common::LessonStatus;

    use super::*;

    fn lesson() -> Lesson {
        Lesson {
            id: Uuid::new_v4(),
            subject: "Chemistry".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            start_time: "14:00".to_string(),
            end_time: "15:00".to_string(),
            status: LessonStatus::Confirmed,
            teacher_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            teacher_name: "Maria Alvarez".to_string(),
            student_name: "Sam Okafor".to_string(),
            teacher_avatar: None,
            student_avatar: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn mock_sends_always_resolve() {
        let service = EmailService::new(&EmailConfig {
            from_name: "TutorLink".to_string(),
            from_email: "noreply@tutorlink.dev".to_string(),
            mock_delay_ms: 0,
        });
        let lesson = lesson();
        service
            .send_booking_confirmation("sam@example.com", &lesson)
            .await
            .unwrap();
        service
            .send_cancellation_notice("sam@example.com", &lesson)
            .await
            .unwrap();
        service
            .send_lesson_reminder("sam@example.com", &lesson)
            .await
            .unwrap();
    }
}
