use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tutorlink_common::LessonStatus;

/// Which half of the calendar a fetch targets. Same-day lessons count as
/// upcoming; the two windows partition all bookings for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonWindow {
    Upcoming,
    Past,
}

impl LessonWindow {
    pub fn context(&self) -> &'static str {
        match self {
            LessonWindow::Upcoming => "lessons.upcoming",
            LessonWindow::Past => "lessons.past",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub teacher_id: Uuid,
    pub subject: String,
    pub lesson_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: LessonStatus,
}
