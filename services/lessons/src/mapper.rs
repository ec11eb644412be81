use std::collections::HashMap;

use uuid::Uuid;

use tutorlink_common::{Lesson, LessonStatus};
use tutorlink_database::models::{BookingRow, LessonSummaryRow};

use crate::models::LessonWindow;
use crate::profiles::DisplayProfile;

pub const UNKNOWN_TEACHER: &str = "Unknown Teacher";
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

/// Row from the server-side lesson functions, already joined with display
/// info. Missing names still substitute the placeholder: a booking can
/// outlive its profiles.
pub fn lesson_from_summary(row: LessonSummaryRow) -> Lesson {
    Lesson {
        id: row.id,
        subject: row.subject,
        date: row.lesson_date,
        start_time: row.start_time,
        end_time: row.end_time,
        status: LessonStatus::parse_lenient(&row.status),
        teacher_id: row.teacher_id,
        student_id: row.student_id,
        teacher_name: row.teacher_name.unwrap_or_else(|| UNKNOWN_TEACHER.to_string()),
        student_name: row.student_name.unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
        teacher_avatar: row.teacher_avatar,
        student_avatar: row.student_avatar,
        created_at: row.created_at,
    }
}

/// Bare booking row plus whatever display info the profile chain produced.
pub fn lesson_from_booking(row: BookingRow, profiles: &HashMap<Uuid, DisplayProfile>) -> Lesson {
    let teacher = profiles.get(&row.teacher_id);
    let student = profiles.get(&row.student_id);
    Lesson {
        id: row.id,
        subject: row.subject,
        date: row.lesson_date,
        start_time: row.start_time,
        end_time: row.end_time,
        status: LessonStatus::parse_lenient(&row.status),
        teacher_id: row.teacher_id,
        student_id: row.student_id,
        teacher_name: teacher
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_TEACHER.to_string()),
        student_name: student
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
        teacher_avatar: teacher.and_then(|p| p.avatar.clone()),
        student_avatar: student.and_then(|p| p.avatar.clone()),
        created_at: row.created_at,
    }
}

/// Upcoming: date asc then start time asc; past: both descending. Start
/// times are zero-padded "HH:MM" so lexicographic comparison is
/// chronological.
pub fn sort_lessons(lessons: &mut [Lesson], window: LessonWindow) {
    match window {
        LessonWindow::Upcoming => {
            lessons.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        }
        LessonWindow::Past => {
            lessons.sort_by(|a, b| (b.date, &b.start_time).cmp(&(a.date, &a.start_time)));
        }
    }
}
