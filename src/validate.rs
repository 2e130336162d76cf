use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{parse_rating, FeedbackDraft, DEPARTMENTS, SEMESTERS};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Field name (as serialized) to user-facing message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks every required field. An empty map means the draft can be appended.
pub fn validate(draft: &FeedbackDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required_text = [
        ("studentName", &draft.student_name, "Student name is required"),
        ("studentId", &draft.student_id, "Student ID is required"),
        ("facultyName", &draft.faculty_name, "Faculty name is required"),
        ("courseName", &draft.course_name, "Course name is required"),
        ("courseCode", &draft.course_code, "Course code is required"),
        ("feedback", &draft.feedback, "Feedback is required"),
    ];
    for (field, value, message) in required_text {
        if value.trim().is_empty() {
            errors.insert(field, message);
        }
    }

    if draft.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&draft.email) {
        errors.insert("email", "Email is invalid");
    }

    if !DEPARTMENTS.contains(&draft.department.as_str()) {
        errors.insert("department", "Department is required");
    }
    if !SEMESTERS.contains(&draft.semester.as_str()) {
        errors.insert("semester", "Semester is required");
    }

    let ratings = [
        ("overallRating", &draft.overall_rating, "Overall rating is required"),
        ("teachingQuality", &draft.teaching_quality, "Teaching quality rating is required"),
        ("courseContent", &draft.course_content, "Course content rating is required"),
        ("communication", &draft.communication, "Communication rating is required"),
    ];
    for (field, value, message) in ratings {
        if parse_rating(value).is_none() {
            errors.insert(field, message);
        }
    }

    errors
}
