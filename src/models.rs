use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEPARTMENTS: [&str; 8] = [
    "Computer Science",
    "Information Technology",
    "Electronics",
    "Mechanical",
    "Civil",
    "Electrical",
    "Chemical",
    "Mathematics",
];

pub const SEMESTERS: [&str; 8] = ["1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th"];

pub const ANONYMOUS_NAME: &str = "Anonymous Student";

/// A submission as it exists before the store assigns `id` and `submittedAt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    pub student_name: String,
    pub student_id: String,
    pub email: String,
    pub department: String,
    pub semester: String,
    pub faculty_name: String,
    pub course_name: String,
    pub course_code: String,
    pub overall_rating: String,
    pub teaching_quality: String,
    pub course_content: String,
    pub communication: String,
    pub feedback: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: i64,
    pub student_name: String,
    pub student_id: String,
    pub email: String,
    pub department: String,
    pub semester: String,
    pub faculty_name: String,
    pub course_name: String,
    pub course_code: String,
    pub overall_rating: String,
    pub teaching_quality: String,
    pub course_content: String,
    pub communication: String,
    pub feedback: String,
    #[serde(default)]
    pub anonymous: bool,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn from_draft(draft: FeedbackDraft, id: i64, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            student_name: draft.student_name,
            student_id: draft.student_id,
            email: draft.email,
            department: draft.department,
            semester: draft.semester,
            faculty_name: draft.faculty_name,
            course_name: draft.course_name,
            course_code: draft.course_code,
            overall_rating: draft.overall_rating,
            teaching_quality: draft.teaching_quality,
            course_content: draft.course_content,
            communication: draft.communication,
            feedback: draft.feedback,
            anonymous: draft.anonymous,
            submitted_at,
        }
    }

    pub fn overall(&self) -> Option<u8> {
        parse_rating(&self.overall_rating)
    }

    pub fn teaching(&self) -> Option<u8> {
        parse_rating(&self.teaching_quality)
    }

    pub fn content(&self) -> Option<u8> {
        parse_rating(&self.course_content)
    }

    pub fn communication_rating(&self) -> Option<u8> {
        parse_rating(&self.communication)
    }

    /// Name safe to show to anyone reading the feedback.
    pub fn display_name(&self) -> &str {
        if self.anonymous {
            ANONYMOUS_NAME
        } else {
            &self.student_name
        }
    }

    pub fn course_label(&self) -> String {
        format!("{} ({})", self.course_name, self.course_code)
    }

    pub fn faculty_key(&self) -> FacultyKey {
        FacultyKey {
            name: self.faculty_name.clone(),
            department: self.department.clone(),
        }
    }
}

/// Parses a stored rating string; anything outside 1..=5 is treated as missing.
pub fn parse_rating(value: &str) -> Option<u8> {
    match value.trim().parse::<u8>() {
        Ok(rating @ 1..=5) => Some(rating),
        _ => None,
    }
}

/// A faculty member is identified by name within a department.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacultyKey {
    pub name: String,
    pub department: String,
}

impl FacultyKey {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub average_overall_rating: f64,
    pub distinct_faculty_count: usize,
    pub distinct_course_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    pub rating: u8,
    pub count: usize,
}

impl RatingBucket {
    pub fn label(&self) -> String {
        if self.rating == 1 {
            "1 Star".to_string()
        } else {
            format!("{} Stars", self.rating)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub count: usize,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacultyRanking {
    pub name: String,
    pub count: usize,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub year: i32,
    pub month_number: u32,
    pub count: usize,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CriterionMeans {
    pub overall: f64,
    pub teaching: f64,
    pub content: f64,
    pub communication: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacultyAggregate {
    pub key: FacultyKey,
    pub courses: Vec<String>,
    pub total_feedbacks: usize,
    pub ratings: CriterionMeans,
    pub recent_feedbacks: Vec<FeedbackRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryTotals {
    pub faculty_count: usize,
    pub course_count: usize,
    pub feedback_count: usize,
}
