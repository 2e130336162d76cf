use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::analytics;
use crate::kv::KeyValueStore;
use crate::models::FeedbackRecord;
use crate::store;

#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    Seeded {
        count: usize,
        departments: Vec<String>,
        faculty_count: usize,
        average_rating: f64,
        first: DateTime<Utc>,
        last: DateTime<Utc>,
    },
    AlreadyPresent {
        count: usize,
    },
    /// The stored value is not a record list; it is left as it was.
    Unreadable {
        reason: String,
    },
}

pub fn sample_records() -> anyhow::Result<Vec<FeedbackRecord>> {
    let samples = vec![
        (
            1,
            ("John Smith", "CS2021001", "john.smith@university.edu"),
            ("Computer Science", "6th"),
            ("Dr. Sarah Johnson", "Data Structures and Algorithms", "CS301"),
            ["5", "5", "4", "5"],
            "Excellent teaching methodology. Dr. Johnson explains complex algorithms in a very understandable way. The practical assignments really helped in understanding the concepts better.",
            false,
            "2024-01-15T10:30:00Z",
        ),
        (
            2,
            ("Emily Davis", "IT2021045", "emily.davis@university.edu"),
            ("Information Technology", "4th"),
            ("Prof. Michael Chen", "Database Management Systems", "IT201"),
            ["4", "4", "5", "3"],
            "The course content is comprehensive and well-structured. However, sometimes the pace is too fast and it's hard to keep up during lectures.",
            false,
            "2024-01-20T14:15:00Z",
        ),
        (
            3,
            ("Anonymous Student", "EC2020123", "student123@university.edu"),
            ("Electronics", "5th"),
            ("Dr. Lisa Wang", "Digital Signal Processing", "EC401"),
            ["3", "3", "4", "2"],
            "The subject matter is interesting but the teaching style could be improved. More interactive sessions would be helpful.",
            true,
            "2024-01-25T09:45:00Z",
        ),
        (
            4,
            ("Alex Rodriguez", "ME2021078", "alex.rodriguez@university.edu"),
            ("Mechanical", "3rd"),
            ("Prof. Robert Taylor", "Thermodynamics", "ME202"),
            ["5", "5", "5", "4"],
            "Outstanding professor! Makes difficult concepts easy to understand with real-world examples. Lab sessions are very well organized.",
            false,
            "2024-02-01T11:20:00Z",
        ),
        (
            5,
            ("Priya Patel", "CS2022015", "priya.patel@university.edu"),
            ("Computer Science", "2nd"),
            ("Dr. Sarah Johnson", "Object Oriented Programming", "CS102"),
            ["4", "4", "4", "5"],
            "Dr. Johnson is very approachable and always ready to help. The programming assignments are challenging but fair.",
            false,
            "2024-02-05T16:30:00Z",
        ),
        (
            6,
            ("David Kim", "IT2020089", "david.kim@university.edu"),
            ("Information Technology", "6th"),
            ("Prof. Michael Chen", "Web Technologies", "IT301"),
            ["3", "3", "4", "3"],
            "Good course content covering modern web technologies. However, more hands-on practice sessions would be beneficial.",
            false,
            "2024-02-10T13:45:00Z",
        ),
        (
            7,
            ("Anonymous Student", "EE2021056", "student056@university.edu"),
            ("Electrical", "4th"),
            ("Dr. Jennifer Brown", "Control Systems", "EE301"),
            ["4", "4", "3", "4"],
            "Dr. Brown explains concepts clearly and is patient with student questions. The course could benefit from more practical examples.",
            true,
            "2024-02-15T10:15:00Z",
        ),
        (
            8,
            ("Maria Garcia", "CH2021034", "maria.garcia@university.edu"),
            ("Chemical", "5th"),
            ("Prof. James Wilson", "Chemical Reaction Engineering", "CH401"),
            ["5", "5", "5", "5"],
            "Exceptional teaching! Prof. Wilson brings industry experience into the classroom. The case studies are very relevant and engaging.",
            false,
            "2024-02-20T15:00:00Z",
        ),
        (
            9,
            ("Ryan Thompson", "CV2020067", "ryan.thompson@university.edu"),
            ("Civil", "7th"),
            ("Dr. Amanda Lee", "Structural Analysis", "CV501"),
            ["4", "4", "4", "3"],
            "Solid course with good theoretical foundation. More software-based analysis tools could be incorporated into the curriculum.",
            false,
            "2024-02-25T12:30:00Z",
        ),
        (
            10,
            ("Sophia Martinez", "MA2021012", "sophia.martinez@university.edu"),
            ("Mathematics", "3rd"),
            ("Prof. Daniel Clark", "Linear Algebra", "MA201"),
            ["3", "3", "4", "2"],
            "The mathematical concepts are well-covered but the delivery could be more engaging. More visual aids would help in understanding abstract concepts.",
            false,
            "2024-03-01T09:00:00Z",
        ),
    ];

    let mut records = Vec::with_capacity(samples.len());
    for (id, student, placement, course, ratings, feedback, anonymous, submitted_at) in samples {
        let (student_name, student_id, email) = student;
        let (department, semester) = placement;
        let (faculty_name, course_name, course_code) = course;
        let [overall, teaching, content, communication] = ratings;

        records.push(FeedbackRecord {
            id,
            student_name: student_name.to_string(),
            student_id: student_id.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            semester: semester.to_string(),
            faculty_name: faculty_name.to_string(),
            course_name: course_name.to_string(),
            course_code: course_code.to_string(),
            overall_rating: overall.to_string(),
            teaching_quality: teaching.to_string(),
            course_content: content.to_string(),
            communication: communication.to_string(),
            feedback: feedback.to_string(),
            anonymous,
            submitted_at: submitted_at
                .parse::<DateTime<Utc>>()
                .with_context(|| format!("invalid sample timestamp {submitted_at}"))?,
        });
    }

    Ok(records)
}

/// Writes the sample records when the key is absent or holds an empty list.
/// Any other stored value, readable or not, is never overwritten.
pub async fn seed(kv: &dyn KeyValueStore) -> anyhow::Result<SeedOutcome> {
    let existing = match kv.get(store::FEEDBACK_KEY).await? {
        None => Vec::new(),
        Some(raw) => match store::try_parse_records(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "stored feedback is unreadable, not seeding over it");
                return Ok(SeedOutcome::Unreadable {
                    reason: err.to_string(),
                });
            }
        },
    };
    if !existing.is_empty() {
        info!(count = existing.len(), "sample data already exists, skipping seed");
        return Ok(SeedOutcome::AlreadyPresent {
            count: existing.len(),
        });
    }

    let samples = sample_records()?;
    store::save_all(kv, &samples).await?;

    let stats = analytics::summary_stats(&samples);
    let departments = analytics::departments_present(&samples);
    let first = samples.iter().map(|f| f.submitted_at).min().unwrap_or_else(Utc::now);
    let last = samples.iter().map(|f| f.submitted_at).max().unwrap_or(first);

    info!(
        count = samples.len(),
        departments = departments.len(),
        faculty = stats.distinct_faculty_count,
        average = stats.average_overall_rating,
        "sample data seeded"
    );

    Ok(SeedOutcome::Seeded {
        count: samples.len(),
        departments,
        faculty_count: stats.distinct_faculty_count,
        average_rating: stats.average_overall_rating,
        first,
        last,
    })
}
