use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::analytics::{self, Dashboard, Filters};
use crate::models::{DirectoryTotals, FacultyAggregate};

pub fn build_report(filters: &Filters, now: DateTime<Utc>, dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let department_label = filters.department.as_deref().unwrap_or("all departments");
    let summary = &dashboard.summary;

    let _ = writeln!(output, "# Student Feedback Dashboard");
    let _ = writeln!(
        output,
        "Generated {} for {} ({})",
        now.format("%Y-%m-%d"),
        department_label,
        filters.timeframe
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let scope = if summary.count != dashboard.total_records {
        format!("filtered from {}", dashboard.total_records)
    } else {
        "all submissions".to_string()
    };
    let _ = writeln!(output, "- Total feedback: {} ({})", summary.count, scope);
    let _ = writeln!(
        output,
        "- Average rating: {:.1}/5.0",
        summary.average_overall_rating
    );
    let _ = writeln!(output, "- Faculty members: {}", summary.distinct_faculty_count);
    let _ = writeln!(output, "- Courses: {}", summary.distinct_course_count);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Rating Distribution");
    for bucket in dashboard.rating_distribution.iter() {
        let _ = writeln!(output, "- {}: {}", bucket.label(), bucket.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Monthly Trends");
    for month in dashboard.monthly_trend.iter() {
        let _ = writeln!(
            output,
            "- {}: {} feedback (avg rating {:.1})",
            month.month, month.count, month.avg_rating
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Department Performance");
    if dashboard.department_breakdown.is_empty() {
        let _ = writeln!(output, "No department data available.");
    } else {
        for department in dashboard.department_breakdown.iter() {
            let _ = writeln!(
                output,
                "- {}: {} feedback, avg rating {:.1}",
                department.department, department.count, department.avg_rating
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Rated Faculty");
    if dashboard.top_faculty.is_empty() {
        let _ = writeln!(output, "No faculty data available.");
    } else {
        for (rank, faculty) in dashboard.top_faculty.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. {} ({:.1}, {} reviews)",
                rank + 1,
                faculty.name,
                faculty.avg_rating,
                faculty.count
            );
        }
    }

    output
}

pub fn build_directory(totals: &DirectoryTotals, faculty: &[&FacultyAggregate]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Faculty Directory");
    let _ = writeln!(
        output,
        "{} faculty, {} courses, {} feedback",
        totals.faculty_count, totals.course_count, totals.feedback_count
    );
    let _ = writeln!(output);

    if faculty.is_empty() {
        let _ = writeln!(output, "No faculty match this search.");
        return output;
    }

    for entry in faculty {
        let more = entry.courses.len().saturating_sub(2);
        let extra = format!("+{more} more");
        let mut courses: Vec<&str> = entry.courses.iter().take(2).map(String::as_str).collect();
        if more > 0 {
            courses.push(&extra);
        }

        let _ = writeln!(
            output,
            "- {} ({}): {:.1} overall [{}], teaching {:.1}/5.0, {} feedback; {}",
            entry.key.name,
            entry.key.department,
            entry.ratings.overall,
            analytics::rating_tier(entry.ratings.overall),
            entry.ratings.teaching,
            entry.total_feedbacks,
            courses.join(", ")
        );
    }

    output
}

pub fn build_profile(profile: &FacultyAggregate) -> String {
    let mut output = String::new();
    let ratings = &profile.ratings;

    let _ = writeln!(output, "# {}", profile.key.name);
    let _ = writeln!(output, "{}", profile.key.department);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Overall {:.1} ({}) across {} feedback",
        ratings.overall,
        analytics::rating_tier(ratings.overall),
        profile.total_feedbacks
    );
    let _ = writeln!(output, "- Teaching quality: {:.1}", ratings.teaching);
    let _ = writeln!(output, "- Course content: {:.1}", ratings.content);
    let _ = writeln!(output, "- Communication: {:.1}", ratings.communication);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Courses");
    for course in profile.courses.iter() {
        let _ = writeln!(output, "- {course}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Feedback");
    if profile.recent_feedbacks.is_empty() {
        let _ = writeln!(output, "No feedback available yet.");
    } else {
        for feedback in profile.recent_feedbacks.iter() {
            let _ = writeln!(
                output,
                "- {} on {} for {} (rated {}/5): {}",
                feedback.display_name(),
                feedback.submitted_at.format("%Y-%m-%d"),
                feedback.course_label(),
                feedback.overall_rating,
                feedback.feedback
            );
        }
    }

    output
}
