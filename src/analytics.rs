use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{
    CriterionMeans, DepartmentSummary, DirectoryTotals, FacultyAggregate, FacultyKey,
    FacultyRanking, FeedbackRecord, MonthlyTrend, RatingBucket, SummaryStats,
};

pub const TOP_FACULTY_LIMIT: usize = 5;
pub const TREND_WINDOW_MONTHS: u32 = 6;
pub const RECENT_FEEDBACK_LIMIT: usize = 5;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    All,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl Timeframe {
    pub fn max_days(self) -> Option<i64> {
        match self {
            Timeframe::All => None,
            Timeframe::Last7Days => Some(7),
            Timeframe::Last30Days => Some(30),
            Timeframe::Last90Days => Some(90),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Timeframe::All),
            "7days" => Ok(Timeframe::Last7Days),
            "30days" => Ok(Timeframe::Last30Days),
            "90days" => Ok(Timeframe::Last90Days),
            other => Err(format!(
                "unknown timeframe `{other}` (expected all, 7days, 30days or 90days)"
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::All => "all time",
            Timeframe::Last7Days => "last 7 days",
            Timeframe::Last30Days => "last 30 days",
            Timeframe::Last90Days => "last 90 days",
        };
        f.write_str(label)
    }
}

/// Dashboard filter selection. `department: None` means every department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub department: Option<String>,
    pub timeframe: Timeframe,
}

impl Filters {
    pub fn matches(&self, record: &FeedbackRecord, now: DateTime<Utc>) -> bool {
        if let Some(department) = &self.department {
            if &record.department != department {
                return false;
            }
        }

        match self.timeframe.max_days() {
            None => true,
            Some(max_days) => days_between(record.submitted_at, now) <= max_days,
        }
    }
}

/// Whole days elapsed from `earlier` to `now`, floored.
pub fn days_between(earlier: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - earlier).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

pub fn filter_records(
    records: &[FeedbackRecord],
    filters: &Filters,
    now: DateTime<Utc>,
) -> Vec<FeedbackRecord> {
    records
        .iter()
        .filter(|record| filters.matches(record, now))
        .cloned()
        .collect()
}

/// Rounds to one decimal on the exact binary value, with exact ties going up.
pub fn round1(value: f64) -> f64 {
    let scaled = value * 10.0;
    // Only quarter multiples can sit exactly on a .x5 boundary; for them `scaled` is exact.
    if (value * 4.0).fract() == 0.0 && (scaled - scaled.trunc()).abs() == 0.5 {
        return scaled.ceil() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

fn mean<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = Option<u8>>,
{
    let (total, count) = ratings
        .into_iter()
        .flatten()
        .fold((0u32, 0u32), |(total, count), rating| {
            (total + u32::from(rating), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(count)
    }
}

fn mean_overall<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    mean(records.into_iter().map(FeedbackRecord::overall))
}

pub fn summary_stats(filtered: &[FeedbackRecord]) -> SummaryStats {
    let faculty: HashSet<&str> = filtered.iter().map(|f| f.faculty_name.as_str()).collect();
    let courses: HashSet<&str> = filtered.iter().map(|f| f.course_name.as_str()).collect();

    SummaryStats {
        count: filtered.len(),
        average_overall_rating: round1(mean_overall(filtered)),
        distinct_faculty_count: faculty.len(),
        distinct_course_count: courses.len(),
    }
}

pub fn rating_distribution(filtered: &[FeedbackRecord]) -> [RatingBucket; 5] {
    let mut counts = [0usize; 5];
    for record in filtered {
        if let Some(rating) = record.overall() {
            counts[usize::from(rating) - 1] += 1;
        }
    }

    std::array::from_fn(|index| RatingBucket {
        rating: (index + 1) as u8,
        count: counts[index],
    })
}

/// Groups by `key`, preserving the order in which each key first appears.
fn group_in_order<'a, K, F>(records: &'a [FeedbackRecord], key: F) -> Vec<(K, Vec<&'a FeedbackRecord>)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&FeedbackRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&FeedbackRecord>)> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }

    groups
}

pub fn department_breakdown(filtered: &[FeedbackRecord]) -> Vec<DepartmentSummary> {
    group_in_order(filtered, |f| f.department.clone())
        .into_iter()
        .map(|(department, group)| DepartmentSummary {
            department,
            count: group.len(),
            avg_rating: round1(mean_overall(group.iter().copied())),
        })
        .collect()
}

pub fn top_faculty(filtered: &[FeedbackRecord], limit: usize) -> Vec<FacultyRanking> {
    let mut rankings: Vec<FacultyRanking> = group_in_order(filtered, |f| f.faculty_name.clone())
        .into_iter()
        .map(|(name, group)| FacultyRanking {
            name,
            count: group.len(),
            avg_rating: round1(mean_overall(group.iter().copied())),
        })
        .collect();

    // Stable sort: equal averages stay in first-seen order.
    rankings.sort_by(|a, b| {
        b.avg_rating
            .partial_cmp(&a.avg_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rankings.truncate(limit);
    rankings
}

/// (year, month) that lies `back` calendar months before `year`/`month`.
fn shift_month(year: i32, month: u32, back: u32) -> (i32, u32) {
    let absolute = i64::from(year) * 12 + i64::from(month - 1) - i64::from(back);
    (absolute.div_euclid(12) as i32, absolute.rem_euclid(12) as u32 + 1)
}

pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

pub fn monthly_trend(
    filtered: &[FeedbackRecord],
    now: DateTime<Utc>,
    window_months: u32,
) -> Vec<MonthlyTrend> {
    (0..window_months)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(now.year(), now.month(), back);
            let in_month: Vec<&FeedbackRecord> = filtered
                .iter()
                .filter(|f| f.submitted_at.year() == year && f.submitted_at.month() == month)
                .collect();

            MonthlyTrend {
                month: month_label(year, month),
                year,
                month_number: month,
                count: in_month.len(),
                avg_rating: round1(mean_overall(in_month.iter().copied())),
            }
        })
        .collect()
}

fn build_aggregate(key: FacultyKey, group: &[&FeedbackRecord]) -> FacultyAggregate {
    let mut courses: Vec<String> = Vec::new();
    for record in group {
        let label = record.course_label();
        if !courses.contains(&label) {
            courses.push(label);
        }
    }

    let ratings = CriterionMeans {
        overall: mean(group.iter().map(|f| f.overall())),
        teaching: mean(group.iter().map(|f| f.teaching())),
        content: mean(group.iter().map(|f| f.content())),
        communication: mean(group.iter().map(|f| f.communication_rating())),
    };

    let mut recent: Vec<FeedbackRecord> = group.iter().map(|f| (*f).clone()).collect();
    recent.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    recent.truncate(RECENT_FEEDBACK_LIMIT);

    FacultyAggregate {
        key,
        courses,
        total_feedbacks: group.len(),
        ratings,
        recent_feedbacks: recent,
    }
}

pub fn faculty_profile(records: &[FeedbackRecord], key: &FacultyKey) -> Option<FacultyAggregate> {
    let group: Vec<&FeedbackRecord> = records
        .iter()
        .filter(|f| f.faculty_name == key.name && f.department == key.department)
        .collect();

    if group.is_empty() {
        return None;
    }

    Some(build_aggregate(key.clone(), &group))
}

pub fn faculty_directory(records: &[FeedbackRecord]) -> Vec<FacultyAggregate> {
    let mut directory: Vec<FacultyAggregate> = group_in_order(records, FeedbackRecord::faculty_key)
        .into_iter()
        .map(|(key, group)| build_aggregate(key, &group))
        .collect();

    directory.sort_by(|a, b| {
        b.ratings
            .overall
            .partial_cmp(&a.ratings.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    directory
}

pub fn search_faculty<'a>(directory: &'a [FacultyAggregate], term: &str) -> Vec<&'a FacultyAggregate> {
    let needle = term.trim().to_lowercase();
    directory
        .iter()
        .filter(|faculty| {
            needle.is_empty()
                || faculty.key.name.to_lowercase().contains(&needle)
                || faculty.key.department.to_lowercase().contains(&needle)
                || faculty
                    .courses
                    .iter()
                    .any(|course| course.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn directory_totals(directory: &[FacultyAggregate]) -> DirectoryTotals {
    DirectoryTotals {
        faculty_count: directory.len(),
        course_count: directory.iter().map(|f| f.courses.len()).sum(),
        feedback_count: directory.iter().map(|f| f.total_feedbacks).sum(),
    }
}

/// Distinct departments across the unfiltered list, in first-seen order.
pub fn departments_present(records: &[FeedbackRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.contains(&record.department) {
            seen.push(record.department.clone());
        }
    }
    seen
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingTier {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

pub fn rating_tier(rating: f64) -> RatingTier {
    if rating >= 4.5 {
        RatingTier::Excellent
    } else if rating >= 4.0 {
        RatingTier::Good
    } else if rating >= 3.5 {
        RatingTier::Fair
    } else if rating >= 3.0 {
        RatingTier::Poor
    } else {
        RatingTier::Critical
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatingTier::Excellent => "excellent",
            RatingTier::Good => "good",
            RatingTier::Fair => "fair",
            RatingTier::Poor => "poor",
            RatingTier::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_records: usize,
    pub summary: SummaryStats,
    pub rating_distribution: [RatingBucket; 5],
    pub monthly_trend: Vec<MonthlyTrend>,
    pub department_breakdown: Vec<DepartmentSummary>,
    pub top_faculty: Vec<FacultyRanking>,
    pub departments: Vec<String>,
}

pub fn build_dashboard(records: &[FeedbackRecord], filters: &Filters, now: DateTime<Utc>) -> Dashboard {
    let filtered = filter_records(records, filters, now);

    Dashboard {
        total_records: records.len(),
        summary: summary_stats(&filtered),
        rating_distribution: rating_distribution(&filtered),
        monthly_trend: monthly_trend(&filtered, now, TREND_WINDOW_MONTHS),
        department_breakdown: department_breakdown(&filtered),
        top_faculty: top_faculty(&filtered, TOP_FACULTY_LIMIT),
        departments: departments_present(records),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    pub(crate) fn record(
        id: i64,
        faculty: &str,
        department: &str,
        overall: &str,
        submitted_at: DateTime<Utc>,
    ) -> FeedbackRecord {
        FeedbackRecord {
            id,
            student_name: "Avery Lee".to_string(),
            student_id: "CS2021001".to_string(),
            email: "avery@example.com".to_string(),
            department: department.to_string(),
            semester: "3rd".to_string(),
            faculty_name: faculty.to_string(),
            course_name: "Operating Systems".to_string(),
            course_code: "CS310".to_string(),
            overall_rating: overall.to_string(),
            teaching_quality: overall.to_string(),
            course_content: "4".to_string(),
            communication: "3".to_string(),
            feedback: "Solid course.".to_string(),
            anonymous: false,
            submitted_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    fn scenario() -> Vec<FeedbackRecord> {
        vec![
            record(1, "A", "CS", "5", now() - Duration::days(3)),
            record(2, "A", "CS", "3", now() - Duration::days(1)),
        ]
    }

    fn mixed() -> Vec<FeedbackRecord> {
        vec![
            record(1, "Dr. Sarah Johnson", "Computer Science", "5", now() - Duration::days(2)),
            record(2, "Prof. Michael Chen", "Information Technology", "4", now() - Duration::days(20)),
            record(3, "Dr. Lisa Wang", "Electronics", "3", now() - Duration::days(45)),
            record(4, "Dr. Sarah Johnson", "Computer Science", "4", now() - Duration::days(70)),
            record(5, "Prof. Robert Taylor", "Mechanical", "2", now() - Duration::days(100)),
            record(6, "Dr. Amanda Rodriguez", "Mathematics", "5", now() - Duration::days(200)),
            record(7, "Prof. David Kim", "Civil", "1", now() - Duration::days(5)),
        ]
    }

    #[test]
    fn empty_summary_is_zero_not_nan() {
        let stats = summary_stats(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_overall_rating, 0.0);
        assert_eq!(stats.distinct_faculty_count, 0);
        assert_eq!(stats.distinct_course_count, 0);
    }

    #[test]
    fn two_record_scenario_averages_to_four() {
        let records = scenario();

        let stats = summary_stats(&records);
        assert_eq!(stats.count, 2);
        assert_eq!(format!("{:.1}", stats.average_overall_rating), "4.0");

        let departments = department_breakdown(&records);
        assert_eq!(
            departments,
            vec![DepartmentSummary {
                department: "CS".to_string(),
                count: 2,
                avg_rating: 4.0,
            }]
        );

        let top = top_faculty(&records, TOP_FACULTY_LIMIT);
        assert_eq!(
            top,
            vec![FacultyRanking {
                name: "A".to_string(),
                count: 2,
                avg_rating: 4.0,
            }]
        );
    }

    #[test]
    fn distribution_covers_every_bucket_in_order() {
        let records = mixed();
        let buckets = rating_distribution(&records);

        let ratings: Vec<u8> = buckets.iter().map(|b| b.rating).collect();
        assert_eq!(ratings, vec![1, 2, 3, 4, 5]);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), records.len());
        assert_eq!(buckets[3].count, 2);
        assert_eq!(buckets[0].label(), "1 Star");
        assert_eq!(buckets[4].label(), "5 Stars");

        let empty = rating_distribution(&[]);
        assert!(empty.iter().all(|b| b.count == 0));
    }

    #[test]
    fn department_counts_sum_to_filtered_length() {
        let records = mixed();
        let breakdown = department_breakdown(&records);
        assert_eq!(breakdown.iter().map(|d| d.count).sum::<usize>(), records.len());
        assert_eq!(breakdown[0].department, "Computer Science");
        assert_eq!(breakdown[0].avg_rating, 4.5);
    }

    #[test]
    fn top_faculty_is_sorted_and_bounded() {
        let records = mixed();
        let top = top_faculty(&records, 3);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|pair| pair[0].avg_rating >= pair[1].avg_rating));
        assert_eq!(top[0].name, "Dr. Amanda Rodriguez");
        assert_eq!(top[1].name, "Dr. Sarah Johnson");
    }

    #[test]
    fn top_faculty_ties_keep_first_seen_order() {
        let records = vec![
            record(1, "B", "CS", "4", now()),
            record(2, "A", "CS", "4", now()),
        ];
        let top = top_faculty(&records, 5);
        assert_eq!(top[0].name, "B");
        assert_eq!(top[1].name, "A");
    }

    #[test]
    fn timeframe_filter_uses_floored_days() {
        let records = mixed();
        let filters = Filters {
            department: None,
            timeframe: Timeframe::Last30Days,
        };
        let filtered = filter_records(&records, &filters, now());
        let ids: Vec<i64> = filtered.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);

        let boundary = record(9, "A", "CS", "5", now() - Duration::days(7) - Duration::hours(23));
        let week = Filters {
            department: None,
            timeframe: Timeframe::Last7Days,
        };
        assert!(week.matches(&boundary, now()));
        let outside = record(10, "A", "CS", "5", now() - Duration::days(8));
        assert!(!week.matches(&outside, now()));
    }

    #[test]
    fn future_dated_records_pass_every_timeframe() {
        let ahead = record(11, "A", "CS", "5", now() + Duration::days(3));
        for timeframe in [Timeframe::Last7Days, Timeframe::Last30Days, Timeframe::Last90Days] {
            let filters = Filters {
                department: None,
                timeframe,
            };
            assert!(filters.matches(&ahead, now()));
        }
        assert_eq!(days_between(ahead.submitted_at, now()), -3);
    }

    #[test]
    fn one_decimal_rounding_follows_the_binary_value() {
        assert_eq!(round1(61.0 / 20.0), 3.0);
        assert_eq!(round1(4.25), 4.3);
        assert_eq!(round1(3.75), 3.8);
        assert_eq!(round1(10.0 / 3.0), 3.3);
        assert_eq!(round1(4.0), 4.0);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn top_faculty_ranks_by_displayed_average() {
        // 61/20 displays as 3.0, so it ties with B and stays behind it.
        let mut records = vec![record(1, "B", "CS", "3", now())];
        let ratings = ["4", "4", "4", "4", "4", "4", "4", "4", "4", "4", "4", "2", "2", "2", "2", "2", "2", "2", "2", "1"];
        for (i, rating) in ratings.iter().enumerate() {
            records.push(record(100 + i as i64, "A", "CS", rating, now()));
        }
        let top = top_faculty(&records, 5);
        assert_eq!(top[0].name, "B");
        assert_eq!(top[1].avg_rating, 3.0);
    }

    #[test]
    fn department_filter_is_exact_match() {
        let records = mixed();
        let filters = Filters {
            department: Some("Computer Science".to_string()),
            timeframe: Timeframe::All,
        };
        let filtered = filter_records(&records, &filters, now());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|f| f.department == "Computer Science"));
    }

    #[test]
    fn monthly_trend_has_fixed_window_ending_now() {
        let records = mixed();
        let trend = monthly_trend(&records, now(), TREND_WINDOW_MONTHS);
        assert_eq!(trend.len(), 6);

        let labels: Vec<&str> = trend.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(labels, vec!["Oct 23", "Nov 23", "Dec 23", "Jan 24", "Feb 24", "Mar 24"]);

        let march = trend.last().unwrap();
        assert_eq!(march.count, 3);
        assert_eq!(march.avg_rating, round1((5.0 + 4.0 + 1.0) / 3.0));

        let sparse = monthly_trend(&[], now(), 4);
        assert_eq!(sparse.len(), 4);
        assert!(sparse.iter().all(|t| t.count == 0 && t.avg_rating == 0.0));
    }

    #[test]
    fn monthly_trend_crosses_year_boundary() {
        let january = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let trend = monthly_trend(&[], january, 3);
        let months: Vec<(i32, u32)> = trend.iter().map(|t| (t.year, t.month_number)).collect();
        assert_eq!(months, vec![(2024, 11), (2024, 12), (2025, 1)]);
    }

    #[test]
    fn profile_keeps_recent_five_and_first_seen_courses() {
        let mut records: Vec<FeedbackRecord> = (0..7)
            .map(|i| record(i, "A", "CS", "4", now() - Duration::days(i)))
            .collect();
        records[3].course_name = "Compilers".to_string();
        records[3].course_code = "CS420".to_string();
        records.push(record(99, "A", "Civil", "1", now()));

        let profile = faculty_profile(&records, &FacultyKey::new("A", "CS")).unwrap();
        assert_eq!(profile.total_feedbacks, 7);
        assert_eq!(
            profile.courses,
            vec!["Operating Systems (CS310)".to_string(), "Compilers (CS420)".to_string()]
        );
        assert_eq!(profile.ratings.overall, 4.0);
        assert_eq!(profile.ratings.communication, 3.0);
        assert_eq!(profile.recent_feedbacks.len(), RECENT_FEEDBACK_LIMIT);
        let ids: Vec<i64> = profile.recent_feedbacks.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        assert!(faculty_profile(&records, &FacultyKey::new("Nobody", "CS")).is_none());
    }

    #[test]
    fn directory_splits_same_name_across_departments() {
        let records = vec![
            record(1, "A", "CS", "2", now()),
            record(2, "A", "Civil", "5", now()),
        ];
        let directory = faculty_directory(&records);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory[0].key, FacultyKey::new("A", "Civil"));

        let totals = directory_totals(&directory);
        assert_eq!(totals.faculty_count, 2);
        assert_eq!(totals.course_count, 2);
        assert_eq!(totals.feedback_count, 2);
    }

    #[test]
    fn search_matches_name_department_or_course() {
        let directory = faculty_directory(&mixed());
        assert_eq!(search_faculty(&directory, "").len(), directory.len());
        assert_eq!(search_faculty(&directory, "johnson").len(), 1);
        assert_eq!(search_faculty(&directory, "MECHANICAL").len(), 1);
        assert_eq!(search_faculty(&directory, "cs310").len(), directory.len());
        assert!(search_faculty(&directory, "astronomy").is_empty());
    }

    #[test]
    fn unparseable_ratings_are_left_out_of_means() {
        let records = vec![
            record(1, "A", "CS", "4", now()),
            record(2, "A", "CS", "n/a", now()),
        ];
        let stats = summary_stats(&records);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_overall_rating, 4.0);
        assert_eq!(rating_distribution(&records).iter().map(|b| b.count).sum::<usize>(), 1);
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(rating_tier(4.5), RatingTier::Excellent);
        assert_eq!(rating_tier(4.2), RatingTier::Good);
        assert_eq!(rating_tier(3.5), RatingTier::Fair);
        assert_eq!(rating_tier(3.0), RatingTier::Poor);
        assert_eq!(rating_tier(0.0), RatingTier::Critical);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let records = mixed();
        let filters = Filters::default();
        let first = build_dashboard(&records, &filters, now());
        let second = build_dashboard(&records, &filters, now());
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.monthly_trend, second.monthly_trend);
        assert_eq!(first.total_records, records.len());
        assert_eq!(first.departments.len(), 6);
    }

    #[test]
    fn timeframe_parses_cli_values() {
        assert_eq!("30days".parse::<Timeframe>(), Ok(Timeframe::Last30Days));
        assert!("yesterday".parse::<Timeframe>().is_err());
    }
}
