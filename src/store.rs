use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::kv::KeyValueStore;
use crate::models::{FeedbackDraft, FeedbackRecord};
use crate::validate;

pub const FEEDBACK_KEY: &str = "feedbacks";

pub fn try_parse_records(raw: &str) -> serde_json::Result<Vec<FeedbackRecord>> {
    serde_json::from_str(raw)
}

/// Decodes a stored record list. Anything that is not a list of records reads as empty.
pub fn parse_records(raw: &str) -> Vec<FeedbackRecord> {
    match try_parse_records(raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "stored feedback list is unreadable, treating it as empty");
            Vec::new()
        }
    }
}

pub async fn load_all(store: &dyn KeyValueStore) -> anyhow::Result<Vec<FeedbackRecord>> {
    let records = match store.get(FEEDBACK_KEY).await? {
        Some(raw) => parse_records(&raw),
        None => Vec::new(),
    };
    Ok(records)
}

pub async fn save_all(store: &dyn KeyValueStore, records: &[FeedbackRecord]) -> anyhow::Result<()> {
    let encoded = serde_json::to_string(records).context("failed to encode feedback list")?;
    store.set(FEEDBACK_KEY, &encoded).await
}

/// Next id: the submission time in millis, bumped past any id already taken.
pub fn next_id(records: &[FeedbackRecord], now: DateTime<Utc>) -> anyhow::Result<i64> {
    let candidate = now.timestamp_millis();
    match records.iter().map(|f| f.id).max() {
        Some(max) if max >= candidate => max
            .checked_add(1)
            .with_context(|| format!("no feedback id left after {max}")),
        _ => Ok(candidate),
    }
}

fn stamp(
    records: &mut Vec<FeedbackRecord>,
    drafts: Vec<FeedbackDraft>,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<FeedbackRecord>> {
    let mut added = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let record = FeedbackRecord::from_draft(draft, next_id(records, now)?, now);
        records.push(record.clone());
        added.push(record);
    }
    Ok(added)
}

pub async fn append(store: &dyn KeyValueStore, draft: FeedbackDraft) -> anyhow::Result<FeedbackRecord> {
    let mut records = load_all(store).await?;
    let now = Utc::now();
    let mut added = stamp(&mut records, vec![draft], now)?;
    save_all(store, &records).await?;

    let record = added.remove(0);
    info!(id = record.id, faculty = %record.faculty_name, total = records.len(), "feedback appended");
    Ok(record)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

pub async fn import_csv(store: &dyn KeyValueStore, csv_path: &Path) -> anyhow::Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut accepted = Vec::new();
    let mut summary = ImportSummary::default();

    for (line, result) in reader.deserialize::<FeedbackDraft>().enumerate() {
        let draft = result.with_context(|| format!("malformed row {}", line + 1))?;
        let errors = validate::validate(&draft);
        if errors.is_empty() {
            accepted.push(draft);
        } else {
            let fields: Vec<&str> = errors.keys().copied().collect();
            warn!(row = line + 1, ?fields, "skipping invalid feedback row");
            summary.skipped += 1;
        }
    }

    if accepted.is_empty() {
        return Ok(summary);
    }

    let mut records = load_all(store).await?;
    let added = stamp(&mut records, accepted, Utc::now())?;
    save_all(store, &records).await?;
    summary.inserted = added.len();

    info!(inserted = summary.inserted, skipped = summary.skipped, "csv import finished");
    Ok(summary)
}
