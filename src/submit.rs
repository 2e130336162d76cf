use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::kv::KeyValueStore;
use crate::models::{FeedbackDraft, FeedbackRecord};
use crate::store;
use crate::validate::{self, FieldErrors};

pub const DEFAULT_ROUND_TRIP: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please fill in all required fields correctly.")]
    Invalid(FieldErrors),
    #[error("a submission is already in progress")]
    InProgress,
    #[error("Please try again later.")]
    Failed(anyhow::Error),
}

/// Drives one submit control: validation, the simulated round trip, then the append.
pub struct Submitter<'a> {
    store: &'a dyn KeyValueStore,
    round_trip: Duration,
    in_flight: AtomicBool,
}

impl<'a> Submitter<'a> {
    pub fn new(store: &'a dyn KeyValueStore, round_trip: Duration) -> Self {
        Self {
            store,
            round_trip,
            in_flight: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, SubmitError> {
        let errors = validate::validate(&draft);
        if !errors.is_empty() {
            warn!(fields = ?errors.keys().collect::<Vec<_>>(), "submission rejected");
            return Err(SubmitError::Invalid(errors));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InProgress);
        }
        let _guard = InFlight(&self.in_flight);

        tokio::time::sleep(self.round_trip).await;

        match store::append(self.store, draft).await {
            Ok(record) => {
                info!(id = record.id, "feedback submitted");
                Ok(record)
            }
            Err(err) => {
                error!(error = %err, "feedback submission failed");
                Err(SubmitError::Failed(err))
            }
        }
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
