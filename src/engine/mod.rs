mod classify;
mod error;
mod merge;

pub use classify::{Verdict, classify};
pub use error::EngineError;
pub use merge::apply;

use std::sync::Arc;

use tracing::{debug, info};

use crate::limits::*;
use crate::model::{AvailabilityDoc, Ms, Span};
use crate::store::{DocumentStore, Snapshot, StoreError};

/// The availability engine over one document store. All writes go through
/// `insert_availability`; nothing in the crate touches a room document
/// outside its commit loop.
pub struct Engine {
    store: Arc<dyn DocumentStore>,
}

impl Engine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Current declared availability for a room; an absent document is an
    /// empty set. Non-transactional — fine for display and for the
    /// advisory pre-check, never for deciding a merge outcome.
    pub async fn availability(&self, room: &str) -> Result<Vec<Span>, EngineError> {
        validate_room_key(room)?;
        Ok(match self.store.read(room).await? {
            Some(snapshot) => snapshot.doc.into_spans(),
            None => Vec::new(),
        })
    }

    /// Insert a declared-availability span for a room and return the
    /// committed set.
    ///
    /// Each attempt re-reads the document, reclassifies the candidate on
    /// that fresh read, and commits against the revision it read — nothing
    /// from an earlier advisory read leaks in. Losing the revision race
    /// retries on fresh data up to `MAX_COMMIT_ATTEMPTS`, then surfaces
    /// `Contention`. A contained-without-override rejection aborts
    /// immediately: that is a business answer, not a concurrency collision.
    pub async fn insert_availability(
        &self,
        room: &str,
        start: Ms,
        end: Ms,
        allow_contained_override: bool,
    ) -> Result<Vec<Span>, EngineError> {
        validate_room_key(room)?;
        let candidate = validate_candidate(start, end)?;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let (revision, spans) = match self.store.read(room).await? {
                Some(Snapshot { revision, doc }) => (Some(revision), doc.into_spans()),
                None => (None, Vec::new()),
            };
            if spans.len() >= MAX_SPANS_PER_ROOM {
                return Err(EngineError::LimitExceeded("too many spans on room"));
            }

            let verdict = classify(&spans, &candidate);
            let next = merge::apply(&spans, candidate, verdict, allow_contained_override)?;

            match self
                .store
                .commit(room, revision, AvailabilityDoc::from_spans(&next))
                .await
            {
                Ok(_) => {
                    metrics::counter!(crate::observability::COMMITS_TOTAL).increment(1);
                    metrics::histogram!(crate::observability::COMMIT_ATTEMPTS)
                        .record(attempt as f64);
                    info!(room, start, end, ?verdict, "availability committed");
                    return Ok(next);
                }
                Err(StoreError::RevisionMismatch) => {
                    metrics::counter!(crate::observability::COMMIT_RETRIES_TOTAL).increment(1);
                    debug!(room, attempt, "revision raced, retrying on fresh read");
                }
                Err(e) => return Err(e.into()),
            }
        }

        metrics::counter!(crate::observability::COMMIT_CONTENTION_TOTAL).increment(1);
        Err(EngineError::Contention {
            room: room.to_string(),
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }
}

fn validate_room_key(room: &str) -> Result<(), EngineError> {
    if room.is_empty() {
        return Err(EngineError::LimitExceeded("empty room key"));
    }
    if room.len() > MAX_ROOM_KEY_LEN {
        return Err(EngineError::LimitExceeded("room key too long"));
    }
    Ok(())
}

/// Reject inverted/zero-length candidates and out-of-range timestamps
/// before any store round-trip.
fn validate_candidate(start: Ms, end: Ms) -> Result<Span, EngineError> {
    if end <= start {
        return Err(EngineError::InvalidSpan { start, end });
    }
    if start < MIN_VALID_TIMESTAMP_MS || end > MAX_VALID_TIMESTAMP_MS {
        return Err(EngineError::LimitExceeded("timestamp out of range"));
    }
    let span = Span::new(start, end);
    if span.duration_ms() > MAX_SPAN_DURATION_MS {
        return Err(EngineError::LimitExceeded("span too wide"));
    }
    Ok(span)
}
