use crate::model::{Ms, Span};
use crate::store::StoreError;

#[derive(Debug)]
pub enum EngineError {
    /// Candidate with `end <= start`. Rejected before any store round-trip.
    InvalidSpan { start: Ms, end: Ms },
    /// Candidate sits entirely inside `existing` and the caller did not
    /// grant the override. Business rejection, never retried here.
    ContainedWithoutOverride { existing: Span },
    LimitExceeded(&'static str),
    /// Every commit attempt lost the revision race.
    Contention { room: String, attempts: u32 },
    Store(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidSpan { start, end } => {
                write!(f, "invalid span [{start}, {end})")
            }
            EngineError::ContainedWithoutOverride { existing } => {
                write!(
                    f,
                    "span is contained in existing availability [{}, {}) and no override was granted",
                    existing.start, existing.end
                )
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::Contention { room, attempts } => {
                write!(f, "room {room}: gave up after {attempts} contended commit attempts")
            }
            EngineError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}
