use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::model::{AvailabilityDoc, RoomKey};

/// Store-assigned document version. Replaced wholesale on every commit;
/// equality against the revision a writer read is the optimistic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision(pub Ulid);

impl Revision {
    fn next() -> Self {
        Revision(Ulid::new())
    }
}

/// One document read: the revision it was read at plus the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: Revision,
    pub doc: AvailabilityDoc,
}

#[derive(Debug)]
pub enum StoreError {
    /// The commit expectation did not match the current revision — another
    /// writer committed in between. Transient; retried on fresh data.
    RevisionMismatch,
    /// Stored document failed to decode.
    Corrupt(String),
    /// Connectivity/permission/quota failure from the backing store.
    /// Never retried by the engine.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::RevisionMismatch => write!(f, "document revision mismatch"),
            StoreError::Corrupt(e) => write!(f, "corrupt document: {e}"),
            StoreError::Unavailable(e) => write!(f, "store unavailable: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The hosted document database, reduced to what the engine needs: a point
/// read and a revision-checked whole-document commit.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the current document for a room. `None` if it does not exist,
    /// which is equivalent to an empty availability set.
    async fn read(&self, room: &str) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the room document, but only if its current revision still
    /// matches `expected` (`None` = the document must not exist yet).
    /// Returns the newly assigned revision.
    async fn commit(
        &self,
        room: &str,
        expected: Option<Revision>,
        doc: AvailabilityDoc,
    ) -> Result<Revision, StoreError>;
}

/// In-memory `DocumentStore`. Documents are held as JSON values — the same
/// shape a hosted store would keep — so every read exercises the decode
/// path. The revision check-and-swap happens under the map entry lock.
pub struct MemoryStore {
    docs: DashMap<RoomKey, (Revision, serde_json::Value)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, room: &str) -> Result<Option<Snapshot>, StoreError> {
        match self.docs.get(room) {
            None => Ok(None),
            Some(entry) => {
                let (revision, value) = entry.value();
                let doc: AvailabilityDoc = serde_json::from_value(value.clone())
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?;
                Ok(Some(Snapshot {
                    revision: *revision,
                    doc,
                }))
            }
        }
    }

    async fn commit(
        &self,
        room: &str,
        expected: Option<Revision>,
        doc: AvailabilityDoc,
    ) -> Result<Revision, StoreError> {
        let value =
            serde_json::to_value(&doc).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let next = Revision::next();
        match self.docs.entry(room.to_string()) {
            Entry::Occupied(mut occupied) => {
                if expected != Some(occupied.get().0) {
                    return Err(StoreError::RevisionMismatch);
                }
                occupied.insert((next, value));
                Ok(next)
            }
            Entry::Vacant(vacant) => {
                if expected.is_some() {
                    return Err(StoreError::RevisionMismatch);
                }
                vacant.insert((next, value));
                Ok(next)
            }
        }
    }
}
