use serde::{Deserialize, Serialize};

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// Opaque room identifier (compact campus-building-room code).
pub type RoomKey = String;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }

    /// Returns true if `self` fully contains `other`.
    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// The persisted per-room document: the availability set encoded as two
/// equal-length index-paired arrays, which is the shape the hosted document
/// store holds. Everything inside the crate works on `Span` values; the
/// translation happens exactly once per read and once per write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDoc {
    pub starts: Vec<Ms>,
    pub ends: Vec<Ms>,
}

impl AvailabilityDoc {
    pub fn from_spans(spans: &[Span]) -> Self {
        Self {
            starts: spans.iter().map(|s| s.start).collect(),
            ends: spans.iter().map(|s| s.end).collect(),
        }
    }

    /// Decode into typed spans. Inverted and zero-length pairs are dropped,
    /// entries past the shorter of the two arrays are ignored, and the
    /// result is sorted ascending by start — whatever a past writer left
    /// behind, the engine only ever sees well-formed spans.
    pub fn into_spans(self) -> Vec<Span> {
        let mut spans: Vec<Span> = self
            .starts
            .into_iter()
            .zip(self.ends)
            .filter(|(start, end)| end > start)
            .map(|(start, end)| Span::new(start, end))
            .collect();
        spans.sort_by_key(|s| s.start);
        spans
    }
}
