use crate::model::Span;

/// How a candidate span relates to the existing availability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Overlaps nothing — insertion is a plain add.
    Disjoint,
    /// Lies entirely inside the existing span at this index.
    FullyContained(usize),
    /// Strictly overlaps at least one span without fitting inside any
    /// single one of them.
    Overlapping,
}

/// Classify `candidate` against a sorted, pairwise-disjoint set.
///
/// The overlap test is strict (`a.start < b.end && b.start < a.end`), so a
/// span that merely touches an existing endpoint classifies as disjoint.
/// Because the set is disjoint, at most one span can fully contain the
/// candidate; the first hit wins.
pub fn classify(existing: &[Span], candidate: &Span) -> Verdict {
    let mut overlapping = false;
    for (idx, e) in existing.iter().enumerate() {
        if e.contains_span(candidate) {
            return Verdict::FullyContained(idx);
        }
        if e.overlaps(candidate) {
            overlapping = true;
        }
    }
    if overlapping {
        Verdict::Overlapping
    } else {
        Verdict::Disjoint
    }
}
