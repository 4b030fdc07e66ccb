use crate::model::Span;

use super::EngineError;
use super::classify::Verdict;

/// Overlap policy for the union merge: strict, so spans that merely touch
/// (`a.end == b.start`) stay distinct neighbours. Flipping this one test to
/// a closed comparison would coalesce touching spans too.
fn absorbs(merged: &Span, other: &Span) -> bool {
    merged.overlaps(other)
}

/// Compute the next availability set for `candidate` under `verdict`.
///
/// The result is sorted ascending by start and pairwise disjoint.
/// `FullyContained` is a destructive replace — the matched span shrinks to
/// exactly the candidate's bounds, never a union — and only happens when
/// the caller granted the override.
pub fn apply(
    existing: &[Span],
    candidate: Span,
    verdict: Verdict,
    allow_contained_override: bool,
) -> Result<Vec<Span>, EngineError> {
    let next = match verdict {
        Verdict::Disjoint => {
            let mut spans = existing.to_vec();
            let pos = spans.partition_point(|s| s.start < candidate.start);
            spans.insert(pos, candidate);
            spans
        }
        Verdict::FullyContained(idx) => {
            if !allow_contained_override {
                return Err(EngineError::ContainedWithoutOverride {
                    existing: existing[idx],
                });
            }
            let mut spans = existing.to_vec();
            spans[idx] = candidate;
            spans.sort_by_key(|s| s.start);
            spans
        }
        Verdict::Overlapping => union_merge(existing, candidate),
    };
    debug_assert!(
        is_sorted_disjoint(&next),
        "merge produced an unsorted or overlapping set"
    );
    Ok(next)
}

/// Union-merge fixpoint: grow `candidate` over every span it strictly
/// overlaps until nothing left overlaps it, keeping the rest untouched.
/// Absorbing one span can widen the merged span into the next, so chains
/// bridged by the candidate collapse in a single call.
fn union_merge(existing: &[Span], candidate: Span) -> Vec<Span> {
    let mut merged = candidate;
    let mut remaining = existing.to_vec();
    loop {
        let before = remaining.len();
        remaining.retain(|s| {
            if absorbs(&merged, s) {
                merged.start = merged.start.min(s.start);
                merged.end = merged.end.max(s.end);
                false
            } else {
                true
            }
        });
        if remaining.len() == before {
            break;
        }
    }
    let pos = remaining.partition_point(|s| s.start < merged.start);
    remaining.insert(pos, merged);
    remaining
}

/// Sorted ascending by start, no strict overlap between neighbours.
/// Touching neighbours are fine.
pub(crate) fn is_sorted_disjoint(spans: &[Span]) -> bool {
    spans.windows(2).all(|w| w[0].end <= w[1].start)
}
