use crate::engine::{Engine, EngineError, Verdict, classify};
use crate::model::{Ms, Span};

/// What the UI should do before submitting a candidate span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// No conflict visible — submit without prompting.
    Clear,
    /// Candidate sits inside this existing span; the insert would shrink it
    /// to the candidate's bounds. Ask before granting the override.
    ConfirmShrink { existing: Span },
    /// Candidate strictly overlaps existing spans and will be merged with
    /// them.
    ConfirmMerge,
}

/// Outcome of a submit: either committed, or the authoritative read
/// disagreed with the advisory one and the user must be asked (again).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Committed(Vec<Span>),
    NeedsConfirmation(Advice),
}

/// Advisory pre-check: one non-transactional read plus classification.
/// Never authoritative — the applier reclassifies on its own fresh read,
/// and the two can disagree under concurrent writers.
pub async fn advise(
    engine: &Engine,
    room: &str,
    start: Ms,
    end: Ms,
) -> Result<Advice, EngineError> {
    if end <= start {
        return Err(EngineError::InvalidSpan { start, end });
    }
    let spans = engine.availability(room).await?;
    let candidate = Span::new(start, end);
    Ok(match classify(&spans, &candidate) {
        Verdict::Disjoint => Advice::Clear,
        Verdict::FullyContained(idx) => Advice::ConfirmShrink {
            existing: spans[idx],
        },
        Verdict::Overlapping => Advice::ConfirmMerge,
    })
}

/// Submit a span with the user's confirmation decision. A
/// contained-without-override rejection comes back as `NeedsConfirmation`
/// rather than an error: the transaction's fresh read may disagree with
/// whatever advisory read the prompt was based on, so the right move is to
/// ask again, not to fail.
pub async fn submit(
    engine: &Engine,
    room: &str,
    start: Ms,
    end: Ms,
    confirmed: bool,
) -> Result<SubmitOutcome, EngineError> {
    match engine.insert_availability(room, start, end, confirmed).await {
        Ok(spans) => Ok(SubmitOutcome::Committed(spans)),
        Err(EngineError::ContainedWithoutOverride { existing }) => Ok(
            SubmitOutcome::NeedsConfirmation(Advice::ConfirmShrink { existing }),
        ),
        Err(e) => Err(e),
    }
}
