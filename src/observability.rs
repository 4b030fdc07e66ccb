// Metric names recorded by the engine. Installing a recorder/exporter is
// the embedding application's job; without one these are no-ops.

/// Counter: successful availability commits.
pub const COMMITS_TOTAL: &str = "roomspan_commits_total";

/// Counter: commit attempts that lost the revision race and were retried.
pub const COMMIT_RETRIES_TOTAL: &str = "roomspan_commit_retries_total";

/// Counter: inserts abandoned after exhausting the retry cap.
pub const COMMIT_CONTENTION_TOTAL: &str = "roomspan_commit_contention_total";

/// Histogram: attempts needed per successful commit.
pub const COMMIT_ATTEMPTS: &str = "roomspan_commit_attempts";
