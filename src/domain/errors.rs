use thiserror::Error;

/// Errors surfaced by the benchmarking core.
///
/// Absence of data (no peers, no published standards) is deliberately *not*
/// represented here: those are expected result states encoded in
/// `BenchmarkResult`'s optional fields, not faults.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// The raw time string could not be parsed into a swim time.
    /// Surfaced at the intake boundary so the caller can re-prompt.
    #[error("invalid time format \"{raw}\": {reason}")]
    InvalidTimeFormat { raw: String, reason: String },

    /// Fetched standards rows are internally inconsistent (non-monotonic
    /// thresholds, duplicate tiers, or rows from more than one cohort).
    /// Fatal to that lookup: classifying against a broken ladder would
    /// silently misrank the swimmer.
    #[error("corrupt standards data for {cohort}: {reason}")]
    CorruptStandardsData { cohort: String, reason: String },
}
