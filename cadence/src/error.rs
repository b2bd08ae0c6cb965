use thiserror::Error;

/// Failures surfaced by the analysis operations.
///
/// These are per-request failures: one failing view never prevents the
/// other views from being computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The requested key has no recorded events.
    #[error("no data found for key '{key}'")]
    KeyNotFound { key: String },

    /// The smoothing window must cover at least one sample.
    #[error("invalid smoothing window {window}: must be at least 1")]
    InvalidWindow { window: usize },
}
