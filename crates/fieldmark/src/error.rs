//! Error types for template configuration and identifier generation.

use thiserror::Error;

/// Configuration error in a format template.
///
/// These are reported synchronously at template save time (via
/// [`crate::template::validate`]) or at generation time; they are never
/// silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template references a placeholder code that no resolver handles.
    #[error("unknown placeholder code {{{code}}}")]
    UnknownPlaceholder { code: String },

    /// A placeholder spec contains characters outside `0` and `X`.
    #[error("invalid spec {{{code}:{spec}}}: expected one or more '0' or 'X' characters")]
    InvalidSpec { code: String, spec: String },

    /// The mandatory `{NUM_UE}` placeholder is missing from the template.
    #[error("the {{NUM_UE}} placeholder is mandatory in the format")]
    MissingNumberPlaceholder,
}

/// Failure in the storage layer backing counters, abbreviations, or
/// per-unit contexts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store failure: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Creates a store error from any message.
    pub fn new(msg: impl Into<String>) -> Self {
        StoreError(msg.into())
    }
}

/// Error during identifier generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The action's template is invalid configuration.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The drawn sequence value fell outside the action's configured range.
    ///
    /// The value is consumed, not rolled back; the save operation must be
    /// rejected and an administrator asked to widen the range.
    #[error("sequence value {value} outside configured range [{min}, {max}]; ask an administrator to widen the range")]
    RangeExhausted { value: i64, min: i64, max: i64 },

    /// The collision-suffix search gave up after the probe limit.
    ///
    /// Only reachable with pathological inputs; see
    /// [`crate::limits::MAX_ABBREVIATION_PROBES`].
    #[error("no free abbreviation found near {candidate:?} after {limit} probes")]
    AbbreviationSearchExhausted { candidate: String, limit: usize },
}
