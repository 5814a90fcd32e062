//! Error types for the sieve crate.

use thiserror::Error;

use crate::kind::RuleKind;

/// Errors that can occur when configuring a processor, compiling rules, or
/// applying a rule set.
#[derive(Debug, Error)]
pub enum Error {
    /// A processor option has an unusable value.
    #[error("invalid option '{option}': {reason}")]
    InvalidConfig {
        option: &'static str,
        reason: &'static str,
    },

    /// The rule set JSON could not be decoded.
    #[error("failed unmarshaling rules: {0}")]
    Json(#[from] serde_json::Error),

    /// The rule type name is not one of the known kinds.
    #[error("unknown rule type: '{0}'")]
    UnknownKind(String),

    /// The reference value does not fit the rule type.
    #[error("rule of type {kind} should have {expected} value (got {value} ({actual}))")]
    InvalidReference {
        kind: RuleKind,
        expected: &'static str,
        value: String,
        actual: &'static str,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regexp pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The rule set holds more rules than the processor allows.
    #[error("too many rules: got {got} max is {max}")]
    TooManyRules { got: usize, max: usize },

    /// A page length of zero was requested.
    #[error("length must be strictly positive")]
    InvalidLength,

    /// The field path has an empty segment.
    #[error("malformed field path '{path}'")]
    MalformedPath { path: String },

    /// The field accessor failed for a reason other than a missing field.
    #[error("failed extracting field '{field}': {reason}")]
    Extraction { field: String, reason: String },
}

/// Result type for sieve operations.
pub type Result<T> = std::result::Result<T, Error>;
