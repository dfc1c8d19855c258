//! Error types for filter compilation and record fetching

use thiserror::Error;

use crate::filters::FilterCondition;

/// Why a predicate was rejected by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Numeric condition applied to a text field
    NumericConditionOnTextField,
    /// Text condition applied to a numeric field
    TextConditionOnNumericField,
    /// Numeric condition whose value does not parse as a number
    ValueNotNumeric,
    /// Text condition whose value looks like a number
    ValueLooksNumeric,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NumericConditionOnTextField => "numeric condition on a text field",
            Self::TextConditionOnNumericField => "text condition on a numeric field",
            Self::ValueNotNumeric => "value is not a number",
            Self::ValueLooksNumeric => "value looks like a number",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid filter {condition} on field '{field}': {reason}")]
    InvalidPredicate {
        condition: FilterCondition,
        field: String,
        reason: RejectReason,
    },

    #[error("Unrecognized filter condition: {0}")]
    UnrecognizedCondition(String),

    #[error("Unrecognized join mode: {0}")]
    UnrecognizedJoinMode(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Filter JSON exceeds maximum size of {max} bytes")]
    TooLarge { max: usize },

    #[error("Maximum {max} predicates allowed, got {count}")]
    TooManyPredicates { max: usize, count: usize },

    #[error("Invalid filter JSON: {0}")]
    InvalidJson(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Filter(#[from] FilterError),
}
