use thiserror::Error;

use crate::normalizer::Column;

/// Validation and contract errors exposed by `liqsig-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("timestamp at index {index} is earlier than its predecessor")]
    NonMonotonicTimestamp { index: usize },
    #[error("snapshot at index {index} is invalid: {reason}")]
    InvalidSnapshot {
        index: usize,
        reason: Box<ValidationError>,
    },

    #[error("timestamp must be RFC3339 in UTC (Z or +00:00) or carry no offset: '{value}'")]
    TimestampNotUtc { value: String },

    #[error("invalid normalize mode '{value}', expected one of raw, zscore, percent-from-start")]
    InvalidMode { value: String },
    #[error("invalid signal '{value}', expected one of RISK-ON, TIGHT, NEUTRAL")]
    InvalidSignal { value: String },
    #[error("lookback must cover at least one day")]
    InvalidLookback,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("source_chain must contain at least one feed")]
    EmptySourceChain,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

impl ValidationError {
    pub(crate) fn at_index(self, index: usize) -> Self {
        Self::InvalidSnapshot {
            index,
            reason: Box::new(self),
        }
    }
}

/// Column-scoped data-quality failure raised by the normalizer.
///
/// A failing column yields absent values; the other columns of the same
/// series are still computed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DataQualityError {
    #[error("column '{column}' has no finite value to rebase against")]
    MissingBaseline { column: Column },
    #[error("column '{column}' starts at zero and cannot be rebased")]
    ZeroBaseline { column: Column },
    #[error("column '{column}' baseline is too close to zero; rebased values overflow")]
    RebaseOverflow { column: Column },
}

impl DataQualityError {
    pub const fn column(self) -> Column {
        match self {
            Self::MissingBaseline { column }
            | Self::ZeroBaseline { column }
            | Self::RebaseOverflow { column } => column,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingBaseline { .. } => "data_quality.missing_baseline",
            Self::ZeroBaseline { .. } => "data_quality.zero_baseline",
            Self::RebaseOverflow { .. } => "data_quality.rebase_overflow",
        }
    }
}
