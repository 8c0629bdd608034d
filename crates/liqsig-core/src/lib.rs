//! Core contracts for liqsig.
//!
//! This crate contains:
//! - Canonical snapshot, signal and phase models with validation
//! - The threshold classifier and signal span grouping
//! - Series normalization for chart views
//! - Feed trait and static JSON feed
//! - Response envelope and structured errors

pub mod assessment;
pub mod classifier;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod feed;
pub mod normalizer;
pub mod source;
pub mod stats;

pub use assessment::{
    assess, Assessment, Direction, Indicator, IndicatorAssessment, Leadership, Stance,
};
pub use classifier::{
    classify, classify_series, classify_signal, confidence, headline, signal_spans,
    ThresholdTable, THRESHOLDS, THRESHOLD_TABLE_VERSION,
};
pub use domain::{
    validate_finite, validate_series, ClassificationResult, ClassifiedPoint, IndicatorSnapshot,
    Phase, Signal, SignalSpan, UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{DataQualityError, ValidationError};
pub use feed::{FeedError, FeedErrorKind, HistoryRequest, LiquidityFeed, Lookback, StaticFeed};
pub use normalizer::{
    normalize, Column, NormalizeMode, NormalizedPoint, NormalizedSeries, ZSCORE_DISPLAY_DOMAIN,
};
pub use source::FeedId;
