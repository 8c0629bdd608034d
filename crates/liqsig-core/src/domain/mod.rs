//! # Domain Models
//!
//! Canonical domain types for liquidity classification.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`IndicatorSnapshot`] | One observation of the four liquidity indicators |
//! | [`Signal`] | Base RISK-ON / TIGHT / NEUTRAL signal |
//! | [`Phase`] | Extended phase taxonomy |
//! | [`ClassificationResult`] | Signal, phase, rationale and confidence |
//! | [`ClassifiedPoint`] | Historical snapshot with its classification |
//! | [`SignalSpan`] | Contiguous run of a single signal |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! ## Validation
//!
//! Snapshots enforce finite primary fields at construction and on
//! deserialization:
//!
//! ```rust
//! use liqsig_core::{IndicatorSnapshot, UtcDateTime, ValidationError};
//!
//! let ts = UtcDateTime::parse("2024-01-04T00:00:00Z").unwrap();
//! let err = IndicatorSnapshot::new(ts, f64::NAN, 1.0, 1.0, 1.0).unwrap_err();
//! assert!(matches!(err, ValidationError::NonFiniteValue { field: "fed_yoy" }));
//! ```

mod signal;
mod snapshot;
mod timestamp;

pub use signal::{ClassificationResult, ClassifiedPoint, Phase, Signal, SignalSpan};
pub use snapshot::{validate_finite, validate_series, IndicatorSnapshot};
pub use timestamp::UtcDateTime;
