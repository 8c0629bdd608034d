use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Base three-way liquidity signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "RISK-ON")]
    RiskOn,
    #[serde(rename = "TIGHT")]
    Tight,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl Signal {
    pub const ALL: [Self; 3] = [Self::RiskOn, Self::Tight, Self::Neutral];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskOn => "RISK-ON",
            Self::Tight => "TIGHT",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().replace('_', "-").as_str() {
            "RISK-ON" => Ok(Self::RiskOn),
            "TIGHT" => Ok(Self::Tight),
            "NEUTRAL" => Ok(Self::Neutral),
            other => Err(ValidationError::InvalidSignal {
                value: other.to_owned(),
            }),
        }
    }
}

/// Extended phase taxonomy; subdivides the risk-on region of [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "PHASE-3-FULL-RISK-ON")]
    FullRiskOn,
    #[serde(rename = "EARLY-RISK-ON")]
    EarlyRiskOn,
    #[serde(rename = "TIGHT-LIQUIDITY")]
    TightLiquidity,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl Phase {
    pub const ALL: [Self; 4] = [
        Self::FullRiskOn,
        Self::EarlyRiskOn,
        Self::TightLiquidity,
        Self::Neutral,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullRiskOn => "PHASE-3-FULL-RISK-ON",
            Self::EarlyRiskOn => "EARLY-RISK-ON",
            Self::TightLiquidity => "TIGHT-LIQUIDITY",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Collapses the phase onto the base taxonomy.
    pub const fn signal(self) -> Signal {
        match self {
            Self::FullRiskOn | Self::EarlyRiskOn => Signal::RiskOn,
            Self::TightLiquidity => Signal::Tight,
            Self::Neutral => Signal::Neutral,
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one snapshot. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub signal: Signal,
    pub phase: Phase,
    pub headline: String,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A historical snapshot paired with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    pub date: UtcDateTime,
    pub signal: Signal,
    pub phase: Phase,
}

/// Contiguous run of points sharing one base signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpan {
    pub signal: Signal,
    pub start: UtcDateTime,
    pub end: UtcDateTime,
    pub points: usize,
}
