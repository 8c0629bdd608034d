//! Per-indicator reading of a snapshot, for report views.

use serde::{Deserialize, Serialize};

use crate::classifier::{classify, THRESHOLDS};
use crate::{ClassificationResult, IndicatorSnapshot, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    M2,
    FedBalanceSheet,
    Manufacturing,
    TgaRrp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stance {
    Positive,
    Cautious,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Expanding,
    Contracting,
}

impl Direction {
    fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Expanding
        } else {
            Self::Contracting
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorAssessment {
    pub indicator: Indicator,
    pub stance: Stance,
    pub headline: String,
    pub detail: String,
}

/// Whether money supply or the central bank is driving liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leadership {
    pub m2_leads_fed: bool,
    pub m2_direction: Direction,
    pub fed_direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub classification: ClassificationResult,
    pub leadership: Leadership,
    pub indicators: Vec<IndicatorAssessment>,
}

pub fn assess(snapshot: &IndicatorSnapshot) -> Result<Assessment, ValidationError> {
    let classification = classify(snapshot)?;

    let leadership = Leadership {
        m2_leads_fed: snapshot.m2_yoy > snapshot.fed_yoy,
        m2_direction: Direction::of(snapshot.m2_yoy),
        fed_direction: Direction::of(snapshot.fed_yoy),
    };

    let indicators = vec![
        m2(snapshot.m2_yoy),
        fed(snapshot.fed_yoy),
        manufacturing(snapshot.manufacturing_yoy),
        tga_rrp(snapshot.tga_rrp_four_week_change),
    ];

    Ok(Assessment {
        classification,
        leadership,
        indicators,
    })
}

fn m2(value: f64) -> IndicatorAssessment {
    let (stance, headline, detail) = if value > THRESHOLDS.full_risk_on_m2_above {
        (
            Stance::Positive,
            "M2 MONEY SUPPLY: EXPANSIONARY PHASE",
            format!("M2 growth at {value:.1}% indicates strong monetary expansion"),
        )
    } else if value > THRESHOLDS.early_risk_on_m2_above {
        (
            Stance::Cautious,
            "M2 MONEY SUPPLY: MODERATE EXPANSION",
            format!("M2 growth at {value:.1}% has not reached the 6% full risk-on bar"),
        )
    } else {
        (
            Stance::Negative,
            "M2 MONEY SUPPLY: CONTRACTION",
            format!("M2 at {value:.1}% indicates tightening liquidity"),
        )
    };
    IndicatorAssessment {
        indicator: Indicator::M2,
        stance,
        headline: headline.to_owned(),
        detail,
    }
}

fn fed(value: f64) -> IndicatorAssessment {
    let (stance, headline, detail) = if value > THRESHOLDS.risk_on_fed_above {
        (
            Stance::Positive,
            "FED BALANCE SHEET: EXPANSION",
            format!("Fed balance sheet growing at {value:.1}% YoY adds liquidity"),
        )
    } else {
        (
            Stance::Negative,
            "FED BALANCE SHEET: CONTRACTION",
            format!("Fed balance sheet at {value:.1}% YoY removes liquidity"),
        )
    };
    IndicatorAssessment {
        indicator: Indicator::FedBalanceSheet,
        stance,
        headline: headline.to_owned(),
        detail,
    }
}

fn manufacturing(value: f64) -> IndicatorAssessment {
    let (stance, headline, detail) = if value >= THRESHOLDS.risk_on_manufacturing_at_least {
        (
            Stance::Positive,
            "MANUFACTURING: GROWTH",
            format!("Manufacturing production at {value:.1}% YoY confirms expansion"),
        )
    } else {
        (
            Stance::Negative,
            "MANUFACTURING: CONTRACTION",
            format!("Manufacturing production at {value:.1}% YoY signals weakness"),
        )
    };
    IndicatorAssessment {
        indicator: Indicator::Manufacturing,
        stance,
        headline: headline.to_owned(),
        detail,
    }
}

fn tga_rrp(value: f64) -> IndicatorAssessment {
    let (stance, headline, detail) = if value < THRESHOLDS.risk_on_tga_rrp_below {
        (
            Stance::Positive,
            "TREASURY + RRP: LIQUIDITY INJECTION",
            format!("4-week change of ${value:.0}B is a net injection"),
        )
    } else {
        (
            Stance::Negative,
            "TREASURY + RRP: LIQUIDITY DRAIN",
            format!("4-week change of ${value:.0}B is a net drain"),
        )
    };
    IndicatorAssessment {
        indicator: Indicator::TgaRrp,
        stance,
        headline: headline.to_owned(),
        detail,
    }
}
