//! Liquidity signal classification.
//!
//! A snapshot is mapped onto the extended [`Phase`] taxonomy by the canonical
//! [`THRESHOLDS`] table; the base [`Signal`] is the phase collapsed with
//! [`Phase::signal`]. Branches are evaluated in a fixed order and the first
//! match wins, since the risk-on predicates overlap.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    ClassificationResult, ClassifiedPoint, IndicatorSnapshot, Phase, Signal, SignalSpan,
    ValidationError,
};

/// Version of the threshold table. Any change to [`THRESHOLDS`] bumps it.
pub const THRESHOLD_TABLE_VERSION: &str = "v1";

/// Canonical threshold table.
pub const THRESHOLDS: ThresholdTable = ThresholdTable {
    full_risk_on_m2_above: 6.0,
    early_risk_on_m2_above: 0.0,
    risk_on_fed_above: 0.0,
    risk_on_manufacturing_at_least: 0.0,
    risk_on_tga_rrp_below: 0.0,
    tight_fed_below: -3.0,
    tight_manufacturing_at_most: -3.0,
};

/// Cut-offs for each classification branch. Comparisons are strict unless
/// the field name says `at_least` / `at_most`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub full_risk_on_m2_above: f64,
    pub early_risk_on_m2_above: f64,
    pub risk_on_fed_above: f64,
    pub risk_on_manufacturing_at_least: f64,
    pub risk_on_tga_rrp_below: f64,
    pub tight_fed_below: f64,
    pub tight_manufacturing_at_most: f64,
}

impl ThresholdTable {
    /// Resolves the phase of an already validated snapshot.
    pub fn phase_of(&self, snapshot: &IndicatorSnapshot) -> Phase {
        let risk_on_backdrop = snapshot.fed_yoy > self.risk_on_fed_above
            && snapshot.manufacturing_yoy >= self.risk_on_manufacturing_at_least
            && snapshot.tga_rrp_four_week_change < self.risk_on_tga_rrp_below;

        if risk_on_backdrop && snapshot.m2_yoy > self.full_risk_on_m2_above {
            Phase::FullRiskOn
        } else if risk_on_backdrop && snapshot.m2_yoy > self.early_risk_on_m2_above {
            Phase::EarlyRiskOn
        } else if snapshot.fed_yoy < self.tight_fed_below
            && snapshot.manufacturing_yoy <= self.tight_manufacturing_at_most
        {
            Phase::TightLiquidity
        } else {
            Phase::Neutral
        }
    }
}

/// Classifies one snapshot against [`THRESHOLDS`].
///
/// Fails only when a primary field is non-finite; no signal is guessed in
/// that case.
pub fn classify(snapshot: &IndicatorSnapshot) -> Result<ClassificationResult, ValidationError> {
    snapshot.validate()?;

    let phase = THRESHOLDS.phase_of(snapshot);
    trace!(
        timestamp = %snapshot.timestamp,
        phase = phase.as_str(),
        "classified snapshot"
    );

    Ok(ClassificationResult {
        signal: phase.signal(),
        phase,
        headline: headline(phase).to_owned(),
        rationale: rationale(phase, snapshot),
        confidence: Some(confidence(phase)),
    })
}

/// Compact base-taxonomy view used for status and table display.
pub fn classify_signal(snapshot: &IndicatorSnapshot) -> Result<Signal, ValidationError> {
    snapshot.validate()?;
    Ok(THRESHOLDS.phase_of(snapshot).signal())
}

/// Classifies every snapshot of a historical series, in order.
pub fn classify_series(
    series: &[IndicatorSnapshot],
) -> Result<Vec<ClassifiedPoint>, ValidationError> {
    series
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            snapshot.validate().map_err(|error| error.at_index(index))?;
            let phase = THRESHOLDS.phase_of(snapshot);
            Ok(ClassifiedPoint {
                date: snapshot.timestamp,
                signal: phase.signal(),
                phase,
            })
        })
        .collect()
}

/// Collapses consecutive points that share a base signal into spans.
pub fn signal_spans(series: &[IndicatorSnapshot]) -> Result<Vec<SignalSpan>, ValidationError> {
    let mut spans: Vec<SignalSpan> = Vec::new();

    for point in classify_series(series)? {
        match spans.last_mut() {
            Some(span) if span.signal == point.signal => {
                span.end = point.date;
                span.points += 1;
            }
            _ => spans.push(SignalSpan {
                signal: point.signal,
                start: point.date,
                end: point.date,
                points: 1,
            }),
        }
    }

    Ok(spans)
}

pub const fn headline(phase: Phase) -> &'static str {
    match phase {
        Phase::FullRiskOn => "PHASE 3: FULL RISK-ON",
        Phase::EarlyRiskOn => "EARLY RISK-ON",
        Phase::TightLiquidity => "TIGHT LIQUIDITY",
        Phase::Neutral => "NEUTRAL CONDITIONS",
    }
}

pub const fn confidence(phase: Phase) -> f64 {
    match phase {
        Phase::FullRiskOn => 0.95,
        Phase::EarlyRiskOn | Phase::TightLiquidity => 0.90,
        Phase::Neutral => 0.85,
    }
}

fn rationale(phase: Phase, s: &IndicatorSnapshot) -> String {
    match phase {
        Phase::FullRiskOn => format!(
            "M2 {:+.1}% is above 6% with Fed {:+.1}% expanding, manufacturing {:+.1}% \
             non-negative and TGA+RRP {:+.0}B injecting: liquidity favors risk assets",
            s.m2_yoy, s.fed_yoy, s.manufacturing_yoy, s.tga_rrp_four_week_change
        ),
        Phase::EarlyRiskOn => format!(
            "M2 {:+.1}% is positive but not above 6% while Fed {:+.1}%, manufacturing \
             {:+.1}% and TGA+RRP {:+.0}B confirm: early risk-on, watch M2 for phase 3",
            s.m2_yoy, s.fed_yoy, s.manufacturing_yoy, s.tga_rrp_four_week_change
        ),
        Phase::TightLiquidity => format!(
            "Fed {:+.1}% is below -3% and manufacturing {:+.1}% is at or below -3%: \
             restrictive conditions",
            s.fed_yoy, s.manufacturing_yoy
        ),
        Phase::Neutral => format!(
            "mixed signals: Fed {:+.1}%, M2 {:+.1}%, manufacturing {:+.1}%, TGA+RRP {:+.0}B",
            s.fed_yoy, s.m2_yoy, s.manufacturing_yoy, s.tga_rrp_four_week_change
        ),
    }
}
