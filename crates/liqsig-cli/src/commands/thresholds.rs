use liqsig_core::{
    confidence, headline, FeedId, Phase, Signal, ThresholdTable, THRESHOLDS,
    THRESHOLD_TABLE_VERSION,
};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PhaseEntry {
    phase: Phase,
    signal: Signal,
    headline: &'static str,
    confidence: f64,
}

#[derive(Debug, Serialize)]
struct ThresholdsResponseData {
    version: &'static str,
    thresholds: ThresholdTable,
    phases: Vec<PhaseEntry>,
}

pub fn run() -> Result<CommandResult, CliError> {
    let phases = Phase::ALL
        .into_iter()
        .map(|phase| PhaseEntry {
            phase,
            signal: phase.signal(),
            headline: headline(phase),
            confidence: confidence(phase),
        })
        .collect();

    let data = serde_json::to_value(ThresholdsResponseData {
        version: THRESHOLD_TABLE_VERSION,
        thresholds: THRESHOLDS,
        phases,
    })?;

    Ok(CommandResult::ok(data, vec![FeedId::Builtin]))
}
