use std::str::FromStr;

use liqsig_core::{normalize, EnvelopeError, LiquidityFeed, NormalizeMode, NormalizedPoint};
use serde::Serialize;

use crate::cli::NormalizeArgs;
use crate::error::CliError;

use super::{history_request, CommandResult};

#[derive(Debug, Serialize)]
struct NormalizeResponseData {
    mode: NormalizeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_domain: Option<(f64, f64)>,
    points: Vec<NormalizedPoint>,
}

pub fn run(args: &NormalizeArgs, feed: &dyn LiquidityFeed) -> Result<CommandResult, CliError> {
    let mode = NormalizeMode::from_str(&args.mode)?;
    let request = history_request(&args.window)?;

    let series = feed.history(&request)?;
    let normalized = normalize(&series, mode)?;

    let errors = normalized
        .issues
        .iter()
        .copied()
        .map(EnvelopeError::from)
        .collect::<Vec<_>>();
    let warnings = normalized
        .absent_columns
        .iter()
        .map(|column| format!("column '{column}' is absent from every snapshot"))
        .collect::<Vec<_>>();
    let display_domain = normalized.display_domain();
    let data = serde_json::to_value(NormalizeResponseData {
        mode,
        display_domain,
        points: normalized.points,
    })?;

    Ok(CommandResult::ok(data, vec![feed.id()])
        .with_warnings(warnings)
        .with_errors(errors))
}
