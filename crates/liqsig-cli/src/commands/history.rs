use std::str::FromStr;

use liqsig_core::{classify_series, ClassifiedPoint, LiquidityFeed, Signal};
use serde::Serialize;

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::{history_request, CommandResult};

#[derive(Debug, Serialize)]
struct HistoryResponseData {
    count: usize,
    points: Vec<ClassifiedPoint>,
}

pub fn run(args: &HistoryArgs, feed: &dyn LiquidityFeed) -> Result<CommandResult, CliError> {
    let request = history_request(&args.window)?;
    let wanted = args.signal.as_deref().map(Signal::from_str).transpose()?;

    let series = feed.history(&request)?;
    let mut points = classify_series(&series)?;
    if let Some(wanted) = wanted {
        points.retain(|point| point.signal == wanted);
    }

    let empty_window = series.is_empty();
    let data = serde_json::to_value(HistoryResponseData {
        count: points.len(),
        points,
    })?;

    let result = CommandResult::ok(data, vec![feed.id()]);
    if empty_window {
        return Ok(result.with_warning("no snapshots in the requested window"));
    }
    Ok(result)
}
