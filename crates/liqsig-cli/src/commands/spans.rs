use liqsig_core::{signal_spans, LiquidityFeed, SignalSpan};
use serde::Serialize;

use crate::cli::WindowArgs;
use crate::error::CliError;

use super::{history_request, CommandResult};

#[derive(Debug, Serialize)]
struct SpansResponseData {
    spans: Vec<SignalSpan>,
}

pub fn run(args: &WindowArgs, feed: &dyn LiquidityFeed) -> Result<CommandResult, CliError> {
    let series = feed.history(&history_request(args)?)?;
    let spans = signal_spans(&series)?;

    let data = serde_json::to_value(SpansResponseData { spans })?;
    Ok(CommandResult::ok(data, vec![feed.id()]))
}
