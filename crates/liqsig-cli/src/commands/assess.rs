use liqsig_core::{assess, LiquidityFeed};

use crate::error::CliError;

use super::CommandResult;

pub fn run(feed: &dyn LiquidityFeed) -> Result<CommandResult, CliError> {
    let snapshot = feed.latest()?;
    let data = serde_json::to_value(assess(&snapshot)?)?;
    Ok(CommandResult::ok(data, vec![feed.id()]))
}
