mod assess;
mod classify;
mod history;
mod normalize;
mod spans;
mod thresholds;

use std::io;
use std::path::Path;
use std::time::Instant;

use liqsig_core::{
    Envelope, EnvelopeError, EnvelopeMeta, FeedId, HistoryRequest, StaticFeed, UtcDateTime,
};
use liqsig_core::LiquidityFeed;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::cli::{Cli, Command, OutputFormat, WindowArgs};
use crate::error::CliError;

const SCHEMA_VERSION: &str = "v1.0.0";

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub source_chain: Vec<FeedId>,
}

impl CommandResult {
    pub fn ok(data: Value, source_chain: Vec<FeedId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            source_chain,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let input = cli.input.as_deref();

    let command_result = match &cli.command {
        Command::Classify(args) => classify::run(args, input)?,
        Command::History(args) => history::run(args, &open_feed(input)?)?,
        Command::Normalize(args) => normalize::run(args, &open_feed(input)?)?,
        Command::Spans(args) => spans::run(args, &open_feed(input)?)?,
        Command::Assess => assess::run(&open_feed(input)?)?,
        Command::Thresholds => thresholds::run()?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        source_chain,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        source_chain,
        latency_ms,
    )?;

    if cli.stream && cli.format != OutputFormat::Json {
        meta.push_warning("--format is ignored while --stream is set");
    }

    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

/// Loads the snapshot feed named by `--input`; `-` reads stdin.
pub fn open_feed(input: Option<&Path>) -> Result<StaticFeed, CliError> {
    let Some(path) = input else {
        return Err(CliError::Command(
            "no snapshot input; pass --input <PATH|-> or set LIQSIG_INPUT".to_owned(),
        ));
    };

    let feed = if path == Path::new("-") {
        StaticFeed::from_json_reader(FeedId::Stdin, io::stdin().lock())?
    } else {
        StaticFeed::from_path(path)?
    };
    debug!(feed = feed.id().as_str(), snapshots = feed.len(), "feed opened");
    Ok(feed)
}

/// Builds the history request described by the window flags.
pub fn history_request(window: &WindowArgs) -> Result<HistoryRequest, CliError> {
    let mut request = match (window.days, window.since.as_deref()) {
        (Some(days), _) => HistoryRequest::days(days)?,
        (None, Some(since)) => HistoryRequest::since(UtcDateTime::parse(since)?),
        (None, None) => HistoryRequest::all(),
    };

    if let Some(as_of) = window.as_of.as_deref() {
        request = request.with_as_of(UtcDateTime::parse(as_of)?);
    }

    Ok(request)
}
