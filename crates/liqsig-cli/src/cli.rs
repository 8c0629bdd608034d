//! CLI argument definitions for liqsig.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `classify` | Classify the latest snapshot, or one given inline |
//! | `history` | Classify every snapshot in a window |
//! | `normalize` | Chart-ready series (raw, zscore, percent-from-start) |
//! | `spans` | Contiguous signal regimes |
//! | `assess` | Per-indicator reading of the latest snapshot |
//! | `thresholds` | Print the canonical threshold table |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--stream` | `false` | Enable NDJSON event streaming |
//! | `--input` | `$LIQSIG_INPUT` | Snapshot file, `-` for stdin |
//! | `--log-level` | `$LIQSIG_LOG` | Tracing filter directive |
//! | `--log-format` | `text` | Log line format on stderr |
//!
//! # Examples
//!
//! ```bash
//! liqsig --input snapshots.json classify
//! liqsig classify --fed 2.1 --m2 7.4 --manufacturing 0.3 --tga-rrp -41
//! liqsig --input - normalize --mode zscore --days 365 < snapshots.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Liquidity regime classifier for macro indicator snapshots.
#[derive(Debug, Parser)]
#[command(
    name = "liqsig",
    author,
    version,
    about = "Liquidity regime classifier",
    long_about = "liqsig classifies macro liquidity snapshots (Fed balance sheet, M2, \
manufacturing production, TGA+RRP) into RISK-ON / TIGHT / NEUTRAL regimes and derives \
chart-ready normalized series.\n\
\n\
Use 'liqsig <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Emit NDJSON start/progress/chunk/error/end events.
    #[arg(long, global = true, default_value_t = false)]
    pub stream: bool,

    /// Snapshot document (JSON array or {"snapshots": [...]}); `-` reads stdin.
    #[arg(long, global = true, env = "LIQSIG_INPUT")]
    pub input: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `liqsig_core=trace`. Falls back to RUST_LOG.
    #[arg(long, global = true, env = "LIQSIG_LOG")]
    pub log_level: Option<String>,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text summary for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the latest snapshot of the feed.
    ///
    /// Passing all four indicator flags classifies that snapshot instead and
    /// needs no input feed.
    ///
    /// # Examples
    ///
    ///   liqsig --input snapshots.json classify
    ///   liqsig classify --fed -5 --m2 -1 --manufacturing -4 --tga-rrp 30
    Classify(ClassifyArgs),

    /// Classify each snapshot inside a window.
    History(HistoryArgs),

    /// Normalize a window of snapshots for charting.
    Normalize(NormalizeArgs),

    /// Group a window into contiguous signal regimes.
    Spans(WindowArgs),

    /// Per-indicator assessment of the latest snapshot.
    Assess,

    /// Print the threshold table in effect.
    Thresholds,
}

/// Arguments for the `classify` command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Fed balance sheet YoY %.
    #[arg(long, allow_negative_numbers = true)]
    pub fed: Option<f64>,

    /// M2 money supply YoY %.
    #[arg(long, allow_negative_numbers = true)]
    pub m2: Option<f64>,

    /// Manufacturing production YoY %.
    #[arg(long, allow_negative_numbers = true)]
    pub manufacturing: Option<f64>,

    /// TGA + RRP four-week change, $B.
    #[arg(long = "tga-rrp", allow_negative_numbers = true)]
    pub tga_rrp: Option<f64>,

    /// Observation time of the inline snapshot (RFC3339 UTC). Defaults to now.
    #[arg(long)]
    pub timestamp: Option<String>,
}

/// History window shared by series commands.
#[derive(Debug, Clone, Default, Args)]
pub struct WindowArgs {
    /// Keep the last N days before the window end.
    #[arg(long, conflicts_with = "since")]
    pub days: Option<u32>,

    /// Keep snapshots at or after this instant (RFC3339 UTC).
    #[arg(long)]
    pub since: Option<String>,

    /// Window end (RFC3339 UTC). Defaults to the latest snapshot.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Only keep points with this signal (RISK-ON, TIGHT, NEUTRAL).
    #[arg(long)]
    pub signal: Option<String>,
}

/// Arguments for the `normalize` command.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Normalization mode.
    ///
    /// - raw: indicators as-is, BTC/SPX rebased to % from start
    /// - zscore: standard scores, TGA+RRP omitted
    /// - percent-from-start: BTC/SPX only
    #[arg(long, default_value = "raw")]
    pub mode: String,

    #[command(flatten)]
    pub window: WindowArgs,
}
