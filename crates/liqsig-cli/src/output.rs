pub mod stream_writer;

use std::io;

use liqsig_core::Envelope;
use serde_json::json;
use serde_json::Value;

use self::stream_writer::{NdjsonStreamWriter, StreamEventError};
use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            println!("{payload}");
        }
        OutputFormat::Table => {
            let stdout = io::stdout();
            write_table(&mut stdout.lock(), envelope)?;
        }
    }

    Ok(())
}

pub fn render_stream(envelope: &Envelope<Value>) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut writer = NdjsonStreamWriter::new(stdout.lock());

    writer.emit_start(Some(json!({
        "request_id": envelope.meta.request_id,
        "schema_version": envelope.meta.schema_version,
        "threshold_table": envelope.meta.threshold_table,
    })))?;

    writer.emit_progress(Some(json!({
        "phase": "command_complete",
        "warning_count": envelope.meta.warnings.len(),
        "error_count": envelope.errors.len(),
    })))?;

    writer.emit_chunk(Some(serde_json::to_value(envelope)?))?;

    for error in &envelope.errors {
        let data = error
            .column
            .as_ref()
            .map(|column| json!({ "column": column }));
        writer.emit_error(
            StreamEventError::new(error.code.clone(), error.message.clone()),
            data,
        )?;
    }

    writer.emit_end(Some(json!({
        "status": if envelope.errors.is_empty() { "ok" } else { "error" },
        "warning_count": envelope.meta.warnings.len(),
        "error_count": envelope.errors.len(),
    })))?;

    Ok(())
}

fn write_table<W: io::Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "thresholds  : {}", envelope.meta.threshold_table)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(
        out,
        "sources     : {}",
        envelope
            .meta
            .source_chain
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",")
    )?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if let Some(classification) = envelope.data.get("classification") {
        let field = |name: &str| {
            classification
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_owned()
        };
        writeln!(out, "signal      : {}", field("signal"))?;
        writeln!(out, "phase       : {}", field("headline"))?;
        writeln!(out, "rationale   : {}", field("rationale"))?;
    }

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    writeln!(out, "data:")?;
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        writeln!(out, "  {line}")?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}
