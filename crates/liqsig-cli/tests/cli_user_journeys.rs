//! Behavior-driven tests for CLI user journeys
//!
//! These tests run the `liqsig` binary against snapshot files on disk and
//! check what a user observes: the JSON envelope on stdout and the exit code.

use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::NamedTempFile;

const EASING_FEED: &str = r#"[
    {"timestamp":"2024-01-04T00:00:00Z","fed_yoy":-8.1,"m2_yoy":-1.2,"manufacturing_yoy":-3.4,"tga_rrp_four_week_change":55.0,"btc_index":42000.0,"spx_index":4700.0},
    {"timestamp":"2024-01-11T00:00:00Z","fed_yoy":-1.5,"m2_yoy":0.4,"manufacturing_yoy":-0.2,"tga_rrp_four_week_change":-5.0,"btc_index":46000.0,"spx_index":4780.0},
    {"timestamp":"2024-01-18T00:00:00Z","fed_yoy":0.6,"m2_yoy":2.1,"manufacturing_yoy":0.4,"tga_rrp_four_week_change":-41.0,"btc_index":48000.0,"spx_index":4890.0}
]"#;

const ZERO_BTC_BASELINE_FEED: &str = r#"[
    {"timestamp":"2024-01-04T00:00:00Z","fed_yoy":-8.1,"m2_yoy":-1.2,"manufacturing_yoy":-3.4,"tga_rrp_four_week_change":55.0,"btc_index":0.0,"spx_index":4700.0},
    {"timestamp":"2024-01-11T00:00:00Z","fed_yoy":-7.9,"m2_yoy":-0.8,"manufacturing_yoy":-3.1,"tga_rrp_four_week_change":20.0,"btc_index":46000.0,"spx_index":4780.0}
]"#;

const NAIVE_TIMESTAMP_FEED: &str = r#"{"snapshots":[
    {"date":"2024-01-04T00:00:00","fed_yoy":-5.0,"m2_yoy":-1.0,"manufacturing_yoy":-4.0,"tga_rrp_4wk_change":30.0},
    {"date":"2024-01-11T00:00:00.250000","fed_yoy":1.0,"m2_yoy":7.0,"manufacturing_yoy":0.5,"tga_rrp_4wk_change":-12.0}
]}"#;

fn feed_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write feed");
    file
}

fn liqsig(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_liqsig"))
        .args(args)
        .env_remove("LIQSIG_INPUT")
        .env_remove("LIQSIG_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("liqsig should start")
}

fn envelope(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be one JSON envelope")
}

// =============================================================================
// CLI User Journey: Classification
// =============================================================================

#[test]
fn user_can_classify_the_latest_snapshot_of_a_feed_file() {
    // Given: A feed file whose latest snapshot is an early easing reading
    let file = feed_file(EASING_FEED);
    let path = file.path().to_str().expect("utf-8 path");

    // When: They classify it
    let output = liqsig(&["--input", path, "classify"]);

    // Then: The command succeeds with the classification and its provenance
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let body = envelope(&output);
    assert_eq!(body["data"]["classification"]["signal"], "RISK-ON");
    assert_eq!(body["data"]["classification"]["phase"], "EARLY-RISK-ON");
    assert_eq!(body["meta"]["source_chain"], serde_json::json!(["file"]));
    assert_eq!(body["meta"]["threshold_table"], "v1");
    assert!(body.get("errors").is_none(), "a clean run carries no errors");
}

#[test]
fn user_can_classify_an_inline_snapshot_without_any_feed() {
    // Given: No input file, only indicator flags
    // When: They classify the inline reading
    let output = liqsig(&[
        "classify",
        "--fed",
        "-5",
        "--m2",
        "-1",
        "--manufacturing",
        "-4",
        "--tga-rrp",
        "30",
    ]);

    // Then: The snapshot is classified as tight liquidity
    assert_eq!(output.status.code(), Some(0));
    let body = envelope(&output);
    assert_eq!(body["data"]["classification"]["signal"], "TIGHT");
    assert_eq!(body["meta"]["source_chain"], serde_json::json!(["inline"]));
}

#[test]
fn user_can_feed_offset_less_timestamps_from_python_backends() {
    // Given: A feed in the backend's shape with naive isoformat() dates
    let file = feed_file(NAIVE_TIMESTAMP_FEED);
    let path = file.path().to_str().expect("utf-8 path");

    // When: They classify it
    let output = liqsig(&["--input", path, "classify"]);

    // Then: The dates are read as UTC and the latest snapshot wins
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let body = envelope(&output);
    assert_eq!(body["data"]["snapshot"]["timestamp"], "2024-01-11T00:00:00.25Z");
    assert_eq!(body["data"]["classification"]["phase"], "PHASE-3-FULL-RISK-ON");
}

// =============================================================================
// CLI User Journey: Normalization
// =============================================================================

#[test]
fn user_sees_exit_code_three_when_a_column_cannot_be_rebased() {
    // Given: A feed whose bitcoin column starts at zero
    let file = feed_file(ZERO_BTC_BASELINE_FEED);
    let path = file.path().to_str().expect("utf-8 path");

    // When: They ask for raw normalization
    let output = liqsig(&["--input", path, "normalize", "--mode", "raw"]);

    // Then: The envelope still carries the points and names the bad column
    assert_eq!(output.status.code(), Some(3));
    let body = envelope(&output);
    assert_eq!(body["data"]["points"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["errors"][0]["code"], "data_quality.zero_baseline");
    assert_eq!(body["errors"][0]["column"], "btc_index");
    assert!(body["data"]["points"][1]["spx_index"]
        .as_f64()
        .is_some_and(f64::is_finite));
}

#[test]
fn user_gets_standard_scores_for_a_clean_feed() {
    // Given: A feed with every price column present
    let file = feed_file(EASING_FEED);
    let path = file.path().to_str().expect("utf-8 path");

    // When: They ask for z-scores in strict mode
    let output = liqsig(&["--strict", "--input", path, "normalize", "--mode", "zscore"]);

    // Then: Strict mode passes and TGA+RRP is left out
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let body = envelope(&output);
    assert_eq!(body["data"]["mode"], "zscore");
    assert!(body["data"]["points"][0].get("tga_rrp_four_week_change").is_none());
}

// =============================================================================
// CLI User Journey: Strict Mode and Failures
// =============================================================================

#[test]
fn strict_mode_turns_envelope_errors_into_exit_code_five() {
    // Given: The zero-baseline feed that normally exits with 3
    let file = feed_file(ZERO_BTC_BASELINE_FEED);
    let path = file.path().to_str().expect("utf-8 path");

    // When: They normalize in strict mode
    let output = liqsig(&[
        "--strict",
        "--input",
        path,
        "normalize",
        "--mode",
        "percent-from-start",
    ]);

    // Then: The envelope is still printed but the run fails strictly
    assert_eq!(output.status.code(), Some(5));
    assert!(envelope(&output)["errors"].is_array());
    assert!(String::from_utf8_lossy(&output.stderr).contains("strict mode failed"));
}

#[test]
fn strict_mode_also_rejects_warnings() {
    // Given: A feed that never carries price columns
    let file = feed_file(
        r#"[{"timestamp":"2024-01-04T00:00:00Z","fed_yoy":1.0,"m2_yoy":2.0,"manufacturing_yoy":0.0,"tga_rrp_four_week_change":-3.0}]"#,
    );
    let path = file.path().to_str().expect("utf-8 path");

    // When: They normalize with and without strict mode
    let relaxed = liqsig(&["--input", path, "normalize"]);
    let strict = liqsig(&["--strict", "--input", path, "normalize"]);

    // Then: Absent columns are warnings that only strict mode fails on
    assert_eq!(relaxed.status.code(), Some(0));
    assert_eq!(
        envelope(&relaxed)["meta"]["warnings"].as_array().map(Vec::len),
        Some(2)
    );
    assert_eq!(strict.status.code(), Some(5));
}

#[test]
fn classify_without_any_input_is_a_usage_error() {
    // Given: Neither --input, LIQSIG_INPUT nor indicator flags
    // When: They classify
    let output = liqsig(&["classify"]);

    // Then: The run fails with exit code 2 and nothing on stdout
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--input"));
}

#[test]
fn missing_feed_file_is_a_feed_failure() {
    // Given: A path that does not exist
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.json");

    // When: They classify from it
    let output = liqsig(&["--input", missing.to_str().expect("utf-8 path"), "classify"]);

    // Then: The run fails with the feed exit code
    assert_eq!(output.status.code(), Some(4));
}
