//! Behavior-driven tests for snapshot feeds and the response envelope.

use std::io::Write;

use liqsig_core::{
    Envelope, EnvelopeError, EnvelopeMeta, FeedErrorKind, FeedId, HistoryRequest, LiquidityFeed,
    StaticFeed, THRESHOLD_TABLE_VERSION,
};
use liqsig_tests::{easing_cycle, jan};
use tempfile::NamedTempFile;

fn write_feed(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write feed");
    file
}

// =============================================================================
// Feed: Loading
// =============================================================================

#[test]
fn when_a_snapshot_file_is_loaded_system_accepts_legacy_field_names() {
    // Given: A file using `date` and `tga_rrp_4wk_change`
    let file = write_feed(
        r#"{"snapshots": [
            {"date":"2024-01-01T00:00:00Z","fed_yoy":-6,"m2_yoy":-2,"manufacturing_yoy":-4,"tga_rrp_4wk_change":40},
            {"date":"2024-01-08T00:00:00Z","fed_yoy":-4,"m2_yoy":-1,"manufacturing_yoy":-3,"tga_rrp_4wk_change":25,"btc_index":110}
        ]}"#,
    );

    // When: The feed is opened
    let feed = StaticFeed::from_path(file.path()).expect("valid feed");

    // Then: Both snapshots are available under canonical names
    assert_eq!(feed.id(), FeedId::File);
    assert_eq!(feed.len(), 2);
    let latest = feed.latest().expect("latest");
    assert_eq!(latest.tga_rrp_four_week_change, 25.0);
    assert_eq!(latest.btc_index, Some(110.0));
}

#[test]
fn when_a_snapshot_uses_an_offset_timestamp_system_rejects_the_file() {
    // Given: A timestamp that is not UTC
    let file = write_feed(
        r#"[{"timestamp":"2024-01-01T00:00:00+01:00","fed_yoy":1,"m2_yoy":1,"manufacturing_yoy":1,"tga_rrp_four_week_change":1}]"#,
    );

    // When/Then: Loading fails as malformed
    let err = StaticFeed::from_path(file.path()).expect_err("must fail");
    assert_eq!(err.kind(), FeedErrorKind::Malformed);
}

#[test]
fn when_the_file_does_not_exist_system_reports_io() {
    let err = StaticFeed::from_path("/nonexistent/snapshots.json").expect_err("must fail");
    assert_eq!(err.kind(), FeedErrorKind::Io);
    assert_eq!(err.code(), "feed.io");
}

// =============================================================================
// Feed: Windows
// =============================================================================

#[test]
fn when_history_is_requested_by_days_system_counts_back_from_the_latest_point() {
    // Given: A five-week cycle
    let feed = StaticFeed::new(FeedId::Memory, easing_cycle()).expect("feed");

    // When: The last 14 days are requested
    let history = feed
        .history(&HistoryRequest::days(14).expect("valid lookback"))
        .expect("history");

    // Then: The window is inclusive on both ends
    let dates: Vec<_> = history.iter().map(|s| s.timestamp).collect();
    assert_eq!(dates, vec![jan(15), jan(22), jan(29)]);
}

#[test]
fn when_history_is_requested_since_a_date_system_keeps_later_points() {
    let feed = StaticFeed::new(FeedId::Memory, easing_cycle()).expect("feed");

    let history = feed
        .history(&HistoryRequest::since(jan(20)).with_as_of(jan(25)))
        .expect("history");

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].timestamp, jan(22));
}

#[test]
fn when_the_window_misses_every_point_system_returns_an_empty_history() {
    let feed = StaticFeed::new(FeedId::Memory, easing_cycle()).expect("feed");

    let history = feed
        .history(&HistoryRequest::days(3).expect("valid").with_as_of(jan(6)))
        .expect("empty history is not an error");

    assert!(history.is_empty());
}

// =============================================================================
// Envelope
// =============================================================================

#[test]
fn when_an_envelope_is_built_system_stamps_the_threshold_version() {
    // Given: Metadata for a file-backed command
    let meta = EnvelopeMeta::new("request-0001", "v1.0.0", vec![FeedId::File], 3)
        .expect("valid meta");
    let error = EnvelopeError::new("data_quality.zero_baseline", "spx starts at zero")
        .expect("valid error");

    // When: The envelope is serialized
    let envelope = Envelope::with_errors(meta, serde_json::json!({"points": []}), vec![error])
        .expect("valid envelope");
    let json = serde_json::to_value(&envelope).expect("serialize");

    // Then: Meta carries the table version and feed ids
    assert_eq!(json["meta"]["threshold_table"], THRESHOLD_TABLE_VERSION);
    assert_eq!(json["meta"]["source_chain"], serde_json::json!(["file"]));
    assert_eq!(json["errors"][0]["code"], "data_quality.zero_baseline");
}
