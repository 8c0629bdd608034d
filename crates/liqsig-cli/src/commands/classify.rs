use std::path::Path;

use liqsig_core::{
    classify, ClassificationResult, FeedId, IndicatorSnapshot, LiquidityFeed, UtcDateTime,
};
use serde::Serialize;

use crate::cli::ClassifyArgs;
use crate::error::CliError;

use super::{open_feed, CommandResult};

#[derive(Debug, Serialize)]
struct ClassifyResponseData {
    snapshot: IndicatorSnapshot,
    classification: ClassificationResult,
}

pub fn run(args: &ClassifyArgs, input: Option<&Path>) -> Result<CommandResult, CliError> {
    let (snapshot, source) = match inline_snapshot(args)? {
        Some(snapshot) => (snapshot, FeedId::Inline),
        None => {
            let feed = open_feed(input)?;
            (feed.latest()?, feed.id())
        }
    };

    let classification = classify(&snapshot)?;
    let data = serde_json::to_value(ClassifyResponseData {
        snapshot,
        classification,
    })?;

    Ok(CommandResult::ok(data, vec![source]))
}

/// Snapshot given through the indicator flags. Either all four are set or none.
fn inline_snapshot(args: &ClassifyArgs) -> Result<Option<IndicatorSnapshot>, CliError> {
    match (args.fed, args.m2, args.manufacturing, args.tga_rrp) {
        (None, None, None, None) => {
            if args.timestamp.is_some() {
                return Err(CliError::Command(
                    "--timestamp only applies to an inline snapshot".to_owned(),
                ));
            }
            Ok(None)
        }
        (Some(fed), Some(m2), Some(manufacturing), Some(tga_rrp)) => {
            let timestamp = match args.timestamp.as_deref() {
                Some(value) => UtcDateTime::parse(value)?,
                None => UtcDateTime::now(),
            };
            Ok(Some(IndicatorSnapshot::new(
                timestamp,
                fed,
                m2,
                manufacturing,
                tga_rrp,
            )?))
        }
        _ => Err(CliError::Command(
            "inline classification needs --fed, --m2, --manufacturing and --tga-rrp".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    fn inline(fed: f64, m2: f64, mfg: f64, tga: f64) -> ClassifyArgs {
        ClassifyArgs {
            fed: Some(fed),
            m2: Some(m2),
            manufacturing: Some(mfg),
            tga_rrp: Some(tga),
            timestamp: Some("2024-03-01T00:00:00Z".to_owned()),
        }
    }

    #[test]
    fn classifies_inline_snapshot_without_feed() {
        let result = run(&inline(8.0, 7.0, 1.0, -20.0), None).expect("classify");
        assert_eq!(result.source_chain, vec![FeedId::Inline]);
        assert_eq!(
            result.data.pointer("/classification/phase"),
            Some(&serde_json::json!("PHASE-3-FULL-RISK-ON"))
        );
        assert_eq!(
            result.data.pointer("/classification/signal"),
            Some(&serde_json::json!("RISK-ON"))
        );
    }

    #[test]
    fn classifies_latest_snapshot_of_feed() {
        let file = test_support::feed_file();
        let args = ClassifyArgs {
            fed: None,
            m2: None,
            manufacturing: None,
            tga_rrp: None,
            timestamp: None,
        };
        let result = run(&args, Some(file.path())).expect("classify");
        assert_eq!(result.source_chain, vec![FeedId::File]);
        assert_eq!(
            result.data.pointer("/classification/headline"),
            Some(&serde_json::json!("EARLY RISK-ON"))
        );
        assert_eq!(
            result.data.pointer("/snapshot/timestamp"),
            Some(&serde_json::json!("2024-01-25T00:00:00Z"))
        );
    }

    #[test]
    fn partial_inline_flags_are_rejected() {
        let mut args = inline(1.0, 1.0, 1.0, 1.0);
        args.tga_rrp = None;
        let err = run(&args, None).expect_err("must fail");
        assert!(matches!(err, CliError::Command(_)));
    }

    #[test]
    fn non_finite_inline_value_is_a_validation_error() {
        let err = run(&inline(f64::NAN, 1.0, 1.0, 1.0), None).expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
    }
}
