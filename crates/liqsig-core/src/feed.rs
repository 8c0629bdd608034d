//! Snapshot feed contract.
//!
//! The classifier and normalizer never fetch data themselves; a
//! [`LiquidityFeed`] hands them already computed snapshots. [`StaticFeed`]
//! serves a validated in-memory series, optionally loaded from JSON.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{validate_series, FeedId, IndicatorSnapshot, UtcDateTime, ValidationError};

/// Feed-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    Empty,
    InvalidRequest,
    Malformed,
    Io,
}

/// Structured feed error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    kind: FeedErrorKind,
    message: String,
}

impl FeedError {
    pub fn empty(feed: FeedId) -> Self {
        Self {
            kind: FeedErrorKind::Empty,
            message: format!("feed '{feed}' has no snapshots"),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Io,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FeedErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FeedErrorKind::Empty => "feed.empty",
            FeedErrorKind::InvalidRequest => "feed.invalid_request",
            FeedErrorKind::Malformed => "feed.malformed",
            FeedErrorKind::Io => "feed.io",
        }
    }
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FeedError {}

impl From<ValidationError> for FeedError {
    fn from(error: ValidationError) -> Self {
        Self::malformed(error.to_string())
    }
}

/// Window of history to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// Every available snapshot.
    All,
    /// The last `n` days before the request's end instant.
    Days(u32),
    /// Everything from an explicit start instant.
    Since(UtcDateTime),
}

/// Request payload for historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRequest {
    pub lookback: Lookback,
    /// End of the window; defaults to the feed's latest observation.
    pub as_of: Option<UtcDateTime>,
}

impl HistoryRequest {
    pub const fn all() -> Self {
        Self {
            lookback: Lookback::All,
            as_of: None,
        }
    }

    pub fn days(days: u32) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::InvalidLookback);
        }
        Ok(Self {
            lookback: Lookback::Days(days),
            as_of: None,
        })
    }

    pub const fn since(start: UtcDateTime) -> Self {
        Self {
            lookback: Lookback::Since(start),
            as_of: None,
        }
    }

    pub const fn with_as_of(mut self, as_of: UtcDateTime) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Inclusive `[start, end]` bounds, given the latest available instant.
    pub fn bounds(&self, latest: UtcDateTime) -> (Option<UtcDateTime>, UtcDateTime) {
        let end = self.as_of.unwrap_or(latest);
        let start = match self.lookback {
            Lookback::All => None,
            Lookback::Days(days) => Some(end.days_before(days)),
            Lookback::Since(start) => Some(start),
        };
        (start, end)
    }
}

/// Source of liquidity snapshots.
pub trait LiquidityFeed: Send + Sync {
    fn id(&self) -> FeedId;
    /// Most recent snapshot.
    fn latest(&self) -> Result<IndicatorSnapshot, FeedError>;
    /// Ordered snapshots inside the requested window; best effort, possibly
    /// empty.
    fn history(&self, req: &HistoryRequest) -> Result<Vec<IndicatorSnapshot>, FeedError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    List(Vec<IndicatorSnapshot>),
    Wrapped { snapshots: Vec<IndicatorSnapshot> },
}

/// Feed over a fixed, validated series.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFeed {
    id: FeedId,
    snapshots: Vec<IndicatorSnapshot>,
}

impl StaticFeed {
    pub fn new(id: FeedId, snapshots: Vec<IndicatorSnapshot>) -> Result<Self, FeedError> {
        validate_series(&snapshots)?;
        Ok(Self { id, snapshots })
    }

    /// Parses a JSON array of snapshots, or an object with a `snapshots` array.
    pub fn from_json_reader<R: Read>(id: FeedId, reader: R) -> Result<Self, FeedError> {
        let document: SnapshotDocument = serde_json::from_reader(reader)
            .map_err(|error| FeedError::malformed(format!("invalid snapshot document: {error}")))?;

        let snapshots = match document {
            SnapshotDocument::List(snapshots) | SnapshotDocument::Wrapped { snapshots } => {
                snapshots
            }
        };
        debug!(feed = id.as_str(), count = snapshots.len(), "loaded snapshots");

        Self::new(id, snapshots)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|error| FeedError::io(format!("cannot open '{}': {error}", path.display())))?;
        Self::from_json_reader(FeedId::File, BufReader::new(file))
    }

    pub fn snapshots(&self) -> &[IndicatorSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl LiquidityFeed for StaticFeed {
    fn id(&self) -> FeedId {
        self.id
    }

    fn latest(&self) -> Result<IndicatorSnapshot, FeedError> {
        self.snapshots
            .last()
            .cloned()
            .ok_or_else(|| FeedError::empty(self.id))
    }

    fn history(&self, req: &HistoryRequest) -> Result<Vec<IndicatorSnapshot>, FeedError> {
        let Some(latest) = self.snapshots.last() else {
            return Ok(Vec::new());
        };

        let (start, end) = req.bounds(latest.timestamp);
        if start.is_some_and(|start| start > end) {
            return Err(FeedError::invalid_request(format!(
                "window start is after its end ({end})"
            )));
        }

        Ok(self
            .snapshots
            .iter()
            .filter(|s| start.is_none_or(|start| s.timestamp >= start) && s.timestamp <= end)
            .cloned()
            .collect())
    }
}
