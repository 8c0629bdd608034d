//! Chart-ready transforms of a historical snapshot series.
//!
//! | Mode | Primary indicators | TGA+RRP | BTC / SPX |
//! |------|--------------------|---------|-----------|
//! | `raw` | pass-through % | pass-through $B | % from start |
//! | `zscore` | z-score | absent | z-score |
//! | `percent-from-start` | absent | absent | % from start |
//!
//! Output always has one point per input snapshot, in input order. Rebasing
//! failures are reported per column and never abort the other columns.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats::{self, BaselineError};
use crate::{validate_series, DataQualityError, IndicatorSnapshot, UtcDateTime, ValidationError};

/// Suggested z-score axis. Computed values are never clamped to it.
pub const ZSCORE_DISPLAY_DOMAIN: (f64, f64) = (-3.0, 3.0);

/// Requested representation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalizeMode {
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "zscore")]
    ZScore,
    #[serde(rename = "percent-from-start")]
    PercentFromStart,
}

impl NormalizeMode {
    pub const ALL: [Self; 3] = [Self::Raw, Self::ZScore, Self::PercentFromStart];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::ZScore => "zscore",
            Self::PercentFromStart => "percent-from-start",
        }
    }

    /// Columns this mode emits.
    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::Raw => &Column::ALL,
            Self::ZScore => &[
                Column::FedYoy,
                Column::M2Yoy,
                Column::ManufacturingYoy,
                Column::BtcIndex,
                Column::SpxIndex,
            ],
            Self::PercentFromStart => &[Column::BtcIndex, Column::SpxIndex],
        }
    }

    const fn transform(self, column: Column) -> Transform {
        match (self, column.is_price_level()) {
            (Self::ZScore, _) => Transform::ZScore,
            (Self::Raw, false) => Transform::PassThrough,
            (Self::Raw, true) | (Self::PercentFromStart, _) => Transform::Rebase,
        }
    }
}

impl Display for NormalizeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizeMode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "zscore" | "z-score" => Ok(Self::ZScore),
            "percent-from-start" | "pct" => Ok(Self::PercentFromStart),
            other => Err(ValidationError::InvalidMode {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    PassThrough,
    ZScore,
    Rebase,
}

/// Series column of an [`IndicatorSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    FedYoy,
    M2Yoy,
    ManufacturingYoy,
    TgaRrpFourWeekChange,
    BtcIndex,
    SpxIndex,
}

impl Column {
    pub const ALL: [Self; 6] = [
        Self::FedYoy,
        Self::M2Yoy,
        Self::ManufacturingYoy,
        Self::TgaRrpFourWeekChange,
        Self::BtcIndex,
        Self::SpxIndex,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FedYoy => "fed_yoy",
            Self::M2Yoy => "m2_yoy",
            Self::ManufacturingYoy => "manufacturing_yoy",
            Self::TgaRrpFourWeekChange => "tga_rrp_four_week_change",
            Self::BtcIndex => "btc_index",
            Self::SpxIndex => "spx_index",
        }
    }

    /// Absolute index levels rather than year-over-year rates.
    pub const fn is_price_level(self) -> bool {
        matches!(self, Self::BtcIndex | Self::SpxIndex)
    }

    fn read(self, snapshot: &IndicatorSnapshot) -> Option<f64> {
        match self {
            Self::FedYoy => Some(snapshot.fed_yoy),
            Self::M2Yoy => Some(snapshot.m2_yoy),
            Self::ManufacturingYoy => Some(snapshot.manufacturing_yoy),
            Self::TgaRrpFourWeekChange => Some(snapshot.tga_rrp_four_week_change),
            Self::BtcIndex => snapshot.btc_index,
            Self::SpxIndex => snapshot.spx_index,
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row keyed by observation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub date: UtcDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fed_yoy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m2_yoy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_yoy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tga_rrp_four_week_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spx_index: Option<f64>,
}

impl NormalizedPoint {
    fn empty(date: UtcDateTime) -> Self {
        Self {
            date,
            fed_yoy: None,
            m2_yoy: None,
            manufacturing_yoy: None,
            tga_rrp_four_week_change: None,
            btc_index: None,
            spx_index: None,
        }
    }

    pub fn value(&self, column: Column) -> Option<f64> {
        *self.slot(column)
    }

    fn slot(&self, column: Column) -> &Option<f64> {
        match column {
            Column::FedYoy => &self.fed_yoy,
            Column::M2Yoy => &self.m2_yoy,
            Column::ManufacturingYoy => &self.manufacturing_yoy,
            Column::TgaRrpFourWeekChange => &self.tga_rrp_four_week_change,
            Column::BtcIndex => &self.btc_index,
            Column::SpxIndex => &self.spx_index,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<f64> {
        match column {
            Column::FedYoy => &mut self.fed_yoy,
            Column::M2Yoy => &mut self.m2_yoy,
            Column::ManufacturingYoy => &mut self.manufacturing_yoy,
            Column::TgaRrpFourWeekChange => &mut self.tga_rrp_four_week_change,
            Column::BtcIndex => &mut self.btc_index,
            Column::SpxIndex => &mut self.spx_index,
        }
    }
}

/// Normalized view of a series plus the columns that could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    pub mode: NormalizeMode,
    pub points: Vec<NormalizedPoint>,
    #[serde(skip)]
    pub issues: Vec<DataQualityError>,
    /// Optional columns no snapshot carried. Rendered as absent, not an issue.
    #[serde(skip)]
    pub absent_columns: Vec<Column>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values of one column across the series.
    pub fn column(&self, column: Column) -> Vec<Option<f64>> {
        self.points.iter().map(|point| point.value(column)).collect()
    }

    /// Suggested axis domain for rendering, if the mode has one.
    pub fn display_domain(&self) -> Option<(f64, f64)> {
        match self.mode {
            NormalizeMode::ZScore => Some(ZSCORE_DISPLAY_DOMAIN),
            NormalizeMode::Raw | NormalizeMode::PercentFromStart => None,
        }
    }
}

/// Derives the requested representation of `series`.
///
/// Fails only on invalid input (non-finite primary field or timestamps going
/// backwards). An empty series yields an empty result.
pub fn normalize(
    series: &[IndicatorSnapshot],
    mode: NormalizeMode,
) -> Result<NormalizedSeries, ValidationError> {
    validate_series(series)?;

    let mut points: Vec<NormalizedPoint> = series
        .iter()
        .map(|snapshot| NormalizedPoint::empty(snapshot.timestamp))
        .collect();
    let mut issues = Vec::new();
    let mut absent_columns = Vec::new();

    if series.is_empty() {
        return Ok(NormalizedSeries {
            mode,
            points,
            issues,
            absent_columns,
        });
    }

    for &column in mode.columns() {
        let source: Vec<Option<f64>> = series.iter().map(|s| column.read(s)).collect();
        if source.iter().all(Option::is_none) {
            debug!(column = column.as_str(), mode = mode.as_str(), "column absent");
            absent_columns.push(column);
            continue;
        }

        let values = match mode.transform(column) {
            Transform::PassThrough => source,
            Transform::ZScore => stats::z_scores(&source),
            Transform::Rebase => match stats::percent_from_start(&source) {
                Ok(values) => values,
                Err(reason) => {
                    let issue = match reason {
                        BaselineError::Missing => DataQualityError::MissingBaseline { column },
                        BaselineError::Zero => DataQualityError::ZeroBaseline { column },
                        BaselineError::Overflow => DataQualityError::RebaseOverflow { column },
                    };
                    debug!(column = column.as_str(), mode = mode.as_str(), %issue, "column skipped");
                    issues.push(issue);
                    continue;
                }
            },
        };

        for (point, value) in points.iter_mut().zip(values) {
            *point.slot_mut(column) = value;
        }
    }

    Ok(NormalizedSeries {
        mode,
        points,
        issues,
        absent_columns,
    })
}
