use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// One time-stamped observation of the four liquidity indicators.
///
/// Primary fields are year-over-year percentages, except
/// `tga_rrp_four_week_change` which is a signed amount in billions
/// (negative = net injection, positive = net drain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct IndicatorSnapshot {
    pub timestamp: UtcDateTime,
    pub fed_yoy: f64,
    pub m2_yoy: f64,
    pub manufacturing_yoy: f64,
    pub tga_rrp_four_week_change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btc_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spx_index: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn new(
        timestamp: UtcDateTime,
        fed_yoy: f64,
        m2_yoy: f64,
        manufacturing_yoy: f64,
        tga_rrp_four_week_change: f64,
    ) -> Result<Self, ValidationError> {
        let snapshot = Self {
            timestamp,
            fed_yoy,
            m2_yoy,
            manufacturing_yoy,
            tga_rrp_four_week_change,
            btc_index: None,
            spx_index: None,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Attaches a bitcoin price level. Auxiliary levels are not validated;
    /// non-finite levels are handled by the normalizer.
    pub fn with_btc_index(mut self, level: f64) -> Self {
        self.btc_index = Some(level);
        self
    }

    pub fn with_spx_index(mut self, level: f64) -> Self {
        self.spx_index = Some(level);
        self
    }

    /// Checks that every primary field is finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_finite("fed_yoy", self.fed_yoy)?;
        validate_finite("m2_yoy", self.m2_yoy)?;
        validate_finite("manufacturing_yoy", self.manufacturing_yoy)?;
        validate_finite("tga_rrp_four_week_change", self.tga_rrp_four_week_change)?;
        Ok(())
    }
}

/// Validates every snapshot and checks that timestamps never go backwards.
pub fn validate_series(series: &[IndicatorSnapshot]) -> Result<(), ValidationError> {
    for (index, snapshot) in series.iter().enumerate() {
        snapshot.validate().map_err(|error| error.at_index(index))?;
    }

    if let Some(index) = series
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(ValidationError::NonMonotonicTimestamp { index: index + 1 });
    }

    Ok(())
}

pub fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

/// Wire shape accepted from feeds before validation.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(alias = "date")]
    timestamp: UtcDateTime,
    fed_yoy: f64,
    m2_yoy: f64,
    manufacturing_yoy: f64,
    #[serde(alias = "tga_rrp_4wk_change")]
    tga_rrp_four_week_change: f64,
    #[serde(default)]
    btc_index: Option<f64>,
    #[serde(default)]
    spx_index: Option<f64>,
}

impl TryFrom<RawSnapshot> for IndicatorSnapshot {
    type Error = ValidationError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        let mut snapshot = Self::new(
            raw.timestamp,
            raw.fed_yoy,
            raw.m2_yoy,
            raw.manufacturing_yoy,
            raw.tga_rrp_four_week_change,
        )?;
        snapshot.btc_index = raw.btc_index;
        snapshot.spx_index = raw.spx_index;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> UtcDateTime {
        UtcDateTime::parse(value).expect("valid timestamp")
    }

    #[test]
    fn rejects_each_non_finite_primary_field() {
        let at = ts("2024-01-04T00:00:00Z");
        let cases = [
            (f64::NAN, 1.0, 1.0, 1.0, "fed_yoy"),
            (1.0, f64::INFINITY, 1.0, 1.0, "m2_yoy"),
            (1.0, 1.0, f64::NEG_INFINITY, 1.0, "manufacturing_yoy"),
            (1.0, 1.0, 1.0, f64::NAN, "tga_rrp_four_week_change"),
        ];

        for (fed, m2, mfg, tga, field) in cases {
            let err = IndicatorSnapshot::new(at, fed, m2, mfg, tga).expect_err("must fail");
            assert_eq!(err, ValidationError::NonFiniteValue { field });
        }
    }

    #[test]
    fn accepts_non_finite_auxiliary_levels() {
        let snapshot = IndicatorSnapshot::new(ts("2024-01-04T00:00:00Z"), 1.0, 2.0, 3.0, -4.0)
            .expect("valid")
            .with_btc_index(f64::NAN);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn deserializes_original_field_aliases() {
        let snapshot: IndicatorSnapshot = serde_json::from_str(
            r#"{"date":"2024-01-04T00:00:00Z","fed_yoy":-1.5,"m2_yoy":3.2,
                "manufacturing_yoy":0.4,"tga_rrp_4wk_change":-12.0,"btc_index":42000.0}"#,
        )
        .expect("must deserialize");

        assert_eq!(snapshot.tga_rrp_four_week_change, -12.0);
        assert_eq!(snapshot.btc_index, Some(42000.0));
        assert_eq!(snapshot.spx_index, None);
    }

    #[test]
    fn rejects_missing_primary_field() {
        let result = serde_json::from_str::<IndicatorSnapshot>(
            r#"{"timestamp":"2024-01-04T00:00:00Z","fed_yoy":1.0,"m2_yoy":1.0,
                "tga_rrp_four_week_change":1.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_series_that_goes_backwards() {
        let later = IndicatorSnapshot::new(ts("2024-01-11T00:00:00Z"), 1.0, 1.0, 1.0, 1.0)
            .expect("valid");
        let earlier = IndicatorSnapshot::new(ts("2024-01-04T00:00:00Z"), 1.0, 1.0, 1.0, 1.0)
            .expect("valid");

        let err = validate_series(&[later.clone(), earlier]).expect_err("must fail");
        assert_eq!(err, ValidationError::NonMonotonicTimestamp { index: 1 });

        assert!(validate_series(&[later.clone(), later]).is_ok());
    }

    #[test]
    fn series_error_names_offending_index() {
        let good = IndicatorSnapshot::new(ts("2024-01-04T00:00:00Z"), 1.0, 1.0, 1.0, 1.0)
            .expect("valid");
        let mut bad = good.clone();
        bad.m2_yoy = f64::NAN;

        let err = validate_series(&[good, bad]).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSnapshot { index: 1, .. }));
    }
}
