use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{format_description, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

/// Layout of an ISO timestamp without offset, read as UTC.
const NAIVE_LAYOUT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]";

/// RFC3339 observation instant guaranteed to be UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parses an RFC3339 UTC instant (`Z` or `+00:00`).
    ///
    /// A timestamp with no offset at all is taken as UTC. Any other offset is
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let not_utc = || ValidationError::TimestampNotUtc {
            value: input.to_owned(),
        };

        match OffsetDateTime::parse(input, &Rfc3339) {
            Ok(parsed) => Self::from_offset_datetime(parsed).map_err(|_| not_utc()),
            Err(_) => parse_naive(input).map(Self).ok_or_else(not_utc),
        }
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, ValidationError> {
        if value.offset() != UtcOffset::UTC {
            return Err(ValidationError::TimestampNotUtc {
                value: value
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| String::from("<unformattable>")),
            });
        }

        Ok(Self(value))
    }

    /// Start of a `days`-long lookback window ending at `self`.
    ///
    /// Saturates at the earliest representable instant instead of failing.
    pub fn days_before(self, days: u32) -> Self {
        let floor = OffsetDateTime::new_utc(time::Date::MIN, time::Time::MIDNIGHT);
        Self(
            self.0
                .checked_sub(Duration::days(i64::from(days)))
                .unwrap_or(floor),
        )
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

fn parse_naive(input: &str) -> Option<OffsetDateTime> {
    let layout = format_description::parse(NAIVE_LAYOUT).ok()?;
    PrimitiveDateTime::parse(input, &layout)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
