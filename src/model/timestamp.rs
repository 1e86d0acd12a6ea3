//! Publication timestamps, written the way Postgres renders a `timestamp` inside JSON:
//! `YYYY-MM-DDTHH:MM:SS` plus the microsecond fraction with trailing zeros dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Timestamp without time zone at microsecond precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublishedAt(NaiveDateTime);

impl PublishedAt {
    /// Accepts a date-time with optional fraction, the same with a `Z` or numeric
    /// offset (dropped, as a `timestamp` column does), or a bare date meaning midnight.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.naive_local()))
            .or_else(|| {
                DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z")
                    .ok()
                    .map(|d| d.naive_local())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;
        naive
            .with_nanosecond(naive.nanosecond() / 1_000 * 1_000)
            .map(PublishedAt)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for PublishedAt {
    fn from(naive: NaiveDateTime) -> Self {
        PublishedAt(naive)
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))?;
        let micros = self.0.nanosecond() / 1_000;
        if micros == 0 {
            return Ok(());
        }
        let fraction = format!("{micros:06}");
        write!(f, ".{}", fraction.trim_end_matches('0'))
    }
}

impl Serialize for PublishedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublishedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PublishedAt::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}
