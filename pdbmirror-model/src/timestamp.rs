//! The `<seconds>.<nanoseconds>` timestamp PeeringDB puts in `meta.generated`.
//!
//! The value is two base-10 integers joined by a single `.`. It is not a
//! decimal fraction: `"5.5"` is five seconds and five nanoseconds. The field
//! may arrive as a JSON string or as a bare JSON number; both are accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// A point in time decoded from `<secs>.<nanos>` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTime(DateTime<Utc>);

/// Errors produced while decoding a [`UnixTime`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("malformed time entry {input:?}: expected exactly one '.'")]
    Separator { input: String },

    #[error("malformed time entry {input:?}: {source}")]
    Component {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("time entry {input:?} is out of range")]
    OutOfRange { input: String },

    #[error("time entry must be a string or number, got {0}")]
    NotText(String),
}

impl UnixTime {
    /// Builds a timestamp from whole seconds and nanoseconds.
    ///
    /// Nanoseconds outside `0..1_000_000_000` carry into the seconds.
    /// Returns `None` when the result is not representable.
    pub fn from_parts(secs: i64, nanos: i64) -> Option<Self> {
        let secs = secs.checked_add(nanos.div_euclid(NANOS_PER_SEC))?;
        let nanos = nanos.rem_euclid(NANOS_PER_SEC) as u32;
        DateTime::from_timestamp(secs, nanos).map(Self)
    }

    /// The Unix epoch.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::default())
    }

    /// Decodes a `generated` value given as a JSON string or number.
    ///
    /// Numbers are split on their literal wire text, never through a float.
    pub fn from_json(raw: &RawValue) -> Result<Self, TimestampError> {
        let text = raw.get().trim();
        if text.starts_with('"') {
            let s: String = serde_json::from_str(text)
                .map_err(|_| TimestampError::NotText(text.to_string()))?;
            return s.parse();
        }
        if text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            return text.parse();
        }
        Err(TimestampError::NotText(text.to_string()))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds since the epoch.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn subsec_nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }
}

impl From<DateTime<Utc>> for UnixTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<UnixTime> for DateTime<Utc> {
    fn from(t: UnixTime) -> Self {
        t.0
    }
}

impl FromStr for UnixTime {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (secs, nanos) = match s.split_once('.') {
            Some((secs, nanos)) if !nanos.contains('.') => (secs, nanos),
            _ => {
                return Err(TimestampError::Separator {
                    input: s.to_string(),
                });
            }
        };

        let component = |part: &str| {
            part.parse::<i64>().map_err(|source| TimestampError::Component {
                input: s.to_string(),
                source,
            })
        };
        let secs = component(secs)?;
        let nanos = component(nanos)?;

        Self::from_parts(secs, nanos).ok_or_else(|| TimestampError::OutOfRange {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.timestamp(), self.subsec_nanos())
    }
}

impl Serialize for UnixTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnixTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Self::from_json(&raw).map_err(serde::de::Error::custom)
    }
}
