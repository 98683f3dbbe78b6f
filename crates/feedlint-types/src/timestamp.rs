//! Dual-representation timestamps.
//!
//! Feed versions before 3.0 publish POSIX integers, 3.0+ publishes RFC3339
//! strings. Both appear in the wild regardless of the declared version, so
//! the decoder accepts either and remembers which form it saw; re-encoding
//! preserves the original representation.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A feed timestamp, RFC3339 or POSIX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub time: DateTime<Utc>,
    /// True when the wire form was a POSIX integer.
    pub is_posix: bool,
}

impl Timestamp {
    pub fn from_posix(seconds: i64) -> Option<Self> {
        Utc.timestamp_opt(seconds, 0).single().map(|time| Self {
            time,
            is_posix: true,
        })
    }

    pub fn posix_seconds(&self) -> i64 {
        self.time.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self {
            time: Utc.timestamp_opt(0, 0).single().expect("epoch is valid"),
            is_posix: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Posix(i64),
    Fractional(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match WireTimestamp::deserialize(deserializer)? {
            WireTimestamp::Posix(seconds) => Timestamp::from_posix(seconds)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}"))),
            WireTimestamp::Fractional(seconds) => Timestamp::from_posix(seconds as i64)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}"))),
            WireTimestamp::Text(text) => {
                let parsed = DateTime::parse_from_rfc3339(&text)
                    .map_err(|e| D::Error::custom(format!("invalid rfc3339 timestamp: {e}")))?;
                Ok(Timestamp {
                    time: parsed.with_timezone(&Utc),
                    is_posix: false,
                })
            }
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_posix {
            serializer.serialize_i64(self.posix_seconds())
        } else {
            serializer.serialize_str(&self.time.to_rfc3339_opts(SecondsFormat::Secs, true))
        }
    }
}
