use std::{ops::Deref, str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub static TRACKING_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^MC_[0-9]+_[a-z0-9]{9}$").unwrap());

/// Opaque correlation token embedded in the primary email and returned to the
/// caller.
///
/// Format: `MC_<epoch millis>_<9 chars of [a-z0-9]>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingId(String);

impl TrackingId {
    pub const PREFIX: &'static str = "MC";
    pub const SUFFIX_LENGTH: usize = 9;
    pub const SUFFIX_ALPHABET: &'static [u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    /// Builds a tracking id from its parts.
    ///
    /// The suffix must consist of [`Self::SUFFIX_LENGTH`] characters of
    /// [`Self::SUFFIX_ALPHABET`].
    pub fn new(timestamp: DateTime<Utc>, suffix: &str) -> Result<Self, InvalidTrackingId> {
        format!(
            "{}_{}_{suffix}",
            Self::PREFIX,
            timestamp.timestamp_millis()
        )
        .parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid tracking id: {0:?}")]
pub struct InvalidTrackingId(pub String);

impl FromStr for TrackingId {
    type Err = InvalidTrackingId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if TRACKING_ID_REGEX.is_match(s) {
            Ok(Self(s.into()))
        } else {
            Err(InvalidTrackingId(s.into()))
        }
    }
}

impl TryFrom<String> for TrackingId {
    type Error = InvalidTrackingId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if TRACKING_ID_REGEX.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidTrackingId(value))
        }
    }
}

impl From<TrackingId> for String {
    fn from(value: TrackingId) -> Self {
        value.0
    }
}

impl Deref for TrackingId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new() {
        let timestamp = Utc.timestamp_millis_opt(1760904300123).unwrap();
        let id = TrackingId::new(timestamp, "k3j9x0abc").unwrap();
        assert_eq!(id.as_str(), "MC_1760904300123_k3j9x0abc");
    }

    #[test]
    fn invalid() {
        let timestamp = Utc.timestamp_millis_opt(1760904300123).unwrap();
        for suffix in ["short", "k3j9x0abcd", "K3J9X0ABC", "k3j9-0abc"] {
            assert!(TrackingId::new(timestamp, suffix).is_err(), "{suffix}");
        }
        assert!("XX_1_abcdefghi".parse::<TrackingId>().is_err());
        assert!("MC__abcdefghi".parse::<TrackingId>().is_err());
    }

    #[test]
    fn serde() {
        let id = "MC_1_abcdefghi".parse::<TrackingId>().unwrap();
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            serde_json::json!("MC_1_abcdefghi")
        );
        assert!(serde_json::from_value::<TrackingId>(serde_json::json!("nope")).is_err());
    }
}
