//! Common types used throughout the client
//!
//! Endpoints, time filters, bounding boxes and the query parameter map.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent with the first request of a fetch.
///
/// Ordered so that the encoded query string is deterministic.
pub type QueryParams = BTreeMap<String, String>;

// ============================================================================
// Endpoint
// ============================================================================

/// Resource collections exposed by an MDS provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `status_changes`
    StatusChanges,
    /// `trips`
    Trips,
}

impl Endpoint {
    /// Path segment and envelope key for this endpoint
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::StatusChanges => "status_changes",
            Endpoint::Trips => "trips",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "status_changes" => Ok(Endpoint::StatusChanges),
            "trips" => Ok(Endpoint::Trips),
            other => Err(Error::invalid_value(
                "endpoint",
                format!("unknown endpoint '{other}' (expected status_changes or trips)"),
            )),
        }
    }
}

// ============================================================================
// Timestamp
// ============================================================================

/// A time filter in whole Unix seconds
///
/// Datetimes are truncated to the second, as are fractional seconds.
/// `Timestamp::from(dt)` and `Timestamp::from(dt.timestamp())` always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create from Unix seconds
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Unix seconds
    pub fn as_secs(self) -> i64 {
        self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.timestamp())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        Self::from(DateTime::<Utc>::from(t))
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

impl From<i32> for Timestamp {
    fn from(secs: i32) -> Self {
        Self(i64::from(secs))
    }
}

impl From<u32> for Timestamp {
    fn from(secs: u32) -> Self {
        Self(i64::from(secs))
    }
}

impl TryFrom<f64> for Timestamp {
    type Error = Error;

    /// Truncates toward zero; NaN, infinities and values outside the
    /// `i64` range are rejected
    fn try_from(secs: f64) -> Result<Self> {
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !secs.is_finite() || secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
            return Err(Error::invalid_value(
                "timestamp",
                format!("{secs} is not representable as Unix seconds"),
            ));
        }
        Ok(Self(secs.trunc() as i64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    /// Accepts integer or fractional Unix seconds, or an RFC 3339 datetime
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(secs) = s.parse::<i64>() {
            return Ok(Self(secs));
        }
        if let Ok(secs) = s.parse::<f64>() {
            return Self::try_from(secs);
        }
        DateTime::parse_from_rfc3339(s)
            .map(Self::from)
            .map_err(|e| {
                Error::invalid_value(
                    "timestamp",
                    format!("'{s}' is neither Unix seconds nor an RFC 3339 datetime: {e}"),
                )
            })
    }
}

// ============================================================================
// Bounding Box
// ============================================================================

/// Geographic bounding box filter
///
/// Encoded as `sw_lon,sw_lat,ne_lon,ne_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southwest longitude
    pub sw_lon: f64,
    /// Southwest latitude
    pub sw_lat: f64,
    /// Northeast longitude
    pub ne_lon: f64,
    /// Northeast latitude
    pub ne_lat: f64,
}

impl BoundingBox {
    /// Create a bounding box from its southwest and northeast corners
    pub fn new(sw_lon: f64, sw_lat: f64, ne_lon: f64, ne_lat: f64) -> Self {
        Self {
            sw_lon,
            sw_lat,
            ne_lon,
            ne_lat,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.sw_lon, self.sw_lat, self.ne_lon, self.ne_lat
        )
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let coords = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        Error::invalid_value("bbox", format!("'{part}' is not a coordinate"))
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        match coords.as_slice() {
            [sw_lon, sw_lat, ne_lon, ne_lat] => Ok(Self::new(*sw_lon, *sw_lat, *ne_lon, *ne_lat)),
            _ => Err(Error::invalid_value(
                "bbox",
                format!("expected 4 comma-separated coordinates, got {}", coords.len()),
            )),
        }
    }
}
