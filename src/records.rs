//! Typed record shapes for the provider endpoints
//!
//! Every field is optional so that providers on different MDS versions
//! still decode. Fields this crate does not know about are kept in `extra`.

use crate::error::{Error, Result};
use crate::types::{Endpoint, JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type served by one endpoint
pub trait Record: DeserializeOwned + Serialize + Send + 'static {
    /// Endpoint serving this record type
    const ENDPOINT: Endpoint;

    /// Decode raw records fetched from `source`, keeping their order
    fn from_values(source: &str, values: Vec<JsonValue>) -> Result<Vec<Self>> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                serde_json::from_value(value).map_err(|e| {
                    Error::malformed(
                        source,
                        format!("record {i} is not a valid {}: {e}", Self::ENDPOINT),
                    )
                })
            })
            .collect()
    }
}

/// A vehicle status change event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// One or more propulsion types, e.g. `["electric"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propulsion_type: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type_reason: Option<String>,
    /// Event time as sent by the provider (milliseconds in MDS 0.3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<JsonValue>,
    /// GeoJSON feature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_location: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_trip: Option<String>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Record for StatusChange {
    const ENDPOINT: Endpoint = Endpoint::StatusChanges;
}

/// A completed trip
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propulsion_type: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_duration: Option<f64>,
    /// Meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_distance: Option<f64>,
    /// GeoJSON feature collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_verification_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Record for Trip {
    const ENDPOINT: Endpoint = Endpoint::Trips;
}
