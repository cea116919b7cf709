//! Query builders for the provider endpoints
//!
//! Filters left unset are omitted from the request. Time filters are
//! always sent as whole Unix seconds.

use crate::types::{BoundingBox, QueryParams, Timestamp};

/// Filters for a `status_changes` request
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChangesQuery {
    /// Events at or after this time
    pub start_time: Option<Timestamp>,
    /// Events at or before this time
    pub end_time: Option<Timestamp>,
    /// Events whose location falls inside this box
    pub bbox: Option<BoundingBox>,
    /// Provider-specific filters, passed through verbatim
    pub extra: QueryParams,
    /// Follow `next` links (default) or read only the first page
    pub paging: bool,
}

impl Default for StatusChangesQuery {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            bbox: None,
            extra: QueryParams::new(),
            paging: true,
        }
    }
}

impl StatusChangesQuery {
    /// Create an unfiltered query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on `event_time` at or after `time`
    #[must_use]
    pub fn start_time(mut self, time: impl Into<Timestamp>) -> Self {
        self.start_time = Some(time.into());
        self
    }

    /// Filter on `event_time` at or before `time`
    #[must_use]
    pub fn end_time(mut self, time: impl Into<Timestamp>) -> Self {
        self.end_time = Some(time.into());
        self
    }

    /// Filter on `event_location`
    #[must_use]
    pub fn bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Add a provider-specific filter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Enable or disable following `next` links
    #[must_use]
    pub fn paging(mut self, paging: bool) -> Self {
        self.paging = paging;
        self
    }

    /// Query parameters for the first request
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.extra.clone();
        insert_common(&mut params, self.start_time, self.end_time, self.bbox);
        params
    }
}

/// Filters for a `trips` request
#[derive(Debug, Clone, PartialEq)]
pub struct TripsQuery {
    /// Trips taken by this device
    pub device_id: Option<String>,
    /// Trips taken by this vehicle
    pub vehicle_id: Option<String>,
    /// Trips starting at or after this time
    pub start_time: Option<Timestamp>,
    /// Trips ending at or before this time
    pub end_time: Option<Timestamp>,
    /// Trips with any route point inside this box
    pub bbox: Option<BoundingBox>,
    /// Provider-specific filters, passed through verbatim
    pub extra: QueryParams,
    /// Follow `next` links (default) or read only the first page
    pub paging: bool,
}

impl Default for TripsQuery {
    fn default() -> Self {
        Self {
            device_id: None,
            vehicle_id: None,
            start_time: None,
            end_time: None,
            bbox: None,
            extra: QueryParams::new(),
            paging: true,
        }
    }
}

impl TripsQuery {
    /// Create an unfiltered query
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    #[must_use]
    pub fn vehicle_id(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    #[must_use]
    pub fn start_time(mut self, time: impl Into<Timestamp>) -> Self {
        self.start_time = Some(time.into());
        self
    }

    #[must_use]
    pub fn end_time(mut self, time: impl Into<Timestamp>) -> Self {
        self.end_time = Some(time.into());
        self
    }

    #[must_use]
    pub fn bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Add a provider-specific filter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn paging(mut self, paging: bool) -> Self {
        self.paging = paging;
        self
    }

    /// Query parameters for the first request
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.extra.clone();
        if let Some(device_id) = &self.device_id {
            params.insert("device_id".to_string(), device_id.clone());
        }
        if let Some(vehicle_id) = &self.vehicle_id {
            params.insert("vehicle_id".to_string(), vehicle_id.clone());
        }
        insert_common(&mut params, self.start_time, self.end_time, self.bbox);
        params
    }
}

// Named filters win over extra filters with the same key.
fn insert_common(
    params: &mut QueryParams,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    bbox: Option<BoundingBox>,
) {
    if let Some(t) = start_time {
        params.insert("start_time".to_string(), t.to_string());
    }
    if let Some(t) = end_time {
        params.insert("end_time".to_string(), t.to_string());
    }
    if let Some(b) = bbox {
        params.insert("bbox".to_string(), b.to_string());
    }
}
