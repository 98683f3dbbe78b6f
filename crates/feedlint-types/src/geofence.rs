//! Geofencing zones: a GeoJSON feature collection with per-zone rules.

use serde::Deserialize;
use serde_json::Value;

use crate::text::LocalizedName;
use crate::timestamp::Timestamp;

/// geofencing_zones.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeofencingZones {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: GeofencingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeofencingData {
    #[serde(default)]
    pub geofencing_zones: FeatureCollection,
    #[serde(default)]
    pub global_rules: Vec<ZoneRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default, rename = "type")]
    pub collection_type: String,
    #[serde(default)]
    pub features: Vec<ZoneFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneFeature {
    #[serde(default, rename = "type")]
    pub feature_type: String,
    /// Geometry is carried opaquely; the engine never interprets shapes.
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    pub properties: ZoneProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneProperties {
    #[serde(default)]
    pub name: Option<LocalizedName>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub rules: Vec<ZoneRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneRule {
    #[serde(default)]
    pub vehicle_type_ids: Vec<String>,
    #[serde(default)]
    pub ride_start_allowed: Option<bool>,
    #[serde(default)]
    pub ride_end_allowed: Option<bool>,
    #[serde(default)]
    pub ride_through_allowed: Option<bool>,
    #[serde(default)]
    pub maximum_speed_kph: Option<i64>,
    #[serde(default)]
    pub station_parking: Option<bool>,
}
