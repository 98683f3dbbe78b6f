//! Station documents: information (static) and status (dynamic).

use serde::Deserialize;

use crate::text::LocalizedName;
use crate::timestamp::Timestamp;

/// station_information.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationInformation {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: StationInformationData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationInformationData {
    #[serde(default)]
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Station {
    #[serde(default)]
    pub station_id: String,
    #[serde(default)]
    pub name: Option<LocalizedName>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub is_virtual_station: Option<bool>,
    #[serde(default)]
    pub is_valet_station: Option<bool>,
    #[serde(default)]
    pub is_charging_station: Option<bool>,
}

/// station_status.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationStatus {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: StationStatusData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationStatusData {
    #[serde(default)]
    pub stations: Vec<StationStatusEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationStatusEntry {
    #[serde(default)]
    pub station_id: String,
    #[serde(default)]
    pub num_bikes_available: Option<i64>,
    #[serde(default)]
    pub num_vehicles_available: Option<i64>,
    #[serde(default)]
    pub num_bikes_disabled: Option<i64>,
    #[serde(default)]
    pub num_vehicles_disabled: Option<i64>,
    #[serde(default)]
    pub num_docks_available: Option<i64>,
    #[serde(default)]
    pub num_docks_disabled: Option<i64>,
    #[serde(default)]
    pub is_installed: Option<bool>,
    #[serde(default)]
    pub is_renting: Option<bool>,
    #[serde(default)]
    pub is_returning: Option<bool>,
    #[serde(default)]
    pub last_reported: Option<Timestamp>,
}
