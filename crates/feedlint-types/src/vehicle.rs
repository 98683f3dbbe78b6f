//! Vehicle documents: availability entries and vehicle type definitions.

use serde::Deserialize;

use crate::text::LocalizedName;
use crate::timestamp::Timestamp;

/// vehicle_status.json (3.0+) or free_bike_status.json (pre-3.0).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleStatus {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: VehicleStatusData,
}

/// Availability entries live under `vehicles` (3.0+) or `bikes` (pre-3.0).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleStatusData {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub bikes: Vec<Vehicle>,
}

impl VehicleStatusData {
    /// The availability entries regardless of the wire key.
    pub fn entries(&self) -> &[Vehicle] {
        if !self.vehicles.is_empty() {
            &self.vehicles
        } else {
            &self.bikes
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub bike_id: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub is_reserved: Option<bool>,
    #[serde(default)]
    pub is_disabled: Option<bool>,
    #[serde(default)]
    pub vehicle_type_id: Option<String>,
    #[serde(default)]
    pub last_reported: Option<Timestamp>,
    #[serde(default)]
    pub current_range_meters: Option<f64>,
    #[serde(default)]
    pub current_fuel_percent: Option<f64>,
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub pricing_plan_id: Option<String>,
}

impl Vehicle {
    /// The version-agnostic identifier.
    pub fn id(&self) -> Option<&str> {
        self.vehicle_id
            .as_deref()
            .or(self.bike_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// vehicle_types.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleTypes {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: VehicleTypesData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleTypesData {
    #[serde(default)]
    pub vehicle_types: Vec<VehicleType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleType {
    #[serde(default)]
    pub vehicle_type_id: String,
    #[serde(default)]
    pub form_factor: String,
    #[serde(default)]
    pub propulsion_type: String,
    #[serde(default)]
    pub max_range_meters: Option<f64>,
    #[serde(default)]
    pub name: Option<LocalizedName>,
    #[serde(default)]
    pub default_pricing_plan_id: Option<String>,
    #[serde(default)]
    pub pricing_plan_ids: Vec<String>,
}

/// Propulsion types that move under their own power.
pub const MOTORIZED_PROPULSION: [&str; 7] = [
    "electric",
    "electric_assist",
    "combustion",
    "combustion_diesel",
    "hybrid",
    "plug_in_hybrid",
    "hydrogen_fuel_cell",
];

/// Whether a propulsion type is motorized.
pub fn is_motorized(propulsion_type: &str) -> bool {
    MOTORIZED_PROPULSION.contains(&propulsion_type)
}
