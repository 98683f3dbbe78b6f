//! Feed kinds: the closed dispatch set for rule tables.

use serde::{Deserialize, Serialize};

/// One document kind within a feed.
///
/// Coercion field maps and structural rules are keyed by this enum, so each
/// rule set stays independently testable. Names match the wire-level feed
/// names declared in the discovery document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// The discovery document (gbfs.json) listing every other document.
    Discovery,
    GbfsVersions,
    Manifest,
    SystemInformation,
    StationInformation,
    StationStatus,
    /// Vehicle availability, pre-3.0 naming.
    FreeBikeStatus,
    /// Vehicle availability, 3.0+ naming.
    VehicleStatus,
    /// Future availability windows, 3.1+.
    VehicleAvailability,
    VehicleTypes,
    SystemPricingPlans,
    SystemHours,
    SystemCalendar,
    SystemRegions,
    SystemAlerts,
    GeofencingZones,
}

impl FeedKind {
    /// Resolve a wire-level feed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "gbfs" => Self::Discovery,
            "gbfs_versions" => Self::GbfsVersions,
            "manifest" => Self::Manifest,
            "system_information" => Self::SystemInformation,
            "station_information" => Self::StationInformation,
            "station_status" => Self::StationStatus,
            "free_bike_status" => Self::FreeBikeStatus,
            "vehicle_status" => Self::VehicleStatus,
            "vehicle_availability" => Self::VehicleAvailability,
            "vehicle_types" => Self::VehicleTypes,
            "system_pricing_plans" => Self::SystemPricingPlans,
            "system_hours" => Self::SystemHours,
            "system_calendar" => Self::SystemCalendar,
            "system_regions" => Self::SystemRegions,
            "system_alerts" => Self::SystemAlerts,
            "geofencing_zones" => Self::GeofencingZones,
            _ => return None,
        })
    }

    /// The wire-level feed name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Discovery => "gbfs",
            Self::GbfsVersions => "gbfs_versions",
            Self::Manifest => "manifest",
            Self::SystemInformation => "system_information",
            Self::StationInformation => "station_information",
            Self::StationStatus => "station_status",
            Self::FreeBikeStatus => "free_bike_status",
            Self::VehicleStatus => "vehicle_status",
            Self::VehicleAvailability => "vehicle_availability",
            Self::VehicleTypes => "vehicle_types",
            Self::SystemPricingPlans => "system_pricing_plans",
            Self::SystemHours => "system_hours",
            Self::SystemCalendar => "system_calendar",
            Self::SystemRegions => "system_regions",
            Self::SystemAlerts => "system_alerts",
            Self::GeofencingZones => "geofencing_zones",
        }
    }

    /// The conventional file name (`<name>.json`).
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }

    /// Whether this kind carries vehicle availability entries.
    pub fn is_vehicle_availability(self) -> bool {
        matches!(self, Self::FreeBikeStatus | Self::VehicleStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in [
            FeedKind::Discovery,
            FeedKind::GbfsVersions,
            FeedKind::Manifest,
            FeedKind::SystemInformation,
            FeedKind::StationInformation,
            FeedKind::StationStatus,
            FeedKind::FreeBikeStatus,
            FeedKind::VehicleStatus,
            FeedKind::VehicleAvailability,
            FeedKind::VehicleTypes,
            FeedKind::SystemPricingPlans,
            FeedKind::SystemHours,
            FeedKind::SystemCalendar,
            FeedKind::SystemRegions,
            FeedKind::SystemAlerts,
            FeedKind::GeofencingZones,
        ] {
            assert_eq!(FeedKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(FeedKind::from_name("system_telemetry"), None);
    }

    #[test]
    fn file_name_appends_extension() {
        assert_eq!(FeedKind::StationStatus.file_name(), "station_status.json");
    }
}
