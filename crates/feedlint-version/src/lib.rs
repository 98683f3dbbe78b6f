//! # feedlint-version
//!
//! The version policy: a static table, keyed by feed version, of which
//! documents a feed must, may, or conditionally must publish.
//!
//! The table encodes two version boundaries that matter elsewhere:
//! - discovery (gbfs.json) became mandatory at 2.0
//! - the vehicle availability document was renamed from `free_bike_status`
//!   to `vehicle_status` at 3.0
//!
//! `vehicle_types` and `system_pricing_plans` are never unconditionally
//! required here; cross-reference validation escalates them when the feed's
//! vehicles actually reference them.

use serde::{Deserialize, Serialize};

/// Deployment flags: which operational models the feed serves.
///
/// Both may be set; a hybrid system publishes station and vehicle documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentFlags {
    /// Station-based (docked) operation.
    #[serde(default)]
    pub docked: bool,
    /// Free-floating (dockless) operation.
    #[serde(default)]
    pub freefloating: bool,
}

/// One document's requirement status for a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequirement {
    /// Wire-level feed name, without the `.json` suffix.
    pub name: &'static str,
    pub required: bool,
    /// Requirement is established by cross-reference validation, not here.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub conditionally_required: bool,
}

impl FeedRequirement {
    const fn new(name: &'static str, required: bool) -> Self {
        Self {
            name,
            required,
            conditionally_required: false,
        }
    }

    const fn conditional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            conditionally_required: true,
        }
    }
}

/// The supported feed versions, oldest first.
pub const SUPPORTED_VERSIONS: [&str; 8] =
    ["1.0", "1.1", "2.0", "2.1", "2.2", "2.3", "3.0", "3.1-RC2"];

/// The fallback for unrecognized version strings: the newest stable entry.
pub const FALLBACK_VERSION: &str = "3.0";

/// The default when neither an override nor the feed declares a version.
pub const DEFAULT_VERSION: &str = "1.0";

/// Supported versions, oldest first.
pub fn supported_versions() -> &'static [&'static str] {
    &SUPPORTED_VERSIONS
}

/// Whether a version string names a known table entry.
pub fn is_supported(version: &str) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}

/// Whether the version uses 3.0+ document layouts and naming.
pub fn is_v3_or_later(version: &str) -> bool {
    matches!(version, "3.0" | "3.1-RC2" | "3.1")
}

/// The vehicle availability document name for a version.
pub fn vehicle_status_feed_name(version: &str) -> &'static str {
    if is_v3_or_later(version) {
        "vehicle_status"
    } else {
        "free_bike_status"
    }
}

/// Whether the discovery document (gbfs.json) is required.
///
/// Unrecognized versions are treated as post-2.0.
pub fn is_discovery_required(version: &str) -> bool {
    !matches!(version, "1.0" | "1.1")
}

/// The requirement table row for a version, one entry per declared document.
///
/// Unrecognized versions fall back to [`FALLBACK_VERSION`].
pub fn requirements(version: &str, flags: DeploymentFlags) -> Vec<FeedRequirement> {
    let version = if is_supported(version) {
        version
    } else {
        FALLBACK_VERSION
    };

    match version {
        "1.0" => v1_files(flags, false),
        "1.1" | "2.0" => v1_files(flags, true),
        "2.1" | "2.2" | "2.3" => v2_files(flags),
        "3.1-RC2" => v3_files(flags, true),
        _ => v3_files(flags, false),
    }
}

fn v1_files(flags: DeploymentFlags, versions_listing: bool) -> Vec<FeedRequirement> {
    let mut files = Vec::with_capacity(10);
    if versions_listing {
        files.push(FeedRequirement::new("gbfs_versions", false));
    }
    files.extend([
        FeedRequirement::new("system_information", true),
        FeedRequirement::new("station_information", flags.docked),
        FeedRequirement::new("station_status", flags.docked),
        FeedRequirement::new("free_bike_status", flags.freefloating),
        FeedRequirement::new("system_hours", false),
        FeedRequirement::new("system_calendar", false),
        FeedRequirement::new("system_regions", false),
        FeedRequirement::conditional("system_pricing_plans"),
        FeedRequirement::new("system_alerts", false),
    ]);
    files
}

fn v2_files(flags: DeploymentFlags) -> Vec<FeedRequirement> {
    vec![
        FeedRequirement::new("gbfs_versions", false),
        FeedRequirement::new("system_information", true),
        FeedRequirement::conditional("vehicle_types"),
        FeedRequirement::new("station_information", flags.docked),
        FeedRequirement::new("station_status", flags.docked),
        FeedRequirement::new("free_bike_status", flags.freefloating),
        FeedRequirement::new("system_hours", false),
        FeedRequirement::new("system_calendar", false),
        FeedRequirement::new("system_regions", false),
        FeedRequirement::conditional("system_pricing_plans"),
        FeedRequirement::new("system_alerts", false),
        FeedRequirement::new("geofencing_zones", false),
    ]
}

fn v3_files(flags: DeploymentFlags, availability_listing: bool) -> Vec<FeedRequirement> {
    let mut files = vec![
        FeedRequirement::new("manifest", false),
        FeedRequirement::new("gbfs_versions", false),
        FeedRequirement::new("system_information", true),
        FeedRequirement::conditional("vehicle_types"),
        FeedRequirement::new("station_information", flags.docked),
        FeedRequirement::new("station_status", flags.docked),
        FeedRequirement::new("vehicle_status", flags.freefloating),
    ];
    if availability_listing {
        files.push(FeedRequirement::new("vehicle_availability", false));
    }
    files.extend([
        FeedRequirement::new("system_regions", false),
        FeedRequirement::conditional("system_pricing_plans"),
        FeedRequirement::new("system_alerts", false),
        FeedRequirement::new("geofencing_zones", false),
    ]);
    files
}
