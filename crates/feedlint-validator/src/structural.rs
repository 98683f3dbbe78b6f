//! Per-document structural rules.
//!
//! Every document must parse, carry `last_updated` and a `data` object, and
//! should carry `ttl`. Beyond that, each kind contributes a fixed rule set
//! checking required fields and, where it matters, types. Instance paths
//! pinpoint the offending array index and field.

use serde_json::{Map, Value};

use feedlint_types::vehicle::is_motorized;
use feedlint_types::{DiscoveryFeed, FeedKind};

use crate::report::Issue;

/// Validate a document's structure. Parse failure yields a single issue and
/// skips every other check.
pub fn validate_structure(raw: &[u8], kind: Option<FeedKind>) -> Vec<Issue> {
    let mut issues = Vec::new();

    let doc: Map<String, Value> = match serde_json::from_slice(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            issues.push(Issue::error("Invalid JSON: document is not an object", ""));
            return issues;
        }
        Err(e) => {
            issues.push(Issue::error(format!("Invalid JSON: {e}"), ""));
            return issues;
        }
    };

    if !doc.contains_key("last_updated") {
        issues.push(Issue::error("last_updated is required", "/last_updated"));
    }
    if !doc.contains_key("ttl") {
        issues.push(Issue::warning("ttl is recommended", "/ttl"));
    }
    if !doc.contains_key("data") {
        issues.push(Issue::error("data object is required", "/data"));
    }

    match kind {
        Some(FeedKind::SystemInformation) => validate_system_information(&doc, &mut issues),
        Some(FeedKind::StationInformation) => validate_station_information(&doc, &mut issues),
        Some(FeedKind::StationStatus) => validate_station_status(&doc, &mut issues),
        Some(FeedKind::FreeBikeStatus | FeedKind::VehicleStatus) => {
            validate_vehicle_status(&doc, &mut issues)
        }
        Some(FeedKind::VehicleTypes) => validate_vehicle_types(&doc, &mut issues),
        _ => {}
    }

    issues
}

/// Discovery-specific structure: a usable document list.
pub fn validate_discovery_structure(feed: &DiscoveryFeed) -> Vec<Issue> {
    let mut issues = Vec::new();

    if feed.ttl < 0 {
        issues.push(Issue::error("ttl must be non-negative", "/ttl"));
    }

    if feed.data.feeds.is_empty() {
        issues.push(Issue::error(
            "data.feeds array is required and must not be empty",
            "/data/feeds",
        ));
    }

    for (i, link) in feed.data.feeds.iter().enumerate() {
        if link.name.is_empty() {
            issues.push(Issue::error(
                "feed name is required",
                format!("/data/feeds/{i}/name"),
            ));
        }
        if link.url.is_empty() {
            issues.push(Issue::error(
                "feed url is required",
                format!("/data/feeds/{i}/url"),
            ));
        }
    }

    issues
}

fn data_object<'a>(doc: &'a Map<String, Value>) -> Option<&'a Map<String, Value>> {
    match doc.get("data") {
        Some(Value::Object(data)) => Some(data),
        _ => None,
    }
}

fn entry_array<'a>(
    data: &'a Map<String, Value>,
    key: &str,
) -> Option<impl Iterator<Item = (usize, &'a Map<String, Value>)>> {
    match data.get(key) {
        Some(Value::Array(entries)) => Some(
            entries
                .iter()
                .enumerate()
                .filter_map(|(i, e)| e.as_object().map(|obj| (i, obj))),
        ),
        _ => None,
    }
}

fn validate_system_information(doc: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let Some(data) = data_object(doc) else {
        return;
    };

    for field in ["system_id", "timezone", "name"] {
        if !data.contains_key(field) {
            issues.push(Issue::error(
                format!("{field} is required"),
                format!("/data/{field}"),
            ));
        }
    }
}

fn validate_station_information(doc: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let Some(data) = data_object(doc) else {
        return;
    };
    let Some(stations) = entry_array(data, "stations") else {
        issues.push(Issue::error("stations array is required", "/data/stations"));
        return;
    };

    for (i, station) in stations {
        for field in ["station_id", "lat", "lon"] {
            if !station.contains_key(field) {
                issues.push(Issue::error(
                    format!("{field} is required"),
                    format!("/data/stations/{i}/{field}"),
                ));
            }
        }
    }
}

fn validate_station_status(doc: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let Some(data) = data_object(doc) else {
        return;
    };
    let Some(stations) = entry_array(data, "stations") else {
        issues.push(Issue::error("stations array is required", "/data/stations"));
        return;
    };

    for (i, station) in stations {
        if !station.contains_key("station_id") {
            issues.push(Issue::error(
                "station_id is required",
                format!("/data/stations/{i}/station_id"),
            ));
        }

        for field in ["is_installed", "is_renting", "is_returning"] {
            if let Some(value) = station.get(field)
                && !value.is_boolean()
            {
                issues.push(Issue::error(
                    format!("{field} must be a boolean"),
                    format!("/data/stations/{i}/{field}"),
                ));
            }
        }
    }
}

fn validate_vehicle_status(doc: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let Some(data) = data_object(doc) else {
        return;
    };
    let vehicles = entry_array(data, "vehicles").or_else(|| entry_array(data, "bikes"));
    let Some(vehicles) = vehicles else {
        issues.push(Issue::error(
            "vehicles or bikes array is required",
            "/data/vehicles",
        ));
        return;
    };

    for (i, vehicle) in vehicles {
        if !vehicle.contains_key("vehicle_id") && !vehicle.contains_key("bike_id") {
            issues.push(Issue::error(
                "vehicle_id or bike_id is required",
                format!("/data/vehicles/{i}"),
            ));
        }
    }
}

fn validate_vehicle_types(doc: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let Some(data) = data_object(doc) else {
        return;
    };
    let Some(entries) = entry_array(data, "vehicle_types") else {
        issues.push(Issue::error(
            "vehicle_types array is required",
            "/data/vehicle_types",
        ));
        return;
    };

    for (i, entry) in entries {
        for field in ["vehicle_type_id", "form_factor", "propulsion_type"] {
            if !entry.contains_key(field) {
                issues.push(Issue::error(
                    format!("{field} is required"),
                    format!("/data/vehicle_types/{i}/{field}"),
                ));
            }
        }

        if let Some(Value::String(propulsion)) = entry.get("propulsion_type")
            && is_motorized(propulsion)
            && !entry.contains_key("max_range_meters")
        {
            issues.push(Issue::warning(
                "max_range_meters is required for motorized vehicles",
                format!("/data/vehicle_types/{i}/max_range_meters"),
            ));
        }
    }
}
