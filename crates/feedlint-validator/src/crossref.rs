//! Cross-reference validation: identifier integrity between documents.
//!
//! Runs once, after every fetch task has completed. Five passes over the
//! aggregated results, each idempotent and order-independent of the others:
//! identifier extraction, vehicle → vehicle-type references, vehicle-type →
//! pricing-plan references, station-status → station references, and
//! conditional requirement escalation.
//!
//! The whole phase is a pure function: it consumes the result map and
//! returns a new one, so the concurrency boundary stays unambiguous — no
//! peer result is ever mutated behind another worker's back.

use std::collections::{BTreeMap, BTreeSet};

use feedlint_types::vehicle::is_motorized;
use feedlint_types::{
    StationInformation, StationStatus, SystemPricingPlans, Vehicle, VehicleStatus, VehicleTypes,
};
use feedlint_version::vehicle_status_feed_name;

use crate::report::{FileReport, Issue};

/// Cross-validate the aggregated per-file results for one run.
pub fn cross_validate(
    mut results: BTreeMap<String, FileReport>,
    version: &str,
) -> BTreeMap<String, FileReport> {
    let vehicle_types = extract_vehicle_types(&results);
    let pricing_plans = extract_pricing_plans(&results);
    let station_ids = extract_station_ids(&results);

    check_vehicle_type_references(&mut results, &vehicle_types, version);
    check_pricing_plan_references(&mut results, &pricing_plans);
    check_station_references(&mut results, &station_ids);
    escalate_conditional_requirement(&mut results, version, "vehicle_types", vehicle_type_ref);
    escalate_conditional_requirement(
        &mut results,
        version,
        "system_pricing_plans",
        pricing_plan_ref,
    );

    results
}

fn vehicle_type_ref(vehicle: &Vehicle) -> Option<&str> {
    vehicle.vehicle_type_id.as_deref()
}

fn pricing_plan_ref(vehicle: &Vehicle) -> Option<&str> {
    vehicle.pricing_plan_id.as_deref()
}

/// Decode a fetched document's body, or `None` if it is absent or
/// unparsable. Parse failures are swallowed here: the owning document's
/// structural check already reported them.
fn decode<T: serde::de::DeserializeOwned>(
    results: &BTreeMap<String, FileReport>,
    name: &str,
) -> Option<T> {
    let report = results.get(name)?;
    if !report.exists {
        return None;
    }
    serde_json::from_slice(report.body.as_deref()?).ok()
}

/// Known vehicle-type ids with their propulsion types.
fn extract_vehicle_types(results: &BTreeMap<String, FileReport>) -> BTreeMap<String, String> {
    let Some(doc) = decode::<VehicleTypes>(results, "vehicle_types") else {
        return BTreeMap::new();
    };
    doc.data
        .vehicle_types
        .into_iter()
        .map(|t| (t.vehicle_type_id, t.propulsion_type))
        .collect()
}

fn extract_pricing_plans(results: &BTreeMap<String, FileReport>) -> BTreeSet<String> {
    let Some(doc) = decode::<SystemPricingPlans>(results, "system_pricing_plans") else {
        return BTreeSet::new();
    };
    doc.data.plans.into_iter().map(|p| p.plan_id).collect()
}

fn extract_station_ids(results: &BTreeMap<String, FileReport>) -> BTreeSet<String> {
    let Some(doc) = decode::<StationInformation>(results, "station_information") else {
        return BTreeSet::new();
    };
    doc.data.stations.into_iter().map(|s| s.station_id).collect()
}

/// Vehicles must reference declared vehicle types; motorized vehicles
/// should report their remaining range.
fn check_vehicle_type_references(
    results: &mut BTreeMap<String, FileReport>,
    vehicle_types: &BTreeMap<String, String>,
    version: &str,
) {
    if vehicle_types.is_empty() {
        return;
    }
    let feed_name = vehicle_status_feed_name(version);
    let Some(doc) = decode::<VehicleStatus>(results, feed_name) else {
        return;
    };
    let Some(report) = results.get_mut(feed_name) else {
        return;
    };

    let key = if doc.data.vehicles.is_empty() && !doc.data.bikes.is_empty() {
        "bikes"
    } else {
        "vehicles"
    };
    for (i, vehicle) in doc.data.entries().iter().enumerate() {
        let Some(type_id) = vehicle.vehicle_type_id.as_deref().filter(|id| !id.is_empty())
        else {
            continue;
        };

        match vehicle_types.get(type_id) {
            None => {
                report.push_issue(Issue::error(
                    format!("vehicle_type_id '{type_id}' not found in vehicle_types.json"),
                    format!("/data/{key}/{i}/vehicle_type_id"),
                ));
            }
            Some(propulsion) => {
                if is_motorized(propulsion) && vehicle.current_range_meters.unwrap_or(0.0) == 0.0 {
                    report.push_issue(Issue::warning(
                        "current_range_meters is recommended for motorized vehicles",
                        format!("/data/{key}/{i}"),
                    ));
                }
            }
        }
    }
}

/// Vehicle types must reference declared pricing plans.
fn check_pricing_plan_references(
    results: &mut BTreeMap<String, FileReport>,
    pricing_plans: &BTreeSet<String>,
) {
    if pricing_plans.is_empty() {
        return;
    }
    let Some(doc) = decode::<VehicleTypes>(results, "vehicle_types") else {
        return;
    };
    let Some(report) = results.get_mut("vehicle_types") else {
        return;
    };

    for (i, entry) in doc.data.vehicle_types.iter().enumerate() {
        let Some(plan_id) = entry
            .default_pricing_plan_id
            .as_deref()
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        if !pricing_plans.contains(plan_id) {
            report.push_issue(Issue::error(
                format!("default_pricing_plan_id '{plan_id}' not found in system_pricing_plans.json"),
                format!("/data/vehicle_types/{i}/default_pricing_plan_id"),
            ));
        }
    }
}

/// Station-status entries must reference declared stations.
fn check_station_references(
    results: &mut BTreeMap<String, FileReport>,
    station_ids: &BTreeSet<String>,
) {
    if station_ids.is_empty() {
        return;
    }
    let Some(doc) = decode::<StationStatus>(results, "station_status") else {
        return;
    };
    let Some(report) = results.get_mut("station_status") else {
        return;
    };

    for (i, entry) in doc.data.stations.iter().enumerate() {
        if !station_ids.contains(&entry.station_id) {
            report.push_issue(Issue::error(
                format!(
                    "station_id '{}' not found in station_information.json",
                    entry.station_id
                ),
                format!("/data/stations/{i}/station_id"),
            ));
        }
    }
}

/// Conditional requirement escalation: if any vehicle carries a reference
/// of the given kind, the referenced document becomes required; missing,
/// it gets an error — synthesizing a result entry if discovery never
/// listed it.
fn escalate_conditional_requirement(
    results: &mut BTreeMap<String, FileReport>,
    version: &str,
    target: &str,
    reference: fn(&Vehicle) -> Option<&str>,
) {
    let feed_name = vehicle_status_feed_name(version);
    let Some(doc) = decode::<VehicleStatus>(results, feed_name) else {
        return;
    };

    let referenced = doc
        .data
        .entries()
        .iter()
        .any(|v| reference(v).is_some_and(|id| !id.is_empty()));
    if !referenced {
        return;
    }

    let exists = results.get(target).is_some_and(|r| r.exists);
    if exists {
        return;
    }

    let field = match target {
        "vehicle_types" => "vehicle_type_id",
        _ => "pricing_plan_id",
    };
    let entry = results
        .entry(target.to_string())
        .or_insert_with(|| FileReport::new(format!("{target}.json"), true));
    entry.required = true;
    entry.push_issue(Issue::error(
        format!("{target}.json is required when {field} is used in {feed_name}.json"),
        "",
    ));
}
