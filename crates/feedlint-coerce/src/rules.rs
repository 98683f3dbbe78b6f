//! Per-kind coercion rule tables.
//!
//! Every document gets the common header treatment (`last_updated`, `ttl`,
//! top-level null stripping); each kind then names the fields inside its
//! repeated substructures that the value rules apply to. The tables mirror
//! the fields feeds most often get wrong in the wild.

use serde_json::{Map, Value};

use feedlint_types::FeedKind;

use crate::value::{
    coerce_bool, coerce_coordinate, coerce_int, coerce_number, coerce_timestamp, json_type_name,
};
use crate::{CoerceOptions, Coercion};

type ValueRule = fn(&Value) -> Option<Value>;

/// Apply the kind's rule set to a parsed document, appending to `log`.
pub fn coerce_document(
    doc: &mut Map<String, Value>,
    kind: FeedKind,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    coerce_common(doc, opts, log);

    match kind {
        FeedKind::StationStatus => coerce_station_status(doc, opts, log),
        FeedKind::StationInformation => coerce_station_information(doc, opts, log),
        FeedKind::FreeBikeStatus | FeedKind::VehicleStatus => {
            coerce_vehicle_status(doc, opts, log)
        }
        FeedKind::VehicleTypes => coerce_vehicle_types(doc, opts, log),
        FeedKind::SystemInformation => coerce_system_information(doc, opts, log),
        FeedKind::GeofencingZones => coerce_geofencing_zones(doc, opts, log),
        _ => {}
    }
}

fn coerce_common(doc: &mut Map<String, Value>, opts: &CoerceOptions, log: &mut Vec<Coercion>) {
    if opts.coerce_timestamps {
        apply_rule(doc, "", "last_updated", coerce_timestamp, log);
    }
    if opts.coerce_numeric_strings {
        apply_rule(doc, "", "ttl", coerce_int, log);
    }
    if opts.treat_null_as_absent {
        strip_nulls(doc);
    }
}

fn coerce_station_status(
    doc: &mut Map<String, Value>,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    const BOOL_FIELDS: [&str; 4] = [
        "is_installed",
        "is_renting",
        "is_returning",
        "is_charging_station",
    ];
    const INT_FIELDS: [&str; 7] = [
        "num_bikes_available",
        "num_bikes_disabled",
        "num_docks_available",
        "num_docks_disabled",
        "num_vehicles_available",
        "num_vehicles_disabled",
        "last_reported",
    ];

    for_each_entry(doc, "stations", "/data/stations", |station, path| {
        if opts.coerce_booleans {
            for field in BOOL_FIELDS {
                apply_rule(station, path, field, coerce_bool, log);
            }
        }
        if opts.coerce_numeric_strings {
            for field in INT_FIELDS {
                apply_rule(station, path, field, coerce_int, log);
            }
        }
        if opts.coerce_timestamps {
            apply_rule(station, path, "last_reported", coerce_timestamp, log);
        }
        if opts.treat_null_as_absent {
            strip_nulls(station);
        }
    });
}

fn coerce_station_information(
    doc: &mut Map<String, Value>,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    const BOOL_FIELDS: [&str; 3] = [
        "is_valet_station",
        "is_virtual_station",
        "is_charging_station",
    ];

    for_each_entry(doc, "stations", "/data/stations", |station, path| {
        if opts.coerce_coordinates {
            for field in ["lat", "lon"] {
                apply_rule(station, path, field, coerce_coordinate, log);
            }
        }
        if opts.coerce_numeric_strings {
            apply_rule(station, path, "capacity", coerce_int, log);
        }
        if opts.coerce_booleans {
            for field in BOOL_FIELDS {
                apply_rule(station, path, field, coerce_bool, log);
            }
        }
        if opts.treat_null_as_absent {
            strip_nulls(station);
        }
    });
}

fn coerce_vehicle_status(
    doc: &mut Map<String, Value>,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    const BOOL_FIELDS: [&str; 2] = ["is_reserved", "is_disabled"];
    const INT_FIELDS: [&str; 3] = [
        "current_range_meters",
        "current_fuel_percent",
        "last_reported",
    ];

    // Availability entries live under `vehicles` (3.0+) or `bikes` (pre-3.0).
    let key = if matches!(doc.get("data").and_then(|d| d.get("vehicles")), Some(Value::Array(_)))
    {
        "vehicles"
    } else {
        "bikes"
    };
    let base = format!("/data/{key}");

    for_each_entry(doc, key, &base, |vehicle, path| {
        if opts.coerce_coordinates {
            for field in ["lat", "lon"] {
                apply_rule(vehicle, path, field, coerce_coordinate, log);
            }
        }
        if opts.coerce_booleans {
            for field in BOOL_FIELDS {
                apply_rule(vehicle, path, field, coerce_bool, log);
            }
        }
        if opts.coerce_numeric_strings {
            for field in INT_FIELDS {
                apply_rule(vehicle, path, field, coerce_int, log);
            }
        }
        if opts.coerce_timestamps {
            apply_rule(vehicle, path, "last_reported", coerce_timestamp, log);
        }
        if opts.treat_null_as_absent {
            strip_nulls(vehicle);
        }
    });
}

fn coerce_vehicle_types(
    doc: &mut Map<String, Value>,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    const NUMBER_FIELDS: [&str; 7] = [
        "max_range_meters",
        "wheel_count",
        "max_permitted_speed",
        "rated_power",
        "default_reserve_time",
        "cargo_volume_capacity",
        "cargo_load_capacity",
    ];

    for_each_entry(doc, "vehicle_types", "/data/vehicle_types", |entry, path| {
        if opts.coerce_numeric_strings {
            for field in NUMBER_FIELDS {
                apply_rule(entry, path, field, coerce_number, log);
            }
        }
        if opts.treat_null_as_absent {
            strip_nulls(entry);
        }
    });
}

fn coerce_system_information(
    doc: &mut Map<String, Value>,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    let Some(Value::Object(data)) = doc.get_mut("data") else {
        return;
    };
    if opts.coerce_timestamps {
        for field in ["start_date", "end_date"] {
            apply_rule(data, "/data", field, coerce_timestamp, log);
        }
    }
}

fn coerce_geofencing_zones(
    doc: &mut Map<String, Value>,
    opts: &CoerceOptions,
    log: &mut Vec<Coercion>,
) {
    const NUMBER_FIELDS: [&str; 2] = ["maximum_speed_kph", "station_parking"];

    let Some(Value::Object(data)) = doc.get_mut("data") else {
        return;
    };
    let Some(Value::Object(zones)) = data.get_mut("geofencing_zones") else {
        return;
    };
    let Some(Value::Array(features)) = zones.get_mut("features") else {
        return;
    };

    for (i, feature) in features.iter_mut().enumerate() {
        let Some(Value::Object(props)) = feature.get_mut("properties") else {
            continue;
        };
        let base = format!("/data/geofencing_zones/features/{i}/properties");
        let Some(Value::Array(rules)) = props.get_mut("rules") else {
            continue;
        };
        for (j, rule) in rules.iter_mut().enumerate() {
            let Value::Object(rule) = rule else {
                continue;
            };
            let path = format!("{base}/rules/{j}");
            if opts.coerce_booleans {
                apply_rule(rule, &path, "ride_through_allowed", coerce_bool, log);
            }
            if opts.coerce_numeric_strings {
                for field in NUMBER_FIELDS {
                    apply_rule(rule, &path, field, coerce_number, log);
                }
            }
            if opts.treat_null_as_absent {
                strip_nulls(rule);
            }
        }
    }
}

/// Run `body` over each object in the `data.<key>` array.
fn for_each_entry(
    doc: &mut Map<String, Value>,
    key: &str,
    base_path: &str,
    mut body: impl FnMut(&mut Map<String, Value>, &str),
) {
    let Some(Value::Object(data)) = doc.get_mut("data") else {
        return;
    };
    let Some(Value::Array(entries)) = data.get_mut(key) else {
        return;
    };
    for (i, entry) in entries.iter_mut().enumerate() {
        if let Value::Object(entry) = entry {
            body(entry, &format!("{base_path}/{i}"));
        }
    }
}

fn apply_rule(
    obj: &mut Map<String, Value>,
    path: &str,
    field: &str,
    rule: ValueRule,
    log: &mut Vec<Coercion>,
) {
    let Some(current) = obj.get(field) else {
        return;
    };
    let Some(replacement) = rule(current) else {
        return;
    };
    log.push(Coercion {
        path: path.to_string(),
        field: field.to_string(),
        from_type: json_type_name(current).to_string(),
        to_type: json_type_name(&replacement).to_string(),
        from: current.clone(),
        to: replacement.clone(),
    });
    obj.insert(field.to_string(), replacement);
}

fn strip_nulls(obj: &mut Map<String, Value>) {
    obj.retain(|_, value| !value.is_null());
}
