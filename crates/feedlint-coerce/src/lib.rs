//! # feedlint-coerce
//!
//! The lenient-mode normalization pipeline. Given raw document bytes and a
//! document kind, rewrites structurally-close-but-type-mismatched values
//! (stringified numbers, 0/1 booleans, malformed timestamps) into canonical
//! types and records every change in an ordered log.
//!
//! The pipeline is pure: same input and options, same output and log. A
//! change is logged if and only if the value's representation actually
//! changed; canonical input passes through untouched with an empty log,
//! which makes coercion idempotent.

pub mod rules;
pub mod value;

use serde_json::{Map, Value};
use thiserror::Error;

use feedlint_types::FeedKind;

pub use rules::coerce_document;
pub use value::{
    coerce_bool, coerce_coordinate, coerce_int, coerce_number, coerce_timestamp, json_type_name,
};

/// Independently toggleable coercion switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoerceOptions {
    pub coerce_booleans: bool,
    pub coerce_timestamps: bool,
    pub coerce_numeric_strings: bool,
    pub coerce_coordinates: bool,
    pub treat_null_as_absent: bool,
}

impl CoerceOptions {
    /// Everything on: the lenient-mode default.
    pub fn lenient() -> Self {
        Self {
            coerce_booleans: true,
            coerce_timestamps: true,
            coerce_numeric_strings: true,
            coerce_coordinates: true,
            treat_null_as_absent: true,
        }
    }

    /// Everything off.
    pub fn strict() -> Self {
        Self::default()
    }
}

/// One applied normalization.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coercion {
    /// Slash-delimited pointer to the containing object; empty at top level.
    pub path: String,
    pub field: String,
    pub from_type: String,
    pub to_type: String,
    pub from: Value,
    pub to: Value,
}

/// Coerced bytes plus the ordered change log.
#[derive(Debug, Clone)]
pub struct Coerced {
    pub data: Vec<u8>,
    pub log: Vec<Coercion>,
}

/// Coercion failures. Only unparsable input is an error; uncoercible
/// values are simply left alone for the validator to complain about.
#[derive(Debug, Error)]
pub enum CoerceError {
    #[error("failed to parse document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize coerced document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Normalize a document of the given kind.
pub fn coerce(raw: &[u8], kind: FeedKind, opts: &CoerceOptions) -> Result<Coerced, CoerceError> {
    let mut doc: Map<String, Value> =
        serde_json::from_slice(raw).map_err(CoerceError::Parse)?;

    let mut log = Vec::new();
    coerce_document(&mut doc, kind, opts, &mut log);

    let data = serde_json::to_vec(&Value::Object(doc)).map_err(CoerceError::Serialize)?;
    Ok(Coerced { data, log })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(raw: &str, kind: FeedKind) -> Coerced {
        coerce(raw.as_bytes(), kind, &CoerceOptions::lenient()).expect("coercion succeeds")
    }

    #[test]
    fn rejects_unparsable_input() {
        let err = coerce(b"{not json", FeedKind::StationStatus, &CoerceOptions::lenient());
        assert!(matches!(err, Err(CoerceError::Parse(_))));
    }

    #[test]
    fn canonical_document_yields_empty_log() {
        let raw = r#"{
            "last_updated": 1714000000,
            "ttl": 60,
            "version": "2.3",
            "data": {"stations": [
                {"station_id": "s1", "is_installed": true, "num_docks_available": 4}
            ]}
        }"#;
        let out = lenient(raw, FeedKind::StationStatus);
        assert!(out.log.is_empty(), "unexpected coercions: {:?}", out.log);
    }

    #[test]
    fn coercion_is_idempotent() {
        let raw = r#"{
            "last_updated": "2024-01-02 03:04:05",
            "ttl": "60",
            "data": {"stations": [
                {"station_id": "s1", "is_installed": "1", "num_bikes_available": "3",
                 "last_reported": 1714000000.5, "legacy_field": null}
            ]}
        }"#;
        let first = lenient(raw, FeedKind::StationStatus);
        assert!(!first.log.is_empty());

        let second = coerce(
            &first.data,
            FeedKind::StationStatus,
            &CoerceOptions::lenient(),
        )
        .expect("second pass succeeds");
        assert!(second.log.is_empty(), "second pass coerced: {:?}", second.log);
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn boolean_strings_are_normalized_and_logged() {
        let raw = r#"{"last_updated": 1, "ttl": 0,
            "data": {"stations": [{"station_id": "s1", "is_installed": "1", "is_renting": "no"}]}}"#;
        let out = lenient(raw, FeedKind::StationStatus);
        assert_eq!(out.log.len(), 2);
        assert_eq!(out.log[0].field, "is_installed");
        assert_eq!(out.log[0].from_type, "string");
        assert_eq!(out.log[0].to_type, "boolean");
        assert_eq!(out.log[0].to, Value::Bool(true));
        assert_eq!(out.log[1].to, Value::Bool(false));

        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        assert_eq!(doc["data"]["stations"][0]["is_installed"], Value::Bool(true));
    }

    #[test]
    fn null_fields_are_dropped_from_entries() {
        let raw = r#"{"last_updated": 1, "ttl": 0,
            "data": {"stations": [{"station_id": "s1", "num_docks_available": null}]}}"#;
        let out = lenient(raw, FeedKind::StationStatus);
        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        assert!(doc["data"]["stations"][0].get("num_docks_available").is_none());
    }

    #[test]
    fn disabled_toggle_leaves_values_alone() {
        let raw = r#"{"last_updated": 1, "ttl": 0,
            "data": {"stations": [{"station_id": "s1", "is_installed": "1"}]}}"#;
        let opts = CoerceOptions {
            coerce_booleans: false,
            ..CoerceOptions::lenient()
        };
        let out = coerce(raw.as_bytes(), FeedKind::StationStatus, &opts).unwrap();
        assert!(out.log.is_empty());
        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        assert_eq!(
            doc["data"]["stations"][0]["is_installed"],
            Value::String("1".to_string())
        );
    }

    #[test]
    fn coordinates_widen_integers_and_parse_strings() {
        let raw = r#"{"last_updated": 1, "ttl": 0,
            "data": {"stations": [{"station_id": "s1", "lat": 40, "lon": "-74.006"}]}}"#;
        let out = lenient(raw, FeedKind::StationInformation);
        assert_eq!(out.log.len(), 2);
        assert_eq!(out.log[0].from_type, "integer");
        assert_eq!(out.log[0].to_type, "float");
        assert_eq!(out.log[1].from_type, "string");

        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        assert!(doc["data"]["stations"][0]["lat"].is_f64());
        assert_eq!(doc["data"]["stations"][0]["lon"].as_f64(), Some(-74.006));
    }

    #[test]
    fn alternate_timestamp_formats_become_epoch_seconds() {
        let raw = r#"{"last_updated": "2024-04-24 23:06:40", "ttl": 0, "data": {}}"#;
        let out = lenient(raw, FeedKind::SystemInformation);
        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        assert_eq!(doc["last_updated"].as_i64(), Some(1714000000));
        assert_eq!(out.log[0].field, "last_updated");
    }

    #[test]
    fn rfc3339_timestamps_are_left_as_strings() {
        let raw = r#"{"last_updated": "2024-04-24T23:06:40Z", "ttl": 0, "data": {}}"#;
        let out = lenient(raw, FeedKind::SystemInformation);
        assert!(out.log.is_empty());
        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        assert_eq!(
            doc["last_updated"].as_str(),
            Some("2024-04-24T23:06:40Z")
        );
    }

    #[test]
    fn geofencing_rule_objects_are_normalized() {
        let raw = r#"{"last_updated": 1, "ttl": 0, "data": {"geofencing_zones": {
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "properties": {"rules": [
                {"ride_through_allowed": 0, "maximum_speed_kph": "25"}
            ]}}]
        }}}"#;
        let out = lenient(raw, FeedKind::GeofencingZones);
        assert_eq!(out.log.len(), 2);
        assert_eq!(
            out.log[0].path,
            "/data/geofencing_zones/features/0/properties/rules/0"
        );
        let doc: Value = serde_json::from_slice(&out.data).unwrap();
        let rule = &doc["data"]["geofencing_zones"]["features"][0]["properties"]["rules"][0];
        assert_eq!(rule["ride_through_allowed"], Value::Bool(false));
        assert_eq!(rule["maximum_speed_kph"].as_i64(), Some(25));
    }
}
