//! End-to-end orchestrator tests over an in-memory transport.
//!
//! Each test builds a small feed (discovery document plus linked files),
//! runs a full validation, and asserts on the report — the only externally
//! observable artifact of a run.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use feedlint_coerce::CoerceOptions;
use feedlint_fetch::{
    Deadline, FetchError, Fetcher, StaticTransport, Transport, TransportRequest,
    TransportResponse,
};
use feedlint_validator::{Options, Report, Severity, Validator};

const BASE: &str = "https://feed.example";

fn discovery_body(feeds: &[&str]) -> String {
    let links: Vec<Value> = feeds
        .iter()
        .map(|name| json!({"name": name, "url": format!("{BASE}/{name}.json")}))
        .collect();
    json!({
        "last_updated": 1714000000,
        "ttl": 0,
        "version": "3.0",
        "data": {"feeds": links}
    })
    .to_string()
}

fn wrap(data: Value) -> String {
    json!({
        "last_updated": 1714000000,
        "ttl": 60,
        "version": "3.0",
        "data": data
    })
    .to_string()
}

fn system_information_body() -> String {
    wrap(json!({
        "system_id": "demo",
        "languages": ["en"],
        "name": [{"text": "Demo System", "language": "en"}],
        "timezone": "America/New_York",
        "opening_hours": "Mo-Su 00:00-23:59"
    }))
}

fn station_information_body() -> String {
    wrap(json!({"stations": [
        {"station_id": "s1", "name": [{"text": "One", "language": "en"}],
         "lat": 40.7128, "lon": -74.0060},
        {"station_id": "s2", "name": [{"text": "Two", "language": "en"}],
         "lat": 40.7580, "lon": -73.9855}
    ]}))
}

fn station_status_body() -> String {
    wrap(json!({"stations": [
        {"station_id": "s1", "num_vehicles_available": 5, "num_docks_available": 10,
         "is_installed": true, "is_renting": true, "is_returning": true,
         "last_reported": 1714000000},
        {"station_id": "s2", "num_vehicles_available": 3, "num_docks_available": 7,
         "is_installed": true, "is_renting": true, "is_returning": true,
         "last_reported": 1714000000}
    ]}))
}

fn vehicle_types_body() -> String {
    wrap(json!({"vehicle_types": [
        {"vehicle_type_id": "bike1", "form_factor": "bicycle", "propulsion_type": "human",
         "name": [{"text": "Bike", "language": "en"}]},
        {"vehicle_type_id": "ebike1", "form_factor": "bicycle",
         "propulsion_type": "electric_assist", "max_range_meters": 50000,
         "name": [{"text": "E-Bike", "language": "en"}]}
    ]}))
}

fn vehicle_status_body() -> String {
    wrap(json!({"vehicles": [
        {"vehicle_id": "v1", "lat": 40.73, "lon": -73.99, "is_reserved": false,
         "is_disabled": false, "vehicle_type_id": "bike1", "last_reported": 1714000000},
        {"vehicle_id": "v2", "lat": 40.74, "lon": -73.98, "is_reserved": false,
         "is_disabled": false, "vehicle_type_id": "ebike1",
         "current_range_meters": 45000, "last_reported": 1714000000}
    ]}))
}

fn full_feed_transport() -> StaticTransport {
    StaticTransport::new()
        .body(format!("{BASE}/gbfs.json"), discovery_body(&[
            "system_information",
            "station_information",
            "station_status",
            "vehicle_types",
            "vehicle_status",
        ]))
        .body(format!("{BASE}/system_information.json"), system_information_body())
        .body(format!("{BASE}/station_information.json"), station_information_body())
        .body(format!("{BASE}/station_status.json"), station_status_body())
        .body(format!("{BASE}/vehicle_types.json"), vehicle_types_body())
        .body(format!("{BASE}/vehicle_status.json"), vehicle_status_body())
}

fn validator(transport: StaticTransport, options: Options) -> Validator {
    Validator::new(Fetcher::new(Arc::new(transport)), options)
}

fn file<'a>(report: &'a Report, name: &str) -> &'a feedlint_validator::FileReport {
    report
        .files
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("file {name} missing from report"))
}

#[tokio::test]
async fn valid_feed_validates_cleanly() {
    let v = validator(
        full_feed_transport(),
        Options {
            docked: true,
            freefloating: true,
            ..Options::default()
        },
    );
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;

    assert_eq!(report.summary.version.detected, "3.0");
    assert_eq!(report.summary.version.validated, "3.0");
    assert!(
        !report.summary.has_errors,
        "unexpected issues: {:#?}",
        report
            .files
            .iter()
            .flat_map(|f| &f.errors)
            .collect::<Vec<_>>()
    );
    assert_eq!(report.summary.errors_count, 0);

    for name in [
        "gbfs.json",
        "system_information.json",
        "station_information.json",
        "station_status.json",
        "vehicle_status.json",
    ] {
        assert!(file(&report, name).exists, "{name} should exist");
    }
}

#[tokio::test]
async fn missing_required_document_is_reported() {
    let transport = StaticTransport::new().body(
        format!("{BASE}/gbfs.json"),
        discovery_body(&["system_information"]),
    );
    // system_information.json is not mapped, so the transport answers 404.
    let v = validator(transport, Options::default());
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;

    assert!(report.summary.has_errors);
    let si = file(&report, "system_information.json");
    assert!(!si.exists);
    assert!(si.required);
    assert!(si.has_errors);
    assert!(si.errors[0].message.contains("could not be fetched"));
}

#[tokio::test]
async fn dangling_vehicle_type_reference_is_attributed_to_the_vehicle() {
    let transport = StaticTransport::new()
        .body(format!("{BASE}/gbfs.json"), discovery_body(&[
            "system_information",
            "vehicle_types",
            "vehicle_status",
        ]))
        .body(format!("{BASE}/system_information.json"), system_information_body())
        .body(format!("{BASE}/vehicle_types.json"), vehicle_types_body())
        .body(
            format!("{BASE}/vehicle_status.json"),
            wrap(json!({"vehicles": [
                {"vehicle_id": "v1", "is_reserved": false, "is_disabled": false,
                 "vehicle_type_id": "nonexistent_type", "last_reported": 1714000000}
            ]})),
        );
    let v = validator(
        transport,
        Options {
            freefloating: true,
            ..Options::default()
        },
    );
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;

    assert!(report.summary.has_errors);
    let vs = file(&report, "vehicle_status.json");
    let dangling: Vec<_> = vs
        .errors
        .iter()
        .filter(|i| i.severity == Severity::Error && i.message.contains("not found"))
        .collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].instance_path, "/data/vehicles/0/vehicle_type_id");
}

#[tokio::test]
async fn docked_flag_requires_station_documents_the_manifest_never_listed() {
    let transport = StaticTransport::new()
        .body(format!("{BASE}/gbfs.json"), discovery_body(&["system_information"]))
        .body(format!("{BASE}/system_information.json"), system_information_body());
    let v = validator(
        transport,
        Options {
            docked: true,
            ..Options::default()
        },
    );
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;

    for name in ["station_information.json", "station_status.json"] {
        let entry = file(&report, name);
        assert!(entry.required, "{name} should be required");
        assert!(!entry.exists, "{name} should be missing");
        assert!(entry.has_errors, "{name} should carry an error");
        assert!(entry.errors[0].message.contains("not found in autodiscovery"));
    }
    assert!(report.summary.has_errors);
}

#[tokio::test]
async fn stringly_boolean_fails_strict_but_passes_lenient_with_a_logged_coercion() {
    let body = wrap(json!({"stations": [
        {"station_id": "s1", "is_installed": "1", "is_renting": true, "is_returning": true,
         "last_reported": 1714000000}
    ]}));
    let transport = || {
        StaticTransport::new()
            .body(format!("{BASE}/gbfs.json"), discovery_body(&[
                "system_information",
                "station_information",
                "station_status",
            ]))
            .body(format!("{BASE}/system_information.json"), system_information_body())
            .body(format!("{BASE}/station_information.json"), station_information_body())
            .body(format!("{BASE}/station_status.json"), body.clone())
    };

    let strict = validator(
        transport(),
        Options {
            docked: true,
            ..Options::default()
        },
    );
    let report = strict.validate(&format!("{BASE}/gbfs.json")).await;
    let ss = file(&report, "station_status.json");
    assert!(ss.has_errors);
    assert!(
        ss.errors
            .iter()
            .any(|i| i.message == "is_installed must be a boolean")
    );

    let lenient = validator(
        transport(),
        Options {
            docked: true,
            lenient_mode: true,
            coerce: Some(CoerceOptions::lenient()),
            ..Options::default()
        },
    );
    let report = lenient.validate(&format!("{BASE}/gbfs.json")).await;
    let ss = file(&report, "station_status.json");
    assert!(
        !ss.errors
            .iter()
            .any(|i| i.message == "is_installed must be a boolean"),
        "coerced boolean should satisfy the structural rule"
    );
    assert_eq!(ss.coercion_count, 1);

    let summary = report
        .summary
        .coercion_summary
        .as_ref()
        .expect("lenient run with coercions attaches a summary");
    assert_eq!(summary.total_coercions, 1);
    assert_eq!(summary.by_field.get("is_installed"), Some(&1));
}

#[tokio::test]
async fn discovery_falls_back_to_the_conventional_url_once() {
    let transport = full_feed_transport();
    let v = validator(
        transport,
        Options {
            docked: true,
            freefloating: true,
            ..Options::default()
        },
    );
    // The primary URL is not the discovery file and 404s; the fallback
    // derives <base>/gbfs.json, which resolves.
    let report = v.validate(BASE).await;

    let discovery = file(&report, "gbfs.json");
    assert!(discovery.exists);
    assert_eq!(discovery.url.as_deref(), Some(&*format!("{BASE}/gbfs.json")));
    assert!(!report.summary.version_unimplemented);
}

#[tokio::test]
async fn unreachable_discovery_yields_a_shallow_single_file_report() {
    let v = validator(StaticTransport::new(), Options::default());
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;

    assert!(report.summary.version_unimplemented);
    assert_eq!(report.files.len(), 1);
    let discovery = &report.files[0];
    assert!(!discovery.exists);
    assert!(discovery.has_errors);
    assert!(report.summary.has_errors);
}

#[tokio::test]
async fn version_override_takes_precedence_over_the_declared_version() {
    let v = validator(
        full_feed_transport(),
        Options {
            version: Some("2.3".to_string()),
            freefloating: true,
            ..Options::default()
        },
    );
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;

    assert_eq!(report.summary.version.detected, "3.0");
    assert_eq!(report.summary.version.validated, "2.3");
    // 2.3 vocabulary: the availability document is free_bike_status, which
    // this feed does not publish.
    let fbs = file(&report, "free_bike_status.json");
    assert!(fbs.required);
    assert!(!fbs.exists);
}

/// Serves the discovery and station documents instantly; the system
/// information document hangs well past any test deadline.
struct SlowSystemInformation {
    inner: StaticTransport,
}

#[async_trait]
impl Transport for SlowSystemInformation {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError> {
        if request.url.ends_with("/system_information.json") {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        self.inner.send(request).await
    }
}

#[tokio::test]
async fn expired_deadline_keeps_completed_results_and_tags_in_flight_ones() {
    let transport = SlowSystemInformation {
        inner: StaticTransport::new()
            .body(format!("{BASE}/gbfs.json"), discovery_body(&[
                "system_information",
                "station_information",
            ]))
            .body(format!("{BASE}/system_information.json"), system_information_body())
            .body(format!("{BASE}/station_information.json"), station_information_body()),
    };
    let v = Validator::new(
        Fetcher::new(Arc::new(transport)),
        Options::default(),
    );

    let report = v
        .validate_with_deadline(
            &format!("{BASE}/gbfs.json"),
            Deadline::after(Duration::from_millis(300)),
        )
        .await;

    // The fast sibling finished before expiry and keeps its result.
    let si = file(&report, "station_information.json");
    assert!(si.exists);
    assert!(!si.has_errors);

    // The slow worker failed fast instead of hanging.
    let slow = file(&report, "system_information.json");
    assert!(!slow.exists);
    assert!(slow.has_errors);
    assert!(
        slow.errors[0].message.contains("deadline")
            || slow.errors[0].message.contains("timed out"),
        "unexpected failure message: {}",
        slow.errors[0].message
    );
}

#[tokio::test]
async fn report_serializes_with_stable_names_and_omits_empty_lists() {
    let v = validator(
        full_feed_transport(),
        Options {
            docked: true,
            freefloating: true,
            ..Options::default()
        },
    );
    let report = v.validate(&format!("{BASE}/gbfs.json")).await;
    let encoded = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(encoded["summary"]["version"]["detected"], json!("3.0"));
    assert_eq!(encoded["summary"]["hasErrors"], json!(false));
    assert_eq!(encoded["summary"]["errorsCount"], json!(0));
    assert!(encoded["summary"].get("coercionSummary").is_none());

    let files = encoded["files"].as_array().expect("files array");
    assert!(!files.is_empty());
    for entry in files {
        assert!(entry.get("file").is_some());
        // Clean files omit their issue list entirely.
        if entry["hasErrors"] == json!(false) {
            assert!(entry.get("errors").is_none());
        }
    }
}
