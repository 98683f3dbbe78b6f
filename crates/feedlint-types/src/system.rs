//! System-level documents: information, pricing, regions, alerts, versions.

use serde::Deserialize;

use crate::text::LocalizedName;
use crate::timestamp::Timestamp;

/// system_information.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInformation {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: SystemInformationData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInformationData {
    #[serde(default)]
    pub system_id: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub name: Option<LocalizedName>,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub feed_contact_email: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
}

/// system_pricing_plans.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemPricingPlans {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: PricingPlansData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingPlansData {
    #[serde(default)]
    pub plans: Vec<PricingPlan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingPlan {
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub name: Option<LocalizedName>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_taxable: Option<bool>,
    #[serde(default)]
    pub description: Option<LocalizedName>,
}

/// system_regions.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemRegions {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: RegionsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionsData {
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub region_id: String,
    #[serde(default)]
    pub name: Option<LocalizedName>,
}

/// system_alerts.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemAlerts {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: AlertsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsData {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub alert_id: String,
    #[serde(default, rename = "type")]
    pub alert_type: String,
    #[serde(default)]
    pub station_ids: Vec<String>,
    #[serde(default)]
    pub region_ids: Vec<String>,
    #[serde(default)]
    pub summary: Option<LocalizedName>,
}

/// manifest.json (3.0+): datasets grouped by publisher system.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: ManifestData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestData {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub system_id: String,
    #[serde(default)]
    pub versions: Vec<DatasetVersion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetVersion {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub url: String,
}

/// gbfs_versions.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionList {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: VersionListData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionListData {
    #[serde(default)]
    pub versions: Vec<PublishedVersion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishedVersion {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub url: String,
}
