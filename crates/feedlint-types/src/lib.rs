//! # feedlint-types
//!
//! Typed document model for multi-file shared-mobility feeds.
//!
//! This crate provides:
//! - `FeedKind`: the closed set of document kinds, the dispatch key for
//!   coercion and structural rule tables
//! - `Timestamp`: dual-representation timestamps (RFC3339 string or POSIX int)
//! - `LocalizedName`: tolerant of legacy single-string and localized-list names
//! - serde structs for every document payload
//!
//! Decoding is intentionally forgiving: every field defaults when absent so
//! that a structurally broken document still yields a usable partial value.
//! Structural complaints are the validator's job, not the decoder's.

pub mod discovery;
pub mod geofence;
pub mod kind;
pub mod station;
pub mod system;
pub mod text;
pub mod timestamp;
pub mod vehicle;

pub use discovery::{DiscoveryData, DiscoveryFeed, FeedLink};
pub use geofence::{GeofencingZones, ZoneFeature, ZoneRule};
pub use kind::FeedKind;
pub use station::{
    Station, StationInformation, StationStatus, StationStatusEntry,
};
pub use system::{
    Manifest, PricingPlan, SystemAlerts, SystemInformation, SystemPricingPlans, SystemRegions,
    VersionList,
};
pub use text::LocalizedName;
pub use timestamp::Timestamp;
pub use vehicle::{Vehicle, VehicleStatus, VehicleType, VehicleTypes};
