//! # feedlint-validator
//!
//! The validation engine.
//!
//! ```text
//! discovery document (gbfs.json)
//!     │  resolve declared documents + effective version
//!     ▼
//! one task per document: fetch → [coerce] → structural rules
//!     │  join barrier
//!     ▼
//! cross-reference validation (pure, single-threaded)
//!     │
//!     ▼
//! Report { summary, files }
//! ```
//!
//! Structural rules are per-kind and purely local to one document.
//! Cross-reference validation is the only phase that reads across
//! documents, so it runs after every fetch task has completed, as a pure
//! function from the aggregated results to a new aggregate.

pub mod crossref;
pub mod orchestrate;
pub mod report;
pub mod structural;

pub use orchestrate::{Options, Validator};
pub use report::{
    CoercionSummary, FileReport, Issue, Report, Severity, Summary, VersionInfo,
};
pub use structural::{validate_discovery_structure, validate_structure};
