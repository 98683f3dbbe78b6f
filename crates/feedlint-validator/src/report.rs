//! Issues, per-file results, and the run-level report.
//!
//! The report is the only externally observable artifact of a run. Field
//! names are stable camelCase; empty issue lists and zero counts are
//! omitted to keep serialized reports compact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use feedlint_coerce::Coercion;

/// Issue severity. Ordered so `Error` compares greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One validation finding, traceable to an exact document location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    /// Slash-delimited pointer, including array indices; empty for
    /// document-level findings.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_path: String,
}

impl Issue {
    pub fn error(message: impl Into<String>, instance_path: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            instance_path: instance_path.into(),
        }
    }

    pub fn warning(message: impl Into<String>, instance_path: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            instance_path: instance_path.into(),
        }
    }
}

/// Validation result for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// The document file name (`<feed>.json`).
    #[serde(rename = "file")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recommended: bool,
    pub exists: bool,
    pub has_errors: bool,
    pub errors_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Issue>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub coercion_count: usize,
    /// Raw fetched bytes; cross-reference validation reads these.
    #[serde(skip)]
    pub body: Option<Vec<u8>>,
    /// The coercion log, folded into the report-level summary.
    #[serde(skip)]
    pub coercions: Vec<Coercion>,
}

fn is_zero(count: &usize) -> bool {
    *count == 0
}

impl FileReport {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            ..Self::default()
        }
    }

    /// Record one issue. Every recorded issue counts toward the aggregate,
    /// whatever its severity; nothing is silently dropped.
    pub fn push_issue(&mut self, issue: Issue) {
        self.has_errors = true;
        self.errors_count += 1;
        self.errors.push(issue);
    }

    pub fn push_issues(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.push_issue(issue);
        }
    }
}

/// Detected vs. validated feed version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub detected: String,
    pub validated: String,
}

/// Aggregate coercion counts for a lenient run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoercionSummary {
    pub total_coercions: usize,
    pub by_field: BTreeMap<String, usize>,
}

/// The run-level summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub validator_version: String,
    pub version: VersionInfo,
    pub has_errors: bool,
    pub errors_count: usize,
    /// Set when the discovery document could not be retrieved or parsed,
    /// so the feed version could not be determined.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub version_unimplemented: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub lenient_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coercion_summary: Option<CoercionSummary>,
}

/// The full validation report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

impl Report {
    /// Fold per-file state into the summary totals.
    pub fn finalize(&mut self, lenient: bool) {
        let mut total_coercions = 0;
        let mut by_field: BTreeMap<String, usize> = BTreeMap::new();

        for file in &self.files {
            if file.has_errors {
                self.summary.has_errors = true;
            }
            self.summary.errors_count += file.errors_count;
            total_coercions += file.coercion_count;
            for coercion in &file.coercions {
                *by_field.entry(coercion.field.clone()).or_default() += 1;
            }
        }

        if lenient && total_coercions > 0 {
            self.summary.coercion_summary = Some(CoercionSummary {
                total_coercions,
                by_field,
            });
        }
    }
}
