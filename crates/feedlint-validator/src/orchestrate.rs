//! The orchestrator: discovery, concurrent per-document work, aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use feedlint_coerce::CoerceOptions;
use feedlint_fetch::{Deadline, FetchOutcome, Fetcher, build_feed_url};
use feedlint_types::{DiscoveryFeed, FeedKind};
use feedlint_version::{DeploymentFlags, is_discovery_required, requirements};

use crate::crossref::cross_validate;
use crate::report::{FileReport, Issue, Report, Summary, VersionInfo};
use crate::structural::{validate_discovery_structure, validate_structure};

const DISCOVERY_FILE: &str = "gbfs.json";

/// Run configuration.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub docked: bool,
    pub freefloating: bool,
    /// Overrides the version declared in the discovery document.
    pub version: Option<String>,
    pub lenient_mode: bool,
    /// Coercion toggles for lenient mode; `None` means all of them.
    pub coerce: Option<CoerceOptions>,
}

impl Options {
    fn flags(&self) -> DeploymentFlags {
        DeploymentFlags {
            docked: self.docked,
            freefloating: self.freefloating,
        }
    }

    fn coerce_options(&self) -> Option<CoerceOptions> {
        if self.lenient_mode {
            Some(self.coerce.unwrap_or_else(CoerceOptions::lenient))
        } else {
            None
        }
    }
}

/// Validates one feed end to end.
pub struct Validator {
    fetcher: Arc<Fetcher>,
    options: Options,
}

impl Validator {
    pub fn new(fetcher: Fetcher, options: Options) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            options,
        }
    }

    /// Validate without a run deadline.
    pub async fn validate(&self, discovery_url: &str) -> Report {
        self.validate_with_deadline(discovery_url, Deadline::none())
            .await
    }

    /// Validate with a cooperative run deadline: workers still in flight
    /// when it expires publish failure-tagged results instead of hanging.
    pub async fn validate_with_deadline(&self, discovery_url: &str, deadline: Deadline) -> Report {
        info!(url = discovery_url, "starting feed validation");
        let mut report = Report {
            summary: Summary {
                validator_version: env!("CARGO_PKG_VERSION").to_string(),
                lenient_mode: self.options.lenient_mode,
                ..Summary::default()
            },
            files: Vec::new(),
        };

        let (discovery_report, feed) = self.validate_discovery(discovery_url, deadline).await;
        report.files.push(discovery_report);
        let Some(feed) = feed else {
            // Without the discovery document the feed version cannot be
            // determined and the run stops at depth one.
            warn!(url = discovery_url, "discovery document unusable, shallow report");
            report.summary.version_unimplemented = true;
            report.finalize(self.options.lenient_mode);
            return report;
        };

        let detected = if feed.version.is_empty() {
            feedlint_version::DEFAULT_VERSION.to_string()
        } else {
            feed.version.clone()
        };
        let validated = self
            .options
            .version
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| detected.clone());
        report.summary.version = VersionInfo {
            detected,
            validated: validated.clone(),
        };

        let feed_urls = feed.data.url_map();
        let reqs = requirements(&validated, self.options.flags());
        let order: Vec<String> = reqs.iter().map(|r| r.name.to_string()).collect();

        let mut tasks = JoinSet::new();
        for req in reqs {
            let fetcher = self.fetcher.clone();
            let coerce_opts = self.options.coerce_options();
            let url = feed_urls.get(req.name).cloned();
            tasks.spawn(async move {
                let result =
                    validate_file(fetcher, req.name, req.required, url, coerce_opts, deadline)
                        .await;
                (req.name.to_string(), result)
            });
        }

        // Join barrier: cross-reference validation needs the full set.
        let mut results = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, result)) => {
                    results.insert(name, result);
                }
                Err(e) => warn!(error = %e, "validation task panicked"),
            }
        }

        let mut results = cross_validate(results, &validated);

        // Stable output order: requirement order, then synthesized entries.
        for name in &order {
            if let Some(result) = results.remove(name) {
                report.files.push(result);
            }
        }
        for (_, result) in results {
            report.files.push(result);
        }

        report.finalize(self.options.lenient_mode);
        info!(
            errors = report.summary.errors_count,
            has_errors = report.summary.has_errors,
            "feed validation finished"
        );
        report
    }

    /// Fetch and validate the discovery document, with the single
    /// conventional-URL fallback.
    async fn validate_discovery(
        &self,
        url: &str,
        deadline: Deadline,
    ) -> (FileReport, Option<DiscoveryFeed>) {
        let mut result = FileReport {
            url: Some(url.to_string()),
            recommended: true,
            ..FileReport::new(DISCOVERY_FILE, true)
        };

        let mut outcome = self.fetcher.fetch(url, deadline).await;
        if !outcome.exists() && !url.ends_with(DISCOVERY_FILE) {
            let alternate = build_feed_url(url, "gbfs");
            debug!(url = %alternate, "retrying discovery at conventional URL");
            let retried = self.fetcher.fetch(&alternate, deadline).await;
            if retried.exists() {
                result.url = Some(alternate);
            }
            outcome = retried;
        }

        let body = match outcome {
            FetchOutcome::Found { body, .. } => body,
            _ => {
                result.exists = false;
                let required =
                    is_discovery_required(self.options.version.as_deref().unwrap_or_default());
                if required {
                    result.push_issue(Issue::error("gbfs.json is required but not found", ""));
                } else if let Some(failure) = outcome.failure() {
                    result.push_issue(Issue::error(
                        format!("gbfs.json could not be fetched: {failure}"),
                        "",
                    ));
                }
                return (result, None);
            }
        };

        result.exists = true;
        let feed: DiscoveryFeed = match serde_json::from_slice(&body) {
            Ok(feed) => feed,
            Err(e) => {
                result.push_issue(Issue::error(format!("Failed to parse gbfs.json: {e}"), ""));
                result.body = Some(body);
                return (result, None);
            }
        };

        result.push_issues(validate_discovery_structure(&feed));
        result.body = Some(body);
        (result, Some(feed))
    }
}

/// One worker: fetch → (lenient) coerce → structural validation.
async fn validate_file(
    fetcher: Arc<Fetcher>,
    name: &str,
    required: bool,
    url: Option<String>,
    coerce_opts: Option<CoerceOptions>,
    deadline: Deadline,
) -> FileReport {
    let mut result = FileReport::new(format!("{name}.json"), required);
    let kind = FeedKind::from_name(name);

    let Some(url) = url else {
        result.exists = false;
        if required {
            result.push_issue(Issue::error(
                format!("Required file {name}.json not found in autodiscovery"),
                "",
            ));
        }
        return result;
    };
    result.url = Some(url.clone());

    let body = match fetcher.fetch(&url, deadline).await {
        FetchOutcome::Found { body, .. } => body,
        FetchOutcome::NotFound { .. } => {
            result.exists = false;
            if required {
                result.push_issue(Issue::error(
                    format!("Required file {name}.json could not be fetched: not found"),
                    "",
                ));
            }
            return result;
        }
        FetchOutcome::Failed(failure) => {
            result.exists = false;
            let message = if required {
                format!("Required file {name}.json could not be fetched: {failure}")
            } else {
                format!("{name}.json could not be fetched: {failure}")
            };
            result.push_issue(Issue::error(message, ""));
            return result;
        }
    };

    result.exists = true;

    let mut to_validate = body.clone();
    if let (Some(opts), Some(kind)) = (coerce_opts, kind) {
        // Coercion failure means unparsable input; fall through and let the
        // structural pass report it against the raw bytes.
        if let Ok(coerced) = feedlint_coerce::coerce(&body, kind, &opts) {
            result.coercion_count = coerced.log.len();
            result.coercions = coerced.log;
            to_validate = coerced.data;
        }
    }

    result.push_issues(validate_structure(&to_validate, kind));
    result.body = Some(body);
    result
}
