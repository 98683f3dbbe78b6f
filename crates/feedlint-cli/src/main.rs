//! Feedlint CLI: the `feedlint` command.

mod cli;

use clap::Parser;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use feedlint_coerce::CoerceOptions;
use feedlint_fetch::{AuthConfig, Deadline, Fetcher, HttpTransport};
use feedlint_validator::{Options, Report, Validator};

use cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let auth = match &cli.auth_config {
        None => AuthConfig::None,
        Some(path) => {
            let bytes = std::fs::read(path).unwrap_or_else(|err| {
                eprintln!("error: failed to read auth config {}: {err}", path.display());
                std::process::exit(2);
            });
            serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                eprintln!("error: failed to parse auth config {}: {err}", path.display());
                std::process::exit(2);
            })
        }
    };

    let fetcher = Fetcher::new(Arc::new(HttpTransport::new()))
        .with_auth(auth)
        .with_request_timeout(Duration::from_secs(cli.timeout_secs));

    let coerce = CoerceOptions {
        coerce_booleans: !cli.no_coerce_booleans,
        coerce_timestamps: !cli.no_coerce_timestamps,
        coerce_numeric_strings: !cli.no_coerce_numeric_strings,
        coerce_coordinates: !cli.no_coerce_coordinates,
        treat_null_as_absent: !cli.keep_nulls,
    };
    let options = Options {
        docked: cli.docked,
        freefloating: cli.freefloating,
        version: cli.feed_version.clone(),
        lenient_mode: cli.lenient,
        coerce: cli.lenient.then_some(coerce),
    };

    let deadline = match cli.run_timeout_secs {
        Some(secs) => Deadline::after(Duration::from_secs(secs)),
        None => Deadline::none(),
    };

    let validator = Validator::new(fetcher, options);
    let report = validator.validate_with_deadline(&cli.url, deadline).await;

    if cli.json {
        let rendered = serde_json::to_string_pretty(&report).unwrap_or_else(|err| {
            eprintln!("error: failed to render report json: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
    } else {
        print_report(&cli, &report);
    }

    if report.summary.has_errors {
        std::process::exit(1);
    }
}

fn print_report(cli: &Cli, report: &Report) {
    println!("Validating feed: {}", cli.url);
    if cli.lenient {
        println!("Mode: LENIENT (data coercion enabled)");
    }
    println!("================================");
    println!(
        "Version: detected={}, validated={}",
        report.summary.version.detected, report.summary.version.validated
    );

    if report.summary.has_errors {
        println!("Status: INVALID ({} errors)", report.summary.errors_count);
    } else {
        println!("Status: VALID");
    }

    if let Some(summary) = &report.summary.coercion_summary {
        println!("Coercions applied: {}", summary.total_coercions);
    }

    println!();
    println!("Files:");
    for file in &report.files {
        let status = if file.has_errors {
            "✗"
        } else if file.exists {
            "✓"
        } else if file.required {
            "✗ MISSING (required)"
        } else {
            "- (optional, not present)"
        };

        let coercions = if file.coercion_count > 0 {
            format!(" [{} coercions]", file.coercion_count)
        } else {
            String::new()
        };

        println!("  {status} {}{coercions}", file.name);

        if file.has_errors {
            // First five unique messages per file keeps noisy feeds readable.
            let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
            for issue in &file.errors {
                let count = {
                    let entry = seen.entry(issue.message.as_str()).or_insert(0);
                    *entry += 1;
                    *entry
                };
                if count == 1 && seen.len() <= 5 {
                    println!("      {:?}: {}", issue.severity, issue.message);
                }
            }
            if seen.len() > 5 {
                println!("      ... and {} more unique issue types", seen.len() - 5);
            }
        }
    }
}
