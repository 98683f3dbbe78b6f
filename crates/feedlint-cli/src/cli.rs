use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "feedlint",
    about = "Feedlint: version-aware validation for multi-file shared-mobility feeds",
    version
)]
pub struct Cli {
    /// Discovery URL of the feed to validate (its gbfs.json, or a base URL)
    pub url: String,

    /// Validate against this feed version instead of the declared one
    #[arg(long)]
    pub feed_version: Option<String>,

    /// Require station-based (docked) documents
    #[arg(long)]
    pub docked: bool,

    /// Require free-floating vehicle documents
    #[arg(long)]
    pub freefloating: bool,

    /// Enable lenient mode: coerce 0/1 booleans, numeric strings,
    /// malformed timestamps before validation
    #[arg(long)]
    pub lenient: bool,

    /// Lenient mode: leave stringy booleans alone
    #[arg(long)]
    pub no_coerce_booleans: bool,

    /// Lenient mode: leave malformed timestamps alone
    #[arg(long)]
    pub no_coerce_timestamps: bool,

    /// Lenient mode: leave numeric strings alone
    #[arg(long)]
    pub no_coerce_numeric_strings: bool,

    /// Lenient mode: leave stringy coordinates alone
    #[arg(long)]
    pub no_coerce_coordinates: bool,

    /// Lenient mode: keep null-valued fields instead of dropping them
    #[arg(long)]
    pub keep_nulls: bool,

    /// Path to a JSON authentication config
    #[arg(long)]
    pub auth_config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Overall run deadline in seconds; in-flight fetches fail fast once
    /// it expires and the report carries partial results
    #[arg(long)]
    pub run_timeout_secs: Option<u64>,

    /// Output the full report as JSON
    #[arg(long)]
    pub json: bool,
}
