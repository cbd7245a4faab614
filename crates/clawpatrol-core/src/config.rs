//! Configuration types for clawpatrol.
//!
//! [`Config::load`] layers, lowest to highest precedence:
//!
//! 1. the embedded defaults below,
//! 2. `CLAWPATROL_*` environment variables (`CLAWPATROL_LOG_PATHS` is a
//!    comma-separated list),
//! 3. `RUNREVEAL_WEBHOOK_URL` for the collector endpoint.
//!
//! No configuration file is read. [`Config::from_env`] takes the variables as
//! an explicit map so tests never touch the process environment.

use crate::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable naming the collector webhook.
pub const WEBHOOK_ENV: &str = "RUNREVEAL_WEBHOOK_URL";

/// Prefix for every other environment override.
pub const ENV_PREFIX: &str = "CLAWPATROL";

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
source             = "clawpatrol-soc"
poll_interval_ms   = 1000
request_timeout_ms = 10000
log_paths          = []
"#;

/// Log files watched when none are configured, relative to `$HOME`.
const DEFAULT_LOG_PATHS: &[&str] = &[
    ".openclaw/logs/gateway.log",
    ".openclaw/logs/sessions.log",
    ".openclaw/logs/reveald.log",
    ".openclaw/workspace/logs/reveald.log",
];

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    webhook_url: Option<String>,
    source: String,
    poll_interval_ms: u64,
    request_timeout_ms: u64,
    #[serde(default)]
    log_paths: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Public config type
// ---------------------------------------------------------------------------

/// Validated runtime configuration, passed by reference into the supervisor
/// and the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Absolute `http`/`https` URL events are POSTed to.
    pub webhook_url: String,
    /// Agent identifier stamped into every payload envelope.
    pub source: String,
    /// How often each monitored file is stat'ed.
    pub poll_interval: Duration,
    /// Upper bound on a single delivery attempt.
    pub request_timeout: Duration,
    /// Files to monitor. Paths missing at startup are skipped.
    pub log_paths: Vec<PathBuf>,
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(std::env::vars().collect())
    }

    /// Load from an explicit set of environment variables.
    pub fn from_env(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let webhook_url = vars
            .get(WEBHOOK_ENV)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let home = vars.get("HOME").cloned();

        let mut raw: RawConfig = defaults()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("log_paths")
                    .source(Some(vars)),
            )
            .set_override_option("webhook_url", webhook_url)?
            .build()?
            .try_deserialize()?;

        let webhook_url = parse_webhook_url(raw.webhook_url.take())?;
        let log_paths = if raw.log_paths.is_empty() {
            default_log_paths(home.as_deref())?
        } else {
            std::mem::take(&mut raw.log_paths)
        };

        Ok(Self::assemble(raw, webhook_url, log_paths))
    }

    /// Built-in defaults around an explicit endpoint, with no log paths.
    pub fn with_webhook_url(webhook_url: impl Into<String>) -> Result<Self, ConfigError> {
        let mut raw: RawConfig = defaults()
            .set_override("webhook_url", webhook_url.into())?
            .build()?
            .try_deserialize()?;

        let webhook_url = parse_webhook_url(raw.webhook_url.take())?;
        Ok(Self::assemble(raw, webhook_url, Vec::new()))
    }

    fn assemble(raw: RawConfig, webhook_url: String, log_paths: Vec<PathBuf>) -> Self {
        Self {
            webhook_url,
            source: raw.source,
            poll_interval: Duration::from_millis(raw.poll_interval_ms),
            request_timeout: Duration::from_millis(raw.request_timeout_ms),
            log_paths,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn defaults() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
}

/// Parse the endpoint and return it in normalised form, which is what the
/// sink later parses as a request URI.
fn parse_webhook_url(raw: Option<String>) -> Result<String, ConfigError> {
    let raw = raw.ok_or(ConfigError::MissingWebhookUrl)?;
    let invalid = |reason: String| ConfigError::InvalidWebhookUrl {
        url: raw.clone(),
        reason,
    };

    let url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url.into())
}

fn default_log_paths(home: Option<&str>) -> Result<Vec<PathBuf>, ConfigError> {
    let home = home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::NoLogPaths)?;
    Ok(DEFAULT_LOG_PATHS.iter().map(|p| home.join(p)).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
