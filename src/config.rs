use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::builtin::ProbeParams;

/// Top-level configuration from `.apilens.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# apilens configuration

[fetch]
# Timeout for the single GET issued per scanned endpoint.
timeout_secs = 10

[rules]
# Rule names to skip entirely.
# disabled = ["versioning"]

[rules.latency]
threshold_ms = 500

[rules.payload]
max_bytes = 512000

# The active probe sends a burst of real requests against the target to
# test rate limiting empirically. Off unless you opt in here or via
# `apilens scan --active`.
[probe]
enabled = false
request_count = 10
timeout_secs = 3
delay_ms = 0
"#
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule names to skip entirely.
    #[serde(default)]
    pub disabled: HashSet<String>,
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub payload: PayloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_latency_threshold_ms")]
    pub threshold_ms: u64,
}

impl LatencyConfig {
    pub fn threshold(&self) -> Duration {
        Duration::from_millis(self.threshold_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            threshold_ms: default_latency_threshold_ms(),
        }
    }
}

fn default_latency_threshold_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadConfig {
    #[serde(default = "default_payload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_payload_max_bytes(),
        }
    }
}

fn default_payload_max_bytes() -> usize {
    500 * 1024
}

/// Active probe settings. Zero counts and timeouts fall back to the rule's
/// defaults at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub request_count: usize,
    #[serde(default)]
    pub timeout_secs: u64,
    #[serde(default)]
    pub delay_ms: u64,
}

impl ProbeConfig {
    pub fn params(&self) -> ProbeParams {
        ProbeParams {
            request_count: self.request_count,
            per_request_timeout: Duration::from_secs(self.timeout_secs),
            inter_dispatch_delay: Duration::from_millis(self.delay_ms),
        }
        .normalized()
    }
}
