//! Probe configuration.
//!
//! Provides [`ProbeConfig`], loaded from environment variables and then
//! overridden by command-line flags in the binary.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Runtime configuration for a probe run.
///
/// # Examples
///
/// ```
/// use grantprobe_core::ProbeConfig;
///
/// let config = ProbeConfig::default();
/// assert!(config.region.is_none());
/// assert!(config.color);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    /// Region override; `None` defers to the SDK's region chain.
    #[builder(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3 and STS (e.g. a local emulator).
    #[builder(default)]
    pub endpoint_url: Option<String>,

    /// Use path-style S3 addressing.
    #[builder(default = false)]
    pub force_path_style: bool,

    /// Colorize console output.
    #[builder(default = true)]
    pub color: bool,

    /// Log level filter string (e.g. `"warn"`, `"debug"`).
    #[builder(default = String::from("warn"))]
    pub log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            force_path_style: false,
            color: true,
            log_level: String::from("warn"),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `DEFAULT_REGION` | `region` (the SDK's own `AWS_REGION` still applies when unset) |
    /// | `AWS_ENDPOINT_URL` | `endpoint_url` |
    /// | `S3_FORCE_PATH_STYLE` | `force_path_style` |
    /// | `NO_COLOR` | disables `color` when set to any non-empty value |
    /// | `LOG_LEVEL` | `log_level` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("DEFAULT_REGION") {
            config.region = Some(v);
        }
        if let Some(v) = lookup("AWS_ENDPOINT_URL") {
            config.endpoint_url = Some(v);
        }
        if let Some(v) = lookup("S3_FORCE_PATH_STYLE") {
            config.force_path_style = parse_bool(&v);
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.color = false;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
