//! Dashboard configuration file support.
//!
//! Configuration lives in a TOML file (`ops.toml`). Every field has a default,
//! so an empty file, or no file at all, yields a working configuration. A few
//! deployment settings can be overridden from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::DataFormat;

/// Errors raised while reading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ai: AiSettings,
    #[serde(default)]
    pub filters: FilterSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    /// Date analyses default to when a request carries none.
    #[serde(default = "default_report_date")]
    pub report_date: NaiveDate,
    /// First date of the generated data; derived from the store when unset.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub format: DataFormat,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            report_date: default_report_date(),
            start_date: None,
            end_date: None,
            format: DataFormat::default(),
        }
    }
}

/// Thresholds used by the metrics calculator, anomaly detector and reasoning engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Queue-time compliance target, in percent.
    #[serde(default = "default_compliance_target")]
    pub compliance_target: f64,
    /// Width of the near-target band below the compliance target, in points.
    #[serde(default = "default_near_target_band")]
    pub near_target_band: f64,
    /// Security reject rate above which a lane is flagged, in percent.
    #[serde(default = "default_high_reject_threshold")]
    pub high_reject_threshold: f64,
    /// Compliments-per-complaint ratio separating Good from NeedsAttention.
    #[serde(default = "default_voc_sentiment_threshold")]
    pub voc_sentiment_threshold: f64,
    /// Quantile of cleared volume below which a lane is low-throughput.
    #[serde(default = "default_low_throughput_percentile")]
    pub low_throughput_percentile: f64,
    /// Compliments-per-complaint ratio below which a feedback row is anomalous.
    #[serde(default = "default_voc_anomaly_ratio")]
    pub voc_anomaly_ratio: f64,
    /// Time windows below this compliance are reported as worst windows.
    #[serde(default = "default_worst_window_threshold")]
    pub worst_window_threshold: f64,
    /// Variance at or above this is a Low severity queue anomaly.
    #[serde(default = "default_low_severity_floor")]
    pub low_severity_floor: f64,
    /// Variance at or above this (and below the low floor) is Medium.
    #[serde(default = "default_medium_severity_floor")]
    pub medium_severity_floor: f64,
    #[serde(default = "default_otp_target")]
    pub otp_target: f64,
    #[serde(default = "default_baggage_delivery_target")]
    pub baggage_delivery_target: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            compliance_target: default_compliance_target(),
            near_target_band: default_near_target_band(),
            high_reject_threshold: default_high_reject_threshold(),
            voc_sentiment_threshold: default_voc_sentiment_threshold(),
            low_throughput_percentile: default_low_throughput_percentile(),
            voc_anomaly_ratio: default_voc_anomaly_ratio(),
            worst_window_threshold: default_worst_window_threshold(),
            low_severity_floor: default_low_severity_floor(),
            medium_severity_floor: default_medium_severity_floor(),
            otp_target: default_otp_target(),
            baggage_delivery_target: default_baggage_delivery_target(),
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("compliance_target", self.compliance_target),
            ("near_target_band", self.near_target_band),
            ("high_reject_threshold", self.high_reject_threshold),
            ("voc_sentiment_threshold", self.voc_sentiment_threshold),
            ("voc_anomaly_ratio", self.voc_anomaly_ratio),
            ("worst_window_threshold", self.worst_window_threshold),
            ("low_severity_floor", self.low_severity_floor),
            ("medium_severity_floor", self.medium_severity_floor),
            ("otp_target", self.otp_target),
            ("baggage_delivery_target", self.baggage_delivery_target),
        ];
        if let Some((name, _)) = thresholds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "policy.{} must be a finite number",
                name
            )));
        }
        if !(0.0..=1.0).contains(&self.low_throughput_percentile) {
            return Err(ConfigError::Invalid(
                "policy.low_throughput_percentile must be within [0, 1]".to_string(),
            ));
        }
        if self.near_target_band < 0.0 {
            return Err(ConfigError::Invalid(
                "policy.near_target_band must not be negative".to_string(),
            ));
        }
        if self.medium_severity_floor > self.low_severity_floor {
            return Err(ConfigError::Invalid(
                "policy.medium_severity_floor must not exceed policy.low_severity_floor"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Prior conversation turns forwarded with a query.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default = "default_terminals")]
    pub terminals: Vec<String>,
    #[serde(default = "default_time_buckets")]
    pub time_buckets: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            terminals: default_terminals(),
            time_buckets: default_time_buckets(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/generated")
}

fn default_report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 24).unwrap_or_default()
}

fn default_compliance_target() -> f64 {
    95.0
}

fn default_near_target_band() -> f64 {
    3.0
}

fn default_high_reject_threshold() -> f64 {
    8.0
}

fn default_voc_sentiment_threshold() -> f64 {
    2.0
}

fn default_low_throughput_percentile() -> f64 {
    0.25
}

fn default_voc_anomaly_ratio() -> f64 {
    1.5
}

fn default_worst_window_threshold() -> f64 {
    90.0
}

fn default_low_severity_floor() -> f64 {
    -3.0
}

fn default_medium_severity_floor() -> f64 {
    -7.0
}

fn default_otp_target() -> f64 {
    85.0
}

fn default_baggage_delivery_target() -> f64 {
    90.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_provider() -> String {
    "none".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_history_limit() -> usize {
    10
}

fn default_terminals() -> Vec<String> {
    vec!["T1".to_string(), "T2".to_string()]
}

fn default_time_buckets() -> Vec<String> {
    ["L7D", "L30D", "MTD", "YTD"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `ops.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// Falls back to built-in defaults when no file exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("ops.toml"),
            PathBuf::from("config/ops.toml"),
            PathBuf::from("../ops.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::warn!("No ops.toml found in standard locations; using defaults");
        Ok(Self::default())
    }

    /// Apply `OPS_DATA_DIR`, `OPS_REPORT_DATE`, `OPS_HOST` and `OPS_PORT`.
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(dir) = std::env::var("OPS_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Ok(raw) = std::env::var("OPS_REPORT_DATE") {
            self.data.report_date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| ConfigError::Invalid(format!("OPS_REPORT_DATE '{}': {}", raw, e)))?;
        }
        if let Ok(host) = std::env::var("OPS_HOST") {
            self.server.host = host;
        }
        if let Ok(raw) = std::env::var("OPS_PORT") {
            self.server.port = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("OPS_PORT '{}': {}", raw, e)))?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config.policy, PolicyConfig::default());
        assert_eq!(config.policy.compliance_target, 95.0);
        assert_eq!(config.policy.near_target_band, 3.0);
        assert_eq!(config.policy.high_reject_threshold, 8.0);
        assert_eq!(config.policy.voc_sentiment_threshold, 2.0);
        assert_eq!(config.policy.low_throughput_percentile, 0.25);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.filters.terminals, vec!["T1", "T2"]);
        assert_eq!(config.ai.history_limit, 10);
    }

    #[test]
    fn test_partial_policy_override() {
        let toml = r#"
[data]
dir = "/srv/ops"
report_date = "2026-02-01"
format = "csv"

[policy]
high_reject_threshold = 6.5
"#;
        let config = DashboardConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/ops"));
        assert_eq!(config.data.format, DataFormat::Csv);
        assert_eq!(
            config.data.report_date,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
        assert_eq!(config.policy.high_reject_threshold, 6.5);
        assert_eq!(config.policy.compliance_target, 95.0);
    }

    #[test]
    fn test_invalid_percentile_rejected() {
        let toml = "[policy]\nlow_throughput_percentile = 1.5\n";
        assert!(matches!(
            DashboardConfig::from_toml_str(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            DashboardConfig::from_toml_str("[policy\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
