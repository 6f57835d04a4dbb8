//! Shared configuration for the Vigil CLI.
//!
//! A TOML file under the platform config directory, merged with
//! `VIGIL_`-prefixed environment variables, and translated into
//! `vigil_core::ServiceConfig`. The CLI layers its own flags on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vigil_core::{LatencyProfile, ServiceConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Mock service tuning.
    #[serde(default)]
    pub service: ServiceSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Cameras per page in `cameras list`.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_page_size() -> usize {
    10
}

/// The `[service]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceSection {
    #[serde(default = "default_camera_count")]
    pub camera_count: usize,

    #[serde(default = "default_alert_count")]
    pub alert_count: usize,

    /// Fixed RNG seed. Omit for a fresh data set on every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default = "default_unread_probability")]
    pub unread_probability: f64,

    /// Probability that a query fails with "data unavailable".
    #[serde(default)]
    pub failure_rate: f64,

    #[serde(default = "default_jitter_spread")]
    pub jitter_spread: u8,

    /// Multiplier on every simulated latency; `0` disables it.
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            camera_count: default_camera_count(),
            alert_count: default_alert_count(),
            seed: None,
            unread_probability: default_unread_probability(),
            failure_rate: 0.0,
            jitter_spread: default_jitter_spread(),
            latency_scale: default_latency_scale(),
        }
    }
}

fn default_camera_count() -> usize {
    66
}
fn default_alert_count() -> usize {
    150
}
fn default_unread_probability() -> f64 {
    0.3
}
fn default_jitter_spread() -> u8 {
    5
}
fn default_latency_scale() -> f64 {
    1.0
}

/// Largest accepted `service.latency_scale`.
pub const MAX_LATENCY_SCALE: f64 = 100.0;

impl Config {
    /// Check every value the service or CLI would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.page_size == 0 {
            return Err(invalid("defaults.page_size", "must be at least 1"));
        }

        let svc = &self.service;
        for (field, value) in [
            ("service.unread_probability", svc.unread_probability),
            ("service.failure_rate", svc.failure_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if svc.jitter_spread > 100 {
            return Err(invalid("service.jitter_spread", "must be at most 100"));
        }
        if !(0.0..=MAX_LATENCY_SCALE).contains(&svc.latency_scale) {
            return Err(invalid(
                "service.latency_scale",
                format!(
                    "{} is outside [0, {MAX_LATENCY_SCALE}]",
                    svc.latency_scale
                ),
            ));
        }
        Ok(())
    }

    /// Build the core service configuration.
    pub fn to_service_config(&self) -> Result<ServiceConfig, ConfigError> {
        self.validate()?;

        let svc = &self.service;
        let latency = LatencyProfile::default()
            .scaled(svc.latency_scale)
            .map_err(|e| invalid("service.latency_scale", e.to_string()))?;
        Ok(ServiceConfig {
            camera_count: svc.camera_count,
            alert_count: svc.alert_count,
            seed: svc.seed,
            unread_probability: svc.unread_probability,
            failure_rate: svc.failure_rate,
            jitter_spread: svc.jitter_spread,
            latency,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vigil", "vigil").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vigil");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, then apply environment overrides.
///
/// Nested keys use a double underscore:
/// `VIGIL_SERVICE__CAMERA_COUNT=12`, `VIGIL_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VIGIL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.service, ServiceSection::default());
        assert_eq!(cfg.defaults.page_size, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[service]\ncamera_count = 12\nseed = 7\n\n[defaults]\noutput = \"json\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.service.camera_count, 12);
        assert_eq!(cfg.service.seed, Some(7));
        assert_eq!(cfg.service.alert_count, 150);
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.service.seed = Some(99);
        cfg.service.latency_scale = 0.0;
        cfg.defaults.page_size = 25;

        save_config_to(&path, &cfg).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn translates_to_service_config() {
        let mut cfg = Config::default();
        cfg.service.latency_scale = 0.5;
        cfg.service.seed = Some(3);

        let svc = cfg.to_service_config().unwrap();
        assert_eq!(svc.seed, Some(3));
        assert_eq!(svc.camera_count, 66);
        assert_eq!(svc.latency.dashboard, Duration::from_millis(400));
        assert!((svc.unread_probability - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut cfg = Config::default();
        cfg.service.failure_rate = 2.0;
        assert!(matches!(
            cfg.to_service_config(),
            Err(ConfigError::Validation { ref field, .. }) if field == "service.failure_rate"
        ));

        let mut cfg = Config::default();
        cfg.defaults.page_size = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.service.latency_scale = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn huge_latency_scale_is_rejected() {
        for scale in [1e20, f64::NAN, MAX_LATENCY_SCALE + 1.0] {
            let mut cfg = Config::default();
            cfg.service.latency_scale = scale;
            assert!(matches!(
                cfg.to_service_config(),
                Err(ConfigError::Validation { ref field, .. }) if field == "service.latency_scale"
            ));
        }

        let mut cfg = Config::default();
        cfg.service.latency_scale = MAX_LATENCY_SCALE;
        assert!(cfg.to_service_config().is_ok());
    }

    #[test]
    fn config_path_ends_in_toml() {
        assert!(config_path().ends_with("config.toml"));
    }
}
