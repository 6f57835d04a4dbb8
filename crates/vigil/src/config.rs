//! CLI configuration: thin wrapper around `vigil_config` shared types.
//!
//! Re-exports the shared types and layers the `--seed` and `--no-latency`
//! flags over whatever the file and environment resolved to.

use vigil_core::{LatencyProfile, ServiceConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vigil_config::{Config, config_path, load_config, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Translate the loaded config plus global flags into a `ServiceConfig`.
///
/// Flags take priority over config values.
pub fn build_service_config(cfg: &Config, global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let mut service = cfg.to_service_config()?;

    if let Some(seed) = global.seed {
        service.seed = Some(seed);
    }
    if global.no_latency {
        service.latency = LatencyProfile::instant();
    }

    tracing::debug!(
        cameras = service.camera_count,
        alerts = service.alert_count,
        seed = ?service.seed,
        "service config resolved"
    );
    Ok(service)
}
