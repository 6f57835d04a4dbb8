//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use vigil_config::ConfigError;
use vigil_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const UNAVAILABLE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Data source ──────────────────────────────────────────────────
    #[error("Could not load {operation}: data unavailable")]
    #[diagnostic(
        code(vigil::unavailable),
        help("The simulated data source failed. Check service.failure_rate in your config.")
    )]
    Unavailable { operation: String },

    #[error("The VMS service has stopped")]
    #[diagnostic(code(vigil::stopped))]
    ServiceStopped,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vigil::not_found),
        help("Run: vigil {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vigil::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(vigil::config),
        help("Inspect the file with: vigil config show")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(vigil::config_exists),
        help("Use --yes (-y) to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vigil::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {message}")]
    #[diagnostic(code(vigil::internal))]
    Internal { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(vigil::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(vigil::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unavailable { .. } => exit_code::UNAVAILABLE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DataUnavailable { operation } => CliError::Unavailable { operation },

            CoreError::AlertNotFound { id } => CliError::NotFound {
                resource_type: "alert".into(),
                identifier: id.to_string(),
                list_command: "alerts list".into(),
            },

            CoreError::CameraNotFound { id } => CliError::NotFound {
                resource_type: "camera".into(),
                identifier: id.to_string(),
                list_command: "cameras list".into(),
            },

            CoreError::ServiceStopped => CliError::ServiceStopped,

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{AlertId, CameraId};

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (CoreError::AlertNotFound { id: AlertId(7) }, exit_code::NOT_FOUND),
            (
                CoreError::CameraNotFound {
                    id: CameraId::from("cam-7"),
                },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::DataUnavailable {
                    operation: "alerts".into(),
                },
                exit_code::UNAVAILABLE,
            ),
            (
                CoreError::ValidationFailed {
                    message: "bad".into(),
                },
                exit_code::USAGE,
            ),
            (CoreError::ServiceStopped, exit_code::GENERAL),
        ];

        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = CliError::from(CoreError::AlertNotFound { id: AlertId(42) });
        assert_eq!(err.to_string(), "alert '42' not found");
    }
}
