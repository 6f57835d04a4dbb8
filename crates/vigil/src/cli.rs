//! Clap derive structures for the `vigil` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use vigil_core::{AlertId, AlertSeverity, AlertStatusFilter, CameraId, CameraStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vigil -- browse and manage a simulated video-management system
#[derive(Debug, Parser)]
#[command(
    name = "vigil",
    version,
    about = "Browse cameras and alerts of a simulated VMS from the command line",
    long_about = "Every invocation seeds an in-memory VMS with synthetic cameras\n\
        and alerts, runs one command against it, and exits.\n\n\
        Pass --seed for a reproducible data set and --no-latency to skip\n\
        the simulated network delays.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Seed for the data generator (overrides config)
    #[arg(long, env = "VIGIL_SEED", global = true)]
    pub seed: Option<u64>,

    /// Resolve every operation immediately instead of simulating latency
    #[arg(long, env = "VIGIL_NO_LATENCY", global = true)]
    pub no_latency: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VIGIL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit cameras
    #[command(alias = "cam", alias = "c")]
    Cameras(CamerasArgs),

    /// List camera locations
    #[command(alias = "loc")]
    Locations,

    /// Show the dashboard summary
    #[command(alias = "dash")]
    Dashboard,

    /// Query and manage alerts
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Cameras ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CamerasArgs {
    #[command(subcommand)]
    pub command: CamerasCommand,
}

#[derive(Debug, Subcommand)]
pub enum CamerasCommand {
    /// List cameras, one page at a time
    #[command(alias = "ls")]
    List(CameraListArgs),

    /// Show one camera
    Get {
        /// Camera ID (e.g. cam-12)
        camera: CameraId,
    },

    /// Edit camera settings
    Update {
        /// Camera ID (e.g. cam-12)
        camera: CameraId,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New location
        #[arg(long)]
        location: Option<String>,

        /// Enable or disable recording
        #[arg(long)]
        recording: Option<bool>,

        /// Enable or disable AI analytics
        #[arg(long)]
        ai: Option<bool>,
    },

    /// Delete a camera
    #[command(alias = "rm")]
    Delete {
        /// Camera ID (e.g. cam-12)
        camera: CameraId,
    },
}

#[derive(Debug, Args)]
pub struct CameraListArgs {
    /// Case-insensitive match on name or location
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Only cameras with this status (online, offline, warning)
    #[arg(long)]
    pub status: Option<CameraStatus>,

    /// Only cameras at this exact location
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Cameras per page (defaults to the configured page size)
    #[arg(long, short = 'l')]
    pub page_size: Option<usize>,
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts, unread first
    #[command(alias = "ls")]
    List(AlertListArgs),

    /// Mark an unread alert as read
    #[command(alias = "acknowledge")]
    Ack {
        /// Alert ID
        id: AlertId,
    },

    /// Mark every unread alert as read
    AckAll,

    /// Resolve an alert
    Resolve {
        /// Alert ID
        id: AlertId,
    },

    /// Move an alert to the trash
    #[command(alias = "rm")]
    Delete {
        /// Alert ID
        id: AlertId,
    },
}

#[derive(Debug, Args)]
pub struct AlertListArgs {
    /// all (excludes deleted), unread, resolved, deleted, or read (no filter)
    #[arg(long)]
    pub status: Option<AlertStatusFilter>,

    /// critical, high, medium, or low
    #[arg(long)]
    pub severity: Option<AlertSeverity>,

    /// Exact location
    #[arg(long)]
    pub location: Option<String>,

    /// Case-insensitive match on type, location, or camera name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only alerts at or after this RFC 3339 timestamp
    #[arg(long)]
    pub since: Option<String>,

    /// Only alerts at or before this RFC 3339 timestamp
    #[arg(long)]
    pub until: Option<String>,

    /// Show at most this many alerts
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
