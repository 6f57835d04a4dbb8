//! Command dispatch: bridges CLI args -> service calls -> output formatting.

pub mod alerts;
pub mod cameras;
pub mod config_cmd;
pub mod dashboard;
pub mod locations;
pub mod util;

use vigil_core::VmsService;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    service: &VmsService,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Cameras(args) => cameras::handle(service, args, cfg, global).await,
        Command::Locations => locations::handle(service, global).await,
        Command::Dashboard => dashboard::handle(service, global).await,
        Command::Alerts(args) => alerts::handle(service, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal {
            message: "command does not need the service".into(),
        }),
    }
}
