//! Config subcommand handlers.

use std::fmt::Write;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config as TOML-like text for the table view.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();
    let svc = &cfg.service;

    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "page_size = {}", cfg.defaults.page_size);
    let _ = writeln!(out);
    let _ = writeln!(out, "[service]");
    let _ = writeln!(out, "camera_count = {}", svc.camera_count);
    let _ = writeln!(out, "alert_count = {}", svc.alert_count);
    match svc.seed {
        Some(seed) => {
            let _ = writeln!(out, "seed = {seed}");
        }
        None => {
            let _ = writeln!(out, "# seed = (random)");
        }
    }
    let _ = writeln!(out, "unread_probability = {}", svc.unread_probability);
    let _ = writeln!(out, "failure_rate = {}", svc.failure_rate);
    let _ = writeln!(out, "jitter_spread = {}", svc.jitter_spread);
    let _ = write!(out, "latency_scale = {}", svc.latency_scale);

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        ConfigCommand::Init => {
            let path = config::config_path();
            if path.exists() && !global.yes {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            config::save_config_to(&path, &Config::default())?;
            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success(&format!("Wrote {}", path.display()), color)
                );
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(&global.output, &cfg, format_config, |c| {
                c.service
                    .seed
                    .map_or_else(|| "random".into(), |seed| seed.to_string())
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
