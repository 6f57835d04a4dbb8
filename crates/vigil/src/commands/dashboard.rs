//! Dashboard command handler.

use vigil_core::{DashboardData, VmsService};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(d: &DashboardData) -> String {
    let s = &d.camera_summary;
    let sys = &d.system_status;

    let mut lines = vec![
        format!(
            "Cameras:   {} total, {} online, {} offline, {} warning, {} recording",
            s.total, s.online, s.offline, s.warning, s.recording
        ),
        format!("Server:    {} (up {})", sys.server_status, sys.uptime),
        format!(
            "Storage:   {}% used, {} days retention",
            sys.storage_usage_pct, sys.retention_days
        ),
        format!("CPU:       {}%", sys.cpu_load_pct),
        format!("Memory:    {}%", sys.memory_usage_pct),
    ];

    if !d.camera_issues.is_empty() {
        lines.push(String::new());
        lines.push("Camera issues:".into());
        for issue in &d.camera_issues {
            lines.push(format!(
                "  {:<8} {:<12} {} ({})",
                issue.status.to_string(),
                issue.name,
                issue.location,
                issue.time
            ));
        }
    }

    if !d.alerts.is_empty() {
        lines.push(String::new());
        lines.push("Recent alerts:".into());
        for alert in &d.alerts {
            lines.push(format!(
                "  {:<8} {:<26} {} ({})",
                alert.severity.to_string(),
                alert.alert_type,
                alert.location,
                alert.time
            ));
        }
    }

    lines.join("\n")
}

pub async fn handle(service: &VmsService, global: &GlobalOpts) -> Result<(), CliError> {
    let data = service.get_dashboard_data().await?;
    let out = output::render_single(&global.output, &data, detail, |d| {
        format!(
            "{} {} {}",
            d.camera_summary.total, d.camera_summary.online, d.alerts.len()
        )
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
