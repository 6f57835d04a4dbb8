//! Alert command handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tabled::Tabled;
use vigil_core::dashboard::time_ago;
use vigil_core::{Alert, AlertQuery, VmsService};

use crate::cli::{AlertListArgs, AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    atype: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Camera")]
    camera: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Age")]
    age: String,
}

impl AlertRow {
    fn new(a: &Arc<Alert>, now: DateTime<Utc>) -> Self {
        Self {
            id: a.id.to_string(),
            atype: a.alert_type.clone(),
            severity: a.severity.to_string(),
            location: a.location.clone(),
            camera: a.camera_name.clone(),
            status: a.status.to_string(),
            age: time_ago(a.timestamp, now),
        }
    }
}

fn detail(a: &Arc<Alert>) -> String {
    [
        format!("ID:          {}", a.id),
        format!("Type:        {}", a.alert_type),
        format!("Severity:    {}", a.severity),
        format!("Category:    {}", a.category),
        format!("Status:      {}", a.status),
        format!("Location:    {}", a.location),
        format!("Camera:      {} ({})", a.camera_name, a.camera_id),
        format!("Time:        {}", a.timestamp.to_rfc3339()),
        format!("Description: {}", a.description),
    ]
    .join("\n")
}

fn query_from(args: &AlertListArgs) -> Result<AlertQuery, CliError> {
    // Without --status, deleted alerts stay hidden
    let mut query = AlertQuery::all();
    if let Some(status) = args.status {
        query = query.with_status(status);
    }
    if let Some(severity) = args.severity {
        query = query.with_severity(severity);
    }
    if let Some(ref location) = args.location {
        query = query.with_location(location.clone());
    }
    if let Some(ref search) = args.search {
        query = query.with_search(search.clone());
    }

    let since = util::parse_timestamp("since", args.since.as_deref())?;
    let until = util::parse_timestamp("until", args.until.as_deref())?;
    Ok(query.between(since, until))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &VmsService,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        AlertsCommand::List(list) => {
            let query = query_from(&list)?;
            let mut alerts = service.get_alerts(&query).await?;
            let matched = alerts.len();
            if let Some(limit) = list.limit {
                alerts.truncate(limit);
            }

            let now = Utc::now();
            let out = output::render_list(
                &global.output,
                &alerts,
                |a| AlertRow::new(a, now),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            if !global.quiet && alerts.len() < matched {
                eprintln!(
                    "{}",
                    output::note(&format!("{} of {matched} alerts shown", alerts.len()), color)
                );
            }
            Ok(())
        }

        AlertsCommand::Ack { id } => {
            let alert = service.acknowledge_alert(id).await?;
            let out = output::render_single(&global.output, &alert, detail, |a| a.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::AckAll => {
            let count = service.acknowledge_all().await?;
            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success(&format!("Acknowledged {count} alert(s)"), color)
                );
            }
            Ok(())
        }

        AlertsCommand::Resolve { id } => {
            let alert = service.resolve_alert(id).await?;
            let out = output::render_single(&global.output, &alert, detail, |a| a.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Delete { id } => {
            let alert = service.delete_alert(id).await?;
            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success(&format!("Moved alert {} to the trash", alert.id), color)
                );
            }
            Ok(())
        }
    }
}
