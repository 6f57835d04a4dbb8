//! Camera command handlers.

use std::sync::Arc;

use tabled::Tabled;
use vigil_core::{Camera, CameraDetail, CameraDirectory, CameraFilter, CameraId, VmsService};

use crate::cli::{CameraListArgs, CamerasArgs, CamerasCommand, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CameraRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Type")]
    ctype: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rec")]
    recording: &'static str,
    #[tabled(rename = "AI")]
    ai: &'static str,
    #[tabled(rename = "IP")]
    ip: String,
}

impl From<&Arc<Camera>> for CameraRow {
    fn from(c: &Arc<Camera>) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            location: c.location.clone(),
            ctype: c.camera_type.to_string(),
            status: c.status.to_string(),
            recording: util::on_off(c.recording),
            ai: util::on_off(c.ai_enabled),
            ip: c.ip.to_string(),
        }
    }
}

fn detail(c: &Arc<Camera>) -> String {
    [
        format!("ID:        {}", c.id),
        format!("Name:      {}", c.name),
        format!("Location:  {}", c.location),
        format!("Type:      {}", c.camera_type),
        format!("Status:    {}", c.status),
        format!("Recording: {}", util::on_off(c.recording)),
        format!("AI:        {}", util::on_off(c.ai_enabled)),
        format!("IP:        {}", c.ip),
        format!("Last seen: {}", c.last_seen),
    ]
    .join("\n")
}

fn not_found(id: &CameraId) -> CliError {
    CliError::NotFound {
        resource_type: "camera".into(),
        identifier: id.to_string(),
        list_command: "cameras list".into(),
    }
}

// ── Directory helpers ───────────────────────────────────────────────

/// Load the camera directory, surfacing the load error instead of a bare
/// `Failed` state.
async fn load_directory(service: &VmsService, page_size: usize) -> Result<CameraDirectory, CliError> {
    let mut dir = CameraDirectory::with_page_size(page_size);
    let ticket = dir.begin_load();
    let cameras = service.get_cameras().await?;
    dir.finish_load(ticket, Ok(cameras.as_ref().clone()));
    Ok(dir)
}

fn filter_from(args: &CameraListArgs) -> CameraFilter {
    let mut filter = CameraFilter::default().with_search(args.search.clone());
    if let Some(status) = args.status {
        filter = filter.with_status(status);
    }
    if let Some(ref group) = args.group {
        filter = filter.with_group(group.clone());
    }
    filter
}

/// Open the settings panel for `id`, or fail with `NotFound`.
fn open_detail(dir: &mut CameraDirectory, id: &CameraId) -> Result<CameraDetail, CliError> {
    dir.open_details(id).ok_or_else(|| not_found(id))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &VmsService,
    args: CamerasArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page_size = cfg.defaults.page_size;

    match args.command {
        CamerasCommand::List(list) => {
            let mut dir = load_directory(service, list.page_size.unwrap_or(page_size)).await?;
            dir.set_filters(filter_from(&list));

            if list.page == 0 {
                return Err(CliError::Validation {
                    field: "page".into(),
                    reason: "pages start at 1".into(),
                });
            }
            while dir.current_page() < list.page {
                if !dir.next_page() {
                    return Err(CliError::Validation {
                        field: "page".into(),
                        reason: format!(
                            "page {} requested but only {} page(s) match",
                            list.page,
                            dir.total_pages()
                        ),
                    });
                }
            }

            let out = output::render_list(
                &global.output,
                dir.page_items(),
                |c| CameraRow::from(c),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            if !global.quiet {
                let color = output::should_color(&global.color);
                eprintln!("{}", output::note(&dir.pagination_label(), color));
            }
            Ok(())
        }

        CamerasCommand::Get { camera } => {
            let cameras = service.get_cameras().await?;
            let found = cameras.iter().find(|c| c.id == camera);
            match found {
                Some(c) => {
                    let out =
                        output::render_single(&global.output, c, detail, |c| c.id.to_string())?;
                    output::print_output(&out, global.quiet);
                    Ok(())
                }
                None => Err(not_found(&camera)),
            }
        }

        CamerasCommand::Update {
            camera,
            name,
            location,
            recording,
            ai,
        } => {
            let mut dir = load_directory(service, page_size).await?;
            let mut panel = open_detail(&mut dir, &camera)?;

            {
                let edit = panel.camera_mut();
                if let Some(name) = name {
                    edit.name = name;
                }
                if let Some(location) = location {
                    edit.location = location;
                }
                if let Some(recording) = recording {
                    edit.recording = recording;
                }
                if let Some(ai) = ai {
                    edit.ai_enabled = ai;
                }
            }

            let updated = panel.save(service).await.map_err(|(_, e)| CliError::from(e))?;

            let out = output::render_single(&global.output, &updated, detail, |c| c.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CamerasCommand::Delete { camera } => {
            let mut dir = load_directory(service, page_size).await?;
            let mut events = service.camera_events();
            let mut panel = open_detail(&mut dir, &camera)?;

            let prompt = format!("Delete camera {} ({})?", panel.camera().name, camera);
            if !util::confirm(&prompt, "cameras delete", global.yes)? {
                return Ok(());
            }
            panel.request_delete();

            let removed = panel
                .confirm_delete(service)
                .await
                .map_err(|(_, e)| CliError::from(e))?;
            dir.sync(&mut events);

            if !global.quiet {
                let color = output::should_color(&global.color);
                eprintln!(
                    "{}",
                    output::success(
                        &format!(
                            "Deleted {} ({}), {} camera(s) remain",
                            removed.name,
                            removed.id,
                            dir.total_items()
                        ),
                        color
                    )
                );
            }
            Ok(())
        }
    }
}
