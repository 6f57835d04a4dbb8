//! Location command handler.

use tabled::Tabled;
use vigil_core::VmsService;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "Location")]
    name: String,
}

pub async fn handle(service: &VmsService, global: &GlobalOpts) -> Result<(), CliError> {
    let locations = service.get_locations().await?;
    let out = output::render_list(
        &global.output,
        &locations,
        |l| LocationRow { name: l.clone() },
        String::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
