//! `vnscale delete` -- destroy every object matching the naming prefix.
//!
//! Irreversible, so it prompts unless `--yes` is passed.

use vnscale_core::Provisioner;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let (connect, provision) = config::resolve(global, None)?;
    let prefix = provision.name_prefix.clone();

    if !util::confirm(
        &format!("Destroy ALL IP pools and port groups matching '{prefix}'?"),
        global.yes,
    )? {
        return Ok(());
    }

    let provisioner = Provisioner::connect(&connect, provision).await?;
    let report = provisioner.delete().await?;

    match global.output {
        OutputFormat::Json => {
            output::print_output(&output::render_json(&report)?, global.quiet);
        }
        OutputFormat::Table => {
            if !global.quiet {
                eprintln!(
                    "{} pool(s) and {} port group(s) destroyed ({} / {} skipped)",
                    report.pools_destroyed,
                    report.portgroups_destroyed,
                    report.pools_skipped,
                    report.portgroups_skipped,
                );
            }
        }
    }
    Ok(())
}
