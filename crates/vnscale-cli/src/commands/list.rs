//! `vnscale list` -- show what a delete run would destroy, without
//! touching anything.

use owo_colors::OwoColorize;
use tabled::Tabled;
use vnscale_core::{IpPool, PortGroup, Provisioner};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PortGroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&PortGroup> for PortGroupRow {
    fn from(pg: &PortGroup) -> Self {
        Self {
            id: pg.id.clone(),
            name: pg.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct PoolRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
}

impl From<&IpPool> for PoolRow {
    fn from(pool: &IpPool) -> Self {
        Self {
            id: pool.id,
            name: pool.name.clone(),
            subnet: pool.subnet.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let (connect, provision) = config::resolve(global, None)?;

    let provisioner = Provisioner::connect(&connect, provision).await?;
    let report = provisioner.scan().await?;

    match global.output {
        OutputFormat::Json => {
            output::print_output(&output::render_json(&report)?, global.quiet);
        }
        OutputFormat::Table => {
            let pgs = output::render_list(global.output, &report.portgroups, |p| PortGroupRow::from(p))?;
            let pools = output::render_list(global.output, &report.pools, |p| PoolRow::from(p))?;
            output::print_output(
                &format!(
                    "{}\n{pgs}\n\n{}\n{pools}",
                    "Port groups:".bold(),
                    "IP pools:".bold()
                ),
                global.quiet,
            );
        }
    }
    Ok(())
}
