//! `vnscale create` -- provision port groups and IP pools.

use tabled::Tabled;
use vnscale_core::{CreatedNetwork, Provisioner};

use crate::cli::{CreateArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CreatedRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Port Group")]
    portgroup: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
    #[tabled(rename = "PVLAN")]
    pvlan: String,
    #[tabled(rename = "Pool ID")]
    pool_id: i64,
}

impl From<&CreatedNetwork> for CreatedRow {
    fn from(n: &CreatedNetwork) -> Self {
        Self {
            name: n.name.clone(),
            portgroup: n.portgroup.clone(),
            subnet: n.subnet.to_string(),
            pvlan: format!("{}/{}", n.vlan.primary, n.vlan.secondary),
            pool_id: n.pool_id,
        }
    }
}

pub async fn handle(args: &CreateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (connect, provision) = config::resolve(global, Some(args))?;

    tracing::debug!(
        datacenter = %provision.datacenter,
        switch = %provision.switch,
        count = provision.count,
        "starting create run"
    );

    let provisioner = Provisioner::connect(&connect, provision).await?;
    let created = provisioner.create().await?;

    let out = output::render_list(global.output, &created, |n| CreatedRow::from(n))?;
    output::print_output(&out, global.quiet);

    if !global.quiet {
        eprintln!("{} network(s) created", created.len());
    }
    Ok(())
}
