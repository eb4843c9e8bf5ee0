//! Orchestration of create / delete / scan runs against one vCenter server.
//!
//! Strictly sequential: one task in flight at a time, each awaited to a
//! terminal state before the next object is touched. The first failure
//! aborts the run and surfaces as a `CoreError`.

use tracing::{debug, info};

use vcenter_api::{
    DatacenterSummary, IpPoolCreateSpec, NetworkAssociation, PortgroupCreateSpec, PortgroupType,
    PvlanType, SwitchReconfigSpec, SwitchSummary, VcenterClient,
};

use crate::config::{ConnectConfig, ProvisionConfig};
use crate::error::CoreError;
use crate::model::{CreatedNetwork, DeleteReport, IpPool, PortGroup, ScanReport, VlanPair};
use crate::plan;

/// Executes provisioning runs over an authenticated client.
pub struct Provisioner {
    client: VcenterClient,
    config: ProvisionConfig,
}

impl Provisioner {
    /// Open a session per `connect` and wrap it with run parameters.
    pub async fn connect(
        connect: &ConnectConfig,
        config: ProvisionConfig,
    ) -> Result<Self, CoreError> {
        let transport = vcenter_api::TransportConfig {
            tls: (&connect.tls).into(),
            timeout: connect.timeout,
        };
        let client = VcenterClient::connect(
            connect.url.clone(),
            &connect.username,
            &connect.password,
            &transport,
        )
        .await?;
        Ok(Self { client, config })
    }

    // ── Inventory resolution ─────────────────────────────────────────

    async fn resolve_datacenter(&self) -> Result<DatacenterSummary, CoreError> {
        let datacenters = self.client.list_datacenters().await?;
        datacenters
            .into_iter()
            .find(|dc| dc.name == self.config.datacenter)
            .ok_or_else(|| CoreError::DatacenterNotFound {
                name: self.config.datacenter.clone(),
            })
    }

    async fn resolve_switch(&self, datacenter: &str) -> Result<SwitchSummary, CoreError> {
        let switches = self.client.list_switches(datacenter).await?;
        switches
            .into_iter()
            .find(|sw| sw.name == self.config.switch)
            .ok_or_else(|| CoreError::SwitchNotFound {
                name: self.config.switch.clone(),
            })
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Create `count` networks: a port group bound to an isolated PVLAN pair
    /// plus an IP pool on the next subnet, per network, in order.
    pub async fn create(&self) -> Result<Vec<CreatedNetwork>, CoreError> {
        let dc = self.resolve_datacenter().await?;
        let sw = self.resolve_switch(&dc.datacenter).await?;
        let mut switch_info = self.client.get_switch(&sw.switch).await?;

        // Raise the switch port cap first if the run would outgrow it.
        if let Some(target) = self.config.max_ports {
            if switch_info.max_ports < target {
                info!(
                    switch = %sw.name,
                    current = switch_info.max_ports,
                    target,
                    "raising switch port cap"
                );
                let spec = SwitchReconfigSpec {
                    config_version: &switch_info.config_version,
                    max_ports: target,
                };
                let task = self.client.reconfigure_switch(&sw.switch, &spec).await?;
                self.wait(&task).await?;
                switch_info = self.client.get_switch(&sw.switch).await?;
            }
        }

        let isolated: Vec<VlanPair> = switch_info
            .pvlan_config
            .iter()
            .filter(|entry| entry.pvlan_type == PvlanType::Isolated)
            .map(VlanPair::from)
            .collect();

        let plan = plan::build_plan(
            &isolated,
            self.config.cidr,
            self.config.subnet_prefix_len,
            &self.config.name_prefix,
            self.config.count,
        )?;

        let num_ports = plan::num_ports(self.config.subnet_prefix_len);
        let mut created = Vec::with_capacity(plan.len());

        for item in plan {
            let spec = PortgroupCreateSpec {
                name: item.name.clone(),
                kind: PortgroupType::EarlyBinding,
                num_ports,
                pvlan_id: item.vlan.secondary,
            };
            let task = self.client.create_portgroup(&sw.switch, &spec).await?;
            self.wait(&task).await?;

            // The create task does not return the object id; find it by name.
            let portgroup = self
                .client
                .list_portgroups(&dc.datacenter)
                .await?
                .into_iter()
                .find(|pg| pg.name == item.name)
                .ok_or_else(|| CoreError::PortGroupNotFound {
                    name: item.name.clone(),
                })?;

            let pool_spec = IpPoolCreateSpec {
                name: plan::pool_name(&item.name),
                ipv4_config: vcenter_api::Ipv4PoolConfig {
                    subnet_address: item.subnet.network(),
                    netmask: item.subnet.netmask(),
                    gateway: plan::gateway(item.subnet)?,
                },
                network_association: vec![NetworkAssociation {
                    network: portgroup.network.clone(),
                    network_name: item.name.clone(),
                }],
            };
            let pool_id = self.client.create_ip_pool(&dc.datacenter, &pool_spec).await?;

            info!(name = %item.name, pool_id, subnet = %item.subnet, "created network");
            created.push(CreatedNetwork {
                name: item.name,
                portgroup: portgroup.network,
                pool_id,
                subnet: item.subnet,
                vlan: item.vlan,
            });
        }

        Ok(created)
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Destroy every IP pool and port group matching the naming scheme.
    /// Pools go first so no pool is left referencing a dead network.
    pub async fn delete(&self) -> Result<DeleteReport, CoreError> {
        let dc = self.resolve_datacenter().await?;
        let prefix = &self.config.name_prefix;
        let mut report = DeleteReport::default();

        for pool in self.client.query_ip_pools(&dc.datacenter).await? {
            if plan::pool_matches(&pool.name, prefix) {
                self.client
                    .destroy_ip_pool(&dc.datacenter, pool.id, true)
                    .await?;
                info!(name = %pool.name, id = pool.id, "destroyed ip pool");
                report.pools_destroyed += 1;
            } else {
                debug!(name = %pool.name, "not deleting pool");
                report.pools_skipped += 1;
            }
        }

        for pg in self.client.list_portgroups(&dc.datacenter).await? {
            if plan::portgroup_matches(&pg.name, prefix) {
                let task = self.client.delete_portgroup(&pg.network).await?;
                self.wait(&task).await?;
                info!(name = %pg.name, "destroyed port group");
                report.portgroups_destroyed += 1;
            } else {
                debug!(name = %pg.name, "not deleting port group");
                report.portgroups_skipped += 1;
            }
        }

        Ok(report)
    }

    // ── Scan ─────────────────────────────────────────────────────────

    /// List the objects a delete run would destroy, without touching them.
    pub async fn scan(&self) -> Result<ScanReport, CoreError> {
        let dc = self.resolve_datacenter().await?;
        let prefix = &self.config.name_prefix;

        let portgroups = self
            .client
            .list_portgroups(&dc.datacenter)
            .await?
            .into_iter()
            .filter(|pg| plan::portgroup_matches(&pg.name, prefix))
            .map(PortGroup::from)
            .collect();

        let pools = self
            .client
            .query_ip_pools(&dc.datacenter)
            .await?
            .into_iter()
            .filter(|pool| plan::pool_matches(&pool.name, prefix))
            .map(IpPool::from)
            .collect();

        Ok(ScanReport { portgroups, pools })
    }

    async fn wait(&self, task: &str) -> Result<(), CoreError> {
        self.client
            .wait_for_task(task, self.config.poll_interval, self.config.task_timeout)
            .await?;
        Ok(())
    }
}
