//! Distributed port group endpoints.
//!
//! Port group creation is switch-scoped and task-returning; listing and
//! deletion go through the datacenter's network inventory.

use serde::{Deserialize, Serialize};

use crate::client::VcenterClient;
use crate::error::Error;

/// Port binding type for a distributed port group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortgroupType {
    /// Ports are allocated up front when the group is created.
    EarlyBinding,
    LateBinding,
    Ephemeral,
}

/// Creation spec for a distributed port group bound to a secondary PVLAN id.
#[derive(Debug, Clone, Serialize)]
pub struct PortgroupCreateSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PortgroupType,
    pub num_ports: u32,
    /// Secondary id of an isolated PVLAN pair provisioned on the switch.
    pub pvlan_id: u16,
}

/// One network from the datacenter inventory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSummary {
    /// Managed-object identifier (e.g. `dvportgroup-1034`).
    pub network: String,
    pub name: String,
}

impl VcenterClient {
    /// Create a port group on a switch, returning the task identifier:
    /// `POST /api/vcenter/distributed-switch/{switch}/portgroups?vmw-task=true`
    pub async fn create_portgroup(
        &self,
        switch: &str,
        spec: &PortgroupCreateSpec,
    ) -> Result<String, Error> {
        let mut url = self.api_url(&format!("vcenter/distributed-switch/{switch}/portgroups"))?;
        url.query_pairs_mut().append_pair("vmw-task", "true");
        self.post(url, spec).await
    }

    /// List distributed port groups in a datacenter:
    /// `GET /api/vcenter/network?datacenters={dc}&types=DISTRIBUTED_PORTGROUP`
    pub async fn list_portgroups(&self, datacenter: &str) -> Result<Vec<NetworkSummary>, Error> {
        let mut url = self.api_url("vcenter/network")?;
        url.query_pairs_mut()
            .append_pair("datacenters", datacenter)
            .append_pair("types", "DISTRIBUTED_PORTGROUP");
        self.get(url).await
    }

    /// Destroy a port group, returning the task identifier:
    /// `DELETE /api/vcenter/network/{network}?vmw-task=true`
    pub async fn delete_portgroup(&self, network: &str) -> Result<String, Error> {
        let mut url = self.api_url(&format!("vcenter/network/{network}"))?;
        url.query_pairs_mut().append_pair("vmw-task", "true");
        self.delete(url).await
    }
}
