//! Datacenter and distributed-switch inventory endpoints.
//!
//! Read side of provisioning: enumerate datacenters, enumerate switches
//! within one, and fetch a switch's config (version, port cap, PVLAN map).

use serde::{Deserialize, Serialize};

use crate::client::VcenterClient;
use crate::error::Error;

/// One datacenter from the inventory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DatacenterSummary {
    /// Managed-object identifier (e.g. `datacenter-3`).
    pub datacenter: String,
    pub name: String,
}

/// One distributed virtual switch from the inventory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchSummary {
    /// Managed-object identifier (e.g. `dvs-21`).
    pub switch: String,
    pub name: String,
}

/// Private-VLAN entry type on a distributed switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PvlanType {
    Promiscuous,
    Community,
    Isolated,
}

/// One entry of a switch's private-VLAN map.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PvlanEntry {
    pub primary_vlan_id: u16,
    pub secondary_vlan_id: u16,
    pub pvlan_type: PvlanType,
}

/// Detailed switch configuration.
///
/// `config_version` must be echoed back on reconfiguration so the server can
/// reject concurrent modifications.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchInfo {
    pub name: String,
    pub config_version: String,
    pub max_ports: u32,
    #[serde(default)]
    pub pvlan_config: Vec<PvlanEntry>,
}

/// Reconfiguration request for a distributed switch.
#[derive(Debug, Serialize)]
pub struct SwitchReconfigSpec<'a> {
    pub config_version: &'a str,
    pub max_ports: u32,
}

impl VcenterClient {
    /// List all datacenters: `GET /api/vcenter/datacenter`
    pub async fn list_datacenters(&self) -> Result<Vec<DatacenterSummary>, Error> {
        let url = self.api_url("vcenter/datacenter")?;
        self.get(url).await
    }

    /// List distributed switches in a datacenter:
    /// `GET /api/vcenter/distributed-switch?datacenters={dc}`
    pub async fn list_switches(&self, datacenter: &str) -> Result<Vec<SwitchSummary>, Error> {
        let mut url = self.api_url("vcenter/distributed-switch")?;
        url.query_pairs_mut().append_pair("datacenters", datacenter);
        self.get(url).await
    }

    /// Fetch a switch's config: `GET /api/vcenter/distributed-switch/{switch}`
    pub async fn get_switch(&self, switch: &str) -> Result<SwitchInfo, Error> {
        let url = self.api_url(&format!("vcenter/distributed-switch/{switch}"))?;
        self.get(url).await
    }

    /// Submit a switch reconfiguration, returning the task identifier:
    /// `PATCH /api/vcenter/distributed-switch/{switch}?vmw-task=true`
    pub async fn reconfigure_switch(
        &self,
        switch: &str,
        spec: &SwitchReconfigSpec<'_>,
    ) -> Result<String, Error> {
        let mut url = self.api_url(&format!("vcenter/distributed-switch/{switch}"))?;
        url.query_pairs_mut().append_pair("vmw-task", "true");
        self.patch(url, spec).await
    }
}
