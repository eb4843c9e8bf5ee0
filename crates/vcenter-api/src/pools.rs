//! IP pool endpoints (datacenter-scoped).
//!
//! An IP pool carries an IPv4 subnet definition and an association to the
//! port group whose VMs draw addresses from it. Pool create/destroy complete
//! synchronously -- no task to wait on.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::client::VcenterClient;
use crate::error::Error;

/// IPv4 addressing config of an IP pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ipv4PoolConfig {
    pub subnet_address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
}

/// Association between an IP pool and one network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkAssociation {
    /// Managed-object identifier of the network (port group).
    pub network: String,
    pub network_name: String,
}

/// Creation spec for an IP pool.
#[derive(Debug, Clone, Serialize)]
pub struct IpPoolCreateSpec {
    pub name: String,
    pub ipv4_config: Ipv4PoolConfig,
    pub network_association: Vec<NetworkAssociation>,
}

/// One IP pool from the datacenter query.
#[derive(Debug, Clone, Deserialize)]
pub struct IpPoolSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub ipv4_config: Option<Ipv4PoolConfig>,
}

impl VcenterClient {
    /// Create an IP pool, returning its numeric identifier:
    /// `POST /api/vcenter/datacenter/{dc}/ip-pools`
    pub async fn create_ip_pool(
        &self,
        datacenter: &str,
        spec: &IpPoolCreateSpec,
    ) -> Result<i64, Error> {
        let url = self.api_url(&format!("vcenter/datacenter/{datacenter}/ip-pools"))?;
        self.post(url, spec).await
    }

    /// Query all IP pools in a datacenter:
    /// `GET /api/vcenter/datacenter/{dc}/ip-pools`
    pub async fn query_ip_pools(&self, datacenter: &str) -> Result<Vec<IpPoolSummary>, Error> {
        let url = self.api_url(&format!("vcenter/datacenter/{datacenter}/ip-pools"))?;
        self.get(url).await
    }

    /// Destroy an IP pool:
    /// `DELETE /api/vcenter/datacenter/{dc}/ip-pools/{id}?force={force}`
    ///
    /// With `force`, the pool is removed even while networks are still
    /// associated to it.
    pub async fn destroy_ip_pool(
        &self,
        datacenter: &str,
        id: i64,
        force: bool,
    ) -> Result<(), Error> {
        let mut url = self.api_url(&format!("vcenter/datacenter/{datacenter}/ip-pools/{id}"))?;
        url.query_pairs_mut()
            .append_pair("force", if force { "true" } else { "false" });
        self.delete_empty(url).await
    }
}
