//! Domain entities as the CLI sees them.
//!
//! Thin translations of the API crate's wire types; reports serialize
//! cleanly for `--output json`.

use ipnet::Ipv4Net;
use serde::Serialize;

/// A primary/secondary private-VLAN id pair consumed from the switch's
/// isolated PVLAN table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VlanPair {
    pub primary: u16,
    pub secondary: u16,
}

impl From<&vcenter_api::PvlanEntry> for VlanPair {
    fn from(entry: &vcenter_api::PvlanEntry) -> Self {
        Self {
            primary: entry.primary_vlan_id,
            secondary: entry.secondary_vlan_id,
        }
    }
}

/// One planned network: everything needed to create its port group and pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkPlan {
    pub name: String,
    pub vlan: VlanPair,
    pub subnet: Ipv4Net,
}

/// A distributed port group in the datacenter inventory.
#[derive(Debug, Clone, Serialize)]
pub struct PortGroup {
    pub id: String,
    pub name: String,
}

impl From<vcenter_api::NetworkSummary> for PortGroup {
    fn from(n: vcenter_api::NetworkSummary) -> Self {
        Self {
            id: n.network,
            name: n.name,
        }
    }
}

/// An IP pool in the datacenter inventory.
#[derive(Debug, Clone, Serialize)]
pub struct IpPool {
    pub id: i64,
    pub name: String,
    /// Subnet in CIDR-ish display form, when the server reports one.
    pub subnet: Option<String>,
}

impl From<vcenter_api::IpPoolSummary> for IpPool {
    fn from(p: vcenter_api::IpPoolSummary) -> Self {
        let subnet = p
            .ipv4_config
            .as_ref()
            .map(|c| format!("{}/{}", c.subnet_address, c.netmask));
        Self {
            id: p.id,
            name: p.name,
            subnet,
        }
    }
}

/// Outcome of one created network.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedNetwork {
    pub name: String,
    /// Managed-object identifier of the created port group.
    pub portgroup: String,
    pub pool_id: i64,
    pub subnet: Ipv4Net,
    pub vlan: VlanPair,
}

/// Outcome of a delete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteReport {
    pub pools_destroyed: u32,
    pub pools_skipped: u32,
    pub portgroups_destroyed: u32,
    pub portgroups_skipped: u32,
}

/// Scan-only view of the objects a delete run would touch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub portgroups: Vec<PortGroup>,
    pub pools: Vec<IpPool>,
}
