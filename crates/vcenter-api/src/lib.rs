// vcenter-api: Async Rust client for the vCenter management surface.
//
// Covers the slice of the API that virtual-network provisioning needs:
// session auth, datacenter/switch inventory, distributed port groups,
// IP pools, and task polling. Mutations are task-returning; callers pair
// them with `VcenterClient::wait_for_task`.

pub mod client;
pub mod error;
pub mod inventory;
pub mod network;
pub mod pools;
pub mod tasks;
pub mod transport;

pub use client::VcenterClient;
pub use error::Error;
pub use inventory::{
    DatacenterSummary, PvlanEntry, PvlanType, SwitchInfo, SwitchReconfigSpec, SwitchSummary,
};
pub use network::{NetworkSummary, PortgroupCreateSpec, PortgroupType};
pub use pools::{IpPoolCreateSpec, IpPoolSummary, Ipv4PoolConfig, NetworkAssociation};
pub use tasks::{TaskInfo, TaskStatus};
pub use transport::{TlsMode, TransportConfig};
