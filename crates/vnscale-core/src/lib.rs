// vnscale-core: provisioning model and orchestration between vcenter-api
// and the CLI.

pub mod config;
pub mod error;
pub mod model;
pub mod plan;
pub mod provisioner;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConnectConfig, ProvisionConfig, TlsVerification};
pub use error::CoreError;
pub use model::{CreatedNetwork, DeleteReport, IpPool, NetworkPlan, PortGroup, ScanReport, VlanPair};
pub use provisioner::Provisioner;
