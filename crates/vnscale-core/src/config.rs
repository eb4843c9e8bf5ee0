//! Core-owned configuration types.
//!
//! The CLI translates its TOML/flag soup into these before core sees
//! anything; core never reads files or environment variables itself.

use std::path::PathBuf;
use std::time::Duration;

use ipnet::Ipv4Net;
use secrecy::SecretString;
use url::Url;

/// TLS verification policy for the vCenter connection.
#[derive(Debug, Clone)]
pub enum TlsVerification {
    SystemDefaults,
    CustomCa(PathBuf),
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for vcenter_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => vcenter_api::TlsMode::System,
            TlsVerification::CustomCa(path) => vcenter_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => vcenter_api::TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Connection parameters for one vCenter server.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Server base URL (e.g. `https://vcenter.lab`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

/// Parameters of one provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Datacenter name to resolve in the inventory.
    pub datacenter: String,
    /// Distributed switch name to resolve within the datacenter.
    pub switch: String,
    /// Naming prefix; networks are `{prefix}-1`, `{prefix}-2`, ...
    pub name_prefix: String,
    /// Base CIDR carved into per-network subnets.
    pub cidr: Ipv4Net,
    /// Prefix length of each per-network subnet.
    pub subnet_prefix_len: u8,
    /// Number of networks to create.
    pub count: u32,
    /// Raise the switch's port cap to this before creating, if it is lower.
    pub max_ports: Option<u32>,
    /// Fixed interval between task status polls.
    pub poll_interval: Duration,
    /// Overall deadline for any single task.
    pub task_timeout: Duration,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            datacenter: String::new(),
            switch: String::new(),
            name_prefix: "testvn1".into(),
            cidr: default_cidr(),
            subnet_prefix_len: 27,
            count: 199,
            max_ports: Some(60_000),
            poll_interval: Duration::from_secs(2),
            task_timeout: Duration::from_secs(300),
        }
    }
}

fn default_cidr() -> Ipv4Net {
    // 2.0.0.0/8; construction from literals cannot fail.
    Ipv4Net::new(std::net::Ipv4Addr::new(2, 0, 0, 0), 8)
        .unwrap_or_else(|_| unreachable!("2.0.0.0/8 is a valid network"))
}
