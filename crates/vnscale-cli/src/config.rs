//! CLI-side configuration resolution: file + env via `vnscale-config`,
//! then flag overrides, then translation to core config types.
//!
//! Precedence is flag > environment > file > default. Core never sees the
//! TOML structs -- only the finished `ConnectConfig` / `ProvisionConfig`.

use std::path::PathBuf;

use vnscale_config::{Config, load_config};
use vnscale_core::{ConnectConfig, ProvisionConfig};

use crate::cli::{CreateArgs, GlobalOpts};
use crate::error::CliError;

/// Resolve the config file path: `--config` flag, then the library default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(vnscale_config::config_path)
}

/// Load the TOML config and fold the global flags into it.
pub fn load_with_overrides(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(&config_path(global))?;

    if let Some(ref server) = global.server {
        cfg.vcenter.server = Some(server.clone());
    }
    if let Some(ref username) = global.username {
        cfg.vcenter.username = Some(username.clone());
    }
    if global.insecure {
        cfg.vcenter.insecure = true;
    }
    if let Some(ref ca_cert) = global.ca_cert {
        cfg.vcenter.ca_cert = Some(ca_cert.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.vcenter.timeout = timeout;
    }

    if let Some(ref datacenter) = global.datacenter {
        cfg.provision.datacenter = Some(datacenter.clone());
    }
    if let Some(ref switch) = global.switch {
        cfg.provision.dv_switch = Some(switch.clone());
    }
    if let Some(ref prefix) = global.prefix {
        cfg.provision.name_prefix = prefix.clone();
    }

    Ok(cfg)
}

/// Build both core configs for a run, folding create-specific flags in when
/// present.
pub fn resolve(
    global: &GlobalOpts,
    create: Option<&CreateArgs>,
) -> Result<(ConnectConfig, ProvisionConfig), CliError> {
    let mut cfg = load_with_overrides(global)?;

    if let Some(create) = create {
        if let Some(count) = create.count {
            cfg.provision.count = count;
        }
        if let Some(ref cidr) = create.cidr {
            cfg.provision.cidr = cidr.clone();
        }
        if let Some(len) = create.subnet_prefix_len {
            cfg.provision.subnet_prefix_len = len;
        }
        if let Some(max_ports) = create.max_ports {
            cfg.provision.max_ports = max_ports;
        }
    }

    let connect = vnscale_config::to_connect_config(&cfg.vcenter)?;
    let provision = vnscale_config::to_provision_config(&cfg.provision)?;
    Ok((connect, provision))
}
