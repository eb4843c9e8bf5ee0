//! Configuration for the vnscale CLI.
//!
//! TOML file + `VNSCALE_`-prefixed environment variables, password
//! resolution (env var, named env var, plaintext), and translation to
//! `vnscale_core`'s config types. Core never sees these structs -- it
//! receives pre-built `ConnectConfig` / `ProvisionConfig` values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use ipnet::Ipv4Net;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vnscale_core::{ConnectConfig, ProvisionConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("missing {field}: set it in the config file or pass the matching flag")]
    Missing { field: String },

    #[error("no password configured: set VNSCALE_PASSWORD, password_env, or [vcenter] password")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Connection settings for the vCenter server.
    #[serde(default)]
    pub vcenter: VcenterSection,

    /// Provisioning-run parameters.
    #[serde(default)]
    pub provision: ProvisionSection,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VcenterSection {
    /// Server base URL (e.g. "https://vcenter.lab").
    pub server: Option<String>,

    /// Login username (e.g. "administrator@vsphere.local").
    pub username: Option<String>,

    /// Password in plaintext -- prefer VNSCALE_PASSWORD or password_env.
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Per-request HTTP timeout, seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for VcenterSection {
    fn default() -> Self {
        Self {
            server: None,
            username: None,
            password: None,
            password_env: None,
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProvisionSection {
    /// Datacenter name in the vCenter inventory.
    pub datacenter: Option<String>,

    /// Distributed switch name within the datacenter.
    pub dv_switch: Option<String>,

    /// Naming prefix for created networks.
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    /// Base CIDR carved into per-network subnets.
    #[serde(default = "default_cidr")]
    pub cidr: String,

    /// Prefix length of each per-network subnet.
    #[serde(default = "default_subnet_prefix_len")]
    pub subnet_prefix_len: u8,

    /// Number of networks a create run provisions.
    #[serde(default = "default_count")]
    pub count: u32,

    /// Switch port cap target; 0 disables the pre-step.
    #[serde(default = "default_max_ports")]
    pub max_ports: u32,

    /// Seconds between task status polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Overall per-task deadline, seconds.
    #[serde(default = "default_task_timeout")]
    pub task_timeout_secs: u64,
}

impl Default for ProvisionSection {
    fn default() -> Self {
        Self {
            datacenter: None,
            dv_switch: None,
            name_prefix: default_name_prefix(),
            cidr: default_cidr(),
            subnet_prefix_len: default_subnet_prefix_len(),
            count: default_count(),
            max_ports: default_max_ports(),
            poll_interval_secs: default_poll_interval(),
            task_timeout_secs: default_task_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_name_prefix() -> String {
    "testvn1".into()
}
fn default_cidr() -> String {
    "2.0.0.0/8".into()
}
fn default_subnet_prefix_len() -> u8 {
    27
}
fn default_count() -> u32 {
    199
}
fn default_max_ports() -> u32 {
    60_000
}
fn default_poll_interval() -> u64 {
    2
}
fn default_task_timeout() -> u64 {
    300
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `VNSCALE_CONFIG` env var, then XDG /
/// platform conventions.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("VNSCALE_CONFIG") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("dev", "vnscale", "vnscale")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("vnscale");
            p.push("config.toml");
            p
        })
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full `Config` from a file + environment.
///
/// Environment variables use the `VNSCALE_` prefix with `__` as the section
/// separator, e.g. `VNSCALE_VCENTER__SERVER`, `VNSCALE_PROVISION__COUNT`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VNSCALE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Serialize a config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the vCenter password from the credential chain.
pub fn resolve_password(vcenter: &VcenterSection) -> Result<SecretString, ConfigError> {
    // 1. VNSCALE_PASSWORD env var
    if let Ok(pw) = std::env::var("VNSCALE_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 2. The password_env-named env var
    if let Some(ref env_name) = vcenter.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = vcenter.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials)
}

// ── Translation to core types ───────────────────────────────────────

/// Build a `ConnectConfig` from the `[vcenter]` section.
pub fn to_connect_config(vcenter: &VcenterSection) -> Result<ConnectConfig, ConfigError> {
    let server = vcenter.server.as_deref().ok_or(ConfigError::Missing {
        field: "vcenter.server".into(),
    })?;
    let url: url::Url = server.parse().map_err(|_| ConfigError::Validation {
        field: "vcenter.server".into(),
        reason: format!("invalid URL: {server}"),
    })?;

    let username = vcenter.username.clone().ok_or(ConfigError::Missing {
        field: "vcenter.username".into(),
    })?;
    let password = resolve_password(vcenter)?;

    let tls = if vcenter.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = vcenter.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ConnectConfig {
        url,
        username,
        password,
        tls,
        timeout: Duration::from_secs(vcenter.timeout),
    })
}

/// Build a `ProvisionConfig` from the `[provision]` section.
pub fn to_provision_config(provision: &ProvisionSection) -> Result<ProvisionConfig, ConfigError> {
    let datacenter = provision.datacenter.clone().ok_or(ConfigError::Missing {
        field: "provision.datacenter".into(),
    })?;
    let switch = provision.dv_switch.clone().ok_or(ConfigError::Missing {
        field: "provision.dv_switch".into(),
    })?;

    let cidr: Ipv4Net = provision.cidr.parse().map_err(|_| ConfigError::Validation {
        field: "provision.cidr".into(),
        reason: format!("invalid IPv4 CIDR: {}", provision.cidr),
    })?;

    Ok(ProvisionConfig {
        datacenter,
        switch,
        name_prefix: provision.name_prefix.clone(),
        cidr,
        subnet_prefix_len: provision.subnet_prefix_len,
        count: provision.count,
        max_ports: (provision.max_ports > 0).then_some(provision.max_ports),
        poll_interval: Duration::from_secs(provision.poll_interval_secs),
        task_timeout: Duration::from_secs(provision.task_timeout_secs),
    })
}

/// Commented sample config for `vnscale config init`.
pub fn sample_config() -> &'static str {
    r#"# vnscale configuration
#
# Flags override environment variables, which override this file.
# Environment variables use the VNSCALE_ prefix with __ between section
# and key, e.g. VNSCALE_VCENTER__SERVER, VNSCALE_PROVISION__COUNT.

[vcenter]
server = "https://vcenter.lab"
username = "administrator@vsphere.local"
# Prefer VNSCALE_PASSWORD or password_env over a plaintext password here.
# password_env = "LAB_VCENTER_PASSWORD"
insecure = true
timeout = 30

[provision]
datacenter = "scale-dc"
dv_switch = "guest-dvs"
name_prefix = "testvn1"
cidr = "2.0.0.0/8"
subnet_prefix_len = 27
count = 199
max_ports = 60000
poll_interval_secs = 2
task_timeout_secs = 300
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_provisioning_scheme() {
        let section = ProvisionSection::default();
        assert_eq!(section.name_prefix, "testvn1");
        assert_eq!(section.cidr, "2.0.0.0/8");
        assert_eq!(section.subnet_prefix_len, 27);
        assert_eq!(section.count, 199);
        assert_eq!(section.max_ports, 60_000);
        assert_eq!(section.poll_interval_secs, 2);
    }

    #[test]
    fn load_roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[vcenter]
server = "https://vc.example"
username = "admin"
password = "s3cret"
insecure = true

[provision]
datacenter = "dc1"
dv_switch = "dvs1"
count = 12
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.vcenter.server.as_deref(), Some("https://vc.example"));
        assert!(cfg.vcenter.insecure);
        assert_eq!(cfg.provision.count, 12);
        // Unspecified keys fall back to defaults.
        assert_eq!(cfg.provision.subnet_prefix_len, 27);

        let provision = to_provision_config(&cfg.provision).unwrap();
        assert_eq!(provision.datacenter, "dc1");
        assert_eq!(provision.cidr.to_string(), "2.0.0.0/8");
        assert_eq!(provision.max_ports, Some(60_000));
    }

    #[test]
    fn missing_datacenter_is_an_error() {
        let section = ProvisionSection::default();
        let err = to_provision_config(&section).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref field } if field == "provision.datacenter"));
    }

    #[test]
    fn plaintext_password_is_the_last_resort() {
        let vcenter = VcenterSection {
            password: Some("plain".into()),
            ..VcenterSection::default()
        };
        use secrecy::ExposeSecret;
        let pw = resolve_password(&vcenter).unwrap();
        assert_eq!(pw.expose_secret(), "plain");

        let empty = VcenterSection::default();
        assert!(matches!(resolve_password(&empty), Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn zero_max_ports_disables_the_reconfigure_step() {
        let section = ProvisionSection {
            datacenter: Some("dc1".into()),
            dv_switch: Some("dvs1".into()),
            max_ports: 0,
            ..ProvisionSection::default()
        };
        let provision = to_provision_config(&section).unwrap();
        assert_eq!(provision.max_ports, None);
    }
}
