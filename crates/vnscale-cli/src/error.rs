//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vnscale_config::ConfigError;
use vnscale_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to vCenter at {url}")]
    #[diagnostic(
        code(vnscale::connection_failed),
        help(
            "Check that the server is reachable.\n\
             URL: {url}\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(vnscale::auth_failed),
        help("Verify the username and password for the vCenter server.")
    )]
    AuthFailed { message: String },

    #[error("No password configured")]
    #[diagnostic(
        code(vnscale::no_credentials),
        help(
            "Set VNSCALE_PASSWORD, point [vcenter] password_env at an\n\
             environment variable, or run: vnscale config init"
        )
    )]
    NoCredentials,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(vnscale::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── Plan ─────────────────────────────────────────────────────────
    #[error("Isolated PVLAN pool exhausted: need {needed}, found {available}")]
    #[diagnostic(
        code(vnscale::vlan_pool_exhausted),
        help(
            "Provision more isolated PVLAN pairs on the switch,\n\
             or lower --count."
        )
    )]
    VlanPoolExhausted { needed: u32, available: usize },

    #[error("Subnet space exhausted: {cidr} holds {available} /{prefix_len} subnets, need {needed}")]
    #[diagnostic(
        code(vnscale::subnet_space_exhausted),
        help("Widen --cidr, raise --subnet-prefix-len, or lower --count.")
    )]
    SubnetSpaceExhausted {
        cidr: String,
        prefix_len: u8,
        needed: u32,
        available: u128,
    },

    // ── Operations ───────────────────────────────────────────────────
    #[error("vCenter task failed: {message}")]
    #[diagnostic(code(vnscale::task_failed))]
    TaskFailed { message: String },

    #[error("vCenter API error: {message}")]
    #[diagnostic(code(vnscale::api_error))]
    ApiError {
        message: String,
        error_type: Option<String>,
    },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vnscale::validation))]
    Validation { field: String, reason: String },

    #[error("Missing required setting: {field}")]
    #[diagnostic(
        code(vnscale::missing_setting),
        help(
            "Set it in the config file or pass the matching flag.\n\
             Config file: {path}"
        )
    )]
    MissingSetting { field: String, path: String },

    #[error(transparent)]
    #[diagnostic(code(vnscale::config))]
    Config(Box<figment::Error>),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(vnscale::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vnscale::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Timed out: {message}")]
    #[diagnostic(
        code(vnscale::timeout),
        help(
            "Increase --timeout (or task_timeout_secs in the config) and\n\
             check server responsiveness."
        )
    )]
    Timeout { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON rendering failed: {0}")]
    #[diagnostic(code(vnscale::json))]
    Json(#[from] serde_json::Error),

    // ── Fallback ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(vnscale::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::MissingSetting { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { message } => CliError::Timeout { message },

            CoreError::DatacenterNotFound { name } => CliError::NotFound {
                resource_type: "datacenter".into(),
                identifier: name,
            },

            CoreError::SwitchNotFound { name } => CliError::NotFound {
                resource_type: "distributed switch".into(),
                identifier: name,
            },

            CoreError::PortGroupNotFound { name } => CliError::NotFound {
                resource_type: "port group".into(),
                identifier: name,
            },

            CoreError::VlanPoolExhausted { needed, available } => {
                CliError::VlanPoolExhausted { needed, available }
            }

            CoreError::SubnetSpaceExhausted {
                cidr,
                prefix_len,
                needed,
                available,
            } => CliError::SubnetSpaceExhausted {
                cidr,
                prefix_len,
                needed,
                available,
            },

            CoreError::InvalidPrefixLen { prefix_len, reason } => CliError::Validation {
                field: "subnet-prefix-len".into(),
                reason: format!("/{prefix_len}: {reason}"),
            },

            CoreError::TaskFailed { message } => CliError::TaskFailed { message },

            CoreError::Api {
                message,
                error_type,
                status: _,
            } => CliError::ApiError {
                message,
                error_type,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Missing { field } => CliError::MissingSetting {
                field,
                path: vnscale_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials => CliError::NoCredentials,
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Serialization(e) => CliError::Internal(e.to_string()),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
