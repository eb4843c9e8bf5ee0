// ── Core error types ──
//
// User-facing errors from vnscale-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<vcenter_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to vCenter at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("vCenter operation timed out: {message}")]
    Timeout { message: String },

    // ── Inventory errors ─────────────────────────────────────────────
    #[error("Datacenter not found: {name}")]
    DatacenterNotFound { name: String },

    #[error("Distributed switch not found: {name}")]
    SwitchNotFound { name: String },

    #[error("Port group not found after creation: {name}")]
    PortGroupNotFound { name: String },

    // ── Plan errors ──────────────────────────────────────────────────
    #[error(
        "Isolated PVLAN pool exhausted: {needed} networks requested \
         but only {available} isolated pairs provisioned on the switch"
    )]
    VlanPoolExhausted { needed: u32, available: usize },

    #[error(
        "Subnet space exhausted: {cidr} holds {available} /{prefix_len} subnets \
         but {needed} networks were requested"
    )]
    SubnetSpaceExhausted {
        cidr: String,
        prefix_len: u8,
        needed: u32,
        available: u128,
    },

    #[error("Invalid subnet prefix length /{prefix_len}: {reason}")]
    InvalidPrefixLen { prefix_len: u8, reason: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("vCenter task failed: {message}")]
    TaskFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Server-side error type (e.g. "NOT_FOUND"), if reported.
        error_type: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vcenter_api::Error> for CoreError {
    fn from(err: vcenter_api::Error) -> Self {
        match err {
            vcenter_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            vcenter_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            vcenter_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        message: "no response within the configured HTTP timeout".into(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        error_type: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            vcenter_api::Error::InvalidUrl(e) => CoreError::Internal(format!("Invalid URL: {e}")),
            vcenter_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            vcenter_api::Error::Api {
                message,
                error_type,
                status,
            } => CoreError::Api {
                message,
                error_type,
                status: Some(status),
            },
            vcenter_api::Error::TaskFailed { task, message } => CoreError::TaskFailed {
                message: format!("{message} (task {task})"),
            },
            vcenter_api::Error::TaskTimeout { task, waited_secs } => CoreError::Timeout {
                message: format!("task {task} still running after {waited_secs}s"),
            },
            vcenter_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
