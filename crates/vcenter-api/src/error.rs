use thiserror::Error;

/// Top-level error type for the `vcenter-api` crate.
///
/// Covers every failure mode across the API surfaces: authentication,
/// transport, structured server errors, and task outcomes. `vnscale-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Session login failed (wrong credentials, locked account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session token rejected (expired or invalidated server-side).
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server errors ───────────────────────────────────────────────
    /// Structured error returned by the server.
    #[error("vCenter API error (HTTP {status}): {message}")]
    Api {
        message: String,
        error_type: Option<String>,
        status: u16,
    },

    // ── Tasks ───────────────────────────────────────────────────────
    /// A submitted task reached the FAILED terminal state.
    #[error("Task {task} failed: {message}")]
    TaskFailed { task: String, message: String },

    /// A submitted task did not reach a terminal state within the deadline.
    #[error("Task {task} still running after {waited_secs}s")]
    TaskTimeout { task: String, waited_secs: u64 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session is no longer
    /// valid and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the server-side error type (e.g. "NOT_FOUND"), if available.
    pub fn api_error_type(&self) -> Option<&str> {
        match self {
            Self::Api { error_type, .. } => error_type.as_deref(),
            _ => None,
        }
    }
}
