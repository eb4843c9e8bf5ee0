// vCenter HTTP client
//
// Wraps `reqwest::Client` with session-token auth, URL construction, and
// error-envelope parsing. The endpoint groups (inventory, network, pools,
// tasks) are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Header carrying the session token on every authenticated request.
const SESSION_HEADER: &str = "vmware-api-session-id";

/// Shape of the structured error body the server returns on non-2xx.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    messages: Vec<ApiErrorMessage>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorMessage {
    #[serde(default)]
    default_message: String,
}

/// Authenticated client for a single vCenter server.
///
/// Construction logs in (`POST /api/session`) and stores the returned token;
/// every subsequent request carries it in the `vmware-api-session-id` header.
#[derive(Debug)]
pub struct VcenterClient {
    http: reqwest::Client,
    base_url: Url,
    session: String,
}

impl VcenterClient {
    /// Open a session against `base_url` (the server root, e.g.
    /// `https://vcenter.lab:443`) and return an authenticated client.
    ///
    /// Login rejection maps to `Error::Authentication`; transport failures
    /// (unreachable host, TLS) surface as `Error::Transport` / `Error::Tls`.
    pub async fn connect(
        base_url: Url,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let login_url = join_url(&base_url, "api/session")?;

        debug!("POST {}", login_url);
        let resp = http
            .post(login_url)
            .basic_auth(username, Some(password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("vCenter rejected credentials for user '{username}'"),
            });
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        // The session endpoint returns the token as a bare JSON string.
        let body = resp.text().await.map_err(Error::Transport)?;
        let session: String =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("invalid session token response: {e}"),
                body,
            })?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Terminate the session server-side. The client is unusable afterwards.
    pub async fn logout(self) -> Result<(), Error> {
        let url = self.api_url("session")?;
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .header(SESSION_HEADER, &self.session)
            .send()
            .await
            .map_err(Error::Transport)?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp).await)
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        join_url(&self.base_url, &format!("api/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header(SESSION_HEADER, &self.session)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_body(resp).await
    }

    /// Send a POST request with a JSON body and parse the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .header(SESSION_HEADER, &self.session)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_body(resp).await
    }

    /// Send a PATCH request with a JSON body and parse the JSON response.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let resp = self
            .http
            .patch(url)
            .header(SESSION_HEADER, &self.session)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_body(resp).await
    }

    /// Send a DELETE request and parse the JSON response.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .header(SESSION_HEADER, &self.session)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_body(resp).await
    }

    /// Send a DELETE request, discarding the (usually empty) response body.
    pub(crate) async fn delete_empty(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .header(SESSION_HEADER, &self.session)
            .send()
            .await
            .map_err(Error::Transport)?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp).await)
        }
    }
}

/// Join a path onto a base URL, tolerating a trailing slash on the base.
fn join_url(base: &Url, path: &str) -> Result<Url, Error> {
    let full = format!("{}/{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&full).map_err(Error::InvalidUrl)
}

/// Parse a JSON response body, mapping 401 and non-2xx statuses first.
async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::SessionExpired);
    }
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

/// Build an `Error::Api` from a non-success response, extracting the
/// structured `{ error_type, messages }` body when present.
async fn error_from_response(resp: reqwest::Response) -> Error {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => Error::Api {
            message: parsed
                .messages
                .first()
                .map(|m| m.default_message.clone())
                .unwrap_or_else(|| format!("HTTP {status}")),
            error_type: parsed.error_type,
            status,
        },
        Err(_) => Error::Api {
            message: if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body
            },
            error_type: None,
            status,
        },
    }
}
