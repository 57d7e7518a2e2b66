// HTTP transport capability.
//
// The dispatcher describes each exchange as plain data (`HttpRequest` /
// `HttpResponse`) and hands it to an `HttpTransport`. `ReqwestTransport`
// is the production implementation; tests substitute their own.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::trace;

use crate::error::Error;

// ── Request / response data ─────────────────────────────────────────

/// The four verbs the API speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&reqwest::Method> for HttpMethod {
    type Error = Error;

    fn try_from(method: &reqwest::Method) -> Result<Self, Self::Error> {
        match method.as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(Error::UnsupportedMethod {
                method: other.to_owned(),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A fully-resolved request: absolute URL, auth header, parameters.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    /// Form-encoded body pairs. `None` sends no body at all.
    pub form: Option<Vec<(String, String)>>,
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one HTTP exchange.
///
/// Implementations report transport-level failures (connect, DNS,
/// timeout) as errors and return every HTTP status, success or not,
/// as an `HttpResponse`. Status interpretation belongs to the dispatcher.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

// ── Transport configuration ─────────────────────────────────────────

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the bundled web PKI roots.
    #[default]
    System,
    /// Trust an additional CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (local development servers).
    DangerAcceptInvalid,
}

/// Settings for building the default `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            user_agent: concat!("vatusa-api/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str());

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

// ── reqwest implementation ──────────────────────────────────────────

/// `HttpTransport` backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
        })
    }

    /// Wrap a pre-built client (connection pool shared with the host).
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let HttpRequest {
            method,
            url,
            headers,
            query,
            form,
        } = request;

        let mut builder = self.http.request(method.into(), url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(ref pairs) = form {
            builder = builder.form(pairs);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}
