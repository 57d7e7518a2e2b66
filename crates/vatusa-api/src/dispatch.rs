// Authenticated request dispatcher.
//
// Owns the base address and bearer token, turns a relative path into an
// absolute URL by literal concatenation, and maps every non-200 status to
// `Error::UnexpectedStatus`. Resource clients share one instance.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Error;
use crate::shape::ResponseShape;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

// ── Request options ─────────────────────────────────────────────────

/// Optional query parameters and form body for one call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    form: Option<Vec<(String, String)>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append query parameters from a flat serializable struct or map.
    ///
    /// `None` members are omitted entirely.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, Error> {
        self.query.extend(encode_pairs(params)?);
        Ok(self)
    }

    /// Set the form-encoded body from a flat serializable struct or map.
    ///
    /// `None` members are omitted entirely.
    pub fn form<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.form = Some(encode_pairs(body)?);
        Ok(self)
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn form_pairs(&self) -> Option<&[(String, String)]> {
        self.form.as_deref()
    }
}

/// Flatten a serializable value into ordered `(key, value)` pairs.
///
/// The value must serialize to a JSON object whose members are scalars.
/// Null members are dropped; strings pass through; numbers and booleans
/// use their JSON text.
pub fn encode_pairs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>, Error> {
    let json = serde_json::to_value(value).map_err(|e| Error::Encoding {
        message: e.to_string(),
    })?;

    let serde_json::Value::Object(map) = json else {
        return Err(Error::Encoding {
            message: format!("expected an object of parameters, got {json}"),
        });
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                return Err(Error::Encoding {
                    message: format!("parameter '{key}' is not a scalar: {nested}"),
                });
            }
        };
        pairs.push((key, text));
    }
    Ok(pairs)
}

// ── Dispatcher ──────────────────────────────────────────────────────

/// Shared, immutable request machinery behind every resource client.
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    token: SecretString,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Validate the base address and bind it with a token and transport.
    ///
    /// The address must be an absolute URL without a trailing `/`, so that
    /// appending a path that starts with `/` is unambiguous.
    pub fn new(
        base_url: &str,
        token: SecretString,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, Error> {
        validate_base_url(base_url)?;
        Ok(Self {
            transport,
            base_url: base_url.to_owned(),
            token,
        })
    }

    /// The validated base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Raw exchange ─────────────────────────────────────────────────

    /// Perform one authenticated exchange and return the raw 200 body.
    ///
    /// Method and path are checked before anything reaches the transport.
    pub async fn raw_call(
        &self,
        method: &reqwest::Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, Error> {
        let method = HttpMethod::try_from(method)?;
        if !path.starts_with('/') {
            return Err(Error::MalformedPath {
                path: path.to_owned(),
            });
        }

        let url = format!("{}{path}", self.base_url);
        let request = HttpRequest {
            method,
            url,
            headers: self.auth_headers()?,
            query: options.query,
            form: options.form,
        };

        debug!("{method} {}", request.url);
        let response = self.transport.send(request).await?;

        if response.status != 200 {
            warn!(%method, path, status = response.status, "unexpected response status");
            return Err(Error::UnexpectedStatus {
                status: response.status,
            });
        }

        Ok(response)
    }

    fn auth_headers(&self) -> Result<HeaderMap, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|e| Error::InvalidCredential {
                reason: format!("token is not a valid header value: {e}"),
            })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    // ── Typed calls ──────────────────────────────────────────────────

    /// Perform an exchange and decode the body according to shape `S`.
    pub async fn call<S: ResponseShape>(
        &self,
        method: &reqwest::Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<S::Output, Error> {
        let response = self.raw_call(method, path, options).await?;
        S::decode(&response.body)
    }

    pub async fn get<S: ResponseShape>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<S::Output, Error> {
        self.call::<S>(&reqwest::Method::GET, path, options).await
    }

    pub async fn post<S: ResponseShape>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<S::Output, Error> {
        self.call::<S>(&reqwest::Method::POST, path, options).await
    }

    pub async fn put<S: ResponseShape>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<S::Output, Error> {
        self.call::<S>(&reqwest::Method::PUT, path, options).await
    }

    pub async fn delete<S: ResponseShape>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<S::Output, Error> {
        self.call::<S>(&reqwest::Method::DELETE, path, options).await
    }
}

/// Reject a base address that ends in `/` or does not parse as a URL.
///
/// Paths are joined by plain concatenation, so `"{base}/controller"` with a
/// trailing separator would produce `//controller`.
pub fn validate_base_url(raw: &str) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidBaseAddress {
        address: raw.to_owned(),
        reason,
    };

    if raw.ends_with('/') {
        return Err(invalid("must not end with '/'".into()));
    }
    url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    Ok(())
}
