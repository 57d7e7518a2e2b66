use thiserror::Error;

/// Top-level error type for the `vatusa-api` crate.
///
/// Every failure mode of the client funnels through here: request
/// preconditions, transport, non-200 responses and payload decoding.
/// Nothing is retried or recovered locally.
#[derive(Debug, Error)]
pub enum Error {
    // ── Request preconditions ───────────────────────────────────────
    /// HTTP verb outside GET, POST, PUT and DELETE.
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    /// Relative path did not start with `/`.
    #[error("Malformed request path '{path}': must start with '/'")]
    MalformedPath { path: String },

    /// Base address rejected at construction.
    #[error("Invalid base address '{address}': {reason}")]
    InvalidBaseAddress { address: String, reason: String },

    /// Token cannot be carried in an `Authorization` header.
    #[error("Invalid credential: {reason}")]
    InvalidCredential { reason: String },

    /// Roster query with both home and visitor controllers excluded.
    #[error("Invalid roster selection: at least one of home or visitor must be included")]
    InvalidRosterSelection,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// TLS or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// Any response whose status is not exactly 200.
    #[error("Unexpected response status: HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// JSON payload did not match the declared response shape.
    #[error("Failed to decode {shape}: {message}")]
    Deserialization {
        shape: String,
        message: String,
        body: String,
    },

    /// Query or form parameters could not be flattened into key/value pairs.
    #[error("Failed to encode request parameters: {message}")]
    Encoding { message: String },

    // ── Pending contracts ───────────────────────────────────────────
    /// Operation is declared but has no endpoint behind it yet.
    #[error("Operation not implemented: {operation}")]
    Unimplemented { operation: &'static str },
}

impl Error {
    /// The HTTP status carried by an [`Error::UnexpectedStatus`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a transient error a caller may choose to retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_helpers_read_unexpected_status() {
        let err = Error::UnexpectedStatus { status: 404 };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert!(!err.is_transient());

        let err = Error::UnexpectedStatus { status: 401 };
        assert!(err.is_unauthorized());
    }

    #[test]
    fn precondition_errors_carry_no_status() {
        let err = Error::MalformedPath {
            path: "controller/1".into(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Malformed request path 'controller/1': must start with '/'"
        );
    }
}
