use thiserror::Error;

/// Top-level error type for the `adlens-api` crate.
///
/// Covers every failure mode of the analytics gateway: credential
/// problems, transport faults, structured API errors, and payloads
/// that fail to deserialize. `adlens-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Bearer token expired or was revoked (401 with a token present).
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// API key rejected by the service.
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// The requested resource or data range does not exist (404).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Structured error from the analytics API.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Headers ─────────────────────────────────────────────────────
    /// A credential could not be encoded as an HTTP header value.
    #[error("Invalid header value for {header}")]
    InvalidHeader { header: &'static str },
}

impl Error {
    /// Returns `true` if this error indicates auth has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::SessionExpired | Self::InvalidApiKey
        )
    }

    /// Returns `true` if this is a transient connectivity error worth
    /// surfacing as "cannot reach the service" rather than a hard fault.
    /// Server-side failures (5xx) count: the service is unreachable in
    /// practice and a later retry may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found / no data" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the API error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> Error {
        Error::Api {
            message: "boom".to_owned(),
            code: None,
            status,
        }
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(api_error(500).is_transient());
        assert!(api_error(503).is_transient());
        assert!(api_error(599).is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        assert!(!api_error(400).is_transient());
        assert!(!api_error(409).is_transient());
        assert!(!Error::SessionExpired.is_transient());
        assert!(!api_error(404).is_transient());
        assert!(api_error(404).is_not_found());
    }
}
