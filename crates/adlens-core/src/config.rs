// ── Runtime connection configuration ──
//
// Describes *how* to reach the analytics service. Carries credential
// data and tuning, but never touches disk -- the CLI resolves files
// and keyrings and hands a finished `ConnectionConfig` in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for one connection to the analytics service.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Service endpoint (e.g. `https://analytics.example.com`).
    pub endpoint: Url,
    /// Shared API key, sent on every request.
    pub api_key: SecretString,
    /// Bearer token from a prior login. Required for user management;
    /// dashboard reads work with the API key alone.
    pub access_token: Option<SecretString>,
    /// Request timeout.
    pub timeout: Duration,
    /// Cadence for watch-mode refresh.
    pub refresh_period: Duration,
}

impl ConnectionConfig {
    pub fn new(endpoint: Url, api_key: SecretString) -> Self {
        Self {
            endpoint,
            api_key,
            access_token: None,
            timeout: Duration::from_secs(30),
            refresh_period: crate::refresh::DEFAULT_REFRESH_PERIOD,
        }
    }
}
