// Hand-crafted async HTTP client for the analytics API.
//
// Base path: <endpoint>/api/
// Auth: API_KEY header on every request, plus an optional
//       Authorization bearer token injected at construction time.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;

pub(crate) const API_KEY_HEADER: &str = "API_KEY";

// ── Error response shape from the API ────────────────────────────────

/// The service reports failures as `{"message": ...}` or `{"error": ...}`,
/// occasionally with a machine-readable `code`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the analytics API.
///
/// Credentials are explicit constructor inputs — nothing is read from
/// ambient storage. A client built without a bearer token can only call
/// the login endpoint; rebuild it with the token once authenticated.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Whether a bearer token was attached. Decides how a 401 is
    /// classified: expired session vs. rejected API key.
    has_bearer: bool,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from explicit credentials.
    ///
    /// Injects `API_KEY` (and `Authorization: Bearer ...` when a token
    /// is given) as default headers on every request. Both are marked
    /// sensitive so they never appear in debug logs.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        bearer: Option<&SecretString>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();

        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| Error::InvalidHeader { header: API_KEY_HEADER })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        if let Some(token) = bearer {
            let mut auth_value =
                HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|_| Error::InvalidHeader { header: "Authorization" })?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            has_bearer: bearer.is_some(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            has_bearer: true,
        })
    }

    /// Ensure the base URL ends with `/api/` so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"dashboard/monthly"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_empty(path, resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(path, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(path, status, resp).await)
        }
    }

    async fn handle_empty(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(path, status, resp).await)
        }
    }

    async fn parse_error(
        &self,
        path: &str,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
    ) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            // With a bearer token the session expired; without one the
            // API key itself was rejected.
            return if self.has_bearer {
                Error::SessionExpired
            } else {
                Error::InvalidApiKey
            };
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Error::NotFound {
                resource: path.to_owned(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                message: err
                    .message
                    .or(err.error)
                    .unwrap_or_else(|| status.to_string()),
                code: err.code,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }
}
