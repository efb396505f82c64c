// ── Dashboard facade ──
//
// Single entry point for consumers: owns the gateway client, the
// store, the orchestrator, and the lifecycle token that bounds every
// background task spawned on its behalf.

use std::sync::Arc;
use std::time::Duration;

use adlens_api::ApiClient;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::Url;

use crate::accounts::AccountService;
use crate::analysis;
use crate::config::ConnectionConfig;
use crate::error::CoreError;
use crate::model::{Analysis, AnalysisWindow, DashboardFilters};
use crate::orchestrator::{FetchOrchestrator, LoadReport};
use crate::refresh::{self, RefreshHandle};
use crate::store::DashboardStore;

/// Cheaply cloneable handle to one dashboard session.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: ConnectionConfig,
    api: ApiClient,
    store: DashboardStore,
    orchestrator: Arc<FetchOrchestrator>,
    accounts: AccountService,
    cancel: CancellationToken,
}

impl Dashboard {
    /// Build a session from explicit credentials. Performs no I/O;
    /// the first load happens on [`load`](Self::load) or
    /// [`start_refresh`](Self::start_refresh).
    pub fn connect(config: ConnectionConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(
            config.endpoint.as_str(),
            &config.api_key,
            config.access_token.as_ref(),
            config.timeout,
        )?;
        let store = DashboardStore::new();
        let orchestrator = Arc::new(FetchOrchestrator::new(api.clone(), store.clone()));
        let accounts = AccountService::new(api.clone(), store.clone());

        Ok(Self {
            inner: Arc::new(DashboardInner {
                config,
                api,
                store,
                orchestrator,
                accounts,
                cancel: CancellationToken::new(),
            }),
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &DashboardStore {
        &self.inner.store
    }

    pub fn accounts(&self) -> &AccountService {
        &self.inner.accounts
    }

    /// Lifecycle token for tasks that should die with this session.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.inner.cancel
    }

    /// One dashboard load for the given window.
    pub async fn load(&self, filters: &DashboardFilters) -> LoadReport {
        self.inner.orchestrator.load_all(filters).await
    }

    /// Start a periodic refresh for the given window, at the cadence
    /// from the connection config.
    pub fn start_refresh(&self, filters: DashboardFilters) -> RefreshHandle {
        self.start_refresh_every(filters, self.inner.config.refresh_period)
    }

    pub fn start_refresh_every(
        &self,
        filters: DashboardFilters,
        period: Duration,
    ) -> RefreshHandle {
        self.inner.orchestrator.start_refresh(filters, period)
    }

    /// Keep the account directory fresh on a fixed cadence. The first
    /// fetch starts immediately.
    pub fn start_users_refresh(&self, period: Duration) -> RefreshHandle {
        let inner = Arc::clone(&self.inner);
        refresh::spawn_refresh(period, move || {
            let inner = Arc::clone(&inner);
            async move {
                if let Err(err) = inner.accounts.refresh().await {
                    warn!(%err, "account refresh cycle failed");
                }
            }
        })
    }

    /// Request an AI analysis for a validated window.
    pub async fn analyze(&self, window: &AnalysisWindow) -> Result<Analysis, CoreError> {
        analysis::generate(&self.inner.api, window).await
    }

    /// End the session: cancel lifecycle-bound tasks and drop state.
    pub fn shutdown(&self) {
        info!("dashboard session shutting down");
        self.inner.cancel.cancel();
        self.inner.store.clear();
    }
}

// ── Authentication ───────────────────────────────────────────────────

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub access_token: SecretString,
    pub username: Option<String>,
    pub role: Option<String>,
}

/// Authenticate against the service and return the bearer token.
///
/// Uses a transient client carrying only the API key; the caller
/// builds a [`Dashboard`] with the returned token.
pub async fn login(
    endpoint: &Url,
    api_key: &SecretString,
    email: &str,
    password: &SecretString,
    timeout: Duration,
) -> Result<SessionInfo, CoreError> {
    let api = ApiClient::new(endpoint.as_str(), api_key, None, timeout)?;
    let response = api.login(email, password).await?;
    info!(username = response.username.as_deref().unwrap_or(email), "login succeeded");
    Ok(SessionInfo {
        access_token: SecretString::from(response.access_token),
        username: response.username,
        role: response.role,
    })
}

/// Invalidate a bearer token server-side. A failure here is reported
/// but the caller should still forget the token locally.
pub async fn logout(
    endpoint: &Url,
    api_key: &SecretString,
    token: &SecretString,
    timeout: Duration,
) -> Result<(), CoreError> {
    let api = ApiClient::new(endpoint.as_str(), api_key, Some(token), timeout)?;
    api.logout().await?;
    Ok(())
}
