//! # adlens-core
//!
//! Data orchestration for the adlens dashboard: concurrent fetch with
//! graceful degradation, a reactive store, pure view projection, a
//! readiness gate for late-initializing render surfaces, and a
//! lifecycle-bound refresh loop.
//!
//! The crate is UI-agnostic. Consumers subscribe to the
//! [`DashboardStore`] watch channels and render however they like;
//! the CLI and tests are the two consumers in this workspace.
//!
//! ```no_run
//! use adlens_core::{ConnectionConfig, Dashboard, DashboardFilters};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), adlens_core::CoreError> {
//! let config = ConnectionConfig::new(
//!     "https://analytics.example.com".parse().expect("url"),
//!     SecretString::from("api-key".to_owned()),
//! );
//! let dashboard = Dashboard::connect(config)?;
//! let report = dashboard.load(&DashboardFilters::default()).await;
//! assert!(report.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod projector;
pub mod readiness;
pub mod refresh;
pub mod store;

pub use accounts::{AccountEdit, AccountService, NewAccount};
pub use config::ConnectionConfig;
pub use dashboard::{login, logout, Dashboard, SessionInfo};
pub use error::{CoreError, FailureKind};
pub use model::{
    Analysis, AnalysisTotals, AnalysisWindow, DashboardFilters, FilterCriteria, Metric,
    MetricsSnapshot, MonthlySeries, SegmentBreakdown, StatusFilter, UserRecord, MONTHS_PER_YEAR,
    ROLE_ADMIN, ROLE_USER,
};
pub use orchestrator::{FetchOrchestrator, LoadReport};
pub use projector::{
    directory_stats, project, DirectoryStats, UserDirectory, ViewModel, DEFAULT_PAGE_SIZE,
};
pub use readiness::{ReadinessGate, RenderSurface, RETRY_DELAY};
pub use refresh::{spawn_refresh, RefreshHandle, DEFAULT_REFRESH_PERIOD};
pub use store::{DashboardState, DashboardStore, DataSlice, SliceError};
