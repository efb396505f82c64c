//! Async Rust client for the adlens campaign analytics API.
//!
//! Typed request/response functions for every resource the dashboard
//! consumes: the metrics summary, the monthly series, the per-ad-set
//! breakdown, AI analysis generation, and account CRUD. Each call is
//! independent and stateless — concurrency strategy (batching,
//! fallback, refresh cadence) lives in `adlens-core`.
//!
//! Credentials are explicit: [`ApiClient::new`] takes the API key and
//! an optional bearer token up front; nothing is read from ambient
//! state at request time.

mod auth;
mod client;
mod dashboard;
mod error;
pub mod types;
mod users;

pub use client::ApiClient;
pub use error::Error;
pub use types::{
    AnalysisRequest, AnalysisResponse, AnalysisSummary, BreakdownResponse, CreateUserRequest,
    LoginResponse, MonthlyResponse, SummaryQuery, SummaryResponse, UpdateUserRequest,
    UserPayload,
};
