// Wire types for the analytics API.
//
// The backend serializes with PascalCase field names; query parameters
// and the analysis request body use camelCase. Domain conversion lives
// in `adlens-core` -- these structs mirror the wire shape verbatim.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── Dashboard summary ────────────────────────────────────────────────

/// Response of `GET /dashboard`.
///
/// Scalar totals plus two per-ad-set mappings. Maps are insertion-ordered
/// (`IndexMap`) so chart label order matches what the service computed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryResponse {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub selected_ad_set: Option<String>,
    #[serde(default)]
    pub available_ad_sets: Vec<String>,
    pub last_upload: Option<String>,

    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub total_reach: f64,
    #[serde(default)]
    pub total_impressions: f64,
    #[serde(default)]
    pub total_results: f64,
    #[serde(default)]
    pub avg_cost_per_result: f64,
    #[serde(default)]
    pub reach_vs_impressions: f64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub cost_per_mille: f64,

    #[serde(default)]
    pub daily_budget_per_ad_set: IndexMap<String, f64>,
    #[serde(default)]
    pub spend_per_ad_set: IndexMap<String, f64>,
}

/// Optional query parameters for `GET /dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub ad_set_name: Option<String>,
}

impl SummaryQuery {
    /// Render as query parameters, omitting unset fields entirely
    /// (the service treats an empty string as a real filter value).
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref s) = self.start_date {
            params.push(("startDate", s.clone()));
        }
        if let Some(ref e) = self.end_date {
            params.push(("endDate", e.clone()));
        }
        if let Some(ref a) = self.ad_set_name {
            params.push(("adSetName", a.clone()));
        }
        params
    }
}

// ── Monthly series ───────────────────────────────────────────────────

/// Response of `GET /dashboard/monthly`.
///
/// One array per metric, nominally 12 entries (index 0 = January).
/// Length is NOT validated here; `adlens-core` normalizes to exactly 12.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonthlyResponse {
    #[serde(default)]
    pub spend: Vec<f64>,
    #[serde(default)]
    pub reach: Vec<f64>,
    #[serde(default)]
    pub impressions: Vec<f64>,
    #[serde(default)]
    pub results: Vec<f64>,
}

// ── Per-ad-set breakdown ─────────────────────────────────────────────

/// Response of `GET /dashboard/adsets`: metric -> (ad set -> value).
/// The ad-set key sets may differ between metrics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreakdownResponse {
    #[serde(default)]
    pub spend: IndexMap<String, f64>,
    #[serde(default)]
    pub reach: IndexMap<String, f64>,
    #[serde(default)]
    pub impressions: IndexMap<String, f64>,
    #[serde(default)]
    pub results: IndexMap<String, f64>,
    #[serde(default)]
    pub cost_per_result: IndexMap<String, f64>,
}

// ── AI analysis ──────────────────────────────────────────────────────

/// Body of `POST /dashboard/generate-analysis`.
///
/// `ad_set_name` is omitted (not sent as null) when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_set_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisSummary {
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub total_reach: f64,
    #[serde(default)]
    pub total_impressions: f64,
    #[serde(default)]
    pub total_results: f64,
    #[serde(default)]
    pub ad_set_count: u32,
    #[serde(default)]
    pub cost_per_result: f64,
}

/// Response of `POST /dashboard/generate-analysis`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub has_analysis: bool,
    #[serde(default)]
    pub summary: AnalysisSummary,
    #[serde(default)]
    pub available_ad_sets: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub selected_ad_set: Option<String>,
}

// ── User accounts ────────────────────────────────────────────────────

/// A user record as returned by `GET /users`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPayload {
    /// Record identifier. The service has emitted this under several
    /// names across versions, hence the aliases.
    #[serde(rename = "Id", alias = "id", alias = "_id", alias = "ID", default)]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

/// `GET /users` returns either a bare array or `{"users": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UsersEnvelope {
    Bare(Vec<UserPayload>),
    Wrapped { users: Vec<UserPayload> },
}

impl UsersEnvelope {
    pub(crate) fn into_users(self) -> Vec<UserPayload> {
        match self {
            Self::Bare(users) | Self::Wrapped { users } => users,
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_active: bool,
}

/// Body of `PUT /users/{id}`.
///
/// A blank password means "keep the current one" -- the field is
/// omitted from the payload, never sent as an empty string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: String,
    pub is_active: bool,
}

// ── Auth ─────────────────────────────────────────────────────────────

/// Response of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
