//! Filter state for the dashboard window and the user directory.

use adlens_api::SummaryQuery;
use chrono::{Datelike, NaiveDate, Utc};
use strum::Display;

use super::user::UserRecord;

// ── Dashboard window ─────────────────────────────────────────────────

/// The filter window applied to dashboard fetches.
///
/// All fields optional; the service falls back to its full data range
/// when a bound is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub ad_set: Option<String>,
}

impl DashboardFilters {
    pub fn to_query(&self) -> SummaryQuery {
        SummaryQuery {
            start_date: self.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: self.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            ad_set_name: self.ad_set.clone(),
        }
    }

    /// Reporting year for the monthly series: the start bound's year
    /// when set, otherwise the current year.
    pub fn report_year(&self) -> i32 {
        self.start_date
            .map_or_else(|| Utc::now().year(), |d| d.year())
    }
}

// ── User directory ───────────────────────────────────────────────────

/// Activation filter for the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Inactive,
}

/// Directory filter criteria. All three dimensions combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match on username and email.
    pub search: String,
    /// Exact role match.
    pub role: Option<String>,
    pub status: Option<StatusFilter>,
}

impl FilterCriteria {
    pub fn matches(&self, user: &UserRecord) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = user.username.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(ref role) = self.role {
            if user.role != *role {
                return false;
            }
        }
        match self.status {
            Some(StatusFilter::Active) => user.is_active,
            Some(StatusFilter::Inactive) => !user.is_active,
            None => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ROLE_ADMIN;

    fn user(username: &str, email: &str, role: &str, active: bool) -> UserRecord {
        UserRecord {
            id: username.to_owned(),
            username: username.to_owned(),
            email: email.to_owned(),
            role: role.to_owned(),
            is_active: active,
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn search_matches_username_or_email_case_insensitive() {
        let criteria = FilterCriteria {
            search: "ANA".to_owned(),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&user("Anabel", "a@x.com", "User", true)));
        assert!(criteria.matches(&user("bob", "ana.b@x.com", "User", true)));
        assert!(!criteria.matches(&user("carl", "c@x.com", "User", true)));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let criteria = FilterCriteria {
            search: "a".to_owned(),
            role: Some(ROLE_ADMIN.to_owned()),
            status: Some(StatusFilter::Active),
        };
        assert!(criteria.matches(&user("ana", "a@x.com", ROLE_ADMIN, true)));
        // Fails the role dimension despite matching search and status.
        assert!(!criteria.matches(&user("ana", "a@x.com", "User", true)));
        // Fails the status dimension.
        assert!(!criteria.matches(&user("ana", "a@x.com", ROLE_ADMIN, false)));
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.matches(&user("x", "x@x.com", "User", false)));
    }

    #[test]
    fn query_omits_unset_bounds() {
        let filters = DashboardFilters {
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            end_date: None,
            ad_set: Some("Promo".to_owned()),
        };
        let query = filters.to_query();
        assert_eq!(query.start_date.as_deref(), Some("2026-02-01"));
        assert!(query.end_date.is_none());
        assert_eq!(query.ad_set_name.as_deref(), Some("Promo"));
    }

    #[test]
    fn report_year_follows_start_bound() {
        let filters = DashboardFilters {
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..DashboardFilters::default()
        };
        assert_eq!(filters.report_year(), 2024);
    }
}
