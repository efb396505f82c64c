//! AI-generated performance analysis.

use adlens_api::{AnalysisRequest, AnalysisResponse, AnalysisSummary};
use chrono::NaiveDate;

use crate::error::CoreError;

/// A validated analysis window. Construction rejects inverted ranges
/// before any request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisWindow {
    start: NaiveDate,
    end: NaiveDate,
    ad_set: Option<String>,
}

impl AnalysisWindow {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        ad_set: Option<String>,
    ) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::validation(
                "date range",
                "start date is after end date",
            ));
        }
        Ok(Self { start, end, ad_set })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn ad_set(&self) -> Option<&str> {
        self.ad_set.as_deref()
    }

    pub(crate) fn to_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            start_date: self.start.format("%Y-%m-%d").to_string(),
            end_date: self.end.format("%Y-%m-%d").to_string(),
            ad_set_name: self.ad_set.clone(),
        }
    }
}

/// Totals the analysis was computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisTotals {
    pub total_spent: f64,
    pub total_reach: f64,
    pub total_impressions: f64,
    pub total_results: f64,
    pub ad_set_count: u32,
    pub cost_per_result: f64,
}

impl From<AnalysisSummary> for AnalysisTotals {
    fn from(raw: AnalysisSummary) -> Self {
        Self {
            total_spent: raw.total_spent,
            total_reach: raw.total_reach,
            total_impressions: raw.total_impressions,
            total_results: raw.total_results,
            ad_set_count: raw.ad_set_count,
            cost_per_result: raw.cost_per_result,
        }
    }
}

/// A generated analysis plus the totals and ad-set inventory that
/// accompanied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub text: String,
    pub has_analysis: bool,
    pub totals: AnalysisTotals,
    pub available_ad_sets: Vec<String>,
}

impl From<AnalysisResponse> for Analysis {
    fn from(raw: AnalysisResponse) -> Self {
        Self {
            text: raw.analysis,
            has_analysis: raw.has_analysis,
            totals: raw.summary.into(),
            available_ad_sets: raw.available_ad_sets,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let err = AnalysisWindow::new(start, end, None).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn single_day_window_is_valid() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let window = AnalysisWindow::new(day, day, Some("Promo".to_owned())).unwrap();
        let request = window.to_request();
        assert_eq!(request.start_date, "2026-03-10");
        assert_eq!(request.end_date, "2026-03-10");
        assert_eq!(request.ad_set_name.as_deref(), Some("Promo"));
    }
}
