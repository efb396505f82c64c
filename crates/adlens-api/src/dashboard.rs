//! Dashboard endpoints: summary, monthly series, ad-set breakdown,
//! and AI analysis generation.

use crate::client::ApiClient;
use crate::types::{
    AnalysisRequest, AnalysisResponse, BreakdownResponse, MonthlyResponse, SummaryQuery,
    SummaryResponse,
};
use crate::Error;

impl ApiClient {
    /// Fetch the metrics summary, optionally narrowed by date range
    /// and ad-set name.
    pub async fn metrics_summary(&self, query: &SummaryQuery) -> Result<SummaryResponse, Error> {
        let params = query.to_params();
        if params.is_empty() {
            self.get("dashboard").await
        } else {
            self.get_with_params("dashboard", &params).await
        }
    }

    /// Fetch the month-by-month series for a calendar year.
    ///
    /// The service defaults to the current year when `year` is omitted.
    pub async fn monthly_series(&self, year: Option<i32>) -> Result<MonthlyResponse, Error> {
        match year {
            Some(y) => {
                self.get_with_params("dashboard/monthly", &[("year", y.to_string())])
                    .await
            }
            None => self.get("dashboard/monthly").await,
        }
    }

    /// Fetch the per-ad-set metric breakdown.
    pub async fn ad_set_breakdown(&self) -> Result<BreakdownResponse, Error> {
        self.get("dashboard/adsets").await
    }

    /// Request an AI-generated analysis for a date window.
    ///
    /// The caller validates the window before dispatch; this method
    /// sends whatever it is given.
    pub async fn generate_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, Error> {
        self.post("dashboard/generate-analysis", request).await
    }
}
