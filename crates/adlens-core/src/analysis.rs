//! AI analysis generation.

use adlens_api::ApiClient;
use tracing::info;

use crate::error::CoreError;
use crate::model::{Analysis, AnalysisWindow};

/// Request an AI performance analysis for a validated window.
pub async fn generate(api: &ApiClient, window: &AnalysisWindow) -> Result<Analysis, CoreError> {
    info!(
        start = %window.start(),
        end = %window.end(),
        ad_set = window.ad_set().unwrap_or("<all>"),
        "requesting analysis"
    );
    let response = api.generate_analysis(&window.to_request()).await?;
    Ok(Analysis::from(response))
}

/// Reconcile an ad-set selection against a fresh inventory: a selected
/// ad set that no longer exists is cleared rather than silently sent
/// with later requests.
pub fn reconcile_selection(selected: &mut Option<String>, available: &[String]) {
    if let Some(name) = selected.as_deref() {
        if !available.iter().any(|a| a == name) {
            *selected = None;
        }
    }
}
