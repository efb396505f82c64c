//! AI performance analysis handler.

use serde::Serialize;

use adlens_core::{AnalysisWindow, Dashboard};

use crate::cli::{AnalyzeArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct AnalysisView {
    text: String,
    total_spent: f64,
    total_reach: f64,
    total_impressions: f64,
    total_results: f64,
    cost_per_result: f64,
    ad_set_count: u32,
}

pub async fn handle(
    dashboard: &Dashboard,
    args: AnalyzeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let start = util::parse_date("start", &args.start)?;
    let end = util::parse_date("end", &args.end)?;
    let window = AnalysisWindow::new(start, end, args.ad_set)?;

    let spinner = util::spinner(global.quiet, "Generating analysis...");
    let analysis = dashboard.analyze(&window).await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let analysis = analysis?;

    if !analysis.has_analysis {
        return Err(CliError::NoData);
    }

    let view = AnalysisView {
        text: analysis.text.clone(),
        total_spent: analysis.totals.total_spent,
        total_reach: analysis.totals.total_reach,
        total_impressions: analysis.totals.total_impressions,
        total_results: analysis.totals.total_results,
        cost_per_result: analysis.totals.cost_per_result,
        ad_set_count: analysis.totals.ad_set_count,
    };

    let renderer = output::Renderer::new(global);
    renderer.single(
        &view,
        |v| {
            let totals = renderer
                .details()
                .metric("Spend", v.total_spent)
                .metric("Reach", v.total_reach)
                .metric("Impressions", v.total_impressions)
                .metric("Results", v.total_results)
                .metric("Cost per result", v.cost_per_result)
                .field("Ad sets", v.ad_set_count.to_string())
                .render();
            format!("{}\n\n{totals}", v.text)
        },
        |v| v.text.clone(),
    );
    Ok(())
}
