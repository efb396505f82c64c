//! Dashboard command handlers: summary, watch mode, monthly series,
//! and per-ad-set breakdown.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tabled::Tabled;

use adlens_core::{
    Dashboard, DashboardFilters, DashboardState, Metric, MetricsSnapshot, MONTHS_PER_YEAR,
};

use crate::cli::{DashboardArgs, DashboardCommand, GlobalOpts, WindowArgs};
use crate::error::CliError;
use crate::output;

use super::util;

const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Serializable views ──────────────────────────────────────────────

#[derive(Serialize)]
struct SummaryView {
    total_spend: f64,
    total_reach: f64,
    total_impressions: f64,
    total_results: f64,
    avg_cost_per_result: f64,
    reach_vs_impressions: f64,
    conversion_rate: f64,
    cost_per_mille: f64,
    available_ad_sets: Vec<String>,
    last_upload: Option<String>,
}

impl From<&MetricsSnapshot> for SummaryView {
    fn from(m: &MetricsSnapshot) -> Self {
        Self {
            total_spend: m.total_spend,
            total_reach: m.total_reach,
            total_impressions: m.total_impressions,
            total_results: m.total_results,
            avg_cost_per_result: m.avg_cost_per_result,
            reach_vs_impressions: m.reach_vs_impressions,
            conversion_rate: m.conversion_rate,
            cost_per_mille: m.cost_per_mille,
            available_ad_sets: m.available_ad_sets.clone(),
            last_upload: m.last_upload.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize, Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Reach")]
    reach: String,
    #[tabled(rename = "Impressions")]
    impressions: String,
    #[tabled(rename = "Results")]
    results: String,
}

#[derive(Serialize, Tabled)]
struct AdSetRow {
    #[tabled(rename = "Ad Set")]
    ad_set: String,
    #[tabled(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Reach")]
    reach: String,
    #[tabled(rename = "Impressions")]
    impressions: String,
    #[tabled(rename = "Results")]
    results: String,
    #[tabled(rename = "Cost/Result")]
    cost_per_result: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DashboardCommand::Show(window) => show(dashboard, &window, global).await,
        DashboardCommand::Watch { window, interval } => {
            watch(dashboard, &window, interval, global).await
        }
        DashboardCommand::Monthly { year } => monthly(dashboard, year, global).await,
        DashboardCommand::AdSets => ad_sets(dashboard, global).await,
    }
}

fn parse_window(window: &WindowArgs) -> Result<DashboardFilters, CliError> {
    let start_date = window
        .start
        .as_deref()
        .map(|s| util::parse_date("start", s))
        .transpose()?;
    let end_date = window
        .end
        .as_deref()
        .map(|s| util::parse_date("end", s))
        .transpose()?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            return Err(CliError::Validation {
                field: "date range".into(),
                reason: "start date is after end date".into(),
            });
        }
    }
    Ok(DashboardFilters {
        start_date,
        end_date,
        ad_set: window.ad_set.clone(),
    })
}

/// Load once, then render whatever the store holds. Degraded slices
/// are reported on stderr; the healthy ones still render.
async fn show(
    dashboard: &Dashboard,
    window: &WindowArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filters = parse_window(window)?;

    let spinner = util::spinner(global.quiet, "Loading dashboard...");
    let report = dashboard.load(&filters).await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    for failure in &report.failures {
        eprintln!("warning: {} data unavailable: {}", failure.slice, failure.message);
    }

    let state = dashboard.store().state();
    render_summary(&state, &output::Renderer::new(global))?;
    Ok(())
}

fn render_summary(state: &DashboardState, renderer: &output::Renderer) -> Result<(), CliError> {
    let Some(metrics) = state.metrics.as_deref() else {
        return Err(CliError::NoData);
    };
    if metrics.is_empty() {
        return Err(CliError::NoData);
    }

    let view = SummaryView::from(metrics);
    renderer.single(
        &view,
        |v| summary_detail(v, metrics, renderer),
        |v| format!("{:.2}", v.total_spend),
    );
    Ok(())
}

fn summary_detail(
    view: &SummaryView,
    metrics: &MetricsSnapshot,
    renderer: &output::Renderer,
) -> String {
    let mut block = renderer
        .details()
        .metric("Spend", view.total_spend)
        .metric("Reach", view.total_reach)
        .metric("Impressions", view.total_impressions)
        .metric("Results", view.total_results)
        .metric("Cost per result", view.avg_cost_per_result)
        .percent("Reach vs impressions", view.reach_vs_impressions, 1)
        .percent("Conversion rate", view.conversion_rate, 2)
        .metric("CPM", view.cost_per_mille);
    if !view.available_ad_sets.is_empty() {
        block = block.field("Ad sets", view.available_ad_sets.join(", "));
    }
    if let Some(uploaded) = metrics.last_upload {
        block = block.field("Data uploaded", util::relative_time(uploaded, Utc::now()));
    }
    block.render()
}

/// Poll the summary until Ctrl-C; re-render on every store change.
async fn watch(
    dashboard: &Dashboard,
    window: &WindowArgs,
    interval: Option<u64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filters = parse_window(window)?;
    let period = interval.map_or(dashboard.config().refresh_period, Duration::from_secs);

    let renderer = output::Renderer::new(global);
    let mut state_rx = dashboard.store().subscribe_state();
    let mut errors_rx = dashboard.store().subscribe_errors();
    let handle = dashboard.start_refresh_every(filters, period);

    if !global.quiet {
        eprintln!("Watching dashboard (refresh every {}s, Ctrl-C to stop)", period.as_secs());
    }

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if render_summary(&state, &renderer).is_err() && !global.quiet {
                    eprintln!("(no data yet)");
                }
            }
            changed = errors_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let errors = errors_rx.borrow_and_update().clone();
                for failure in errors.iter() {
                    eprintln!("warning: {} data unavailable: {}", failure.slice, failure.message);
                }
            }
        }
    }

    handle.stopped().await;
    if !global.quiet {
        eprintln!("Stopped");
    }
    Ok(())
}

async fn monthly(
    dashboard: &Dashboard,
    year: Option<i32>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    use chrono::Datelike;

    let filters = DashboardFilters {
        start_date: year.and_then(|y| chrono::NaiveDate::from_ymd_opt(y, 1, 1)),
        ..DashboardFilters::default()
    };
    let report = dashboard.load(&filters).await;
    for failure in &report.failures {
        eprintln!("warning: {} data unavailable: {}", failure.slice, failure.message);
    }

    let state = dashboard.store().state();
    let Some(series) = state.monthly.as_deref() else {
        return Err(CliError::NoData);
    };

    let rows: Vec<MonthRow> = (0..MONTHS_PER_YEAR)
        .map(|i| MonthRow {
            month: MONTH_NAMES[i],
            spend: util::format_metric(series.series(Metric::Spend)[i]),
            reach: util::format_metric(series.series(Metric::Reach)[i]),
            impressions: util::format_metric(series.series(Metric::Impressions)[i]),
            results: util::format_metric(series.series(Metric::Results)[i]),
        })
        .collect();

    let renderer = output::Renderer::new(global);
    let shown = year.unwrap_or_else(|| Utc::now().year());
    renderer.note(&format!("Monthly series for {shown}"));
    renderer.metric_list(&rows, |r| r.month.to_owned());
    Ok(())
}

async fn ad_sets(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let report = dashboard.load(&DashboardFilters::default()).await;
    for failure in &report.failures {
        eprintln!("warning: {} data unavailable: {}", failure.slice, failure.message);
    }

    let state = dashboard.store().state();
    let Some(breakdown) = state.breakdown.as_deref() else {
        return Err(CliError::NoData);
    };

    // Union of ad-set names across metrics, spend order first.
    let mut names: Vec<String> = breakdown.by_metric(Metric::Spend).keys().cloned().collect();
    for metric in [Metric::Reach, Metric::Impressions, Metric::Results] {
        for name in breakdown.by_metric(metric).keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    if names.is_empty() {
        return Err(CliError::NoData);
    }

    let cell = |metric: Metric, name: &str| {
        breakdown
            .by_metric(metric)
            .get(name)
            .map_or_else(|| "-".to_owned(), |v| util::format_metric(*v))
    };
    let rows: Vec<AdSetRow> = names
        .iter()
        .map(|name| AdSetRow {
            ad_set: name.clone(),
            spend: cell(Metric::Spend, name),
            reach: cell(Metric::Reach, name),
            impressions: cell(Metric::Impressions, name),
            results: cell(Metric::Results, name),
            cost_per_result: breakdown
                .cost_per_result()
                .get(name)
                .map_or_else(|| "-".to_owned(), |v| util::format_metric(*v)),
        })
        .collect();

    output::Renderer::new(global).metric_list(&rows, |r| r.ad_set.clone());
    Ok(())
}
