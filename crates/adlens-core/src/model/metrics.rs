//! Campaign metric aggregates: summary snapshot, monthly series, and
//! per-ad-set breakdown.

use adlens_api::{BreakdownResponse, MonthlyResponse, SummaryResponse};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use strum::{Display, EnumIter};

/// Months in a reporting year. Monthly series are always this long.
pub const MONTHS_PER_YEAR: usize = 12;

/// The four base campaign metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    Spend,
    Reach,
    Impressions,
    Results,
}

// ── Summary snapshot ─────────────────────────────────────────────────

/// Aggregate campaign metrics for one filter window.
///
/// Derived ratios are taken as the service computed them, not
/// recomputed locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub total_spend: f64,
    pub total_reach: f64,
    pub total_impressions: f64,
    pub total_results: f64,

    pub avg_cost_per_result: f64,
    pub reach_vs_impressions: f64,
    pub conversion_rate: f64,
    pub cost_per_mille: f64,

    pub daily_budget_per_ad_set: IndexMap<String, f64>,
    pub spend_per_ad_set: IndexMap<String, f64>,

    /// Every ad set known to the service, independent of the filter.
    pub available_ad_sets: Vec<String>,

    /// Echo of the window the service actually applied.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub selected_ad_set: Option<String>,

    pub last_upload: Option<DateTime<Utc>>,
}

impl MetricsSnapshot {
    pub fn metric_total(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Spend => self.total_spend,
            Metric::Reach => self.total_reach,
            Metric::Impressions => self.total_impressions,
            Metric::Results => self.total_results,
        }
    }

    /// True when the service answered but carried no campaign data at
    /// all, so callers can show "no data" instead of a wall of zeros.
    pub fn is_empty(&self) -> bool {
        self.total_spend == 0.0
            && self.total_reach == 0.0
            && self.total_impressions == 0.0
            && self.total_results == 0.0
            && self.spend_per_ad_set.is_empty()
            && self.available_ad_sets.is_empty()
    }
}

impl From<SummaryResponse> for MetricsSnapshot {
    fn from(raw: SummaryResponse) -> Self {
        Self {
            total_spend: raw.total_spend,
            total_reach: raw.total_reach,
            total_impressions: raw.total_impressions,
            total_results: raw.total_results,
            avg_cost_per_result: raw.avg_cost_per_result,
            reach_vs_impressions: raw.reach_vs_impressions,
            conversion_rate: raw.conversion_rate,
            cost_per_mille: raw.cost_per_mille,
            daily_budget_per_ad_set: raw.daily_budget_per_ad_set,
            spend_per_ad_set: raw.spend_per_ad_set,
            available_ad_sets: raw.available_ad_sets,
            start_date: raw.start_date.as_deref().and_then(parse_date),
            end_date: raw.end_date.as_deref().and_then(parse_date),
            selected_ad_set: raw.selected_ad_set,
            last_upload: raw.last_upload.as_deref().and_then(parse_timestamp),
        }
    }
}

// ── Monthly series ───────────────────────────────────────────────────

/// Twelve-month series per metric, index 0 = January.
///
/// The wire arrays come in whatever length the service produced;
/// conversion pads with zeros or truncates so every series is exactly
/// [`MONTHS_PER_YEAR`] long.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    spend: [f64; MONTHS_PER_YEAR],
    reach: [f64; MONTHS_PER_YEAR],
    impressions: [f64; MONTHS_PER_YEAR],
    results: [f64; MONTHS_PER_YEAR],
}

impl MonthlySeries {
    pub fn series(&self, metric: Metric) -> &[f64; MONTHS_PER_YEAR] {
        match metric {
            Metric::Spend => &self.spend,
            Metric::Reach => &self.reach,
            Metric::Impressions => &self.impressions,
            Metric::Results => &self.results,
        }
    }

    pub fn annual_total(&self, metric: Metric) -> f64 {
        self.series(metric).iter().sum()
    }
}

impl From<MonthlyResponse> for MonthlySeries {
    fn from(raw: MonthlyResponse) -> Self {
        Self {
            spend: normalize_months(&raw.spend),
            reach: normalize_months(&raw.reach),
            impressions: normalize_months(&raw.impressions),
            results: normalize_months(&raw.results),
        }
    }
}

fn normalize_months(values: &[f64]) -> [f64; MONTHS_PER_YEAR] {
    let mut months = [0.0; MONTHS_PER_YEAR];
    for (slot, value) in months.iter_mut().zip(values) {
        *slot = *value;
    }
    months
}

// ── Per-ad-set breakdown ─────────────────────────────────────────────

/// Per-ad-set value maps, one per metric plus cost-per-result.
///
/// Key sets may differ between metrics; callers must not assume every
/// ad set appears in every map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentBreakdown {
    spend: IndexMap<String, f64>,
    reach: IndexMap<String, f64>,
    impressions: IndexMap<String, f64>,
    results: IndexMap<String, f64>,
    cost_per_result: IndexMap<String, f64>,
}

impl SegmentBreakdown {
    pub fn by_metric(&self, metric: Metric) -> &IndexMap<String, f64> {
        match metric {
            Metric::Spend => &self.spend,
            Metric::Reach => &self.reach,
            Metric::Impressions => &self.impressions,
            Metric::Results => &self.results,
        }
    }

    pub fn cost_per_result(&self) -> &IndexMap<String, f64> {
        &self.cost_per_result
    }

    /// Sum across ad sets for one metric.
    pub fn total(&self, metric: Metric) -> f64 {
        self.by_metric(metric).values().sum()
    }
}

impl From<BreakdownResponse> for SegmentBreakdown {
    fn from(raw: BreakdownResponse) -> Self {
        Self {
            spend: raw.spend,
            reach: raw.reach,
            impressions: raw.impressions,
            results: raw.results,
            cost_per_result: raw.cost_per_result,
        }
    }
}

// ── Date parsing ─────────────────────────────────────────────────────

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Lenient timestamp parse: RFC 3339 first, then a date-only fallback.
/// Unparseable values become `None` rather than an error.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_pads_with_zeros() {
        let raw = MonthlyResponse {
            spend: vec![10.0, 20.0, 30.0],
            ..MonthlyResponse::default()
        };
        let series = MonthlySeries::from(raw);
        let spend = series.series(Metric::Spend);
        assert_eq!(spend[..3], [10.0, 20.0, 30.0]);
        assert_eq!(spend[3..], [0.0; 9]);
        assert_eq!(series.series(Metric::Reach), &[0.0; MONTHS_PER_YEAR]);
    }

    #[test]
    fn long_series_truncates_to_twelve() {
        let raw = MonthlyResponse {
            reach: (1..=14).map(f64::from).collect(),
            ..MonthlyResponse::default()
        };
        let series = MonthlySeries::from(raw);
        let reach = series.series(Metric::Reach);
        assert_eq!(reach[0], 1.0);
        assert_eq!(reach[11], 12.0);
    }

    #[test]
    fn breakdown_keys_stay_independent() {
        let mut spend = IndexMap::new();
        spend.insert("Promo A".to_owned(), 120.0);
        spend.insert("Promo B".to_owned(), 80.0);
        let mut reach = IndexMap::new();
        reach.insert("Promo A".to_owned(), 5000.0);

        let breakdown = SegmentBreakdown::from(BreakdownResponse {
            spend,
            reach,
            ..BreakdownResponse::default()
        });
        assert_eq!(breakdown.by_metric(Metric::Spend).len(), 2);
        assert_eq!(breakdown.by_metric(Metric::Reach).len(), 1);
        assert_eq!(breakdown.total(Metric::Spend), 200.0);
    }

    #[test]
    fn empty_snapshot_detection() {
        assert!(MetricsSnapshot::default().is_empty());

        let populated = MetricsSnapshot {
            total_spend: 12.5,
            ..MetricsSnapshot::default()
        };
        assert!(!populated.is_empty());
    }

    #[test]
    fn timestamp_parsing_is_lenient() {
        assert!(parse_timestamp("2026-03-14T09:26:53Z").is_some());
        assert!(parse_timestamp("2026-03-14").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
