//! Concurrent dashboard fetch with all-or-fallback degradation.
//!
//! A load issues the three dashboard requests concurrently. When all
//! three succeed the store is updated in one atomic bundle. When any
//! fails, the load falls back to three independent requests so the
//! healthy slices still land, and the failures are recorded per slice.
//!
//! Loads carry a monotonic ticket; a load that settles after a newer
//! load has already applied is dropped instead of overwriting fresher
//! data.

use std::sync::atomic::{AtomicU64, Ordering};

use adlens_api::ApiClient;
use tracing::{debug, warn};

use crate::model::DashboardFilters;
use crate::store::{DashboardStore, DataSlice, SliceError};

/// Outcome of one load: empty means every slice is fresh.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub failures: Vec<SliceError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives dashboard loads against the gateway and applies results to
/// the store.
#[derive(Debug)]
pub struct FetchOrchestrator {
    api: ApiClient,
    store: DashboardStore,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl FetchOrchestrator {
    pub fn new(api: ApiClient, store: DashboardStore) -> Self {
        Self {
            api,
            store,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    /// Fetch all three dashboard slices for the given window.
    ///
    /// Always settles: the report lists any slices that could not be
    /// refreshed, and the busy flag is cleared when the latest-issued
    /// load (this one or a newer one) finishes.
    pub async fn load_all(&self, filters: &DashboardFilters) -> LoadReport {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.set_busy(true);
        debug!(ticket, ?filters, "dashboard load started");

        let query = filters.to_query();
        let year = filters.report_year();

        let (summary, monthly, breakdown) = tokio::join!(
            self.api.metrics_summary(&query),
            self.api.monthly_series(Some(year)),
            self.api.ad_set_breakdown(),
        );

        let report = match (summary, monthly, breakdown) {
            (Ok(summary), Ok(monthly), Ok(breakdown)) => {
                if self.claim(ticket) {
                    self.store
                        .apply_bundle(summary.into(), monthly.into(), breakdown.into());
                } else {
                    debug!(ticket, "dropping stale combined result");
                }
                LoadReport::default()
            }
            (summary, monthly, breakdown) => {
                warn!(ticket, "combined load failed, retrying slices independently");
                // Results from the failed batch are discarded wholesale;
                // each slice gets a fresh, independent request.
                drop((summary, monthly, breakdown));
                self.load_degraded(ticket, filters).await
            }
        };

        if self.issued.load(Ordering::SeqCst) == ticket {
            self.store.set_busy(false);
        }
        report
    }

    /// Degraded path: three decoupled requests, each applying or
    /// failing on its own.
    async fn load_degraded(&self, ticket: u64, filters: &DashboardFilters) -> LoadReport {
        let query = filters.to_query();
        let year = filters.report_year();

        let (summary, monthly, breakdown) = tokio::join!(
            self.api.metrics_summary(&query),
            self.api.monthly_series(Some(year)),
            self.api.ad_set_breakdown(),
        );

        let stale = !self.claim(ticket);
        let mut failures = Vec::new();

        match summary {
            Ok(value) if !stale => self.store.apply_metrics(value.into()),
            Ok(_) => {}
            Err(err) => failures.push(SliceError::from_api(DataSlice::Summary, &err)),
        }
        match monthly {
            Ok(value) if !stale => self.store.apply_monthly(value.into()),
            Ok(_) => {}
            Err(err) => failures.push(SliceError::from_api(DataSlice::Monthly, &err)),
        }
        match breakdown {
            Ok(value) if !stale => self.store.apply_breakdown(value.into()),
            Ok(_) => {}
            Err(err) => failures.push(SliceError::from_api(DataSlice::Breakdown, &err)),
        }

        for failure in &failures {
            warn!(slice = %failure.slice, %failure.message, "slice load failed");
        }
        if !stale {
            self.store.record_slice_errors(failures.clone());
        }
        LoadReport { failures }
    }

    /// True when this ticket may still write to the store: no newer
    /// load has applied yet. Records the ticket as applied.
    fn claim(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) <= ticket
    }
}
