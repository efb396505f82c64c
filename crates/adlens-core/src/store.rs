//! Reactive dashboard store.
//!
//! All dashboard state lives behind [`tokio::sync::watch`] channels so
//! consumers (CLI watch mode, tests) observe changes without polling
//! the store itself. The three chart slices share ONE channel: a
//! combined fetch replaces them in a single send, so no observer can
//! see a half-applied snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::error::FailureKind;
use crate::model::{MetricsSnapshot, MonthlySeries, SegmentBreakdown, UserRecord};

// ── State types ──────────────────────────────────────────────────────

/// The three chart slices. `None` means never loaded (or wiped by a
/// failed slice in degraded mode, which keeps the previous value -- a
/// slice only transitions back to `None` on [`DashboardStore::clear`]).
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub metrics: Option<Arc<MetricsSnapshot>>,
    pub monthly: Option<Arc<MonthlySeries>>,
    pub breakdown: Option<Arc<SegmentBreakdown>>,
}

impl DashboardState {
    pub fn is_loaded(&self) -> bool {
        self.metrics.is_some() && self.monthly.is_some() && self.breakdown.is_some()
    }
}

/// Which fetch produced (or failed to produce) a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DataSlice {
    Summary,
    Monthly,
    Breakdown,
}

/// One failed slice from a degraded load.
#[derive(Debug, Clone)]
pub struct SliceError {
    pub slice: DataSlice,
    pub kind: FailureKind,
    pub message: String,
}

impl SliceError {
    pub(crate) fn from_api(slice: DataSlice, err: &adlens_api::Error) -> Self {
        Self {
            slice,
            kind: FailureKind::from(err),
            message: err.to_string(),
        }
    }
}

// ── Store ────────────────────────────────────────────────────────────

/// Shared, clonable handle to the dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: watch::Sender<DashboardState>,
    users: watch::Sender<Arc<Vec<Arc<UserRecord>>>>,
    busy: watch::Sender<bool>,
    errors: watch::Sender<Arc<Vec<SliceError>>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: watch::Sender::new(DashboardState::default()),
                users: watch::Sender::new(Arc::new(Vec::new())),
                busy: watch::Sender::new(false),
                errors: watch::Sender::new(Arc::new(Vec::new())),
                last_refresh: watch::Sender::new(None),
            }),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_state(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_users(&self) -> watch::Receiver<Arc<Vec<Arc<UserRecord>>>> {
        self.inner.users.subscribe()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.inner.busy.subscribe()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Arc<Vec<SliceError>>> {
        self.inner.errors.subscribe()
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn users(&self) -> Arc<Vec<Arc<UserRecord>>> {
        self.inner.users.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        *self.inner.busy.borrow()
    }

    pub fn errors(&self) -> Arc<Vec<SliceError>> {
        self.inner.errors.borrow().clone()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_refresh.borrow()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    pub(crate) fn set_busy(&self, busy: bool) {
        self.inner.busy.send_replace(busy);
    }

    /// Replace all three slices in one notification.
    pub(crate) fn apply_bundle(
        &self,
        metrics: MetricsSnapshot,
        monthly: MonthlySeries,
        breakdown: SegmentBreakdown,
    ) {
        self.inner.state.send_modify(|state| {
            state.metrics = Some(Arc::new(metrics));
            state.monthly = Some(Arc::new(monthly));
            state.breakdown = Some(Arc::new(breakdown));
        });
        self.inner.errors.send_replace(Arc::new(Vec::new()));
        self.inner.last_refresh.send_replace(Some(Utc::now()));
        debug!("applied combined dashboard snapshot");
    }

    pub(crate) fn apply_metrics(&self, metrics: MetricsSnapshot) {
        self.inner
            .state
            .send_modify(|state| state.metrics = Some(Arc::new(metrics)));
    }

    pub(crate) fn apply_monthly(&self, monthly: MonthlySeries) {
        self.inner
            .state
            .send_modify(|state| state.monthly = Some(Arc::new(monthly)));
    }

    pub(crate) fn apply_breakdown(&self, breakdown: SegmentBreakdown) {
        self.inner
            .state
            .send_modify(|state| state.breakdown = Some(Arc::new(breakdown)));
    }

    /// Record the per-slice outcome of a degraded load. Called once
    /// per settled load, so the refresh timestamp advances whether
    /// the retries recovered everything or not.
    pub(crate) fn record_slice_errors(&self, errors: Vec<SliceError>) {
        self.inner.last_refresh.send_replace(Some(Utc::now()));
        self.inner.errors.send_replace(Arc::new(errors));
    }

    /// Replace the user collection wholesale. Per-record identity is
    /// not tracked; every refresh swaps the whole list.
    pub(crate) fn replace_users(&self, users: Vec<UserRecord>) {
        let users: Vec<Arc<UserRecord>> = users.into_iter().map(Arc::new).collect();
        debug!(count = users.len(), "replacing user collection");
        self.inner.users.send_replace(Arc::new(users));
    }

    /// Drop all held state, e.g. on logout.
    pub fn clear(&self) {
        self.inner.state.send_replace(DashboardState::default());
        self.inner.users.send_replace(Arc::new(Vec::new()));
        self.inner.errors.send_replace(Arc::new(Vec::new()));
        self.inner.last_refresh.send_replace(None);
        self.inner.busy.send_replace(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_apply_is_one_notification() {
        let store = DashboardStore::new();
        let mut rx = store.subscribe_state();
        assert!(!rx.borrow().is_loaded());

        store.apply_bundle(
            MetricsSnapshot::default(),
            MonthlySeries::default(),
            SegmentBreakdown::default(),
        );

        assert!(rx.has_changed().unwrap_or(false));
        let state = rx.borrow_and_update();
        // All three slices arrived together.
        assert!(state.is_loaded());
        drop(state);
        assert!(!rx.has_changed().unwrap_or(true));
    }

    #[test]
    fn slice_apply_keeps_other_slices() {
        let store = DashboardStore::new();
        store.apply_bundle(
            MetricsSnapshot::default(),
            MonthlySeries::default(),
            SegmentBreakdown::default(),
        );

        let fresh = MetricsSnapshot {
            total_spend: 99.0,
            ..MetricsSnapshot::default()
        };
        store.apply_metrics(fresh);

        let state = store.state();
        assert!(state.monthly.is_some());
        assert!(state.breakdown.is_some());
        assert_eq!(state.metrics.as_deref().map(|m| m.total_spend), Some(99.0));
    }

    #[test]
    fn recovered_degraded_load_advances_refresh_timestamp() {
        let store = DashboardStore::new();
        assert!(store.last_refresh().is_none());

        // All retries succeeded, so there are no errors to record,
        // but the data is fresh and the timestamp must say so.
        store.record_slice_errors(Vec::new());
        assert!(store.last_refresh().is_some());
        assert!(store.errors().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let store = DashboardStore::new();
        store.apply_bundle(
            MetricsSnapshot::default(),
            MonthlySeries::default(),
            SegmentBreakdown::default(),
        );
        store.set_busy(true);
        store.clear();

        assert!(!store.state().is_loaded());
        assert!(!store.is_busy());
        assert!(store.last_refresh().is_none());
    }
}
