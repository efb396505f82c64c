//! Lifecycle-bound periodic refresh.
//!
//! One cycle callback runs immediately on start and then on a fixed
//! cadence until the handle is stopped or dropped. Cycles never
//! overlap: a slow cycle delays the next tick rather than stacking.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::model::DashboardFilters;
use crate::orchestrator::FetchOrchestrator;

/// Default refresh cadence.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(5);

/// Owning handle to a refresh loop. Dropping it stops the loop, so a
/// forgotten handle cannot leave a poll running in the background.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Signal the loop to stop. In-flight work is abandoned at the
    /// next await point.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop and wait for the loop to fully wind down.
    pub async fn stopped(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Run `cycle` immediately, then every `period`, until stopped.
pub fn spawn_refresh<F, Fut>(period: Duration, mut cycle: F) -> RefreshHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // A cycle that overruns the period must not trigger a burst of
        // catch-up ticks afterwards.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                () = task_cancel.cancelled() => break,
                _ = interval.tick() => cycle().await,
            }
        }
        debug!("refresh loop stopped");
    });
    RefreshHandle {
        cancel,
        task: Some(task),
    }
}

impl FetchOrchestrator {
    /// Keep the dashboard fresh for `filters` on a fixed cadence.
    /// The first load starts immediately.
    pub fn start_refresh(
        self: &Arc<Self>,
        filters: DashboardFilters,
        period: Duration,
    ) -> RefreshHandle {
        let orchestrator = Arc::clone(self);
        spawn_refresh(period, move || {
            let orchestrator = Arc::clone(&orchestrator);
            let filters = filters.clone();
            async move {
                let report = orchestrator.load_all(&filters).await;
                if !report.is_complete() {
                    debug!(failures = report.failures.len(), "refresh cycle degraded");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn first_cycle_runs_immediately() {
        let count = Arc::new(AtomicU32::new(0));
        let cycles = Arc::clone(&count);
        let handle = spawn_refresh(Duration::from_secs(5), move || {
            let cycles = Arc::clone(&cycles);
            async move {
                cycles.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        handle.stopped().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_follow_the_cadence() {
        let count = Arc::new(AtomicU32::new(0));
        let cycles = Arc::clone(&count);
        let handle = spawn_refresh(Duration::from_secs(5), move || {
            let cycles = Arc::clone(&cycles);
            async move {
                cycles.fetch_add(1, Ordering::SeqCst);
            }
        });

        // Immediate + two ticks.
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        handle.stopped().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_further_cycles() {
        let count = Arc::new(AtomicU32::new(0));
        let cycles = Arc::clone(&count);
        let handle = spawn_refresh(Duration::from_secs(5), move || {
            let cycles = Arc::clone(&cycles);
            async move {
                cycles.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(6)).await;
        let before = count.load(Ordering::SeqCst);
        assert_eq!(before, 2);

        handle.stopped().await;
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_loop() {
        let count = Arc::new(AtomicU32::new(0));
        let cycles = Arc::clone(&count);
        let handle = spawn_refresh(Duration::from_secs(5), move || {
            let cycles = Arc::clone(&cycles);
            async move {
                cycles.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
