//! Readiness gate for render surfaces that initialize asynchronously.
//!
//! Data can arrive before the surface that displays it exists. The
//! gate holds the latest pending update and retries delivery on a
//! fixed cadence until the surface accepts it. Only one update is ever
//! pending: a newer one replaces the old, so there is exactly one
//! retry timer no matter how many updates raced in.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Delay between delivery attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(300);

/// A sink that may not be ready yet.
pub trait RenderSurface<U>: Send + Sync + 'static {
    /// Try to apply `update`. Returns `false` while the surface is not
    /// yet initialized; `true` once the update has been applied.
    fn try_apply(&self, update: &U) -> bool;
}

impl<U, S> RenderSurface<U> for std::sync::Arc<S>
where
    S: RenderSurface<U>,
{
    fn try_apply(&self, update: &U) -> bool {
        (**self).try_apply(update)
    }
}

/// Handle to a running readiness gate.
#[derive(Debug)]
pub struct ReadinessGate<U> {
    pending: watch::Sender<Option<U>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<U> ReadinessGate<U>
where
    U: Clone + Send + Sync + 'static,
{
    /// Spawn the delivery task. The gate stops when `parent` is
    /// cancelled or the handle is dropped.
    pub fn spawn<S>(surface: S, parent: &CancellationToken) -> Self
    where
        S: RenderSurface<U>,
    {
        let cancel = parent.child_token();
        let pending = watch::Sender::new(None::<U>);
        let task = tokio::spawn(deliver_task(surface, pending.subscribe(), cancel.clone()));
        Self {
            pending,
            cancel,
            task: Some(task),
        }
    }

    /// Queue `update` for delivery, replacing any update still waiting.
    pub fn apply_when_ready(&self, update: U) {
        self.pending.send_replace(Some(update));
    }

    /// Cancel and wait for the delivery task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<U> Drop for ReadinessGate<U> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn deliver_task<U, S>(
    surface: S,
    mut pending: watch::Receiver<Option<U>>,
    cancel: CancellationToken,
) where
    U: Clone + Send + Sync + 'static,
    S: RenderSurface<U>,
{
    loop {
        // Wait for something to deliver.
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            changed = pending.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }

        // Attempt immediately, then at RETRY_DELAY cadence. A newer
        // pending update short-circuits the wait and is picked up by
        // the next borrow.
        let mut attempts = 0u32;
        loop {
            let Some(update) = pending.borrow_and_update().clone() else {
                break;
            };
            attempts += 1;
            if surface.try_apply(&update) {
                debug!(attempts, "update delivered to surface");
                break;
            }
            trace!(attempts, "surface not ready, retrying");
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                changed = pending.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                () = tokio::time::sleep(RETRY_DELAY) => {}
            }
        }
    }
}
