//! Lazy, start-once launch of the background scheduler.
//!
//! The job is parked in a mutex-guarded `Option` and taken out by the first
//! caller. Taking is the check-and-set: concurrent callers serialize on the
//! lock and only one of them can ever observe `Some`.

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, warn};

use crate::engine::Scheduler;

pub struct BootstrapTrigger {
    pending: Mutex<Option<BoxFuture<'static, ()>>>,
}

impl BootstrapTrigger {
    /// Parks `scheduler` until the first event arrives.
    pub fn new(scheduler: Scheduler) -> Self {
        Self::from_job(async move {
            let passes = scheduler.run().await;
            warn!(passes, "background scheduler returned");
        })
    }

    /// Parks an arbitrary job. Used by `new` and by tests.
    pub fn from_job<F>(job: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            pending: Mutex::new(Some(job.boxed())),
        }
    }

    pub fn has_started(&self) -> bool {
        self.pending.lock().is_none()
    }

    /// Launches the parked job on the first call; later calls are no-ops.
    ///
    /// Returns `true` only for the call that performed the launch. Must be
    /// called from within a tokio runtime.
    pub fn on_first_event(&self) -> bool {
        // Lock is released before spawning.
        let Some(job) = self.pending.lock().take() else {
            return false;
        };

        // The scheduler outlives the triggering request, so its span is a root.
        let handle = tokio::spawn(job.instrument(info_span!(parent: None, "background_scheduler")));
        tokio::spawn(supervise(handle).in_current_span());

        info!("background scheduler launched");
        true
    }
}

/// Joins the background task so a panic is logged instead of lost.
async fn supervise(handle: JoinHandle<()>) {
    match handle.await {
        Ok(()) => info!("background scheduler finished"),
        Err(e) if e.is_panic() => error!(error = %e, "background scheduler panicked"),
        Err(e) => warn!(error = %e, "background scheduler cancelled"),
    }
}
