//! The scheduler drives the scanner in one of two fixed modes.
//!
//! - OneShot:    one `scan_once`, then `Done`. No sleep.
//! - Continuous: `scan_once`, sleep `poll_interval`, repeat forever.
//!
//! Continuous mode has no exit of its own; it ends when the owning task is
//! aborted or the process shuts down.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::scan::Scanner;
use crate::state::SchedulerPhase;
use crate::types::ScheduleMode;

pub struct Scheduler {
    scanner: Scanner,
    mode: ScheduleMode,
    interval: Duration,
    phase_tx: watch::Sender<SchedulerPhase>,
}

impl Scheduler {
    pub fn new(scanner: Scanner, mode: ScheduleMode) -> Self {
        let interval = scanner.config().poll_interval;
        let (phase_tx, _) = watch::channel(SchedulerPhase::Idle);

        Self {
            scanner,
            mode,
            interval,
            phase_tx,
        }
    }

    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    /// Observe phase transitions. Receivers stay valid after `run` returns.
    pub fn subscribe(&self) -> watch::Receiver<SchedulerPhase> {
        self.phase_tx.subscribe()
    }

    /// Runs according to the configured mode.
    ///
    /// Returns the number of completed passes. Continuous mode never returns.
    pub async fn run(self) -> u64 {
        info!(
            mode = ?self.mode,
            interval_s = self.interval.as_secs(),
            instruments = self.scanner.config().instruments.len(),
            "scheduler started"
        );

        match self.mode {
            ScheduleMode::OneShot => self.run_once().await,
            ScheduleMode::Continuous => self.run_forever().await,
        }
    }

    async fn run_once(self) -> u64 {
        self.set_phase(SchedulerPhase::Running);
        let signals = self.scanner.scan_once().await;
        self.set_phase(SchedulerPhase::Done);

        info!(signals = signals.len(), "one-shot scan finished");
        1
    }

    async fn run_forever(self) -> u64 {
        let mut passes: u64 = 0;

        loop {
            self.set_phase(SchedulerPhase::Running);
            let signals = self.scanner.scan_once().await;
            passes += 1;

            debug!(pass = passes, signals = signals.len(), "pass finished; sleeping");

            self.set_phase(SchedulerPhase::Sleeping);
            tokio::time::sleep(self.interval).await;
        }
    }

    fn set_phase(&self, phase: SchedulerPhase) {
        // send_replace never fails, even with no receivers.
        let prev = self.phase_tx.send_replace(phase);
        debug!(from = %prev, to = %phase, "scheduler phase");
    }
}
