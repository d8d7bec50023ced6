//! Shared types used by the scheduler subsystem.

use std::time::Duration;

use market::signal::ThresholdSet;
use market::types::{Granularity, Instrument, Lookback};

/// Pause between two scan passes in continuous mode.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Everything one scan pass needs. Loaded once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Visited in this order on every pass.
    pub instruments: Vec<Instrument>,

    pub thresholds: ThresholdSet,

    /// Bar size requested from the price source.
    pub granularity: Granularity,

    /// History requested from the price source; must cover the longest window.
    pub lookback: Lookback,

    /// Sleep after each completed pass (continuous mode only).
    pub poll_interval: Duration,

    /// Who receives signal notifications.
    pub recipient: String,
}

impl ScanConfig {
    pub fn new(instruments: Vec<Instrument>, thresholds: ThresholdSet, recipient: String) -> Self {
        Self {
            instruments,
            thresholds,
            granularity: Granularity::default(),
            lookback: Lookback::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            recipient,
        }
    }
}

/// Execution mode, fixed for the lifetime of a `Scheduler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    /// One pass, then `Done`.
    OneShot,
    /// Pass, sleep, pass, ... until the task is dropped.
    Continuous,
}
