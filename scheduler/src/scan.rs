//! One scan pass over every configured instrument.
//!
//! Per instrument, in configuration order:
//!   1. Fetch a price series from the `PriceSource`.
//!   2. Skip on fetch failure or fewer than `MIN_POINTS` closes.
//!   3. Compute RCI for the three windows and classify.
//!   4. On BUY/SELL, push the signal through the `Notifier`.
//!
//! Failures are contained to the instrument that produced them; a pass
//! always visits every instrument and never returns an error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{Instrument as _, debug, error, field, info, warn};

use common::logger::{TraceId, child_span, root_span, warn_if_slow};
use market::signal::{MIN_POINTS, RciReadings, Signal, classify};
use market::source::PriceSource;
use market::types::Instrument;

use crate::notify::Notifier;
use crate::types::ScanConfig;

const SLOW_FETCH: Duration = Duration::from_secs(5);

/// Why an instrument produced nothing in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FetchFailed(String),
    Undersized { points: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed(e) => write!(f, "fetch failed: {e}"),
            Self::Undersized { points } => {
                write!(f, "undersized series: {points} < {MIN_POINTS} points")
            }
        }
    }
}

pub struct Scanner {
    cfg: Arc<ScanConfig>,
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
}

impl Scanner {
    pub fn new(
        cfg: Arc<ScanConfig>,
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cfg,
            source,
            notifier,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.cfg
    }

    /// Runs one full pass and returns the signals it detected.
    ///
    /// A signal is returned whether or not its notification was delivered.
    pub async fn scan_once(&self) -> Vec<Signal> {
        let trace_id = TraceId::new();
        let span = root_span("scan_pass", &trace_id);

        async {
            let mut signals = Vec::new();

            for instrument in &self.cfg.instruments {
                if let Some(signal) = self.scan_instrument(instrument).await {
                    signals.push(signal);
                }
            }

            info!(
                instruments = self.cfg.instruments.len(),
                signals = signals.len(),
                "scan pass complete"
            );

            signals
        }
        .instrument(span)
        .await
    }

    async fn scan_instrument(&self, instrument: &Instrument) -> Option<Signal> {
        let span = child_span("instrument");
        span.record("instrument", field::display(&instrument.name));

        async {
            let series = match warn_if_slow(
                "price_fetch",
                SLOW_FETCH,
                self.source
                    .fetch(&instrument.ticker, self.cfg.granularity, self.cfg.lookback),
            )
            .await
            {
                Ok(series) if series.len() >= MIN_POINTS => series,
                Ok(series) => {
                    let reason = SkipReason::Undersized {
                        points: series.len(),
                    };
                    warn!(ticker = %instrument.ticker, %reason, "skipping instrument");
                    return None;
                }
                Err(e) => {
                    let reason = SkipReason::FetchFailed(e.to_string());
                    warn!(ticker = %instrument.ticker, %reason, "skipping instrument");
                    return None;
                }
            };

            let readings = RciReadings::from_series(&series);
            let kind = classify(&readings, &self.cfg.thresholds);

            debug!(
                rci9 = ?readings.rci9,
                rci26 = ?readings.rci26,
                rci52 = ?readings.rci52,
                %kind,
                "instrument classified"
            );

            if !kind.is_actionable() {
                info!("no signal");
                return None;
            }

            let last = series.last()?;
            let signal = Signal {
                instrument: instrument.name.clone(),
                kind,
                last_close: last.close,
                detected_at: Utc::now(),
            };

            info!(%kind, last_close = signal.last_close, "signal detected");

            self.deliver(&signal).await;

            Some(signal)
        }
        .instrument(span)
        .await
    }

    async fn deliver(&self, signal: &Signal) {
        match self
            .notifier
            .push(&self.cfg.recipient, &signal.message())
            .await
        {
            Ok(outcome) if outcome.is_success() => {
                info!(status = outcome.status, "signal delivered");
            }
            Ok(outcome) => {
                warn!(status = outcome.status, "notifier rejected signal");
            }
            Err(e) => {
                error!(error = %e, "signal delivery failed");
            }
        }
    }
}
