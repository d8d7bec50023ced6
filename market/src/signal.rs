//! Three-window RCI confluence ("mochipoyo" rule).
//!
//! - SELL: short window overbought, mid window inside the configured band,
//!   long window negative.
//! - BUY: the mirror image, with the mid band negated.
//!
//! Classification is memoryless: identical readings and thresholds always
//! give the same answer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rci::rci;
use crate::types::PriceSeries;

pub const SHORT_WINDOW: usize = 9;
pub const MID_WINDOW: usize = 26;
pub const LONG_WINDOW: usize = 52;

/// Fewest points that make every window defined.
pub const MIN_POINTS: usize = LONG_WINDOW;

/// Trigger bounds, loaded once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// Short-window trigger; SELL above it, BUY below its negation.
    #[serde(rename = "rci9")]
    pub rci_high: f64,

    /// Lower edge of the inclusive mid-window band (SELL side).
    #[serde(rename = "rci26_min")]
    pub rci_mid_low: f64,

    /// Upper edge of the inclusive mid-window band (SELL side).
    #[serde(rename = "rci26_max")]
    pub rci_mid_high: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            rci_high: 80.0,
            rci_mid_low: -80.0,
            rci_mid_high: 0.0,
        }
    }
}

/// RCI values for the three windows; `None` where the series was too short.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RciReadings {
    pub rci9: Option<f64>,
    pub rci26: Option<f64>,
    pub rci52: Option<f64>,
}

impl RciReadings {
    pub fn new(rci9: Option<f64>, rci26: Option<f64>, rci52: Option<f64>) -> Self {
        Self { rci9, rci26, rci52 }
    }

    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            rci9: rci(series, SHORT_WINDOW),
            rci26: rci(series, MID_WINDOW),
            rci52: rci(series, LONG_WINDOW),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    None,
}

impl SignalKind {
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::None => "NONE",
        })
    }
}

/// Applies the confluence rule. Any undefined reading yields `SignalKind::None`.
pub fn classify(readings: &RciReadings, t: &ThresholdSet) -> SignalKind {
    let (Some(r9), Some(r26), Some(r52)) = (readings.rci9, readings.rci26, readings.rci52) else {
        return SignalKind::None;
    };

    if r9 > t.rci_high && (t.rci_mid_low..=t.rci_mid_high).contains(&r26) && r52 < 0.0 {
        return SignalKind::Sell;
    }

    if r9 < -t.rci_high && (-t.rci_mid_high..=-t.rci_mid_low).contains(&r26) && r52 > 0.0 {
        return SignalKind::Buy;
    }

    SignalKind::None
}

/// A detected BUY/SELL for one instrument in one scan pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub instrument: String,
    pub kind: SignalKind,
    pub last_close: f64,
    pub detected_at: DateTime<Utc>,
}

impl Signal {
    /// Push-message body sent to the notification sink.
    pub fn message(&self) -> String {
        format!(
            "📈 {} でモチポヨシグナル！\n種別: {}\n価格: {}",
            self.instrument, self.kind, self.last_close
        )
    }
}
