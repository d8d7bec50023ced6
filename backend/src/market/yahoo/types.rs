//! Subset of the v8 chart response that carries closes.
//!
//! ```json
//! { "chart": {
//!     "result": [{ "timestamp": [..], "indicators": { "quote": [{ "close": [..] }] } }],
//!     "error": null } }
//! ```

use chrono::DateTime;
use serde::Deserialize;

use market::types::{PricePoint, PriceSeries};

use super::errors::YahooError;

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Absent when the market had no bars in the requested range.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    /// `null` for bars without a trade.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartEnvelope {
    /// Pairs timestamps with closes, dropping bars without a close.
    pub fn into_series(self) -> Result<PriceSeries, YahooError> {
        if let Some(err) = self.chart.error {
            return Err(YahooError::Api {
                code: err.code,
                description: err.description,
            });
        }

        let Some(result) = self.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(PriceSeries::default());
        };

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        if !closes.is_empty() && closes.len() != result.timestamp.len() {
            return Err(YahooError::InvalidResponse(format!(
                "{} timestamps but {} closes",
                result.timestamp.len(),
                closes.len()
            )));
        }

        let points = result
            .timestamp
            .into_iter()
            .zip(closes)
            .filter_map(|(ts, close)| {
                let ts = DateTime::from_timestamp(ts, 0)?;
                Some(PricePoint::new(ts, close?))
            })
            .collect();

        Ok(PriceSeries::new(points))
    }
}
