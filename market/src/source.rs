use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Granularity, Lookback, PriceSeries};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("provider rejected request: {0}")]
    Rejected(String),
}

/// Market-data provider seam.
///
/// Implementations may return an empty or undersized series at any time;
/// callers decide what is usable.
#[async_trait]
pub trait PriceSource: Send + Sync + 'static {
    async fn fetch(
        &self,
        ticker: &str,
        granularity: Granularity,
        lookback: Lookback,
    ) -> Result<PriceSeries, SourceError>;
}
