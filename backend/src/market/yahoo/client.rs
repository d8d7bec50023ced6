use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use market::source::{PriceSource, SourceError};
use market::types::{Granularity, Lookback, PriceSeries};

use super::errors::YahooError;
use super::types::ChartEnvelope;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; rci-alert/0.1)";

/// Historical bars from the Yahoo Finance v8 chart endpoint.
#[derive(Clone)]
pub struct YahooClient {
    http: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, YahooError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[instrument(
        skip(self, granularity, lookback),
        fields(granularity = %granularity, lookback = %lookback),
        level = "debug"
    )]
    pub async fn fetch_chart(
        &self,
        ticker: &str,
        granularity: Granularity,
        lookback: Lookback,
    ) -> Result<PriceSeries, YahooError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        let resp = self
            .http
            .get(&url)
            .query(&[("interval", granularity.as_str()), ("range", lookback.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        // Unknown symbols come back as 404 with a chart error envelope.
        let envelope: ChartEnvelope = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(YahooError::InvalidResponse(e.to_string()));
            }
            Err(_) => return Err(YahooError::Status(status.as_u16())),
        };
        let series = envelope.into_series()?;

        debug!(points = series.len(), "chart fetched");

        Ok(series)
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch(
        &self,
        ticker: &str,
        granularity: Granularity,
        lookback: Lookback,
    ) -> Result<PriceSeries, SourceError> {
        Ok(self.fetch_chart(ticker, granularity, lookback).await?)
    }
}
