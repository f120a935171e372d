use std::{sync::Arc, time::Duration};

use axum::http::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{MarketConfig, MARKET_PLACEHOLDER};

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("invalid market symbol")]
    InvalidSymbol,
    #[error("parent api answered {0}")]
    ProbeFailed(StatusCode),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream body is not JSON: {0}")]
    NotJson(#[from] serde_json::Error),
}

/// Upstream answer passed back to the caller as-is.
#[derive(Debug)]
pub struct Relayed {
    pub status: StatusCode,
    pub body: Value,
}

/// Read-only client for the upstream market-data API.
#[derive(Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    config: Arc<MarketConfig>,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn strict_status(&self) -> bool {
        self.config.strict_status
    }

    /// All markets. The parent endpoint, when configured, only gates the call:
    /// its body is never read.
    pub async fn overall_summary(&self) -> Result<Relayed, MarketError> {
        if let Some(parent) = &self.config.parent_api {
            let status = self.http.get(parent).send().await?.status();
            if status != reqwest::StatusCode::OK {
                warn!(%status, "parent api probe failed");
                return Err(MarketError::ProbeFailed(convert(status)));
            }
        }
        self.fetch_json(&self.config.overall_summary_api).await
    }

    pub async fn market_summary(&self, company: &str) -> Result<Relayed, MarketError> {
        let company = validate_symbol(company)?;
        let url = self
            .config
            .market_summary_api
            .replace(MARKET_PLACEHOLDER, company);
        self.fetch_json(&url).await
    }

    async fn fetch_json(&self, url: &str) -> Result<Relayed, MarketError> {
        let res = self.http.get(url).send().await?;
        let status = convert(res.status());
        let bytes = res.bytes().await?;
        let body = serde_json::from_slice::<Value>(&bytes)?;
        debug!(url, %status, len = bytes.len(), "upstream answered");
        Ok(Relayed { status, body })
    }
}

fn validate_symbol(company: &str) -> Result<&str, MarketError> {
    let company = company.trim();
    if company.is_empty() || company.contains(['/', '?', '#']) {
        return Err(MarketError::InvalidSymbol);
    }
    Ok(company)
}

fn convert(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}
