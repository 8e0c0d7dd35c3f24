use crate::domain::currency::CurrencyCode;
use crate::domain::ports::RateSource;
use crate::domain::rate_table::{RateTable, RatesSnapshot};
use crate::error::{FxError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate.host/latest";

/// Fetches rates from a JSON endpoint answering `GET <url>?base=<code>`
/// with a body shaped like [`RatesSnapshot`].
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_snapshot(&self, base: &CurrencyCode) -> Result<RatesSnapshot> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("base", base.as_str())])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<RatesSnapshot>().await?)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self, base: &CurrencyCode) -> Result<RateTable> {
        debug!("Fetching rates for {} from {}", base, self.url);
        let snapshot = self
            .fetch_snapshot(base)
            .await
            .map_err(|e| FxError::FetchError(e.to_string()))?;

        let table = RateTable::from_snapshot(snapshot, base);
        info!("Fetched {} rates against {}", table.len(), table.base());
        if table.base() != base {
            return Ok(table.rebase(base));
        }
        Ok(table)
    }
}
