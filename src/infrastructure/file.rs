use crate::domain::currency::CurrencyCode;
use crate::domain::ports::RateSource;
use crate::domain::rate_table::{RateTable, RatesSnapshot};
use crate::error::{FxError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Reads a rates snapshot saved as JSON on disk.
///
/// A file without a `"base"` field is anchored at USD, whatever base is
/// requested; the table is then rebased. The file is re-read on every fetch,
/// so edits between fetches are picked up.
#[derive(Debug, Clone)]
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_snapshot(&self) -> Result<RatesSnapshot> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    async fn fetch(&self, base: &CurrencyCode) -> Result<RateTable> {
        debug!("Reading rates from {}", self.path.display());
        let snapshot = self.read_snapshot().await.map_err(|e| {
            FxError::FetchError(format!("{}: {}", self.path.display(), e))
        })?;

        let table = RateTable::from_snapshot(snapshot, &CurrencyCode::usd());
        Ok(table.rebase(base))
    }
}
