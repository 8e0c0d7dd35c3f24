use crate::domain::currency::CurrencyCode;
use crate::domain::ports::RateSource;
use crate::domain::rate_table::RateTable;
use crate::error::Result;
use async_trait::async_trait;
use tracing::debug;

/// Serves the built-in demo table, rebased to whatever base is requested.
#[derive(Debug, Clone)]
pub struct MockRateSource {
    table: RateTable,
}

impl MockRateSource {
    pub fn new() -> Self {
        Self::with_table(RateTable::mock())
    }

    /// Serves `table` instead of the demo rates.
    pub fn with_table(table: RateTable) -> Self {
        Self { table }
    }
}

impl Default for MockRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for MockRateSource {
    async fn fetch(&self, base: &CurrencyCode) -> Result<RateTable> {
        debug!("Serving mock rates for base {}", base);
        Ok(self.table.rebase(base))
    }
}
