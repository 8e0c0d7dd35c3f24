use super::currency::CurrencyCode;
use super::rate_table::RateTable;
use crate::error::Result;
use async_trait::async_trait;

/// Supplies a fresh [`RateTable`] anchored at the requested base currency.
///
/// Each call yields a wholly new table; sources never mutate a table they
/// have already handed out.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self, base: &CurrencyCode) -> Result<RateTable>;
}

pub type RateSourceBox = Box<dyn RateSource>;
