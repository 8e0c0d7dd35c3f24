use super::engine::ConversionEngine;
use crate::domain::currency::CurrencyCode;
use crate::domain::rate_table::RateTable;
use rust_decimal::{Decimal, RoundingStrategy};

/// Places shown on the rate board.
pub const BOARD_PRECISION: u32 = 3;

/// Rows shown when no limit is given.
pub const DEFAULT_BOARD_LIMIT: usize = 5;

/// One line of the rate board: `1 base = rate quote`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
    pub rate: Decimal,
}

/// Currencies selectable against `table`: its base first, then every listed
/// code in the order the table was built with.
pub fn available_currencies(table: &RateTable) -> Vec<CurrencyCode> {
    std::iter::once(table.base().clone())
        .chain(table.codes().cloned())
        .collect()
}

/// Rates from `base` to the first `limit` other available currencies.
///
/// `base` need not be the table's own base; rates are derived through the
/// engine so the board always agrees with conversions.
pub fn popular_rates(
    engine: &ConversionEngine,
    table: &RateTable,
    base: &CurrencyCode,
    limit: usize,
) -> Vec<BoardRow> {
    available_currencies(table)
        .into_iter()
        .filter(|quote| quote != base)
        .take(limit)
        .map(|quote| {
            let rate = engine
                .rate_between(table, base, &quote)
                .round_dp_with_strategy(BOARD_PRECISION, RoundingStrategy::MidpointAwayFromZero);
            BoardRow {
                base: base.clone(),
                quote,
                rate,
            }
        })
        .collect()
}
