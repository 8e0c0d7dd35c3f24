use crate::domain::conversion::{ConversionRecord, ConversionRequest};
use crate::domain::currency::CurrencyCode;
use crate::domain::rate_table::RateTable;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::trace;

/// Decimal places used when presenting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    /// Places for converted amounts.
    pub result: u32,
    /// Places for exchange rates.
    pub rate: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self { result: 2, rate: 6 }
    }
}

/// Converts amounts between any two currencies of a [`RateTable`].
///
/// The engine is stateless apart from its rounding policy. It never fails:
/// a currency missing from the table is taken at parity with the base, and
/// arithmetic that would overflow saturates at the representable bounds.
///
/// Rates are applied in three cases:
///
/// * from the base: `amount * rate(to)`
/// * to the base: `amount / rate(from)`
/// * cross: `amount / rate(from) * rate(to)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionEngine {
    precision: Precision,
}

impl ConversionEngine {
    /// Creates an engine rounding results to 2 places and rates to 6.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(precision: Precision) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Converts `amount` of `from` into `to`, rounded to the result precision.
    pub fn convert(
        &self,
        table: &RateTable,
        from: &CurrencyCode,
        to: &CurrencyCode,
        amount: Decimal,
    ) -> Decimal {
        round(forward(table, from, to, amount), self.precision.result)
    }

    /// Finds the `from` amount that converts to `converted` units of `to`.
    ///
    /// This inverts the formula used by [`convert`](Self::convert), so a
    /// round trip only loses what rounding discards.
    pub fn convert_reverse(
        &self,
        table: &RateTable,
        from: &CurrencyCode,
        to: &CurrencyCode,
        converted: Decimal,
    ) -> Decimal {
        round(backward(table, from, to, converted), self.precision.result)
    }

    /// Multiplier taking `from` amounts to `to` amounts, rounded to the rate precision.
    pub fn rate_between(
        &self,
        table: &RateTable,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Decimal {
        round(forward(table, from, to, Decimal::ONE), self.precision.rate)
    }

    /// Converts a request and pairs it with its result.
    pub fn apply(&self, table: &RateTable, request: ConversionRequest) -> ConversionRecord {
        let converted = self.convert(table, &request.from, &request.to, request.amount);
        ConversionRecord {
            from: request.from,
            to: request.to,
            amount: request.amount,
            converted,
        }
    }
}

fn forward(table: &RateTable, from: &CurrencyCode, to: &CurrencyCode, amount: Decimal) -> Decimal {
    if from == to {
        return amount;
    }

    let base = table.base();
    if from == base {
        mul(amount, lookup(table, to))
    } else if to == base {
        div(amount, lookup(table, from))
    } else {
        mul(div(amount, lookup(table, from)), lookup(table, to))
    }
}

fn backward(
    table: &RateTable,
    from: &CurrencyCode,
    to: &CurrencyCode,
    converted: Decimal,
) -> Decimal {
    if from == to {
        return converted;
    }

    let base = table.base();
    if from == base {
        div(converted, lookup(table, to))
    } else if to == base {
        mul(converted, lookup(table, from))
    } else {
        div(mul(converted, lookup(table, from)), lookup(table, to))
    }
}

fn lookup(table: &RateTable, code: &CurrencyCode) -> Decimal {
    table.rate(code).unwrap_or_else(|| {
        trace!("No rate for {} against {}, using parity", code, table.base());
        Decimal::ONE
    })
}

// Rates are strictly positive, so the sign of a product or quotient is the
// sign of the amount.
fn mul(amount: Decimal, rate: Decimal) -> Decimal {
    amount.checked_mul(rate).unwrap_or_else(|| saturate(amount))
}

fn div(amount: Decimal, rate: Decimal) -> Decimal {
    amount.checked_div(rate).unwrap_or_else(|| saturate(amount))
}

fn saturate(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

// Pads to exactly `places` so the value displays and serializes as shown.
fn round(value: Decimal, places: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded
}
