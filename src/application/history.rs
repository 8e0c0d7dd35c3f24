//! Mock 30-day rate history for charting.
//!
//! The series is a randomized walk around a fixed reference rate. It is
//! decorative data, not a record of real market prices.

use crate::domain::currency::CurrencyCode;
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

/// Days before today included in a series (the series also includes today).
pub const HISTORY_DAYS: i64 = 30;

const MAJOR_PAIRS: [&str; 7] = [
    "EURUSD", "USDJPY", "GBPUSD", "USDCHF", "AUDUSD", "USDCAD", "NZDUSD",
];

/// Rate used when a pair is not in the reference matrix.
const FALLBACK_RATE: Decimal = dec!(1.25);

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    /// `M/D` without zero padding.
    pub label: String,
    pub rate: Decimal,
}

/// Starting rate for the pair: listed directly, else the inverse of the
/// listed reverse pair, else parity for a currency against itself and
/// [`FALLBACK_RATE`] otherwise.
pub fn reference_rate(from: &CurrencyCode, to: &CurrencyCode) -> Decimal {
    if let Some(rate) = listed_rate(from.as_str(), to.as_str()) {
        return rate;
    }
    if let Some(inverse) = listed_rate(to.as_str(), from.as_str())
        && let Some(rate) = Decimal::ONE.checked_div(inverse)
    {
        return rate;
    }
    if from == to {
        Decimal::ONE
    } else {
        warn!(
            "No reference rate for {}/{}, using default approximation",
            from, to
        );
        FALLBACK_RATE
    }
}

fn listed_rate(from: &str, to: &str) -> Option<Decimal> {
    let rate = match (from, to) {
        ("USD", "EUR") => dec!(0.92),
        ("USD", "GBP") => dec!(0.78),
        ("USD", "JPY") => dec!(148.5),
        ("USD", "CAD") => dec!(1.35),
        ("USD", "AUD") => dec!(1.52),
        ("USD", "CHF") => dec!(0.89),
        ("USD", "CNY") => dec!(7.23),
        ("USD", "HKD") => dec!(7.82),
        ("USD", "NZD") => dec!(1.65),
        ("EUR", "USD") => dec!(1.09),
        ("EUR", "GBP") => dec!(0.85),
        ("EUR", "JPY") => dec!(161.5),
        ("EUR", "CAD") => dec!(1.47),
        ("EUR", "AUD") => dec!(1.65),
        ("EUR", "CHF") => dec!(0.97),
        ("EUR", "CNY") => dec!(7.87),
        ("EUR", "HKD") => dec!(8.51),
        ("EUR", "NZD") => dec!(1.79),
        ("GBP", "USD") => dec!(1.28),
        ("GBP", "EUR") => dec!(1.18),
        ("GBP", "JPY") => dec!(190.5),
        ("GBP", "CAD") => dec!(1.73),
        ("GBP", "AUD") => dec!(1.94),
        ("GBP", "CHF") => dec!(1.14),
        ("GBP", "CNY") => dec!(9.27),
        ("GBP", "HKD") => dec!(10.01),
        ("GBP", "NZD") => dec!(2.11),
        _ => return None,
    };
    Some(rate)
}

/// Relative daily spread for the pair.
pub fn volatility(from: &CurrencyCode, to: &CurrencyCode) -> Decimal {
    if from == to {
        return dec!(0.001);
    }
    let pair = format!("{from}{to}");
    let inverse = format!("{to}{from}");
    if MAJOR_PAIRS.contains(&pair.as_str()) || MAJOR_PAIRS.contains(&inverse.as_str()) {
        return dec!(0.02);
    }
    let anchored = |code: &CurrencyCode| matches!(code.as_str(), "USD" | "EUR");
    if anchored(from) || anchored(to) {
        dec!(0.03)
    } else {
        dec!(0.05)
    }
}

/// Places for history points quoted in `to`.
pub fn history_precision(to: &CurrencyCode) -> u32 {
    if to.as_str() == "JPY" { 2 } else { 4 }
}

/// Produces mock history series from a random source.
pub struct HistoryGenerator<R: Rng> {
    rng: R,
}

impl HistoryGenerator<StdRng> {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> HistoryGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// One point per day from `HISTORY_DAYS` days before `today` up to `today`.
    pub fn generate(
        &mut self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        today: NaiveDate,
    ) -> Vec<HistoryPoint> {
        let volatility = volatility(from, to);
        let precision = history_precision(to);
        let mut base = reference_rate(from, to);

        (0..=HISTORY_DAYS)
            .rev()
            .map(|days_back| {
                let date = today - Duration::days(days_back);
                let variation = self.centered_unit() * volatility;
                let rate = (base * (Decimal::ONE + variation))
                    .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);

                base += self.centered_unit() * dec!(0.005) * base;

                HistoryPoint {
                    date,
                    label: format!("{}/{}", date.month(), date.day()),
                    rate,
                }
            })
            .collect()
    }

    /// Uniform value in `[-0.5, 0.5)` at micro resolution.
    fn centered_unit(&mut self) -> Decimal {
        Decimal::new(self.rng.gen_range(0..1_000_000), 6) - dec!(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_rate_lookup() {
        assert_eq!(reference_rate(&code("USD"), &code("EUR")), dec!(0.92));
        assert_eq!(reference_rate(&code("GBP"), &code("JPY")), dec!(190.5));
        // Only the reverse is listed.
        let jpy_usd = reference_rate(&code("JPY"), &code("USD"));
        assert_eq!(jpy_usd.round_dp(6), dec!(0.006734));
        assert_eq!(reference_rate(&code("SEK"), &code("SEK")), Decimal::ONE);
        assert_eq!(reference_rate(&code("SEK"), &code("NOK")), dec!(1.25));
    }

    #[test]
    fn test_volatility_classes() {
        assert_eq!(volatility(&code("JPY"), &code("JPY")), dec!(0.001));
        assert_eq!(volatility(&code("EUR"), &code("USD")), dec!(0.02));
        assert_eq!(volatility(&code("JPY"), &code("USD")), dec!(0.02));
        assert_eq!(volatility(&code("EUR"), &code("GBP")), dec!(0.03));
        assert_eq!(volatility(&code("USD"), &code("SEK")), dec!(0.03));
        assert_eq!(volatility(&code("GBP"), &code("JPY")), dec!(0.05));
    }

    #[test]
    fn test_history_precision() {
        assert_eq!(history_precision(&code("JPY")), 2);
        assert_eq!(history_precision(&code("EUR")), 4);
    }

    #[test]
    fn test_series_shape_and_labels() {
        let mut generator = HistoryGenerator::seeded(7);
        let series = generator.generate(&code("USD"), &code("EUR"), day(2024, 3, 5));

        assert_eq!(series.len(), 31);
        assert_eq!(series[0].date, day(2024, 2, 4));
        assert_eq!(series[0].label, "2/4");
        assert_eq!(series[30].date, day(2024, 3, 5));
        assert_eq!(series[30].label, "3/5");
    }

    #[test]
    fn test_series_stays_near_reference() {
        let mut generator = HistoryGenerator::seeded(42);
        let series = generator.generate(&code("EUR"), &code("USD"), day(2024, 1, 31));

        for point in &series {
            assert!(point.rate > dec!(0.95) && point.rate < dec!(1.25), "{:?}", point);
            assert!(point.rate.scale() <= 4);
        }
    }

    #[test]
    fn test_jpy_points_use_two_places() {
        let mut generator = HistoryGenerator::seeded(3);
        let series = generator.generate(&code("USD"), &code("JPY"), day(2024, 6, 1));
        assert!(series.iter().all(|p| p.rate.scale() <= 2));
    }

    #[test]
    fn test_seeded_series_is_reproducible() {
        let today = day(2024, 6, 1);
        let a = HistoryGenerator::seeded(9).generate(&code("GBP"), &code("EUR"), today);
        let b = HistoryGenerator::seeded(9).generate(&code("GBP"), &code("EUR"), today);
        assert_eq!(a, b);
    }
}
