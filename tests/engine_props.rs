//! Property tests for the conversion engine.

use fxconv::application::engine::ConversionEngine;
use fxconv::domain::currency::CurrencyCode;
use fxconv::domain::rate_table::RateTable;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const LISTED: [&str; 4] = ["EUR", "GBP", "JPY", "CHF"];
const ANY: [&str; 6] = ["USD", "EUR", "GBP", "JPY", "CHF", "XXX"];

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

/// Amounts from -1,000,000.00 to 1,000,000.00 in cents.
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rates from 0.0001 to 999.9999.
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn table() -> impl Strategy<Value = RateTable> {
    prop::collection::vec(rate(), LISTED.len()).prop_map(|rates| {
        RateTable::new(
            CurrencyCode::usd(),
            LISTED.iter().zip(rates).map(|(c, r)| (code(c), r)),
        )
        .unwrap()
    })
}

fn currency() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(ANY.to_vec()).prop_map(code)
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_same_currency_is_identity(t in table(), c in currency(), x in amount()) {
        let engine = ConversionEngine::new();
        prop_assert_eq!(engine.convert(&t, &c, &c, x), round2(x));
    }

    #[test]
    fn prop_round_trip_within_tolerance(
        t in table(),
        from in currency(),
        to in currency(),
        x in amount(),
    ) {
        let engine = ConversionEngine::new();
        let converted = engine.convert(&t, &from, &to, x);
        let back = engine.convert_reverse(&t, &from, &to, converted);

        // Half a cent lost on the way out, scaled back by the inverse rate,
        // plus half a cent on the way back.
        let inverse = t.rate_or_parity(&from) / t.rate_or_parity(&to);
        let tolerance = dec!(0.005) * inverse + dec!(0.005) + dec!(0.0000001);
        prop_assert!(
            (back - x).abs() <= tolerance,
            "x={} converted={} back={} tolerance={}", x, converted, back, tolerance
        );
    }

    #[test]
    fn prop_base_to_listed_is_the_rate(t in table(), i in 0usize..LISTED.len()) {
        let engine = ConversionEngine::new();
        let to = code(LISTED[i]);
        let r = t.rate(&to).unwrap();
        prop_assert_eq!(engine.convert(&t, &CurrencyCode::usd(), &to, Decimal::ONE), round2(r));
    }

    #[test]
    fn prop_unknown_currency_is_parity(t in table(), x in amount()) {
        let engine = ConversionEngine::new();
        prop_assert_eq!(engine.convert(&t, &CurrencyCode::usd(), &code("XXX"), x), round2(x));
    }

    #[test]
    fn prop_rate_symmetry(t in table(), from in currency(), to in currency()) {
        let engine = ConversionEngine::new();
        let forward = engine.rate_between(&t, &from, &to);
        let backward = engine.rate_between(&t, &to, &from);
        // Each side is rounded to 6 places, so the product drifts by up to
        // half a millionth of the other side.
        let tolerance = (forward + backward) * dec!(0.0000005) + dec!(0.0000001);
        prop_assert!(
            (forward * backward - Decimal::ONE).abs() <= tolerance,
            "forward={} backward={}", forward, backward
        );
    }

    #[test]
    fn prop_convert_agrees_with_rate(
        t in table(),
        from in currency(),
        to in currency(),
        x in amount(),
    ) {
        let engine = ConversionEngine::new();
        let direct = engine.convert(&t, &from, &to, x);
        let via_rate = round2(x * engine.rate_between(&t, &from, &to));
        // The displayed rate is rounded to 6 places.
        let tolerance = x.abs() * dec!(0.0000005) + dec!(0.01);
        prop_assert!(
            (direct - via_rate).abs() <= tolerance,
            "direct={} via_rate={}", direct, via_rate
        );
    }
}
