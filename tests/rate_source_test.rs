mod common;

use fxconv::application::engine::ConversionEngine;
use fxconv::domain::currency::CurrencyCode;
use fxconv::domain::ports::{RateSource, RateSourceBox};
use fxconv::infrastructure::file::FileRateSource;
use fxconv::infrastructure::mock::MockRateSource;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_sources_as_trait_objects() {
    let sources: Vec<RateSourceBox> = vec![
        Box::new(MockRateSource::new()),
        Box::new(FileRateSource::new(common::RATES_FIXTURE)),
    ];

    // Verify Send + Sync by fetching from spawned tasks
    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| tokio::spawn(async move { source.fetch(&CurrencyCode::usd()).await }))
        .collect();

    let eur = CurrencyCode::new("EUR").unwrap();
    let mut rates = Vec::new();
    for handle in handles {
        let table = handle.await.unwrap().unwrap();
        rates.push(table.rate(&eur).unwrap());
    }
    assert_eq!(rates, vec![dec!(0.826), dec!(0.92)]);
}

#[tokio::test]
async fn test_refetch_yields_new_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.json");
    common::write_rates(&path, "USD", &[("EUR", "0.5")]).unwrap();

    let source: RateSourceBox = Box::new(FileRateSource::new(&path));
    let engine = ConversionEngine::new();
    let usd = CurrencyCode::usd();
    let eur = CurrencyCode::new("EUR").unwrap();

    let first = source.fetch(&usd).await.unwrap();
    assert_eq!(engine.convert(&first, &usd, &eur, dec!(10)), dec!(5.00));

    common::write_rates(&path, "USD", &[("EUR", "0.25")]).unwrap();
    let second = source.fetch(&usd).await.unwrap();
    assert_eq!(engine.convert(&second, &usd, &eur, dec!(10)), dec!(2.50));

    // The earlier table is unaffected by the refresh.
    assert_eq!(engine.convert(&first, &usd, &eur, dec!(10)), dec!(5.00));
}

#[tokio::test]
async fn test_file_source_rebases_to_requested_base() {
    let source = FileRateSource::new(common::RATES_FIXTURE);
    let gbp = CurrencyCode::new("GBP").unwrap();
    let table = source.fetch(&gbp).await.unwrap();

    let engine = ConversionEngine::new();
    assert_eq!(table.base(), &gbp);
    assert_eq!(
        engine.rate_between(&table, &gbp, &CurrencyCode::new("EUR").unwrap()),
        dec!(1.179487)
    );
}
