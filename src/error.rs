use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),
    #[error("Invalid rate for {code}: {rate}")]
    InvalidRate { code: String, rate: Decimal },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Failed to fetch exchange rates. Please try again later. ({0})")]
    FetchError(String),
}

pub type Result<T> = std::result::Result<T, FxError>;
