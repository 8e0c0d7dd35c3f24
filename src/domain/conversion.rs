use super::currency::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single request to convert `amount` from one currency to another.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
}

/// The outcome of a [`ConversionRequest`], as written by the batch output.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct ConversionRecord {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
    pub converted: Decimal,
}
