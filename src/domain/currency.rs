use crate::error::FxError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A three-letter, upper-case currency code such as `USD` or `EUR`.
///
/// Codes are normalised on parse (trimmed, upper-cased). A well-formed code
/// does not have to be listed anywhere to be valid; unknown codes simply have
/// no rate in a [`RateTable`](super::rate_table::RateTable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Result<Self, FxError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized.len() == 3 && normalized.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(normalized))
        } else {
            Err(FxError::InvalidCurrency(code.to_string()))
        }
    }

    /// The conventional base currency.
    pub fn usd() -> Self {
        Self::known("USD")
    }

    /// Code from a built-in table, already in normal form.
    pub(crate) fn known(code: &'static str) -> Self {
        debug_assert!(Self::new(code).is_ok(), "malformed built-in code {code}");
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for this currency, or the code itself when none is known.
    pub fn symbol(&self) -> &str {
        symbol_for(&self.0).unwrap_or(self.0.as_str())
    }
}

fn symbol_for(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "Fr",
        "CNY" => "¥",
        "HKD" => "HK$",
        "NZD" => "NZ$",
        "INR" => "₹",
        "KRW" => "₩",
        "MXN" => "$",
        "SGD" => "S$",
        "ZAR" => "R",
        "SEK" | "NOK" | "DKK" => "kr",
        "BRL" => "R$",
        "RUB" => "₽",
        "PLN" => "zł",
        "THB" => "฿",
        "IDR" => "Rp",
        _ => return None,
    };
    Some(symbol)
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = FxError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}
