use super::currency::CurrencyCode;
use crate::error::{FxError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// Wire shape of a rates payload: `{ "base": "USD", "date": "...", "rates": { "EUR": 0.92 } }`.
///
/// Only `rates` is required. Entries are kept as raw JSON, in payload order,
/// so that a single malformed entry can be dropped without rejecting the
/// whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub rates: Map<String, Value>,
}

/// An immutable table of exchange rates anchored at a base currency.
///
/// Each entry is the amount of that currency equal to one unit of the base.
/// The base itself is implicitly `1` and never stored as a key. Every stored
/// rate is strictly positive. Listed codes keep the order they were supplied in.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
    order: Vec<CurrencyCode>,
}

impl RateTable {
    /// Builds a table, rejecting non-positive rates and entries for the base code.
    pub fn new<I>(base: CurrencyCode, rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CurrencyCode, Decimal)>,
    {
        let mut table = Self::empty(base);
        for (code, rate) in rates {
            if rate <= Decimal::ZERO || code == table.base {
                return Err(FxError::InvalidRate {
                    code: code.to_string(),
                    rate,
                });
            }
            table.insert(code, rate);
        }
        Ok(table)
    }

    /// An empty table: every lookup other than the base falls back to parity.
    pub fn empty(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Builds a table from a fetched payload, dropping entries that would
    /// break the table invariants instead of failing.
    ///
    /// The snapshot's own `base` wins over `default_base` when it parses.
    pub fn from_snapshot(snapshot: RatesSnapshot, default_base: &CurrencyCode) -> Self {
        let base = match snapshot.base.as_deref().map(CurrencyCode::new) {
            Some(Ok(code)) => code,
            Some(Err(e)) => {
                warn!("Ignoring snapshot base: {}", e);
                default_base.clone()
            }
            None => default_base.clone(),
        };

        let mut table = Self::empty(base);
        for (raw, value) in snapshot.rates {
            let code = match CurrencyCode::new(&raw) {
                Ok(code) => code,
                Err(e) => {
                    warn!("Dropping rate entry: {}", e);
                    continue;
                }
            };
            if code == table.base {
                // Some feeds list the base at 1; it is implicit here.
                debug!("Skipping base currency {} in rates payload", code);
                continue;
            }
            let Some(rate) = parse_rate(&value) else {
                warn!("Dropping unusable rate {} for {}", value, code);
                continue;
            };
            if rate <= Decimal::ZERO {
                warn!("Dropping non-positive rate {} for {}", rate, code);
                continue;
            }
            table.insert(code, rate);
        }
        table
    }

    /// The demo table used when no live source is configured.
    pub fn mock() -> Self {
        let entries = [
            ("EUR", dec!(0.826)),
            ("GBP", dec!(0.765)),
            ("JPY", dec!(108.2)),
            ("CAD", dec!(1.257)),
            ("AUD", dec!(1.345)),
            ("CHF", dec!(0.925)),
            ("HKD", dec!(7.782)),
            ("CNY", dec!(6.548)),
        ];
        let mut table = Self::empty(CurrencyCode::usd());
        for (code, rate) in entries {
            table.insert(CurrencyCode::known(code), rate);
        }
        table
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Rate for `code` relative to the base; `Some(1)` for the base itself,
    /// `None` when the code is not listed.
    pub fn rate(&self, code: &CurrencyCode) -> Option<Decimal> {
        if *code == self.base {
            Some(Decimal::ONE)
        } else {
            self.rates.get(code).copied()
        }
    }

    /// Rate for `code`, treating an unlisted code as parity with the base.
    pub fn rate_or_parity(&self, code: &CurrencyCode) -> Decimal {
        self.rate(code).unwrap_or(Decimal::ONE)
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rate(code).is_some()
    }

    /// Listed (non-base) currencies in the order they were supplied.
    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Produces a new table anchored at `new_base`.
    ///
    /// Every rate becomes `rate(c) / rate(new_base)` at full precision; the
    /// old base is listed first with `1 / rate(new_base)`. An unlisted
    /// `new_base` is taken at parity, so rebasing onto it only relabels the base.
    pub fn rebase(&self, new_base: &CurrencyCode) -> Self {
        if *new_base == self.base {
            return self.clone();
        }

        let anchor = self.rate_or_parity(new_base);
        let mut table = Self::empty(new_base.clone());
        if let Some(old_base) = Decimal::ONE.checked_div(anchor).filter(|r| *r > Decimal::ZERO) {
            table.insert(self.base.clone(), old_base);
        }
        for (code, rate) in self.entries().filter(|(code, _)| *code != new_base) {
            if let Some(rebased) = rate.checked_div(anchor).filter(|r| *r > Decimal::ZERO) {
                table.insert(code.clone(), rebased);
            }
        }
        table
    }

    /// Serializable form of this table.
    pub fn to_snapshot(&self) -> RatesSnapshot {
        RatesSnapshot {
            base: Some(self.base.to_string()),
            date: None,
            rates: self
                .entries()
                .map(|(code, rate)| (code.to_string(), Value::String(rate.to_string())))
                .collect(),
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&CurrencyCode, Decimal)> {
        self.order
            .iter()
            .filter_map(|code| self.rates.get(code).map(|rate| (code, *rate)))
    }

    fn insert(&mut self, code: CurrencyCode, rate: Decimal) {
        if self.rates.insert(code.clone(), rate).is_none() {
            self.order.push(code);
        }
    }
}

/// Reads a rate from a JSON number or numeric string. `None` for anything
/// else, including numbers outside the `Decimal` range.
fn parse_rate(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}
