use super::engine::ConversionEngine;
use crate::domain::currency::CurrencyCode;
use crate::domain::rate_table::RateTable;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// An edit made to the interactive converter.
#[derive(Debug, Clone, PartialEq)]
pub enum ConverterEvent {
    /// The source amount was typed; `None` means the field was cleared.
    AmountEdited(Option<Decimal>),
    /// The converted amount was typed; `None` means the field was cleared.
    ConvertedEdited(Option<Decimal>),
    FromSelected(CurrencyCode),
    ToSelected(CurrencyCode),
    Swapped,
    /// A new rate table arrived.
    RatesReplaced,
}

/// The four correlated fields of the converter.
///
/// Every transition goes through [`ConverterState::apply`], which delegates
/// all arithmetic to the [`ConversionEngine`] so the two amounts stay
/// consistent with the selected currencies and the current table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Option<Decimal>,
    pub converted: Option<Decimal>,
}

impl ConverterState {
    /// USD to EUR, 100 units, converted against `table`.
    pub fn new(engine: &ConversionEngine, table: &RateTable) -> Self {
        let mut state = Self {
            from: CurrencyCode::usd(),
            to: CurrencyCode::known("EUR"),
            amount: Some(dec!(100)),
            converted: None,
        };
        state.recompute_converted(engine, table);
        state
    }

    pub fn with_pair(
        engine: &ConversionEngine,
        table: &RateTable,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: Decimal,
    ) -> Self {
        let mut state = Self {
            from,
            to,
            amount: Some(amount),
            converted: None,
        };
        state.recompute_converted(engine, table);
        state
    }

    /// Returns the state after `event`, leaving `self` untouched.
    pub fn apply(
        &self,
        event: ConverterEvent,
        engine: &ConversionEngine,
        table: &RateTable,
    ) -> Self {
        let mut next = self.clone();
        match event {
            ConverterEvent::AmountEdited(amount) => {
                next.amount = amount;
                next.recompute_converted(engine, table);
            }
            ConverterEvent::ConvertedEdited(converted) => {
                next.converted = converted;
                if let Some(value) = converted {
                    next.amount = Some(engine.convert_reverse(table, &next.from, &next.to, value));
                }
            }
            ConverterEvent::FromSelected(code) => {
                next.from = code;
                next.recompute_converted(engine, table);
            }
            ConverterEvent::ToSelected(code) => {
                next.to = code;
                next.recompute_converted(engine, table);
            }
            ConverterEvent::Swapped => {
                std::mem::swap(&mut next.from, &mut next.to);
                std::mem::swap(&mut next.amount, &mut next.converted);
            }
            ConverterEvent::RatesReplaced => next.recompute_converted(engine, table),
        }
        next
    }

    /// Label such as `USD • EUR`.
    pub fn pair_label(&self) -> String {
        format!("{} • {}", self.from, self.to)
    }

    /// Display symbols for the `from` and `to` sides.
    pub fn symbols(&self) -> (&str, &str) {
        (self.from.symbol(), self.to.symbol())
    }

    /// Line such as `1 USD = 0.920000 EUR`.
    pub fn rate_line(&self, engine: &ConversionEngine, table: &RateTable) -> String {
        let rate = engine.rate_between(table, &self.from, &self.to);
        format!(
            "1 {} = {:.prec$} {}",
            self.from,
            rate,
            self.to,
            prec = engine.precision().rate as usize
        )
    }

    fn recompute_converted(&mut self, engine: &ConversionEngine, table: &RateTable) {
        if let Some(amount) = self.amount {
            self.converted = Some(engine.convert(table, &self.from, &self.to, amount));
        }
    }
}
