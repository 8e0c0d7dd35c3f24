//! Application layer: the conversion engine and the features built on it.
//!
//! `ConversionEngine` is the single place where rates are applied. The
//! converter state, rate board and batch paths all call into it rather than
//! recomputing formulas themselves.

pub mod board;
pub mod converter;
pub mod engine;
pub mod history;
