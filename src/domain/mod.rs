//! Domain types: currency codes, rate tables, conversion requests and the
//! rate source port.

pub mod conversion;
pub mod currency;
pub mod ports;
pub mod rate_table;
