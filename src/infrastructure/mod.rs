//! Rate sources backing the `RateSource` port.

pub mod file;
pub mod http;
pub mod mock;
