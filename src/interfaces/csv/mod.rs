//! CSV input and output for batch conversion.

pub mod record_writer;
pub mod request_reader;
