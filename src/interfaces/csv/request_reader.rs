use crate::domain::conversion::ConversionRequest;
use crate::error::{FxError, Result};
use std::io::Read;

/// Reads conversion requests (`from,to,amount`) from a CSV source.
///
/// Whitespace around fields is trimmed and short records are tolerated, so a
/// malformed row yields an error for that row only.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Wraps a CSV source whose first row is the `from,to,amount` header.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes requests, one `Result` per row.
    pub fn requests(self) -> impl Iterator<Item = Result<ConversionRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(FxError::from))
    }
}
