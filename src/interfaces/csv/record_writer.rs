use crate::domain::conversion::ConversionRecord;
use crate::error::Result;
use std::io::Write;

/// Writes conversion results as CSV with a `from,to,amount,converted` header.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_record(&mut self, record: &ConversionRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
