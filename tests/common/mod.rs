use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub const RATES_FIXTURE: &str = "tests/fixtures/rates.json";

/// Writes a `{ "rates": {...} }` snapshot with the given entries.
pub fn write_rates(path: &Path, base: &str, rates: &[(&str, &str)]) -> Result<(), Error> {
    let entries: Vec<String> = rates
        .iter()
        .map(|(code, rate)| format!("\"{}\": {}", code, rate))
        .collect();
    let mut file = File::create(path)?;
    write!(
        file,
        "{{\"base\": \"{}\", \"rates\": {{{}}}}}",
        base,
        entries.join(", ")
    )?;
    Ok(())
}

/// Writes a requests CSV converting `1..=rows` units from `from` to `to`.
pub fn generate_requests(path: &Path, from: &str, to: &str, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["from", "to", "amount"])?;
    for i in 1..=rows {
        wtr.write_record([from, to, &i.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
