use chrono::Local;
use clap::{Parser, Subcommand};
use fxconv::application::board::{DEFAULT_BOARD_LIMIT, popular_rates};
use fxconv::application::converter::ConverterState;
use fxconv::application::history::{HistoryGenerator, history_precision};
use fxconv::config::Settings;
use fxconv::domain::currency::CurrencyCode;
use fxconv::domain::rate_table::RateTable;
use fxconv::interfaces::csv::record_writer::RecordWriter;
use fxconv::interfaces::csv::request_reader::RequestReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an amount from one currency to another
    Convert {
        from: CurrencyCode,
        to: CurrencyCode,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Treat AMOUNT as the desired result and solve for the source amount
        #[arg(long)]
        reverse: bool,
    },
    /// Show the exchange rate between two currencies
    Rate { from: CurrencyCode, to: CurrencyCode },
    /// List rates from the base currency to the first few listed currencies
    Rates {
        #[arg(long, default_value_t = DEFAULT_BOARD_LIMIT)]
        limit: usize,
    },
    /// Convert every `from,to,amount` row of a CSV file
    Batch {
        /// Input requests CSV file
        input: PathBuf,
    },
    /// Print a mock 30-day rate history
    History {
        from: CurrencyCode,
        to: CurrencyCode,
        /// Seed for a reproducible series
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the display symbol for a currency
    Symbol { code: CurrencyCode },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.settings);

    let settings = cli.settings;
    let engine = settings.engine();

    match cli.command {
        Command::Convert {
            from,
            to,
            amount,
            reverse,
        } => {
            let table = load_table(&settings).await?;
            let places = engine.precision().result as usize;
            if reverse {
                let source = engine.convert_reverse(&table, &from, &to, amount);
                println!("{:.places$} {} = {} {}", source, from, amount, to);
            } else {
                let state = ConverterState::with_pair(&engine, &table, from, to, amount);
                let converted = state.converted.unwrap_or_default();
                println!("{} {} = {:.places$} {}", amount, state.from, converted, state.to);
                println!("{}", state.rate_line(&engine, &table));
            }
        }
        Command::Rate { from, to } => {
            let table = load_table(&settings).await?;
            let rate = engine.rate_between(&table, &from, &to);
            let places = engine.precision().rate as usize;
            println!("1 {} = {:.places$} {}", from, rate, to);
        }
        Command::Rates { limit } => {
            let table = load_table(&settings).await?;
            for row in popular_rates(&engine, &table, &settings.base, limit) {
                println!("{}/{} {:.3}", row.base, row.quote, row.rate);
            }
        }
        Command::Batch { input } => {
            let table = load_table(&settings).await?;
            let file = File::open(input).into_diagnostic()?;
            let reader = RequestReader::new(file);

            let stdout = io::stdout();
            let mut writer = RecordWriter::new(stdout.lock());
            let mut converted = 0usize;
            for request in reader.requests() {
                match request {
                    Ok(request) => {
                        writer
                            .write_record(&engine.apply(&table, request))
                            .into_diagnostic()?;
                        converted += 1;
                    }
                    Err(e) => {
                        eprintln!("Error reading request: {}", e);
                    }
                }
            }
            writer.flush().into_diagnostic()?;
            info!("Converted {} requests", converted);
        }
        Command::History { from, to, seed } => {
            let today = Local::now().date_naive();
            let series = match seed {
                Some(seed) => HistoryGenerator::seeded(seed).generate(&from, &to, today),
                None => HistoryGenerator::from_entropy().generate(&from, &to, today),
            };
            let places = history_precision(&to) as usize;
            for point in series {
                println!("{} 1 {} = {:.places$} {}", point.label, from, point.rate, to);
            }
        }
        Command::Symbol { code } => {
            println!("{}", code.symbol());
        }
    }

    Ok(())
}

async fn load_table(settings: &Settings) -> Result<RateTable> {
    let source = settings.rate_source().into_diagnostic()?;
    let table = source.fetch(&settings.base).await.into_diagnostic()?;
    info!("Loaded {} rates against {}", table.len(), table.base());
    Ok(table)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
