use crate::application::engine::{ConversionEngine, Precision};
use crate::domain::currency::CurrencyCode;
use crate::domain::ports::RateSourceBox;
use crate::error::{FxError, Result};
use crate::infrastructure::file::FileRateSource;
use crate::infrastructure::http::{DEFAULT_RATES_URL, HttpRateSource};
use crate::infrastructure::mock::MockRateSource;
use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Where the rate table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Built-in demo rates
    Mock,
    /// Live JSON endpoint
    Http,
    /// JSON snapshot on disk
    File,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Base currency the rate table is anchored at
    #[arg(long, global = true, default_value = "USD")]
    pub base: CurrencyCode,

    /// Rate source. Defaults to `file` when --rates-file is given, `mock` otherwise.
    #[arg(long, global = true, value_enum)]
    pub source: Option<SourceKind>,

    /// Endpoint queried by the http source
    #[arg(long, global = true, env = "FXCONV_RATES_URL", default_value = DEFAULT_RATES_URL)]
    pub rates_url: String,

    /// JSON snapshot read by the file source
    #[arg(long, global = true)]
    pub rates_file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Decimal places for converted amounts
    #[arg(long, global = true, default_value_t = 2)]
    pub places: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Settings {
    pub fn source_kind(&self) -> SourceKind {
        match (self.source, &self.rates_file) {
            (Some(kind), _) => kind,
            (None, Some(_)) => SourceKind::File,
            (None, None) => SourceKind::Mock,
        }
    }

    pub fn rate_source(&self) -> Result<RateSourceBox> {
        match self.source_kind() {
            SourceKind::Mock => Ok(Box::new(MockRateSource::new())),
            SourceKind::Http => {
                let timeout = Duration::from_secs(self.timeout_secs);
                Ok(Box::new(HttpRateSource::new(self.rates_url.clone(), timeout)?))
            }
            SourceKind::File => {
                let path = self.rates_file.clone().ok_or_else(|| {
                    FxError::ConfigError("--source file requires --rates-file".to_string())
                })?;
                Ok(Box::new(FileRateSource::new(path)))
            }
        }
    }

    pub fn engine(&self) -> ConversionEngine {
        ConversionEngine::with_precision(Precision {
            result: self.places,
            ..Precision::default()
        })
    }

    /// Default `tracing` filter for the requested verbosity; `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "fxconv=warn",
            1 => "fxconv=info",
            2 => "fxconv=debug",
            _ => "fxconv=trace",
        }
    }
}
