use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use rebecca::analysis::{AnalysisConfig, Smoothing};
use rebecca::reader::{ReaderConfig, StitchOrder};

mod analyze;
mod batch;
mod config;
mod info;

use config::Config;

/// REBECCA - battery cycling analysis
#[derive(Parser)]
#[command(name = "rebecca")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Smoothing applied to derivative curves.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SmoothingArg {
    /// No smoothing
    None,
    /// Trailing 3-point rolling mean
    Rolling3,
}

impl From<SmoothingArg> for Smoothing {
    fn from(arg: SmoothingArg) -> Self {
        match arg {
            SmoothingArg::None => Smoothing::None,
            SmoothingArg::Rolling3 => Smoothing::Rolling3,
        }
    }
}

/// Order in which multiple inputs are stitched.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderArg {
    /// Keep command-line order
    AsGiven,
    /// Sort by file name
    FileName,
}

impl From<OrderArg> for StitchOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::AsGiven => StitchOrder::AsGiven,
            OrderArg::FileName => StitchOrder::FileName,
        }
    }
}

/// Analysis settings shared by `analyze` and `batch`.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep open-circuit rows (zero incremental charge) in the cycle analysis
    #[arg(long)]
    keep_ocv: bool,

    /// Voltage tolerance for dQ/dV de-duplication (V)
    #[arg(long, value_name = "VOLTS")]
    tolerance: Option<f64>,

    /// Smoothing applied to dQ/dV and dV/dQ
    #[arg(long, value_enum)]
    smoothing: Option<SmoothingArg>,

    /// Skip dQ/dV and dV/dQ computation
    #[arg(long)]
    no_derivatives: bool,

    /// Field delimiter (defaults to ',' for .csv and tab otherwise)
    #[arg(long, value_name = "CHAR")]
    delimiter: Option<char>,
}

/// Multi-file selection flags of `analyze`.
#[derive(Args, Debug, Clone)]
pub struct StitchArgs {
    /// Use only the first input instead of stitching all of them
    #[arg(long)]
    no_stitch: bool,

    /// Stitching order of the inputs
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Only stitch inputs whose file name contains this text (e.g. _GCPL_)
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,
}

impl StitchArgs {
    /// Override the stitching settings taken from the config file
    pub(crate) fn apply(self, settings: &mut Settings) {
        if self.no_stitch {
            settings.analysis.stitch_multiple_files = false;
        }
        if let Some(order) = self.order {
            settings.order = order.into();
        }
        if self.filter.is_some() {
            settings.filter = self.filter;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one cycling test made of one or more exports
    Analyze {
        /// Input export files (EC-Lab text or CSV)
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to a directory named after the first input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        stitch: StitchArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Analyze every export in a directory, one output directory per file
    Batch {
        /// Directory holding the exports
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// File extension to pick up
        #[arg(short, long, default_value = "txt")]
        extension: String,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Display a summary of an export
    Info {
        /// Input export file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (defaults to ',' for .csv and tab otherwise)
        #[arg(long, value_name = "CHAR")]
        delimiter: Option<char>,
    },
}

/// Settings resolved from defaults, the config file and flags, in that order.
pub(crate) struct Settings {
    pub analysis: AnalysisConfig,
    pub reader: ReaderConfig,
    pub order: StitchOrder,
    pub filter: Option<String>,
}

impl AnalysisArgs {
    pub(crate) fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        let mut analysis = file.analysis.apply(AnalysisConfig::default());
        if self.keep_ocv {
            analysis.ocv_removal = false;
        }
        if let Some(tolerance) = self.tolerance {
            analysis.dqdv_tolerance = tolerance;
        }
        if let Some(smoothing) = self.smoothing {
            analysis.smoothing = smoothing.into();
        }
        if self.no_derivatives {
            analysis.compute_derivatives = false;
        }

        let reader = ReaderConfig {
            delimiter: delimiter_byte(self.delimiter.or(file.input.delimiter))?,
            ..Default::default()
        };

        Ok(Settings {
            analysis,
            reader,
            order: file.input.order.unwrap_or_default(),
            filter: file.input.filter,
        })
    }
}

fn delimiter_byte(delimiter: Option<char>) -> Result<Option<u8>> {
    match delimiter {
        Some(c) if c.is_ascii() => Ok(Some(c as u8)),
        Some(c) => bail!("Delimiter must be a single ASCII character, got {:?}", c),
        None => Ok(None),
    }
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            inputs,
            output,
            stitch,
            analysis,
        } => {
            let mut settings = analysis.resolve()?;
            stitch.apply(&mut settings);
            analyze::run(inputs, output, settings)
        }
        Commands::Batch {
            dir,
            extension,
            analysis,
        } => batch::run(dir, extension, analysis.resolve()?),
        Commands::Info { file, delimiter } => info::run(file, delimiter_byte(delimiter)?),
    }
}
