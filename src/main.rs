//! # REBECCA
//!
//! Command-line front end for battery cycling analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze one test, stitching every GCPL export in name order
//! rebecca analyze cell_01_*.txt --order file-name --filter _GCPL_ -o cell_01
//!
//! # Analyze every export in a folder, one output directory per file
//! rebecca batch runs/ --extension txt
//!
//! # Inspect an export
//! rebecca info cell_01_GCPL_C01.txt
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
