use anyhow::{bail, Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use rebecca::analysis::{analyze, AnalysisConfig};
use rebecca::reader::{read_stitched, InputSelection, ReaderConfig};
use rebecca::sink::{write_report, CsvDirectorySink, RunSummary};

use super::Settings;

/// Analyze one cycling test
pub fn run(inputs: Vec<PathBuf>, output: Option<PathBuf>, settings: Settings) -> Result<()> {
    for input in &inputs {
        if !input.exists() {
            bail!("Input file does not exist: {}", input.display());
        }
    }

    let selection = InputSelection {
        order: settings.order,
        name_filter: settings.filter,
        stitch: settings.analysis.stitch_multiple_files,
    };
    let selected = selection.select(&inputs);

    let output = match output {
        Some(dir) => dir,
        None => match selected.first() {
            Some(first) => default_output_dir(first),
            None => bail!("No input files given"),
        },
    };

    let summary = process(&selected, &output, &settings.analysis, &settings.reader)?;

    println!(
        "{} half-cycles ({} discharge, {} charge) written to {}",
        summary.half_cycles,
        summary.discharge_cycles,
        summary.charge_cycles,
        output.display()
    );
    if !summary.skipped_derivatives.is_empty() {
        println!(
            "{} derivative curve(s) skipped; see main_out/summary.json",
            summary.skipped_derivatives.len()
        );
    }

    Ok(())
}

/// Directory named after the input's stem, next to it.
///
/// Inputs without an extension get an `_out` suffix so the directory never
/// collides with the input file itself.
pub(crate) fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.with_extension("");
    if stem != input {
        return stem;
    }
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_out", name))
}

/// Load, analyze and write one run; `inputs` are already selected and ordered.
pub(crate) fn process(
    inputs: &[PathBuf],
    output: &Path,
    config: &AnalysisConfig,
    reader: &ReaderConfig,
) -> Result<RunSummary> {
    info!("Input:  {}", inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "));
    info!("Output: {}", output.display());
    info!("OCV removal: {}", config.ocv_removal);
    info!("dQ/dV tolerance: {} V", config.dqdv_tolerance);
    info!("Smoothing: {:?}", config.smoothing);

    let table = read_stitched(inputs, reader).context("Failed to read input files")?;
    let report = analyze(table, config).context("Analysis failed")?;

    let mut sink = CsvDirectorySink::create(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    write_report(&report, &mut sink).context("Failed to write cycle files")?;

    let names: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
    let summary = RunSummary::new(&names, config, &report);
    let summary_path = sink.write_summary(&summary).context("Failed to write run summary")?;

    info!("Analysis complete!");
    info!("  Rows analyzed: {}", summary.analyzed_rows);
    info!("  OCV rows removed: {}", summary.removed_ocv_rows);
    info!("  Efficiency pairs: {}", summary.efficiency_pairs);
    info!("  Files written: {}", sink.files_written());
    info!("  Summary: {}", summary_path.display());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("runs/cell_01_GCPL_C01.txt")),
            PathBuf::from("runs/cell_01_GCPL_C01")
        );
        assert_eq!(default_output_dir(Path::new("runs/cell_01")), PathBuf::from("runs/cell_01_out"));
        assert_ne!(default_output_dir(Path::new("export")), PathBuf::from("export"));
    }
}
