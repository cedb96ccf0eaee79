//! Integration tests for rebecca
//!
//! These tests drive the full pipeline from export files on disk to the
//! per-cycle output directory.

use rebecca::analysis::{analyze, AnalysisConfig, CycleKind, Smoothing};
use rebecca::reader::{read_stitched, read_table, InputSelection, ReaderConfig, StitchOrder};
use rebecca::sink::{write_report, CsvDirectorySink, MemorySink, RunSummary, CYCLES_DIR, MAIN_OUT_DIR};
use rebecca::table::SampleTable;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const HEADER: &str = "time/s\tEwe/V\tcontrol/V/mA\tNs\tdQ/mA.h\t(Q-Qo)/mA.h\tQ charge/discharge/mA.h\thalf cycle";

/// Build a tab-separated export with `cycles` discharge/charge pairs.
///
/// Each half-cycle has 10 rows. Discharges pass 1.0 mA·h and charges 0.98 mA·h,
/// so every efficiency is 98 %. An open-circuit rest row precedes the cycling.
fn synthetic_export(first_half_cycle: i64, cycles: i64, t0: f64) -> String {
    let mut lines = vec![HEADER.to_string()];
    let mut t = t0;
    let mut q = 0.0;
    lines.push(format!("{t}\t3.70\t0.0\t0\t0.0\t{q}\t0.0\t{}", first_half_cycle));

    for c in 0..cycles {
        let discharge = first_half_cycle + 2 * c + 1;
        let mut capacity = 0.0;
        for i in 0..10 {
            t += 10.0;
            q -= 0.1;
            capacity -= 0.1;
            let v = 3.6 - 0.08 * i as f64;
            lines.push(format!("{t}\t{v}\t-1.0\t1\t-0.1\t{q}\t{capacity}\t{discharge}"));
        }
        let mut capacity = 0.0;
        for i in 0..10 {
            t += 10.0;
            q += 0.098;
            capacity += 0.098;
            let v = 2.9 + 0.08 * i as f64;
            lines.push(format!("{t}\t{v}\t1.0\t2\t0.098\t{q}\t{capacity}\t{}", discharge + 1));
        }
    }
    lines.join("\n") + "\n"
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_column(path: &Path) -> Vec<f64> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.trim().parse().unwrap())
        .collect()
}

/// Test the complete read-analyze-write cycle
#[test]
fn test_export_to_output_directory() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "cell_01_GCPL_C01.txt", &synthetic_export(0, 2, 0.0));
    let output = dir.path().join("cell_01");

    let table = read_table(&input, &ReaderConfig::default()).unwrap();
    assert_eq!(table.len(), 41);

    let config = AnalysisConfig::default();
    let report = analyze(table, &config).unwrap();
    assert_eq!(report.removed_ocv_rows, 1);
    assert_eq!(report.half_cycle_count(), 4);

    let mut sink = CsvDirectorySink::create(&output).unwrap();
    write_report(&report, &mut sink).unwrap();
    let summary = RunSummary::new(&[input.display().to_string()], &config, &report);
    sink.write_summary(&summary).unwrap();

    let main_out = output.join(MAIN_OUT_DIR);
    let discharge = read_column(&main_out.join("discharge_capacities.txt"));
    let charge = read_column(&main_out.join("charge_capacities.txt"));
    let efficiency = read_column(&main_out.join("coulombic_efficiencies.txt"));

    assert_eq!(discharge.len(), 2);
    assert_eq!(charge.len(), 2);
    assert!(discharge.iter().all(|c| (c - 1.0).abs() < 1e-9));
    assert!(charge.iter().all(|c| (c - 0.98).abs() < 1e-9));
    assert!(efficiency.iter().all(|e| (e - 98.0).abs() < 1e-6));

    let cycles = output.join(CYCLES_DIR);
    for name in ["discharge_1", "discharge_2", "charge_1", "charge_2"] {
        assert!(cycles.join(format!("{name}.csv")).is_file(), "{name}.csv");
        assert!(cycles.join(format!("{name}_dQdV.csv")).is_file(), "{name}_dQdV.csv");
        assert!(cycles.join(format!("{name}_dVdQ.csv")).is_file(), "{name}_dVdQ.csv");
    }

    // Curve files carry capacity,voltage with positive discharge capacity
    let curve = fs::read_to_string(cycles.join("discharge_1.csv")).unwrap();
    let rows: Vec<&str> = curve.lines().collect();
    assert_eq!(rows.len(), 10);
    let last: Vec<f64> = rows[9].split(',').map(|v| v.parse().unwrap()).collect();
    assert!((last[0] - 1.0).abs() < 1e-9);
    assert!((last[1] - 2.88).abs() < 1e-9);

    let json = fs::read_to_string(main_out.join("summary.json")).unwrap();
    let loaded = RunSummary::from_json(&json).unwrap();
    assert_eq!(loaded.half_cycles, 4);
    assert_eq!(loaded.efficiency_pairs, 2);
    assert!(loaded.skipped_derivatives.is_empty());
}

/// Stitching files equals analyzing the pre-concatenated rows
#[test]
fn test_stitched_files_match_concatenated_export() {
    let dir = tempdir().unwrap();
    let first = synthetic_export(0, 2, 0.0);
    let second = synthetic_export(4, 1, 1000.0);

    let a = write_file(dir.path(), "cell_GCPL_C01.txt", &first);
    let b = write_file(dir.path(), "cell_GCPL_C02.txt", &second);
    let combined_text = first + second.split_once('\n').unwrap().1;
    let combined = write_file(dir.path(), "combined.txt", &combined_text);

    let config = AnalysisConfig {
        smoothing: Smoothing::None,
        ..Default::default()
    };
    let reader = ReaderConfig::default();

    let stitched = analyze(read_stitched(&[&a, &b], &reader).unwrap(), &config).unwrap();
    let whole = analyze(read_table(&combined, &reader).unwrap(), &config).unwrap();

    assert_eq!(stitched, whole);
    assert_eq!(stitched.capacities.discharge.len(), 3);
    assert_eq!(stitched.efficiency.len(), 3);
}

/// File-name ordering and filtering decide which files are stitched
#[test]
fn test_input_selection_with_filter_and_order() {
    let dir = tempdir().unwrap();
    let c02 = write_file(dir.path(), "cell_02_GCPL_C01.txt", &synthetic_export(4, 1, 1000.0));
    let ocv = write_file(dir.path(), "cell_00_OCV_C01.txt", &synthetic_export(0, 1, 0.0));
    let c01 = write_file(dir.path(), "cell_01_GCPL_C01.txt", &synthetic_export(0, 2, 0.0));

    let selection = InputSelection {
        order: StitchOrder::FileName,
        name_filter: Some("_GCPL_".to_string()),
        stitch: true,
    };
    let selected = selection.select(&[c02.clone(), ocv, c01.clone()]);
    assert_eq!(selected, vec![c01.clone(), c02]);

    let table = read_stitched(&selected, &ReaderConfig::default()).unwrap();
    let report = analyze(table, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.curves_of(CycleKind::Discharging).count(), 3);

    let single = InputSelection {
        stitch: false,
        ..selection
    };
    assert_eq!(single.select(&selected), vec![c01]);
}

/// A CSV export with too few points for derivatives still produces capacities
#[test]
fn test_short_half_cycles_skip_derivatives() {
    let dir = tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "short.csv",
        "time/s,Ewe/V,dQ/mA.h,Q charge/discharge/mA.h,half cycle\n\
         0,3.7,-0.5,-0.5,1\n\
         1,3.6,0.4,0.4,2\n\
         2,3.7,0.4,0.8,2\n",
    );

    let table = read_table(&input, &ReaderConfig::default()).unwrap();
    let report = analyze(table, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.capacities.discharge, vec![0.5]);
    assert_eq!(report.capacities.charge, vec![0.8]);
    assert!((report.efficiency.values[0] - 160.0).abs() < 1e-9);

    let skipped = report.skipped_derivatives();
    // discharge_1 has a single point for both derivatives
    assert!(skipped.iter().any(|s| s.cycle == "discharge_1" && s.derivative == "dQdV"));
    assert!(skipped.iter().any(|s| s.cycle == "discharge_1" && s.derivative == "dVdQ"));

    let mut sink = MemorySink::new();
    write_report(&report, &mut sink).unwrap();
    assert_eq!(sink.curves.len(), 2);
    assert!(sink.derivatives.iter().all(|(id, _, _)| id.kind == CycleKind::Charging));
}

/// Tables with only rest rows fail after open-circuit removal
#[test]
fn test_rest_only_export_is_rejected() {
    let content = "time/s,Ewe/V,dQ/mA.h,Q charge/discharge/mA.h,half cycle\n0,3.7,0,0,0\n1,3.7,0,0,0\n";
    let table = rebecca::reader::from_str(content, b',', &ReaderConfig::default()).unwrap();
    assert!(analyze(table.clone(), &AnalysisConfig::default()).is_err());

    let keep = AnalysisConfig {
        ocv_removal: false,
        ..Default::default()
    };
    let report = analyze(table, &keep).unwrap();
    assert_eq!(report.capacities.charge, vec![0.0]);
}

#[test]
fn test_empty_stitch_is_empty_table() {
    let table = SampleTable::stitch(Vec::new());
    assert!(table.is_empty());
    assert!(read_stitched::<&Path>(&[], &ReaderConfig::default()).is_err());
}
