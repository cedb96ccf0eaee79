use log::{debug, info, warn};

use crate::table::SampleTable;

use super::report::{CycleCurve, CycleReport};
use super::{
    coulombic_efficiency, segment, AnalysisConfig, AnalysisError, CapacitySeries, CurvePoint, CycleId, CycleKind,
};

/// Run the full analysis over a loaded table.
///
/// Steps, in order: the whole-test voltage/capacity curve, optional OCV removal, segmentation into half-cycles,
/// classification, capacity aggregation, Coulombic efficiency, then per-cycle
/// curves and (optionally) derivatives. A half-cycle whose derivative cannot
/// be computed keeps the error in its [`CycleCurve`]; only an empty table is
/// fatal.
pub fn analyze(mut table: SampleTable, config: &AnalysisConfig) -> Result<CycleReport, AnalysisError> {
    config.validate()?;

    // Whole-test curve keeps the rest periods
    let full_curve: Vec<CurvePoint> = table
        .iter()
        .map(|s| CurvePoint::new(-s.cumulative_capacity, s.voltage))
        .collect();

    let removed_ocv_rows = if config.ocv_removal {
        table.remove_open_circuit()
    } else {
        0
    };
    if removed_ocv_rows > 0 {
        info!("Removed {} open-circuit rows", removed_ocv_rows);
    }

    if table.is_empty() {
        return Err(AnalysisError::NoSamples { removed_ocv_rows });
    }

    let half_cycles = segment(table.samples());
    debug!("Segmented {} rows into {} half-cycles", table.len(), half_cycles.len());

    let capacities = CapacitySeries::from_half_cycles(&half_cycles);
    info!(
        "Found {} discharge and {} charge half-cycles",
        capacities.discharge.len(),
        capacities.charge.len()
    );

    let efficiency = coulombic_efficiency(&capacities.charge, &capacities.discharge);
    if efficiency.is_truncated() {
        warn!(
            "Coulombic efficiency truncated to {} pairs ({} unmatched charge, {} unmatched discharge)",
            efficiency.len(),
            efficiency.unmatched_charge,
            efficiency.unmatched_discharge
        );
    }
    if !efficiency.zero_discharge.is_empty() {
        warn!(
            "Zero discharge capacity at pair(s) {:?}; efficiency reported as NaN",
            efficiency.zero_discharge
        );
    }

    let mut discharge_count = 0;
    let mut charge_count = 0;
    let curves: Vec<CycleCurve> = half_cycles
        .iter()
        .map(|half_cycle| {
            let counter = match half_cycle.kind() {
                CycleKind::Discharging => &mut discharge_count,
                CycleKind::Charging => &mut charge_count,
            };
            *counter += 1;
            CycleCurve::from_half_cycle(CycleId::new(half_cycle.kind(), *counter), half_cycle, config)
        })
        .collect();

    let report = CycleReport {
        removed_ocv_rows,
        analyzed_rows: table.len(),
        full_curve,
        capacities,
        efficiency,
        curves,
    };

    let skipped = report.skipped_derivatives();
    if !skipped.is_empty() {
        warn!("{} derivative curve(s) skipped for insufficient data", skipped.len());
        for entry in &skipped {
            debug!("  {} {}: {}", entry.cycle, entry.derivative, entry.reason);
        }
    }

    Ok(report)
}
