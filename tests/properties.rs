//! Property tests for segmentation, efficiency, derivatives and stitching

use proptest::prelude::*;
use rebecca::analysis::derivative::{dedup_within, dq_dv, rolling_mean3};
use rebecca::analysis::{analyze, coulombic_efficiency, segment, AnalysisConfig, CapacitySeries, CurvePoint, Smoothing};
use rebecca::table::{Sample, SampleTable};

/// Rows with a small set of half-cycle indices so runs of equal index occur
fn sample_rows(max_len: usize) -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec((0i64..4, -1.0f64..1.0, 2.5f64..4.2), 0..max_len).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (half_cycle, dq, voltage))| {
                Sample::new(i as f64, voltage, half_cycle).with_charge(dq, dq * (i as f64 + 1.0))
            })
            .collect()
    })
}

proptest! {
    /// Concatenating the half-cycles reproduces the input rows
    #[test]
    fn test_segmentation_is_lossless(samples in sample_rows(200)) {
        let half_cycles = segment(&samples);

        let rejoined: Vec<Sample> = half_cycles.iter().flat_map(|h| h.samples().iter().copied()).collect();
        prop_assert_eq!(rejoined, samples.clone());

        for pair in half_cycles.windows(2) {
            prop_assert_ne!(pair[0].index(), pair[1].index());
        }
        for (i, h) in half_cycles.iter().enumerate() {
            prop_assert_eq!(h.ordinal(), i);
            prop_assert!(!h.is_empty());
        }
    }

    /// Capacity series split every half-cycle into exactly one kind
    #[test]
    fn test_capacity_counts_sum_to_half_cycles(samples in sample_rows(200)) {
        let half_cycles = segment(&samples);
        let capacities = CapacitySeries::from_half_cycles(&half_cycles);

        prop_assert_eq!(capacities.discharge.len() + capacities.charge.len(), half_cycles.len());
        prop_assert!(capacities.discharge.iter().chain(&capacities.charge).all(|c| c.is_finite()));
    }

    /// Efficiency covers exactly the positional pairs
    #[test]
    fn test_efficiency_pairs(
        charge in prop::collection::vec(0.0f64..10.0, 0..20),
        discharge in prop::collection::vec(0.01f64..10.0, 0..20),
    ) {
        let series = coulombic_efficiency(&charge, &discharge);
        let pairs = charge.len().min(discharge.len());

        prop_assert_eq!(series.len(), pairs);
        prop_assert_eq!(series.unmatched_charge + pairs, charge.len());
        prop_assert_eq!(series.unmatched_discharge + pairs, discharge.len());
        prop_assert!(series.zero_discharge.is_empty());
        for i in 0..pairs {
            let expected = 100.0 * charge[i] / discharge[i];
            prop_assert!((series.values[i] - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }

    /// Retained points are pairwise further apart than the tolerance
    #[test]
    fn test_dedup_spacing(
        voltages in prop::collection::vec(2.5f64..4.2, 1..100),
        tolerance in 0.0f64..0.05,
    ) {
        let points: Vec<CurvePoint> = voltages
            .iter()
            .enumerate()
            .map(|(i, v)| CurvePoint::new(i as f64 * 0.01, *v))
            .collect();
        let retained = dedup_within(&points, tolerance, |p| p.voltage).unwrap();

        prop_assert_eq!(retained[0], points[0]);
        for pair in retained.windows(2) {
            prop_assert!((pair[1].voltage - pair[0].voltage).abs() > tolerance);
        }
    }

    /// dQ/dV yields one value per retained point
    #[test]
    fn test_dq_dv_length(voltages in prop::collection::vec(2.5f64..4.2, 2..100)) {
        let points: Vec<CurvePoint> = voltages
            .iter()
            .enumerate()
            .map(|(i, v)| CurvePoint::new(i as f64 * 0.01, *v))
            .collect();
        let retained = dedup_within(&points, 0.001, |p| p.voltage).unwrap();

        match dq_dv(&points, 0.001) {
            Ok(values) => {
                prop_assert_eq!(values.len(), retained.len());
                prop_assert!(values.iter().all(|p| p.value.is_finite()));
            }
            Err(_) => prop_assert!(retained.len() < 2),
        }
    }

    /// Rolling mean keeps the length and leaves two leading NaNs
    #[test]
    fn test_rolling_mean_shape(values in prop::collection::vec(-100.0f64..100.0, 0..50)) {
        let smoothed = rolling_mean3(&values);

        prop_assert_eq!(smoothed.len(), values.len());
        for (i, v) in smoothed.iter().enumerate() {
            if i < 2 {
                prop_assert!(v.is_nan());
            } else {
                let expected = (values[i - 2] + values[i - 1] + values[i]) / 3.0;
                prop_assert!((v - expected).abs() < 1e-9);
            }
        }
    }

    /// Stitching tables then analyzing equals analyzing the concatenated rows
    #[test]
    fn test_stitch_then_analyze(a in sample_rows(60), b in sample_rows(60)) {
        let config = AnalysisConfig {
            smoothing: Smoothing::None,
            compute_derivatives: false,
            ..Default::default()
        };
        let mut joined = a.clone();
        joined.extend(b.iter().copied());

        let stitched = SampleTable::stitch(vec![
            SampleTable::from_samples(a).unwrap(),
            SampleTable::from_samples(b).unwrap(),
        ]);
        let whole = SampleTable::from_samples(joined).unwrap();
        prop_assert_eq!(&stitched, &whole);

        match (analyze(stitched, &config), analyze(whole, &config)) {
            (Ok(left), Ok(right)) => {
                prop_assert_eq!(&left.capacities, &right.capacities);
                prop_assert_eq!(left.half_cycle_count(), right.half_cycle_count());
            }
            (Err(left), Err(right)) => prop_assert_eq!(left, right),
            _ => prop_assert!(false, "stitched and concatenated runs disagree"),
        }
    }
}
