use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rebecca::analysis::derivative::{dq_dv, dv_dq};
use rebecca::analysis::{analyze, AnalysisConfig, CurvePoint};
use rebecca::table::{Sample, SampleTable};

/// Build a table of `cycles` discharge/charge pairs with a rest row between half-cycles
fn create_cycling_table(cycles: usize, rows_per_half_cycle: usize) -> SampleTable {
    let mut samples = Vec::with_capacity(cycles * 2 * (rows_per_half_cycle + 1));
    let mut t = 0.0;
    for c in 0..cycles {
        for (offset, sign) in [(1, -1.0), (2, 1.0)] {
            let half_cycle = (2 * c + offset) as i64;
            samples.push(Sample::new(t, 3.4, half_cycle));
            let mut capacity = 0.0;
            for i in 0..rows_per_half_cycle {
                t += 1.0;
                capacity += sign * 0.01;
                let progress = i as f64 / rows_per_half_cycle as f64;
                let voltage = if sign < 0.0 { 4.2 - 1.4 * progress } else { 2.8 + 1.4 * progress };
                samples.push(Sample::new(t, voltage, half_cycle).with_charge(sign * 0.01, capacity));
            }
        }
    }
    SampleTable::from_samples(samples).unwrap()
}

/// Benchmark the full pipeline
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for cycles in [10, 100, 500] {
        let rows_per_half_cycle = 200;
        let table = create_cycling_table(cycles, rows_per_half_cycle);
        group.throughput(Throughput::Elements(table.len() as u64));

        let config = AnalysisConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}cycles", cycles)), &table, |b, table| {
            b.iter(|| analyze(black_box(table.clone()), &config).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the derivative kernels on a single long curve
fn bench_derivatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivatives");

    for points in [1_000, 10_000, 100_000] {
        let curve: Vec<CurvePoint> = (0..points)
            .map(|i| {
                let x = i as f64 / points as f64;
                CurvePoint::new(x * 150.0, 2.8 + 1.4 * x.sqrt())
            })
            .collect();
        group.throughput(Throughput::Elements(points as u64));

        group.bench_with_input(BenchmarkId::new("dq_dv", points), &curve, |b, curve| {
            b.iter(|| dq_dv(black_box(curve), 0.001))
        });
        group.bench_with_input(BenchmarkId::new("dv_dq", points), &curve, |b, curve| {
            b.iter(|| dv_dq(black_box(curve), 0.001))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_derivatives);
criterion_main!(benches);
