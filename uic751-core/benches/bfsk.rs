use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uic751_core::config::BfskParams;
use uic751_core::BfskDetector;

fn tone(freq_hz: f64, sample_rate: f64, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (std::f64::consts::TAU * freq_hz * i as f64 / sample_rate).sin() as f32)
        .collect()
}

fn benchmark_analyze_mark_tone(c: &mut Criterion) {
    let sample_rate = 16_000.0;
    let params = BfskParams::default();
    let samples = tone(params.mark_hz, sample_rate, 16_000);

    c.bench_function("bfsk_analyze_1s_mark_tone", |b| {
        b.iter(|| {
            let mut detector = BfskDetector::new(&params, sample_rate).unwrap();
            let mut remaining: &[f32] = &samples;
            let mut bits = 0u32;
            loop {
                let (result, consumed) = detector.analyze(black_box(remaining));
                remaining = &remaining[consumed..];
                if result == uic751_core::BfskResult::End {
                    break;
                }
                bits += 1;
            }
            black_box(bits)
        })
    });
}

criterion_group!(benches, benchmark_analyze_mark_tone);
criterion_main!(benches);
