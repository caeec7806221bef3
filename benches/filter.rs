use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use quickpat::prelude::*;

const WORDS: [&str; 12] = [
    "Null", "Pointer", "Exception", "Config", "Dialog", "Test", "Search", "Pattern", "Item", "Filter", "Job", "View",
];

fn candidates(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let a = WORDS[i % WORDS.len()];
            let b = WORDS[(i / WORDS.len()) % WORDS.len()];
            let c = WORDS[(i / 7) % WORDS.len()];
            format!("{a}{b}{c}{i}.java")
        })
        .collect()
}

fn compile(raw: &str) -> Arc<CompiledPattern> {
    Arc::new(CompiledPattern::new(raw, &SearchOptions::default()))
}

fn criterion_benchmark(c: &mut Criterion) {
    let items = candidates(100_000);

    for raw in ["nu", "NPE", "*Dialog*", "ConfigDialog3.java<"] {
        c.bench_function(&format!("full_scan {raw}"), |b| {
            let pattern = compile(raw);
            b.iter(|| IncrementalFilter::new().filter(pattern.clone(), &items).len());
        });
    }

    c.bench_function("typing NuPoEx", |b| {
        let steps: Vec<_> = ["N", "Nu", "NuP", "NuPo", "NuPoE", "NuPoEx"].into_iter().map(compile).collect();
        b.iter(|| {
            let mut filter = IncrementalFilter::new();
            steps.iter().map(|p| filter.filter(p.clone(), &items).len()).sum::<usize>()
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
