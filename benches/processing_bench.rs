//! Benchmarks for driving merged issues through the standard processor chain.
//!
//! Every iteration builds a fresh runner, since processors keep state for
//! the whole run.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lintmux::config::Config;
use lintmux::core::{Issue, Position};
use lintmux::io::LineCache;
use lintmux::runner::{ProcessingReport, Runner};
use std::hint::black_box;
use std::sync::Arc;
use tempfile::TempDir;

const FILES: usize = 20;
const LINES_PER_FILE: usize = 200;

/// Create a source tree and one issue per `stride` lines of every file.
fn create_workload(stride: usize) -> (TempDir, Vec<Issue>) {
    let temp_dir = TempDir::new().unwrap();
    let mut issues = Vec::new();

    for f in 0..FILES {
        let rel = format!("src/module_{f}.rs");
        let path = temp_dir.path().join(&rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let content: String = (1..=LINES_PER_FILE)
            .map(|l| {
                if l % 17 == 0 {
                    format!("    let v{l} = {l}; // nolint:style\n")
                } else {
                    format!("    let v{l} = {l};\n")
                }
            })
            .collect();
        std::fs::write(&path, content).unwrap();

        for line in (1..=LINES_PER_FILE).step_by(stride) {
            let engine = if line % 2 == 0 { "style" } else { "unused" };
            issues.push(
                Issue::new(format!("v{line} is unused"), Position::new(&rel, line))
                    .from_engine(engine),
            );
        }
    }

    (temp_dir, issues)
}

fn benchmark_standard_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("standard_chain");
    let engines = vec!["style".to_string(), "unused".to_string()];

    for stride in [20, 5, 1] {
        let (temp_dir, issues) = create_workload(stride);
        let mut config = Config::default();
        config.issues.max_issues_per_engine = 0;
        config.issues.max_same_issues = 0;

        group.throughput(Throughput::Elements(issues.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(issues.len()),
            &issues,
            |b, issues| {
                b.iter(|| {
                    let cache = Arc::new(LineCache::new(temp_dir.path()));
                    let mut runner = Runner::new(&config, cache, &engines).unwrap();
                    let mut report = ProcessingReport::default();
                    black_box(runner.process_results(issues.clone(), &mut report))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_standard_chain);
criterion_main!(benches);
