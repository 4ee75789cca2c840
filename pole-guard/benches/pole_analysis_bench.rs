use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pole_guard::attachments::parse_cell;
use pole_guard::config::AnalyzerConfig;
use pole_guard::core::{BatchRunner, PoleAnalyzer};
use pole_guard::sources::{write_analyzed_table, CsvOptions, PoleTable};
use pole_guard::test_fixtures::{crowded_joint_pole, survey_table, SURVEY_HEADER};

fn benchmark_parse_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_cell");

    for cell in ["22 2", "CATV 18 6", "PRI 34 0/STLT DL 27 0/TRANS BTM 28 0"] {
        group.bench_with_input(BenchmarkId::from_parameter(cell), &cell, |b, cell| {
            b.iter(|| parse_cell(std::hint::black_box(cell)));
        });
    }

    group.finish();
}

fn benchmark_analyze_pole(c: &mut Criterion) {
    let analyzer = PoleAnalyzer::default();
    let pole = crowded_joint_pole();

    c.bench_function("analyze_crowded_pole", |b| {
        b.iter(|| analyzer.analyze(std::hint::black_box(&pole)));
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_run");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for rows in [100, 1_000, 10_000] {
        let table = survey_table(rows);
        let runner = BatchRunner::new(AnalyzerConfig::default());
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("sequential", rows), &table, |b, table| {
            b.iter(|| runner.run(table));
        });

        group.bench_with_input(BenchmarkId::new("parallel", rows), &table, |b, table| {
            b.iter(|| runtime.block_on(runner.run_parallel(table)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_table_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_io");
    let table = survey_table(1_000);
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&table);

    let mut data = Vec::new();
    write_analyzed_table(&mut data, &table, &report.results, &CsvOptions::default()).unwrap();
    let input = format!(
        "{SURVEY_HEADER}\n{}",
        (0..1_000)
            .map(pole_guard::test_fixtures::survey_row)
            .collect::<Vec<_>>()
            .join("\n")
    );

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("read_1000", |b| {
        b.iter(|| PoleTable::from_reader(input.as_bytes(), &CsvOptions::default()).unwrap());
    });
    group.bench_function("write_1000", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(data.len());
            write_analyzed_table(&mut out, &table, &report.results, &CsvOptions::default()).unwrap();
            out
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_cell,
    benchmark_analyze_pole,
    benchmark_batch,
    benchmark_table_io
);
criterion_main!(benches);
