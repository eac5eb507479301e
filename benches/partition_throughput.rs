/// Partition and rewrite throughput over synthetic compilation databases
///
/// Sizes mirror real CMake projects: a few hundred to a few thousand
/// translation units against a handful of excluded directories.
use compdb_filter::compdb::{CompilationDatabase, CompileEntry};
use compdb_filter::excludes::ExclusionFragment;
use compdb_filter::partition::partition_entries;
use compdb_filter::rewrite::HeaderRewriter;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::Path;

const ANCHOR: &str = "/work/project";
const DIRS: [&str; 6] = [
    "src/core",
    "src/net",
    "third_party/fmt/src",
    "third_party/zlib",
    "vendor/json",
    "tests/unit",
];

fn synthetic_database(size: usize) -> Vec<CompileEntry> {
    let entries: Vec<serde_json::Value> = (0..size)
        .map(|i| {
            let dir = format!("{ANCHOR}/{}", DIRS[i % DIRS.len()]);
            serde_json::json!({
                "directory": format!("{ANCHOR}/_build"),
                "command": format!(
                    "/usr/bin/c++ -I{ANCHOR}/include -I{ANCHOR}/third_party/fmt -I{ANCHOR}/vendor/json -O2 -o f{i}.o -c {dir}/f{i}.cpp"
                ),
                "file": format!("{dir}/f{i}.cpp"),
            })
        })
        .collect();
    let text = serde_json::to_string(&entries).unwrap();
    CompilationDatabase::from_json(&text, Path::new("bench.json"))
        .unwrap()
        .entries
}

fn excludes() -> Vec<ExclusionFragment> {
    vec![
        ExclusionFragment::from_segments(&["third_party", "fmt"]),
        ExclusionFragment::from_segments(&["third_party", "zlib"]),
        ExclusionFragment::from_segments(&["vendor", "json"]),
    ]
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    let excludes = excludes();

    for size in [100, 1_000, 10_000] {
        let entries = synthetic_database(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let partition =
                    partition_entries(entries.clone(), black_box(&excludes), Path::new(ANCHOR));
                black_box(partition.total())
            });
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_rewrite");
    let rewriter = HeaderRewriter::new(&excludes(), Path::new(ANCHOR));

    for size in [100, 1_000, 10_000] {
        let entries = synthetic_database(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let mut entries = entries.clone();
                black_box(rewriter.rewrite_all(&mut entries))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_partition, bench_rewrite);
criterion_main!(benches);
