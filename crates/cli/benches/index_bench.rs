use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use index::{find_bracket, IndexEntry, IndexEntryReader, IndexSnapshot, IndexWriter};
use std::io::Cursor;
use tempfile::tempdir;

const N_ENTRIES: u32 = 100_000;
/// Roughly one checkpoint per 4 KiB of segment, as brokers write them.
const INTERVAL_BYTES: u32 = 4096;

fn build_entries() -> Vec<IndexEntry> {
    (0..N_ENTRIES)
        .map(|i| IndexEntry::new(i * 10, i * INTERVAL_BYTES))
        .collect()
}

fn linear_scan_benchmark(c: &mut Criterion) {
    let bytes = IndexWriter::to_bytes(&build_entries());
    let wanted = (N_ENTRIES - 2) * 10 + 5;

    c.bench_function("index_linear_scan_100k_tail", |b| {
        b.iter(|| {
            let reader = IndexEntryReader::from_reader(Cursor::new(&bytes));
            let bracket = find_bracket(reader, wanted, None).unwrap();
            assert!(bracket.contains(wanted));
        });
    });
}

fn snapshot_search_benchmark(c: &mut Criterion) {
    let snapshot = IndexSnapshot::from_entries(build_entries());

    c.bench_function("index_snapshot_search_100k", |b| {
        b.iter(|| {
            for i in (0..N_ENTRIES - 1).step_by(997) {
                let wanted = i * 10 + 5;
                assert!(snapshot.bracket(wanted).unwrap().contains(wanted));
            }
        });
    });
}

fn snapshot_load_benchmark(c: &mut Criterion) {
    c.bench_function("index_snapshot_load_100k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let path = dir.path().join("00000000000000000000.index");
                IndexWriter::write(&path, &build_entries(), 0).unwrap();
                (dir, path)
            },
            |(_dir, path)| {
                let snapshot = IndexSnapshot::load(&path).unwrap();
                assert_eq!(snapshot.len(), N_ENTRIES as usize);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    linear_scan_benchmark,
    snapshot_search_benchmark,
    snapshot_load_benchmark
);
criterion_main!(benches);
