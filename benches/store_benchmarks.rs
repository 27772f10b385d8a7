//! Benchmarks for store enumeration, search and import.
//!
//! Run with: cargo bench --bench store_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use chrono::FixedOffset;
use daybook::domain::{Calendar, DayKey, RichDocument, Style};
use daybook::search::search;
use daybook::store::NoteStore;
use daybook::transfer::{export_notes, import_bytes};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Sample words for generating realistic note content
const WORDS: &[&str] = &[
    "groceries",
    "meeting",
    "call",
    "dentist",
    "review",
    "garden",
    "invoice",
    "birthday",
    "running",
    "travel",
    "budget",
    "recipe",
];

fn calendar() -> Calendar {
    Calendar::Fixed(FixedOffset::east_opt(0).expect("zero offset"))
}

/// A few sentences of mixed plain and bold text for day `index`
fn generate_document(index: usize) -> RichDocument {
    let mut doc = RichDocument::new();
    for j in 0..40 {
        let word = WORDS[(index + j) % WORDS.len()];
        let style = if j % 7 == 0 { Style::bold() } else { Style::PLAIN };
        doc.push_text(word, style);
        doc.push_text(" ", Style::PLAIN);
    }
    doc
}

/// An in-memory store with one note per day starting 2020-01-01
fn setup_store(count: usize) -> NoteStore {
    let mut store = NoteStore::open_in_memory(calendar()).expect("Failed to open store");
    let start = DayKey::from_ymd(2020, 1, 1).expect("valid day");
    let items = (0..count).map(|i| {
        let day = start.offset_days(i as i64).expect("day in range");
        (day, generate_document(i))
    });
    store.upsert_many(items).expect("Failed to seed store");
    store
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let store = setup_store(1000);

    let mut group = c.benchmark_group("search");

    group.bench_function("common_term", |b| {
        b.iter(|| search(&store, "meeting").expect("search failed"))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| search(&store, "zeppelin").expect("search failed"))
    });

    group.finish();
}

fn bench_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("all");

    for size in [100, 500, 1000] {
        let store = setup_store(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| store.all().expect("enumeration failed"))
        });
    }

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    for size in [100, 500] {
        let bytes = export_notes(&setup_store(size)).expect("export failed");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("fresh_store", size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut store =
                    NoteStore::open_in_memory(calendar()).expect("Failed to open store");
                import_bytes(&mut store, bytes).expect("import failed")
            })
        });
    }

    group.finish();
}

criterion_group!(query_benches, bench_search, bench_all);
criterion_group!(transfer_benches, bench_import);
criterion_main!(query_benches, transfer_benches);
