//! Extraction throughput benchmarks
//!
//! Run with: cargo bench --bench pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use frase_core::{get_rules, Pipeline};
use std::hint::black_box;

/// Book text of roughly `size` bytes with a mix of kept and rejected sentences
fn generate_book(base: &str, size: usize) -> String {
    let mut text = String::with_capacity(size + base.len());
    let mut n = 0;
    while text.len() < size {
        text.push_str(base);
        // Distinct suffixes so later sentences are not all duplicates
        text.push_str(&"a".repeat(n % 7 + 1));
        text.push_str(". ");
        n += 1;
    }
    text
}

fn bench_book_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("book_sizes");
    let rules = get_rules("ca").unwrap();
    let base = "Era un dia molt fred i la pluja no parava de caure sobre la ciutat vella. Capítol 3. Hola";

    for size in [10_240, 102_400, 1_024_000] {
        let book = generate_book(base, size);

        group.throughput(Throughput::Bytes(book.len() as u64));
        group.bench_with_input(BenchmarkId::new("catalan", size), &book, |b, book| {
            b.iter(|| {
                let mut pipeline = Pipeline::new(rules.clone());
                black_box(pipeline.process_text("llibre.txt", black_box(book)));
            });
        });
    }

    group.finish();
}

fn bench_languages(c: &mut Criterion) {
    let mut group = c.benchmark_group("languages");
    let size = 102_400;

    let books = [
        (
            "ca",
            "Era un dia molt fred i la pluja no parava de caure sobre la ciutat vella",
        ),
        (
            "it",
            "La mattina presto il pescatore usciva con la sua barca verso il mare aperto",
        ),
        (
            "ja",
            "東京の古い町並みを歩きながら私たちは昔の思い出や友人の話を語り合った",
        ),
    ];

    for (code, base) in books {
        let rules = get_rules(code).unwrap();
        let book = generate_book(base, size);

        group.throughput(Throughput::Bytes(book.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", code), &book, |b, book| {
            b.iter(|| {
                let mut pipeline = Pipeline::new(rules.clone());
                black_box(pipeline.process_text("book.txt", black_box(book)));
            });
        });
    }

    group.finish();
}

fn bench_cleaner(c: &mut Criterion) {
    let rules = get_rules("ca").unwrap();
    let line = "—Capítol 3: «la nena» _mirava_ el mar   des de la finestra…";

    c.bench_function("clean_catalan_line", |b| {
        b.iter(|| black_box(rules.cleaner().clean(black_box(line))));
    });
}

criterion_group!(benches, bench_book_sizes, bench_languages, bench_cleaner);
criterion_main!(benches);
