use criterion::{criterion_group, criterion_main, Criterion};

use helpers::index::TestCorpus;
use posting_index::{
    build_from_reader, select_top_k,
    serialize::{read_binary, write_binary},
    utils::cursor::SliceCursor,
    BuilderOptions,
};

fn criterion_benchmark(c: &mut Criterion) {
    // Create the index
    let corpus = TestCorpus::new(50_000, 20_000, 20., 200, Some(0));
    let index = build_from_reader(corpus.text().as_bytes(), &BuilderOptions::default())
        .expect("Error while building the index");

    let mut data = Vec::new();
    write_binary(&index, &mut data).expect("Error while writing the index");

    c.bench_function("top-k (k=100)", |b| {
        b.iter(|| select_top_k(SliceCursor::new(&data), 100))
    });
    c.bench_function("decode", |b| b.iter(|| read_binary(SliceCursor::new(&data))));
}

criterion_group! {
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(50);
    targets = criterion_benchmark
}
criterion_main!(benches);
