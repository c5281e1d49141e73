use criterion::{criterion_group, criterion_main, Criterion};
use stockwise_core::{default_policies, SearchEngine};

fn corpus() -> Vec<String> {
    let mut docs = default_policies();
    for i in 0..500 {
        docs.push(format!(
            "Product SKU{i}: skincare at $12.50\nStock: {} units | Sales: {} units\nSupplier: Supplier {} (Delhi)",
            i % 97,
            i * 3,
            i % 5
        ));
    }
    docs
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::new(corpus());
    c.bench_function("search_503_docs", |b| {
        b.iter(|| engine.search("safety stock policy for supplier delays", 3))
    });
}

fn bench_build(c: &mut Criterion) {
    let docs = corpus();
    c.bench_function("index_503_docs", |b| b.iter(|| SearchEngine::new(docs.clone())));
}

criterion_group!(benches, bench_search, bench_build);
criterion_main!(benches);
