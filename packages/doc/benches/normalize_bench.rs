use criterion::{black_box, criterion_group, criterion_main, Criterion};
use figdocs_doc::{normalize, Document, Node};

fn normalize_benchmark(c: &mut Criterion) {
    let skeleton = Document::new_skeleton("Button", None).into_nodes();

    let mut long_tail = skeleton.clone();
    for i in 0..200 {
        long_tail.push(Node::paragraph(format!("paragraph {i}")));
    }

    let mut corrupted: Vec<Node> = long_tail.clone();
    corrupted.swap(0, 3);
    corrupted.remove(1);

    c.bench_function("normalize_already_valid", |b| {
        b.iter(|| normalize(black_box(long_tail.clone())))
    });

    c.bench_function("normalize_corrupted", |b| {
        b.iter(|| normalize(black_box(corrupted.clone())))
    });
}

criterion_group!(benches, normalize_benchmark);
criterion_main!(benches);
