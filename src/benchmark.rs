use criterion::{black_box, criterion_group, criterion_main, Criterion};

use re2nfa::compiler::compile;
use re2nfa::graphviz::Graphviz;
use re2nfa::utils::RenderFlags;

fn criterion_benchmark_compile(c: &mut Criterion) {
    let pattern = "(a|b)*c".repeat(64);

    c.bench_function("compile 64 starred groups", |b| {
        b.iter(|| compile(black_box(&pattern)).unwrap())
    });

    let nfa = compile(&pattern).unwrap();
    let graphviz = Graphviz::new(RenderFlags::NO_FLAG);
    c.bench_function("dot source 64 starred groups", |b| {
        b.iter(|| graphviz.to_dot(black_box(&nfa)))
    });
}

criterion_group!(benches, criterion_benchmark_compile);
criterion_main!(benches);
