use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfa_eval::{
    prelude::*,
    random::{generate_random_automaton, generate_random_word},
};

fn evaluation_benchmark(c: &mut Criterion) {
    let complete = generate_random_automaton(4, 64, 1.0);
    let sparse = generate_random_automaton(4, 64, 0.6);
    let words: Vec<String> = (0..1000)
        .map(|_| generate_random_word(complete.alphabet(), 64))
        .collect();

    c.bench_function("evaluate complete", |b| {
        b.iter(|| evaluate(black_box(&complete), black_box(&words)))
    });
    c.bench_function("evaluate sparse", |b| {
        b.iter(|| evaluate(black_box(&sparse), black_box(&words)))
    });

    let description = complete.to_string();
    c.bench_function("load", |b| b.iter(|| load_str(black_box(&description))));
}

criterion_group!(benches, evaluation_benchmark);
criterion_main!(benches);
