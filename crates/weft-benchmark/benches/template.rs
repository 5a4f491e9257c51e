use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

static CANDIDATES: [(&str, &str); 2] = [
    ("Simple", "with {tmpl}."),
    (
        "Complex",
        "string with {template} in it even { in {twice} out } in a row, or {even} { more \
         {examples} if necessary}.",
    ),
];

fn bench_lex_and_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex_and_parse");

    for (name, source) in CANDIDATES {
        let input = source.chars().collect::<Vec<_>>();
        group.throughput(Throughput::Elements(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("tree", name), &input, |b, input| {
            b.iter(|| {
                let mut tree = weft_template::tree(input);
                tree.parse();
                black_box(tree.len());
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("render", name), &source, |b, &s| {
            b.iter(|| black_box(weft_template::render(s)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lex_and_parse, bench_render);
criterion_main!(benches);
