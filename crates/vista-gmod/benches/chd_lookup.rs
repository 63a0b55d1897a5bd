//! Lookup throughput of the perfect-hash node dictionary.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vista_gmod::ChdDictionary;

fn make_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for major in 0..60 {
        for minor in 0..10 {
            keys.push(format!("{major}{minor}.{}", (major + minor) % 7));
            keys.push(format!("C{major}{minor}.{minor}"));
            keys.push(format!("S{major}.{minor}i"));
        }
    }
    keys
}

fn bench_lookup(c: &mut Criterion) {
    let keys = make_keys();
    let n = keys.len();
    let dict = ChdDictionary::new(keys.iter().cloned().zip(0..n).collect::<Vec<_>>()).unwrap();

    c.bench_function("chd_hit", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(dict.try_get_value(black_box(&keys[i])))
        })
    });

    c.bench_function("chd_miss", |b| {
        b.iter(|| black_box(dict.try_get_value(black_box("X999.9"))))
    });
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
