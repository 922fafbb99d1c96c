use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nbt_tree::{Compound, List, Root, Tag, load, make_root};

fn build_tree() -> Root {
    let mut root = make_root("bench");
    let mut entities = List::new(Tag::Compound);
    for i in 0..1_000i32 {
        let mut entity = Compound::new();
        entity.set("id", format!("entity_{i}"));
        entity.set("x", f64::from(i) * 0.5);
        entity.set("health", (i % 20) as i16);
        entity.set("inventory", (0..16).collect::<Vec<i32>>());
        entity.set("flags", vec![0i8; 32]);
        entities
            .add(entity)
            .expect("entities list holds compounds");
    }
    root.set("entities", entities);
    root
}

fn bench_codec(c: &mut Criterion) {
    let root = build_tree();
    let bytes = root.to_vec().expect("bench tree encodes");

    c.bench_function("load", |b| {
        b.iter(|| load(black_box(&bytes[..])).expect("bench tree decodes"))
    });

    c.bench_function("save", |b| {
        let mut out = Vec::with_capacity(bytes.len());
        b.iter(|| {
            out.clear();
            black_box(&root).save(&mut out).expect("bench tree encodes");
        })
    });

    c.bench_function("path", |b| {
        let mut nested = make_root("");
        let mut current = Compound::new();
        current.set("leaf", 1i32);
        for _ in 0..8 {
            let mut parent = Compound::new();
            parent.set("n", current);
            current = parent;
        }
        nested.set("n", current);
        b.iter(|| {
            nested
                .path(black_box("n/n/n/n/n/n/n/n/n/leaf"))
                .expect("path exists")
                .int()
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
