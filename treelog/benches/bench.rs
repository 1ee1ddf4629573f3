use std::collections::BTreeMap;
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use treelog::{Introspect, LogStore, Logger, generate_tree, render, tl_info};

#[derive(Introspect)]
pub struct Player {
    pub name: String,
    pub health: f32,
    pub inventory: Vec<u32>,
    pub stats: BTreeMap<String, i64>,
}

// Seeded so every run measures the same data.
fn build_players(count: usize) -> Vec<Player> {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    (0..count)
        .map(|i| Player {
            name: format!("player{i}"),
            health: rng.random_range(0.0..100.0),
            inventory: (0..rng.random_range(0..16)).map(|_| rng.random()).collect(),
            stats: (0..4)
                .map(|s| (format!("stat{s}"), rng.random_range(-100..100)))
                .collect(),
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let players = build_players(64);

    c.bench_function("generate_players", |b| {
        b.iter(|| black_box(generate_tree(&players)))
    });
}

fn bench_render(c: &mut Criterion) {
    let tree = generate_tree(&build_players(64));

    c.bench_function("render_players", |b| b.iter(|| black_box(render(&tree))));
    c.bench_function("search_players", |b| {
        b.iter(|| black_box(tree.matches_query("STAT3")))
    });
}

fn bench_store(c: &mut Criterion) {
    let players = build_players(8);
    let logger = Logger::new(Arc::new(LogStore::default()));

    c.bench_function("log_players_rotating", |b| {
        b.iter(|| black_box(tl_info!(logger, value = players)))
    });
}

criterion_group!(benches, bench_generate, bench_render, bench_store);
criterion_main!(benches);
