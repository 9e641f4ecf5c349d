use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_patience::{Document, GameId, NoHooks, PileKind};

fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for id in GameId::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(id), &id, |b, &id| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(id.rules().init(seed))
            });
        });
    }
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");
    for id in GameId::ALL {
        let game = id.rules().init(7);
        group.bench_with_input(BenchmarkId::from_parameter(id), &game, |b, game| {
            b.iter(|| {
                let bytes = Document::capture(game).to_bytes().unwrap();
                let document = Document::from_bytes(&bytes).unwrap();
                black_box(game.rules().deserialize(&document).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_split_merge(c: &mut Criterion) {
    let game = GameId::Freecell.rules().init(7);
    let tableaux = game.ids_of(PileKind::Tableaux);
    let cell = game.first_of(PileKind::Cell).unwrap();

    c.bench_function("freecell_split_merge", |b| {
        b.iter(|| {
            let mut game = game.clone();
            for &t in &tableaux {
                let top = game.pile(t).len() - 1;
                if let Some(candidate) = game.split(t, top) {
                    if let Err(candidate) = game.merge(cell, candidate, &mut NoHooks) {
                        game.restore(candidate);
                    }
                }
            }
            black_box(game)
        });
    });
}

criterion_group!(benches, bench_deal, bench_round_trip, bench_split_merge);
criterion_main!(benches);
