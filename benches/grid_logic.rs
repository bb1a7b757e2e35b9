use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vowel_grid::core::{evaluate, shuffle_grid, Catalog, GridState, SimpleRng, SourceGrid, SourceItem};
use vowel_grid::types::{CellId, InteractionMode, ItemId, ScramblePolicy};

fn big_list(n: usize) -> Catalog {
    let row = (0..n)
        .map(|i| vec![SourceItem::new(format!("v{i}"), format!("{i}"))])
        .collect();
    SourceGrid::Nested(vec![row])
        .parse(InteractionMode::Reorder)
        .unwrap()
}

fn bench_shuffle(c: &mut Criterion) {
    let catalog = Catalog::placeholder(InteractionMode::default());
    let mut grid = GridState::canonical(&catalog);
    let mut rng = SimpleRng::new(12345);

    c.bench_function("shuffle_chart", |b| {
        b.iter(|| shuffle_grid(&mut grid, &mut rng, black_box(ScramblePolicy::AtLeastOneDisplaced)))
    });
}

fn bench_swap(c: &mut Criterion) {
    let catalog = Catalog::placeholder(InteractionMode::default());
    let mut grid = GridState::canonical(&catalog);

    c.bench_function("swap_cells", |b| {
        b.iter(|| grid.swap_cells(black_box(CellId(0)), black_box(CellId(11))))
    });
}

fn bench_reorder(c: &mut Criterion) {
    let catalog = big_list(256);
    let mut grid = GridState::canonical(&catalog);

    // Alternate ends so every iteration is a full-length rotation.
    let mut to = 255;
    c.bench_function("reorder_256", |b| {
        b.iter(|| {
            let moved = grid.move_item(black_box(ItemId(0)), black_box(to));
            to = 255 - to;
            moved
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let catalog = big_list(1024);
    let mut grid = GridState::canonical(&catalog);
    shuffle_grid(&mut grid, &mut SimpleRng::new(7), ScramblePolicy::Uniform);

    c.bench_function("evaluate_1024", |b| b.iter(|| evaluate(black_box(&grid))));
}

criterion_group!(benches, bench_shuffle, bench_swap, bench_reorder, bench_evaluate);
criterion_main!(benches);
