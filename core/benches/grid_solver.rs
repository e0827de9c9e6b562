use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use unveil_core::{
    AnimationTiming, GridShape, LabelGenerator, PerimeterPath, RandomLabelGenerator, RevealSequencer,
};

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for total in [30, 500, 10_000, 65_535] {
        group.bench_with_input(BenchmarkId::from_parameter(total), &total, |b, &total| {
            b.iter(|| GridShape::solve(black_box(total), black_box(16.0 / 9.0)))
        });
    }

    group.finish();
}

fn bench_perimeter(c: &mut Criterion) {
    c.bench_function("perimeter_100x100", |b| {
        b.iter(|| PerimeterPath::new(black_box(GridShape::new(100, 100))))
    });
}

fn bench_full_reveal(c: &mut Criterion) {
    let Ok(board) = RandomLabelGenerator::new(1).generate(GridShape::new(30, 40)) else {
        return;
    };

    c.bench_function("reveal_1200_tiles", |b| {
        b.iter(|| {
            let Ok(mut sequencer) = RevealSequencer::new(&board, AnimationTiming::default(), 2)
            else {
                return;
            };
            while sequencer.reveal_next().is_some() {
                black_box(sequencer.finish_reveal());
            }
        })
    });
}

criterion_group!(benches, bench_solve, bench_perimeter, bench_full_reveal);
criterion_main!(benches);
