use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use waypoint_graph::{GridConfig, GridGraphBuilder, PathFinder};

fn lattice_bench(c: &mut Criterion) {
    for (width, height, spacing) in [(1920, 1080, 192), (1920, 1080, 24), (4000, 4000, 10)] {
        let config = GridConfig::new(width, height, spacing);
        let mut builder = GridGraphBuilder::new(config);
        let graph = builder.build().unwrap();
        let last = graph.get(graph.len() - 1).unwrap().id();
        let mut finder = PathFinder::for_graph(&graph);
        let name = format!("{width}x{height} spaced {spacing}");

        c.bench_function(format!("build {name}").as_str(), |b| {
            b.iter(|| black_box(builder.build().unwrap()))
        });
        c.bench_function(format!("corner to corner, {name}").as_str(), |b| {
            b.iter(|| black_box(finder.find_path(&graph, None, last).unwrap()))
        });
    }
}

criterion_group!(benches, lattice_bench);
criterion_main!(benches);
