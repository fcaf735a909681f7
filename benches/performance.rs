use asmdeps::core::{ReferenceWalker, WalkerConfig};
use asmdeps::formatters::{TextTreeFormatter, XmlFormatter};
use asmdeps::loaders::InMemoryLoader;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

const TARGET: &str = "/bench/root.dll";

/// Layered graph where every module references a handful of modules in the
/// next layer, so most names are reached many times.
fn layered_loader(layers: usize, width: usize, fan_out: usize) -> InMemoryLoader {
    let name = |layer: usize, i: usize| format!("L{}_{}", layer, i);
    let mut loader = InMemoryLoader::new().with_path(TARGET, "root");

    let first: Vec<String> = (0..width).map(|i| name(0, i)).collect();
    let first_refs: Vec<&str> = first.iter().map(String::as_str).collect();
    loader = loader.with_module("root", &first_refs);

    for layer in 0..layers {
        for i in 0..width {
            let refs: Vec<String> = if layer + 1 < layers {
                (0..fan_out)
                    .map(|k| name(layer + 1, (i * 7 + k * 13) % width))
                    .collect()
            } else {
                Vec::new()
            };
            let refs: Vec<&str> = refs.iter().map(String::as_str).collect();
            loader = loader.with_module(&name(layer, i), &refs);
        }
    }
    loader
}

fn benchmark_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_walk");

    let walker = ReferenceWalker::new(layered_loader(12, 200, 6))
        .with_config(WalkerConfig::default().with_fallback_search(false));

    group.bench_function("walk_layered_graph", |b| {
        b.iter(|| {
            let nodes = walker.walk(black_box(Path::new(TARGET))).unwrap();
            black_box(nodes);
        })
    });

    let nodes = walker.walk(Path::new(TARGET)).unwrap();

    group.bench_function("render_text_tree", |b| {
        let formatter = TextTreeFormatter::new();
        b.iter(|| black_box(formatter.format_sequence(black_box(&nodes))))
    });

    group.bench_function("render_xml", |b| {
        let formatter = XmlFormatter::new();
        b.iter(|| black_box(formatter.format_sequence(black_box(&nodes)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_walk);
criterion_main!(benches);
