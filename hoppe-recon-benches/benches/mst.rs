//! Undirected graph / Kruskal MST (C3) benchmarks.
//!
//! Measures the time to clean and spanning-tree a k-nearest-neighbor
//! proximity graph built over a sphere-surface point cloud, isolating the
//! graph bookkeeping from plane estimation and orientation.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use hoppe_recon_core::{Graph, SpatialIndex};
use hoppe_recon_test_support::sphere_point_cloud;

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Sphere radius used for all benchmark datasets.
const RADIUS: f32 = 1.0;

/// Point counts to benchmark.
const POINT_COUNTS: &[usize] = &[200, 1_000, 5_000];

/// Neighborhood size used to harvest candidate edges.
const K: usize = 8;

fn knn_proximity_graph(point_count: usize) -> Graph {
    let cloud = sphere_point_cloud(point_count, RADIUS, SEED);
    let index = SpatialIndex::build(cloud.points()).expect("spatial index build must succeed");

    let mut graph = Graph::new(cloud.len());
    for (i, point) in cloud.points().iter().enumerate() {
        let neighbors = index
            .k_nearest(*point, K + 1)
            .expect("k-nearest query must succeed");
        for neighbor in neighbors {
            if neighbor.index != i {
                graph.add_edge(i, neighbor.index, neighbor.squared_distance);
            }
        }
    }
    graph.clean_duplicate_edges();
    graph
}

fn mst_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_mst");
    group.sample_size(20);

    for &point_count in POINT_COUNTS {
        let graph = knn_proximity_graph(point_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(point_count),
            &graph,
            |b, graph| {
                b.iter(|| {
                    graph.generate_mst();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, mst_generate);
criterion_main!(benches);
