use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kindred_analysis::graph::{AdjacencyMatrix, FamilyGraph, UndirectedGraph};
use kindred_analysis::metrics::betweenness::betweenness;
use kindred_analysis::metrics::census::triad_census;
use kindred_analysis::metrics::cliques::maximal_cliques;
use kindred_analysis::metrics::community::label_propagation;
use kindred_analysis::metrics::eigenvector::{EigenvectorConfig, eigenvector_centrality};
use kindred_analysis::metrics::pagerank::{PageRankConfig, pagerank};
use kindred_core::{Edge, Node, RelationKind};

const SIZES: [usize; 3] = [100, 250, 500];

/// Tree-like family with a sprinkling of marriages, roughly the shape of
/// real genealogies: each node after the first has one parent among the
/// earlier nodes, and ~1 in 5 nodes marries someone earlier.
fn synthetic_family(n: usize, seed: u64) -> FamilyGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let name = |i: usize| format!("c{i:04}");

    let nodes = (0..n).map(|i| Node::named(name(i))).collect();
    let mut edges = Vec::new();
    for child in 1..n {
        let parent = rng.gen_range(0..child);
        let kind = if rng.gen_bool(0.5) {
            RelationKind::Mother
        } else {
            RelationKind::Father
        };
        edges.push(Edge::new(name(child), name(parent), kind));

        if rng.gen_bool(0.2) {
            let spouse = rng.gen_range(0..child);
            if spouse != parent {
                edges.push(Edge::new(name(child), name(spouse), RelationKind::Spouse));
            }
        }
    }

    FamilyGraph::build(nodes, edges).expect("synthetic family is valid")
}

fn graphs() -> Vec<(usize, UndirectedGraph, AdjacencyMatrix)> {
    SIZES
        .iter()
        .map(|&n| {
            let ug = synthetic_family(n, 0x00C0_FFEE + n as u64).to_undirected();
            let adj = AdjacencyMatrix::undirected(&ug);
            (n, ug, adj)
        })
        .collect()
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics.centrality");

    for (n, ug, _) in graphs() {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("betweenness", n), &ug, |b, ug| {
            b.iter(|| black_box(betweenness(ug, false)));
        });
        group.bench_with_input(BenchmarkId::new("pagerank", n), &ug, |b, ug| {
            b.iter(|| black_box(pagerank(ug, &PageRankConfig::default())));
        });
        group.bench_with_input(BenchmarkId::new("eigenvector", n), &ug, |b, ug| {
            b.iter(|| black_box(eigenvector_centrality(ug, &EigenvectorConfig::default())));
        });
    }

    group.finish();
}

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics.structure");

    for (n, ug, adj) in graphs() {
        group.bench_with_input(BenchmarkId::new("triad_census", n), &adj, |b, adj| {
            b.iter(|| black_box(triad_census(adj)));
        });
        group.bench_with_input(BenchmarkId::new("maximal_cliques", n), &ug, |b, ug| {
            b.iter(|| black_box(maximal_cliques(ug)));
        });
        group.bench_with_input(BenchmarkId::new("label_propagation", n), &ug, |b, ug| {
            b.iter(|| black_box(label_propagation(ug)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality, bench_structure);
criterion_main!(benches);
