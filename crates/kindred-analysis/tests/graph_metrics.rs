//! Known-topology regression tests for graph metrics.
//!
//! Each test builds a small family through the public `FamilyGraph` API and
//! checks analytically derived values, so any algorithm change that shifts
//! them is caught.

use kindred_analysis::graph::{AdjacencyMatrix, FamilyGraph, GraphStats, UndirectedGraph};
use kindred_analysis::metrics::basic::degree;
use kindred_analysis::metrics::betweenness::{betweenness, edge_betweenness};
use kindred_analysis::metrics::census::{TriadType, dyad_census, triad_census};
use kindred_analysis::metrics::cliques::{clique_number, maximal_cliques};
use kindred_analysis::metrics::closeness::closeness;
use kindred_analysis::metrics::community::{CommunityMethod, detect, modularity};
use kindred_analysis::metrics::distance::{Diameter, DiameterScope, average_path_length, diameter};
use kindred_analysis::metrics::eigenvector::{EigenvectorConfig, eigenvector_centrality};
use kindred_analysis::metrics::pagerank::{PageRankConfig, pagerank};
use kindred_analysis::metrics::transitivity::{transitivity_global, transitivity_local};
use kindred_analysis::metrics::{EdgeKey, MetricKind, MetricsConfig, compute_all};
use kindred_analysis::report::{merge, top_n};
use kindred_core::{Edge, Node, RelationKind, ValidationError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn family(names: &[&str], edges: &[(&str, &str, RelationKind)]) -> FamilyGraph {
    FamilyGraph::build(
        names.iter().map(|n| Node::named(*n)).collect(),
        edges.iter().map(|(a, b, k)| Edge::new(*a, *b, *k)).collect(),
    )
    .expect("valid family")
}

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value defined");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// C is the mother of A, B, and D.
fn star() -> FamilyGraph {
    family(
        &["A", "B", "C", "D"],
        &[
            ("A", "C", RelationKind::Mother),
            ("B", "C", RelationKind::Mother),
            ("D", "C", RelationKind::Mother),
        ],
    )
}

/// A married to B, C child of both.
fn triangle() -> FamilyGraph {
    family(
        &["A", "B", "C"],
        &[
            ("A", "B", RelationKind::Spouse),
            ("C", "A", RelationKind::Mother),
            ("C", "B", RelationKind::Father),
        ],
    )
}

// ---------------------------------------------------------------------------
// Star
// ---------------------------------------------------------------------------

#[test]
fn star_scenario() {
    let ug = star().to_undirected();

    let d = degree(&ug, false);
    approx(d.get("C"), 3.0);
    for leaf in ["A", "B", "D"] {
        approx(d.get(leaf), 1.0);
    }

    approx(betweenness(&ug, false).get("C"), 3.0);
    approx(transitivity_local(&ug).get("C"), 0.0);
    assert_eq!(diameter(&ug, DiameterScope::Whole).length(), Some(2));
}

#[test]
fn star_census_and_cliques() {
    let g = star();
    let ug = g.to_undirected();
    let adj = AdjacencyMatrix::undirected(&ug);

    let dyads = dyad_census(&adj);
    assert_eq!((dyads.mutual, dyads.asymmetric, dyads.null), (3, 0, 3));

    let triads = triad_census(&adj);
    assert_eq!(triads.total(), 4);
    // Every triple holding C is an open two-path; A, B, D are unrelated.
    assert_eq!(triads.get(TriadType::T201), 3);
    assert_eq!(triads.get(TriadType::T003), 1);

    // Directed: every arc points at the mother.
    let directed = triad_census(&AdjacencyMatrix::directed(&g));
    assert_eq!(directed.get(TriadType::T021U), 3);
    assert_eq!(directed.get(TriadType::T003), 1);

    assert_eq!(clique_number(&maximal_cliques(&ug)), 2);
}

// ---------------------------------------------------------------------------
// Triangle
// ---------------------------------------------------------------------------

#[test]
fn triangle_scenario() {
    let ug = triangle().to_undirected();

    for name in ["A", "B", "C"] {
        approx(transitivity_local(&ug).get(name), 1.0);
    }
    assert_eq!(transitivity_global(&ug), Some(1.0));

    let cliques = maximal_cliques(&ug);
    assert_eq!(cliques.len(), 1);
    assert_eq!(cliques[0].len(), 3);

    let adj = AdjacencyMatrix::undirected(&ug);
    let dyads = dyad_census(&adj);
    assert_eq!(dyads.null, 0);
    assert_eq!(dyads.mutual, 3);
    assert_eq!(triad_census(&adj).get(TriadType::T300), 1);
}

#[test]
fn triangle_centralities_are_uniform() {
    let ug = triangle().to_undirected();
    let eig = eigenvector_centrality(&ug, &EigenvectorConfig::default()).expect("converges");
    let pr = pagerank(&ug, &PageRankConfig::default()).expect("converges");
    for name in ["A", "B", "C"] {
        approx(eig.scores.get(name), 1.0);
        approx(pr.scores.get(name), 1.0 / 3.0);
        approx(closeness(&ug, true).get(name), 1.0);
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

#[test]
fn path_scenario() {
    // Four generations: A child of B child of C child of D.
    let g = family(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", RelationKind::Father),
            ("B", "C", RelationKind::Father),
            ("C", "D", RelationKind::Mother),
        ],
    );
    let ug = g.to_undirected();

    let b = betweenness(&ug, false);
    approx(b.get("B"), 2.0);
    approx(b.get("C"), 2.0);
    approx(b.get("A"), 0.0);

    let eb = edge_betweenness(&ug);
    assert!((eb[&EdgeKey::new("B", "C")] - 4.0).abs() < 1e-9);
    assert!((eb[&EdgeKey::new("A", "B")] - 3.0).abs() < 1e-9);

    assert_eq!(
        diameter(&ug, DiameterScope::Whole),
        Diameter::Finite {
            length: 3,
            from: "A".into(),
            to: "D".into()
        }
    );
    // Pair distances: 1,1,1,2,2,3 → 10 / 6.
    approx(average_path_length(&ug), 10.0 / 6.0);
    assert_eq!(transitivity_global(&ug), Some(0.0));
}

// ---------------------------------------------------------------------------
// Diamond
// ---------------------------------------------------------------------------

#[test]
fn diamond_splits_shortest_paths() {
    // A and D are the children of B and C, who are not married.
    let g = family(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", RelationKind::Father),
            ("A", "C", RelationKind::Mother),
            ("D", "B", RelationKind::Father),
            ("D", "C", RelationKind::Mother),
        ],
    );
    let ug = g.to_undirected();
    let b = betweenness(&ug, false);
    for name in ["A", "B", "C", "D"] {
        approx(b.get(name), 0.5);
    }
    let eb = edge_betweenness(&ug);
    // Each tie: its own pair (1) plus half of two opposite pairs.
    for score in eb.values() {
        assert!((score - 2.0).abs() < 1e-9);
    }
    // Four 2-cliques: the diamond has no triangle.
    assert_eq!(maximal_cliques(&ug).len(), 4);
}

// ---------------------------------------------------------------------------
// Disconnected
// ---------------------------------------------------------------------------

#[test]
fn disconnected_graph_is_valid_everywhere() {
    let g = family(
        &["A", "B", "C", "X", "Y", "Solo"],
        &[
            ("A", "B", RelationKind::Spouse),
            ("C", "A", RelationKind::Mother),
            ("X", "Y", RelationKind::Spouse),
        ],
    );
    let ug = g.to_undirected();

    let stats = GraphStats::compute(&g, &ug);
    assert_eq!(stats.component_count, 3);
    assert_eq!(stats.isolated_node_count, 1);

    approx(closeness(&ug, false).get("Solo"), 0.0);
    assert_eq!(diameter(&ug, DiameterScope::Whole), Diameter::Unreachable);
    assert_eq!(diameter(&ug, DiameterScope::LargestComponent).length(), Some(2));

    let runs = compute_all(&ug, &MetricsConfig::default());
    assert!(runs.iter().all(|r| r.result.is_ok()));

    let pr = pagerank(&ug, &PageRankConfig::default()).expect("converges");
    let total: f64 = pr.scores.iter().map(|(_, v)| v).sum();
    assert!((total - 1.0).abs() < 1e-6);

    for method in [CommunityMethod::LabelPropagation, CommunityMethod::EdgeBetweenness] {
        let p = detect(&ug, method);
        assert_eq!(p.communities.iter().map(Vec::len).sum::<usize>(), 6);
        assert_eq!(modularity(&ug, &p.communities), Ok(p.modularity));
    }
}

// ---------------------------------------------------------------------------
// Reporting and validation
// ---------------------------------------------------------------------------

#[test]
fn merged_table_and_ranking() {
    let g = star();
    let ug = g.to_undirected();
    let records: Vec<_> = compute_all(&ug, &MetricsConfig::default())
        .into_iter()
        .filter_map(|r| r.result.ok())
        .collect();
    assert_eq!(records.len(), MetricKind::ALL.len());

    let rows = merge(&g, &records);
    assert_eq!(rows.len(), 4);
    // Leaves have no local transitivity.
    assert_eq!(rows[0].node.name, "A");
    assert_eq!(rows[0].metrics.get("transitivity"), Some(&None));
    approx(rows[2].metric("degree"), 3.0);

    let degree_record = records
        .iter()
        .find(|r| r.name == "degree")
        .expect("degree computed");
    let top = top_n(degree_record, 2).expect("ranked");
    assert_eq!(top[0].name, "C");
    assert_eq!(top[1].name, "A");
}

#[test]
fn duplicate_node_registers_nothing() {
    let result = FamilyGraph::build(
        vec![Node::named("A"), Node::named("B"), Node::named("A")],
        vec![Edge::new("A", "B", RelationKind::Spouse)],
    );
    assert_eq!(result.unwrap_err(), ValidationError::DuplicateNode("A".to_string()));
}

#[test]
fn spouse_only_view() {
    let ug: UndirectedGraph = triangle().to_undirected_filtered(&[RelationKind::Spouse]);
    assert_eq!(ug.connection_count(), 1);
    approx(degree(&ug, false).get("C"), 0.0);
}
