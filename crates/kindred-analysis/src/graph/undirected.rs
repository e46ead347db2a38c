//! Undirected view of a [`FamilyGraph`].
//!
//! # Collapse Policy
//!
//! Every metric in this crate works on family *ties*, not on the stored
//! edge direction. The view is built as follows:
//!
//! - `mother` and `father` edges are treated as symmetric ties between
//!   parent and child. This is a modelling decision carried over from the
//!   dataset's analysis, not an accident of representation.
//! - `spouse` edges are symmetric already.
//! - An edge and its reverse, and any parallel edges of other kinds, become
//!   a single [`Connection`] between the unordered pair. The connection
//!   remembers every kind it absorbed for display, but structural metrics
//!   count the pair once.
//!
//! Node indices are identical to those of the source [`FamilyGraph`].

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use kindred_core::RelationKind;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::graph::build::FamilyGraph;

/// One undirected tie between two characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connection {
    /// Every relation kind recorded between the pair, in either direction.
    pub kinds: BTreeSet<RelationKind>,
}

/// The collapsed, undirected family graph used for structural metrics.
#[derive(Debug, Clone)]
pub struct UndirectedGraph {
    /// Undirected graph: node weight = name, one edge per connected pair.
    pub graph: UnGraph<String, Connection>,
    /// Mapping from node name to `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl FamilyGraph {
    /// Collapse every edge into the undirected view.
    #[must_use]
    pub fn to_undirected(&self) -> UndirectedGraph {
        UndirectedGraph::collapse(self, |_| true)
    }

    /// Collapse only edges whose kind is listed in `kinds`.
    ///
    /// All nodes are kept, so characters without a tie of the selected
    /// kinds become isolated nodes.
    #[must_use]
    pub fn to_undirected_filtered(&self, kinds: &[RelationKind]) -> UndirectedGraph {
        UndirectedGraph::collapse(self, |kind| kinds.contains(&kind))
    }
}

impl UndirectedGraph {
    #[instrument(skip(family, keep))]
    fn collapse(family: &FamilyGraph, keep: impl Fn(RelationKind) -> bool) -> Self {
        let fg = &family.graph;
        let mut graph = UnGraph::<String, Connection>::with_capacity(fg.node_count(), fg.edge_count());

        for idx in fg.node_indices() {
            graph.add_node(fg[idx].name.clone());
        }

        let mut pair_edges: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();

        for edge in fg.edge_references() {
            let kind = edge.weight().relation;
            if !keep(kind) {
                continue;
            }
            let (a, b) = (edge.source(), edge.target());
            let key = if a < b { (a, b) } else { (b, a) };
            let eidx = *pair_edges
                .entry(key)
                .or_insert_with(|| graph.add_edge(key.0, key.1, Connection::default()));
            graph[eidx].kinds.insert(kind);
        }

        debug!(
            nodes = graph.node_count(),
            connections = graph.edge_count(),
            "collapsed to undirected view"
        );

        Self {
            graph,
            node_map: family.node_map.clone(),
        }
    }

    /// Build an undirected graph directly from names and unordered pairs.
    ///
    /// Unknown names in `pairs` are added as nodes; repeated pairs and
    /// self-pairs are ignored. Connections carry no relation kind.
    #[must_use]
    pub fn from_pairs(names: &[&str], pairs: &[(&str, &str)]) -> Self {
        let mut graph = UnGraph::<String, Connection>::default();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        let mut intern = |graph: &mut UnGraph<String, Connection>, name: &str| {
            *node_map
                .entry(name.to_string())
                .or_insert_with(|| graph.add_node(name.to_string()))
        };

        for name in names {
            intern(&mut graph, *name);
        }
        for &(a, b) in pairs {
            let ia = intern(&mut graph, a);
            let ib = intern(&mut graph, b);
            if ia != ib && graph.find_edge(ia, ib).is_none() {
                graph.add_edge(ia, ib, Connection::default());
            }
        }

        Self { graph, node_map }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct unordered connected pairs.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Name of the node at position `i`.
    #[must_use]
    pub fn name(&self, i: usize) -> &str {
        self.graph[NodeIndex::new(i)].as_str()
    }

    /// Names indexed by node position.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.graph.node_weights().map(String::as_str).collect()
    }

    /// Whether `a` and `b` share a connection.
    #[must_use]
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(ia), Some(ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    /// Relation kinds recorded between `a` and `b`, if connected.
    #[must_use]
    pub fn kinds_between(&self, a: &str, b: &str) -> Option<&BTreeSet<RelationKind>> {
        let (ia, ib) = (self.node_index(a)?, self.node_index(b)?);
        let e = self.graph.find_edge(ia, ib)?;
        Some(&self.graph[e].kinds)
    }

    /// Sorted, de-duplicated neighbour positions for every node.
    ///
    /// Most metrics iterate this instead of petgraph adjacency so that
    /// traversal order is reproducible.
    #[must_use]
    pub fn neighbor_lists(&self) -> Vec<Vec<usize>> {
        self.graph
            .node_indices()
            .map(|v| {
                let mut nbrs: Vec<usize> = self.graph.neighbors(v).map(NodeIndex::index).collect();
                nbrs.sort_unstable();
                nbrs.dedup();
                nbrs
            })
            .collect()
    }

    /// Every connection as a `(smaller name, larger name)` pair, sorted.
    #[must_use]
    pub fn connection_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .graph
            .edge_references()
            .map(|e| {
                let a = self.graph[e.source()].clone();
                let b = self.graph[e.target()].clone();
                if a <= b { (a, b) } else { (b, a) }
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::{Edge, Node};

    fn family(names: &[&str], edges: &[(&str, &str, RelationKind)]) -> FamilyGraph {
        FamilyGraph::build(
            names.iter().map(|n| Node::named(*n)).collect(),
            edges.iter().map(|(a, b, k)| Edge::new(*a, *b, *k)).collect(),
        )
        .expect("valid family")
    }

    #[test]
    fn reciprocal_edges_collapse_to_one_connection() {
        let g = family(
            &["Arlan", "Bera"],
            &[
                ("Arlan", "Bera", RelationKind::Spouse),
                ("Bera", "Arlan", RelationKind::Spouse),
            ],
        );
        let ug = g.to_undirected();
        assert_eq!(ug.connection_count(), 1);
        assert!(ug.are_connected("Bera", "Arlan"));
    }

    #[test]
    fn conflicting_kinds_are_kept_for_display() {
        let g = family(
            &["Arlan", "Bera"],
            &[
                ("Arlan", "Bera", RelationKind::Father),
                ("Bera", "Arlan", RelationKind::Spouse),
            ],
        );
        let ug = g.to_undirected();
        assert_eq!(ug.connection_count(), 1, "pair counted once");
        let kinds = ug.kinds_between("Arlan", "Bera").expect("connected");
        assert!(kinds.contains(&RelationKind::Father));
        assert!(kinds.contains(&RelationKind::Spouse));
    }

    #[test]
    fn parental_edges_become_symmetric_ties() {
        let g = family(
            &["Child", "Mum", "Dad"],
            &[
                ("Child", "Mum", RelationKind::Mother),
                ("Child", "Dad", RelationKind::Father),
            ],
        );
        let ug = g.to_undirected();
        assert!(ug.are_connected("Mum", "Child"));
        assert!(ug.are_connected("Dad", "Child"));
        assert!(!ug.are_connected("Mum", "Dad"));
    }

    #[test]
    fn filtered_view_keeps_all_nodes() {
        let g = family(
            &["Child", "Mum", "Dad"],
            &[
                ("Child", "Mum", RelationKind::Mother),
                ("Mum", "Dad", RelationKind::Spouse),
            ],
        );
        let spouses = g.to_undirected_filtered(&[RelationKind::Spouse]);
        assert_eq!(spouses.node_count(), 3);
        assert_eq!(spouses.connection_count(), 1);
        assert!(!spouses.are_connected("Child", "Mum"));
    }

    #[test]
    fn node_indices_match_family_graph() {
        let g = family(&["Cass", "Arlan", "Bera"], &[("Cass", "Bera", RelationKind::Mother)]);
        let ug = g.to_undirected();
        for name in ["Arlan", "Bera", "Cass"] {
            assert_eq!(g.node_index(name), ug.node_index(name));
        }
        assert_eq!(ug.names(), vec!["Cass", "Arlan", "Bera"]);
    }

    #[test]
    fn neighbor_lists_are_sorted_and_unique() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("A", "C")]);
        let lists = ug.neighbor_lists();
        let c = ug.node_index("C").expect("C").index();
        assert_eq!(lists[c].len(), 2);
        assert!(lists[c].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn connection_pairs_are_canonical() {
        let ug = UndirectedGraph::from_pairs(&[], &[("B", "A"), ("C", "B")]);
        assert_eq!(
            ug.connection_pairs(),
            vec![("A".to_string(), "B".to_string()), ("B".to_string(), "C".to_string())]
        );
    }
}
