//! Whole-graph distance measures: diameter and average path length.

use serde::Serialize;
use tracing::instrument;

use crate::graph::components::{component_labels, largest_component};
use crate::graph::undirected::UndirectedGraph;
use crate::metrics::as_f64;
use crate::metrics::paths::bfs_distances;

/// Which part of the graph the diameter is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiameterScope {
    /// The whole graph; a disconnected graph has no finite diameter.
    #[default]
    Whole,
    /// Only the largest connected component.
    LargestComponent,
}

/// Longest shortest path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Diameter {
    /// Length in hops plus one pair of endpoints (`from <= to` by name)
    /// realising it. Among several such pairs the lexicographically
    /// smallest is reported.
    Finite { length: usize, from: String, to: String },
    /// Some pair of nodes in scope has no path between them.
    Unreachable,
    /// No nodes in scope.
    Empty,
}

impl Diameter {
    #[must_use]
    pub const fn length(&self) -> Option<usize> {
        match self {
            Self::Finite { length, .. } => Some(*length),
            Self::Unreachable | Self::Empty => None,
        }
    }
}

/// Diameter of `g` under `scope`.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn diameter(g: &UndirectedGraph, scope: DiameterScope) -> Diameter {
    let n = g.node_count();
    if n == 0 {
        return Diameter::Empty;
    }

    let sources: Vec<usize> = match scope {
        DiameterScope::Whole => {
            let labels = component_labels(g);
            if labels.iter().any(|&c| c != 0) {
                return Diameter::Unreachable;
            }
            (0..n).collect()
        }
        DiameterScope::LargestComponent => largest_component(g),
    };

    let nbrs = g.neighbor_lists();
    let mut best: Option<(usize, &str, &str)> = None;

    for &s in &sources {
        for (t, d) in bfs_distances(&nbrs, s).into_iter().enumerate() {
            let Some(d) = d else { continue };
            let (a, b) = (g.name(s), g.name(t));
            let pair = if a <= b { (a, b) } else { (b, a) };
            let better = match best {
                None => true,
                Some((len, from, to)) => d > len || (d == len && pair < (from, to)),
            };
            if better {
                best = Some((d, pair.0, pair.1));
            }
        }
    }

    best.map_or(Diameter::Empty, |(length, from, to)| Diameter::Finite {
        length,
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Mean shortest-path length over all ordered pairs `(s, t)`, `s != t`,
/// with a path between them. `None` when no such pair exists.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn average_path_length(g: &UndirectedGraph) -> Option<f64> {
    let nbrs = g.neighbor_lists();
    let mut total = 0_usize;
    let mut count = 0_usize;

    for s in 0..nbrs.len() {
        for d in bfs_distances(&nbrs, s).into_iter().flatten().filter(|&d| d > 0) {
            total += d;
            count += 1;
        }
    }

    (count > 0).then(|| as_f64(total) / as_f64(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let ug = UndirectedGraph::from_pairs(&[], &[]);
        assert_eq!(diameter(&ug, DiameterScope::Whole), Diameter::Empty);
        assert_eq!(diameter(&ug, DiameterScope::LargestComponent), Diameter::Empty);
        assert_eq!(average_path_length(&ug), None);
    }

    #[test]
    fn single_node_has_zero_diameter() {
        let ug = UndirectedGraph::from_pairs(&["Solo"], &[]);
        assert_eq!(diameter(&ug, DiameterScope::Whole).length(), Some(0));
        assert_eq!(average_path_length(&ug), None);
    }

    #[test]
    fn star_diameter_is_two() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("C", "D")]);
        assert_eq!(
            diameter(&ug, DiameterScope::Whole),
            Diameter::Finite {
                length: 2,
                from: "A".into(),
                to: "B".into()
            }
        );
        // 3 pairs at 1 and 3 pairs at 2, each counted twice.
        assert!((average_path_length(&ug).unwrap_or_default() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn disconnected_graph() {
        let ug = UndirectedGraph::from_pairs(&["Z"], &[("A", "B"), ("B", "C")]);
        assert_eq!(diameter(&ug, DiameterScope::Whole), Diameter::Unreachable);
        assert_eq!(
            diameter(&ug, DiameterScope::LargestComponent),
            Diameter::Finite {
                length: 2,
                from: "A".into(),
                to: "C".into()
            }
        );
        // Z contributes nothing: pairs AB, BC at 1 and AC at 2.
        assert!((average_path_length(&ug).unwrap_or_default() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(Diameter::Unreachable).expect("serialize");
        assert_eq!(json["status"], "unreachable");
    }
}
