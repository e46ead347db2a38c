//! Maximal clique enumeration.
//!
//! Bron–Kerbosch with Tomita pivoting over `FixedBitSet` neighbourhoods.
//! Every maximal clique is reported exactly once; isolated characters
//! form maximal cliques of size 1.
//!
//! Members of each clique are sorted by name, and the list is sorted by
//! size descending, then by members ascending.

use std::collections::BTreeMap;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::graph::undirected::UndirectedGraph;

fn recurse(r: &mut Vec<usize>, mut p: FixedBitSet, mut x: FixedBitSet, nbrs: &[FixedBitSet], out: &mut Vec<Vec<usize>>) {
    if p.ones().next().is_none() {
        if x.ones().next().is_none() && !r.is_empty() {
            out.push(r.clone());
        }
        return;
    }

    // Pivot: the candidate covering most of P.
    let pivot = p
        .union(&x)
        .max_by_key(|&u| p.intersection(&nbrs[u]).count())
        .unwrap_or(0);

    let branches: Vec<usize> = p.ones().filter(|&v| !nbrs[pivot].contains(v)).collect();

    for v in branches {
        let mut p_next = p.clone();
        p_next.intersect_with(&nbrs[v]);
        let mut x_next = x.clone();
        x_next.intersect_with(&nbrs[v]);

        r.push(v);
        recurse(r, p_next, x_next, nbrs, out);
        r.pop();

        p.set(v, false);
        x.insert(v);
    }
}

/// Every maximal clique as a sorted list of names.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn maximal_cliques(g: &UndirectedGraph) -> Vec<Vec<String>> {
    let lists = g.neighbor_lists();
    let n = lists.len();

    let nbrs: Vec<FixedBitSet> = lists
        .iter()
        .map(|list| {
            let mut set = FixedBitSet::with_capacity(n);
            for &w in list {
                set.insert(w);
            }
            set
        })
        .collect();

    let mut all = FixedBitSet::with_capacity(n);
    all.insert_range(..);

    let mut found = Vec::new();
    recurse(&mut Vec::new(), all, FixedBitSet::with_capacity(n), &nbrs, &mut found);

    let mut cliques: Vec<Vec<String>> = found
        .into_iter()
        .map(|members| {
            let mut names: Vec<String> = members.into_iter().map(|i| g.name(i).to_string()).collect();
            names.sort_unstable();
            names
        })
        .collect();
    cliques.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    debug!(count = cliques.len(), "enumerated maximal cliques");
    cliques
}

/// Size of the largest clique, 0 for an empty list.
#[must_use]
pub fn clique_number(cliques: &[Vec<String>]) -> usize {
    cliques.iter().map(Vec::len).max().unwrap_or(0)
}

/// The maximal cliques whose size equals the clique number.
#[must_use]
pub fn largest_cliques(cliques: &[Vec<String>]) -> Vec<Vec<String>> {
    let omega = clique_number(cliques);
    cliques.iter().filter(|c| c.len() == omega).cloned().collect()
}

/// Number of maximal cliques of each size.
#[must_use]
pub fn clique_size_census(cliques: &[Vec<String>]) -> BTreeMap<usize, usize> {
    let mut census = BTreeMap::new();
    for c in cliques {
        *census.entry(c.len()).or_insert(0) += 1;
    }
    census
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(groups: &[&[&str]]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| g.iter().map(|s| (*s).to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_graph_has_no_cliques() {
        let ug = UndirectedGraph::from_pairs(&[], &[]);
        assert!(maximal_cliques(&ug).is_empty());
        assert_eq!(clique_number(&[]), 0);
    }

    #[test]
    fn empty_graph_census_is_empty() {
        let cliques = maximal_cliques(&UndirectedGraph::from_pairs(&[], &[]));
        assert!(clique_size_census(&cliques).is_empty());
        assert!(largest_cliques(&cliques).is_empty());
    }

    #[test]
    fn single_node_is_its_own_clique() {
        let ug = UndirectedGraph::from_pairs(&["Solo"], &[]);
        assert_eq!(maximal_cliques(&ug), names(&[&["Solo"]]));
    }

    #[test]
    fn triangle_is_one_clique() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(maximal_cliques(&ug), names(&[&["A", "B", "C"]]));
    }

    #[test]
    fn non_maximal_subsets_are_not_reported() {
        // K4 on A..D plus a pendant E-D.
        let ug = UndirectedGraph::from_pairs(
            &[],
            &[("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D"), ("D", "E")],
        );
        let cliques = maximal_cliques(&ug);
        assert_eq!(cliques, names(&[&["A", "B", "C", "D"], &["D", "E"]]));
        assert_eq!(clique_number(&cliques), 4);
    }

    #[test]
    fn isolated_nodes_are_singleton_cliques() {
        let ug = UndirectedGraph::from_pairs(&["Solo"], &[("A", "B")]);
        assert_eq!(maximal_cliques(&ug), names(&[&["A", "B"], &["Solo"]]));
    }

    #[test]
    fn overlapping_triangles() {
        // Diamond with chord B-C: two triangles sharing an edge.
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("A", "C"), ("B", "C"), ("B", "D"), ("C", "D")]);
        let cliques = maximal_cliques(&ug);
        assert_eq!(cliques, names(&[&["A", "B", "C"], &["B", "C", "D"]]));
        assert_eq!(largest_cliques(&cliques).len(), 2);
        assert_eq!(clique_size_census(&cliques), BTreeMap::from([(3, 2)]));
    }

    #[test]
    fn square_has_four_edge_cliques() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let cliques = maximal_cliques(&ug);
        assert_eq!(cliques.len(), 4);
        assert!(cliques.iter().all(|c| c.len() == 2));
    }
}
