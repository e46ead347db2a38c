//! Connected components of the undirected view.

use crate::graph::undirected::UndirectedGraph;

/// Component id per node position; ids are dense and assigned in order of
/// the lowest node position in each component.
#[must_use]
pub fn component_labels(g: &UndirectedGraph) -> Vec<usize> {
    labels_from_neighbors(&g.neighbor_lists()).0
}

/// Component labelling over raw neighbour lists, plus the component count.
///
/// Used directly by callers that edit the lists, such as Girvan–Newman.
pub(crate) fn labels_from_neighbors(nbrs: &[Vec<usize>]) -> (Vec<usize>, usize) {
    let n = nbrs.len();
    let mut label = vec![usize::MAX; n];
    let mut next = 0;

    for start in 0..n {
        if label[start] != usize::MAX {
            continue;
        }
        let mut stack = vec![start];
        label[start] = next;
        while let Some(v) = stack.pop() {
            for &w in &nbrs[v] {
                if label[w] == usize::MAX {
                    label[w] = next;
                    stack.push(w);
                }
            }
        }
        next += 1;
    }

    (label, next)
}

/// Connected components as sorted name lists.
///
/// Ordered by size descending, then by first member ascending.
#[must_use]
pub fn connected_components(g: &UndirectedGraph) -> Vec<Vec<String>> {
    let labels = component_labels(g);
    let count = labels.iter().copied().max().map_or(0, |m| m + 1);
    let mut groups: Vec<Vec<String>> = vec![Vec::new(); count];
    for (i, &c) in labels.iter().enumerate() {
        groups[c].push(g.name(i).to_string());
    }
    for group in &mut groups {
        group.sort_unstable();
    }
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
    groups
}

/// Node positions of the largest component (ties broken as in
/// [`connected_components`]). Empty for an empty graph.
#[must_use]
pub fn largest_component(g: &UndirectedGraph) -> Vec<usize> {
    connected_components(g)
        .into_iter()
        .next()
        .map(|names| names.iter().filter_map(|n| g.node_index(n)).map(|i| i.index()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_no_components() {
        let ug = UndirectedGraph::from_pairs(&[], &[]);
        assert!(connected_components(&ug).is_empty());
        assert!(largest_component(&ug).is_empty());
    }

    #[test]
    fn components_sorted_by_size_then_name() {
        let ug = UndirectedGraph::from_pairs(&["Z"], &[("D", "E"), ("A", "B"), ("B", "C")]);
        let comps = connected_components(&ug);
        assert_eq!(
            comps,
            vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec!["D".to_string(), "E".to_string()],
                vec!["Z".to_string()],
            ]
        );
    }

    #[test]
    fn labels_are_dense() {
        let ug = UndirectedGraph::from_pairs(&["X", "Y"], &[("A", "B")]);
        let labels = component_labels(&ug);
        let mut distinct = labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct, vec![0, 1, 2]);
    }

    #[test]
    fn neighbour_lists_report_component_count() {
        // 0-1, 2 alone, 3-4 after a removed 1-3 link.
        let nbrs = vec![vec![1], vec![0], vec![], vec![4], vec![3]];
        let (labels, count) = labels_from_neighbors(&nbrs);
        assert_eq!(count, 3);
        assert_eq!(labels, vec![0, 0, 1, 2, 2]);
        assert_eq!(labels_from_neighbors(&[]), (Vec::new(), 0));
    }

    #[test]
    fn largest_component_tie_breaks_on_name() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "D"), ("A", "B")]);
        let largest = largest_component(&ug);
        let mut names: Vec<&str> = largest.iter().map(|&i| ug.name(i)).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B"]);
    }
}
