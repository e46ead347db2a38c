//! Unweighted shortest-path helpers over neighbour lists.

use std::collections::VecDeque;

/// Hop distance from `source` to every node; `None` when unreachable.
pub(crate) fn bfs_distances(nbrs: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; nbrs.len()];
    dist[source] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for &w in &nbrs[v] {
            if dist[w].is_none() {
                dist[w] = Some(next);
                queue.push_back(w);
            }
        }
    }

    dist
}
