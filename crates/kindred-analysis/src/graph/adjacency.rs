//! Dense adjacency matrix shared by the spectral and census metrics.
//!
//! Row/column `i` corresponds to node position `i` in the graph the matrix
//! was built from; [`AdjacencyMatrix::ids`] gives the names in that order.
//! Entries are `0.0` or `1.0`.

use std::collections::{BTreeSet, HashMap};

use nalgebra::{DMatrix, DVector};
use petgraph::visit::EdgeRef;

use crate::graph::build::FamilyGraph;
use crate::graph::undirected::UndirectedGraph;

#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    matrix: DMatrix<f64>,
}

impl AdjacencyMatrix {
    /// Symmetric matrix of the undirected view.
    #[must_use]
    pub fn undirected(g: &UndirectedGraph) -> Self {
        let ids: Vec<String> = g.graph.node_weights().cloned().collect();
        let mut matrix = DMatrix::<f64>::zeros(ids.len(), ids.len());
        for e in g.graph.edge_references() {
            let (i, j) = (e.source().index(), e.target().index());
            matrix[(i, j)] = 1.0;
            matrix[(j, i)] = 1.0;
        }
        Self::from_parts(ids, matrix)
    }

    /// Arc matrix of the stored edges: `m[(u, v)] = 1` for every `u -> v`.
    ///
    /// Spouse edges contribute both arcs; parental edges keep their stored
    /// direction. Parallel edges collapse to a single arc.
    #[must_use]
    pub fn directed(g: &FamilyGraph) -> Self {
        let ids: Vec<String> = g.graph.node_weights().map(|n| n.name.clone()).collect();
        let mut matrix = DMatrix::<f64>::zeros(ids.len(), ids.len());
        for e in g.graph.edge_references() {
            let (i, j) = (e.source().index(), e.target().index());
            matrix[(i, j)] = 1.0;
            if e.weight().relation.is_symmetric() {
                matrix[(j, i)] = 1.0;
            }
        }
        Self::from_parts(ids, matrix)
    }

    fn from_parts(ids: Vec<String>, matrix: DMatrix<f64>) -> Self {
        let index = ids.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();
        Self { ids, index, matrix }
    }

    /// Number of rows (= columns = nodes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node names in row order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub const fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Whether there is an arc from row `i` to column `j`.
    #[must_use]
    pub fn has_arc(&self, i: usize, j: usize) -> bool {
        self.matrix[(i, j)] != 0.0
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.matrix == self.matrix.transpose()
    }

    /// `A · x`.
    #[must_use]
    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        &self.matrix * x
    }

    /// Unordered name pairs with a non-zero entry in either direction.
    #[must_use]
    pub fn to_connections(&self) -> BTreeSet<(String, String)> {
        let n = self.len();
        let mut pairs = BTreeSet::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.has_arc(i, j) || self.has_arc(j, i) {
                    let (a, b) = (&self.ids[i], &self.ids[j]);
                    let pair = if a <= b {
                        (a.clone(), b.clone())
                    } else {
                        (b.clone(), a.clone())
                    };
                    pairs.insert(pair);
                }
            }
        }
        pairs
    }
}
