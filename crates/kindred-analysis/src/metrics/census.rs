//! Dyad and triad census (Holland & Leinhardt MAN typology).
//!
//! Every unordered pair of nodes is a dyad: **m**utual (arcs both ways),
//! **a**symmetric (one arc), or **n**ull (no arc). Every unordered triple is
//! a triad, classified into one of 16 isomorphism classes named by its
//! M-A-N counts plus a suffix (`D`own, `U`p, `C`yclic, `T`ransitive).
//!
//! Both censuses read an [`AdjacencyMatrix`]. On the undirected view every
//! tie is mutual, so only `003`, `102`, `201`, and `300` occur; the
//! directed matrix keeps parent arcs one-way and exercises the full table.
//!
//! The counts always total `C(N, 2)` and `C(N, 3)`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::instrument;

use crate::graph::adjacency::AdjacencyMatrix;

// ---------------------------------------------------------------------------
// Dyads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DyadCensus {
    pub mutual: u64,
    pub asymmetric: u64,
    pub null: u64,
}

impl DyadCensus {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.mutual + self.asymmetric + self.null
    }
}

/// Classify every unordered pair.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.len()))]
pub fn dyad_census(adj: &AdjacencyMatrix) -> DyadCensus {
    let n = adj.len();
    let mut census = DyadCensus::default();
    for i in 0..n {
        for j in (i + 1)..n {
            match (adj.has_arc(i, j), adj.has_arc(j, i)) {
                (true, true) => census.mutual += 1,
                (false, false) => census.null += 1,
                _ => census.asymmetric += 1,
            }
        }
    }
    census
}

// ---------------------------------------------------------------------------
// Triads
// ---------------------------------------------------------------------------

/// The 16 triad classes, in conventional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriadType {
    T003,
    T012,
    T102,
    T021D,
    T021U,
    T021C,
    T111D,
    T111U,
    T030T,
    T030C,
    T201,
    T120D,
    T120U,
    T120C,
    T210,
    T300,
}

impl TriadType {
    pub const ALL: [Self; 16] = [
        Self::T003,
        Self::T012,
        Self::T102,
        Self::T021D,
        Self::T021U,
        Self::T021C,
        Self::T111D,
        Self::T111U,
        Self::T030T,
        Self::T030C,
        Self::T201,
        Self::T120D,
        Self::T120U,
        Self::T120C,
        Self::T210,
        Self::T300,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::T003 => "003",
            Self::T012 => "012",
            Self::T102 => "102",
            Self::T021D => "021D",
            Self::T021U => "021U",
            Self::T021C => "021C",
            Self::T111D => "111D",
            Self::T111U => "111U",
            Self::T030T => "030T",
            Self::T030C => "030C",
            Self::T201 => "201",
            Self::T120D => "120D",
            Self::T120U => "120U",
            Self::T120C => "120C",
            Self::T210 => "210",
            Self::T300 => "300",
        }
    }

    const fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TriadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Class (1-based position in [`TriadType::ALL`]) for each of the 64 arc
/// configurations of a triple `(v, u, w)`. The configuration code is
///
/// ```text
/// v→u: 1   u→v: 2   v→w: 4   w→v: 8   u→w: 16   w→u: 32
/// ```
const TRICODES: [u8; 64] = [
    1, 2, 2, 3, 2, 4, 6, 8, 2, 6, 5, 7, 3, 8, 7, 11, 2, 6, 4, 8, 5, 9, 9, 13, 6, 10, 9, 14, 7, 14, 12, 15,
    2, 5, 6, 7, 6, 9, 10, 14, 4, 9, 9, 12, 8, 13, 14, 15, 3, 7, 8, 11, 7, 12, 14, 15, 8, 14, 13, 15, 11,
    15, 15, 16,
];

/// Triad class of the triple `(v, u, w)`.
#[must_use]
pub fn classify_triad(adj: &AdjacencyMatrix, v: usize, u: usize, w: usize) -> TriadType {
    let bit = |a: usize, b: usize, weight: usize| if adj.has_arc(a, b) { weight } else { 0 };
    let code = bit(v, u, 1) + bit(u, v, 2) + bit(v, w, 4) + bit(w, v, 8) + bit(u, w, 16) + bit(w, u, 32);
    TriadType::ALL[usize::from(TRICODES[code]) - 1]
}

/// Counts per triad class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriadCensus {
    counts: [u64; 16],
}

impl TriadCensus {
    #[must_use]
    pub const fn get(&self, kind: TriadType) -> u64 {
        self.counts[kind.position()]
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(class, count)` in conventional order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (TriadType, u64)> + '_ {
        TriadType::ALL.iter().map(|&t| (t, self.get(t)))
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&'static str, u64> {
        self.iter().map(|(t, c)| (t.name(), c)).collect()
    }
}

impl Serialize for TriadCensus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TriadType::ALL.len()))?;
        for (t, c) in self.iter() {
            map.serialize_entry(t.name(), &c)?;
        }
        map.end()
    }
}

/// Classify every unordered triple.
///
/// Triples with no arc at all are counted by subtraction, so the work is
/// proportional to the triples that touch at least one tie.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.len()))]
pub fn triad_census(adj: &AdjacencyMatrix) -> TriadCensus {
    let n = adj.len();
    let mut census = TriadCensus::default();

    let linked: Vec<Vec<bool>> = (0..n)
        .map(|i| (0..n).map(|j| adj.has_arc(i, j) || adj.has_arc(j, i)).collect())
        .collect();

    let mut touched = 0_u64;
    for v in 0..n {
        for u in (v + 1)..n {
            for w in (u + 1)..n {
                if !(linked[v][u] || linked[v][w] || linked[u][w]) {
                    continue;
                }
                census.counts[classify_triad(adj, v, u, w).position()] += 1;
                touched += 1;
            }
        }
    }

    census.counts[TriadType::T003.position()] = choose3(n) - touched;
    census
}

fn choose3(n: usize) -> u64 {
    if n < 3 {
        return 0;
    }
    let n = n as u64;
    n * (n - 1) * (n - 2) / 6
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
