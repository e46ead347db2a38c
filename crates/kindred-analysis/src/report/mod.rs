//! Ranking reporter: merged node tables and top-N views.

pub mod merge;
pub mod rank;

pub use merge::{NodeRow, merge, write_csv};
pub use rank::{RankedEdge, RankedEntry, top_edges, top_n};
