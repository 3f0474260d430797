//! Orders and orients units within one cluster.
//!
//! Each unit (a contig, or a path assembled earlier) has two endpoint nodes
//! joined by a sister edge. Hi-C links between endpoints are turned into a
//! confidence graph, and paths are read off by walking sister and confidence
//! edges alternately.

pub mod assemble;
pub mod confidence;
pub mod graph;

pub use assemble::{assemble, break_cycle, reverse_path};
pub use confidence::{make_confidence_graph, second_largest};
pub use graph::{Edge, End, Graph, Node, NodeGraph, NodeId, Path, PathId};

use crate::libs::error::HicError;
use crate::libs::tour::Tour;

impl NodeGraph {
    /// Confidence graph of the raw links, then linear paths through it.
    pub fn anchor(&self) -> Result<Vec<Tour>, HicError> {
        let confidence_graph = make_confidence_graph(self, self.links())?;
        assemble(self, &confidence_graph)
    }
}
