//! Directed graph container.
//!
//! This module provides the [`DirectedGraph`] struct: an immutable vertex
//! set plus edge set built from caller-supplied sequences, with counts,
//! out-degree statistics, and persistence to an array store.
//!
//! # Example
//!
//! ```rust
//! use graphstash::graph::DirectedGraph;
//!
//! let graph = DirectedGraph::from_parts(vec![0, 1, 2], vec![(0, 1), (0, 1), (1, 2)]);
//!
//! assert_eq!(graph.num_vertices(), 3);
//! assert_eq!(graph.num_edges(), 2); // the duplicate (0, 1) collapses
//! ```

mod directed_graph;
mod storage;

pub use directed_graph::{DirectedGraph, GraphError, GraphResult, VertexId};
pub use storage::{DATASET_EDGES, DATASET_VERTICES};
