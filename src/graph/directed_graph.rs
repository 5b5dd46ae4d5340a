//! Directed graph implementation using petgraph.
//!
//! Provides an immutable directed graph built from vertex and edge
//! sequences, with set-semantics deduplication and out-degree statistics.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;

use crate::plot::{self, Histogram, RenderTarget};
use crate::store::StoreError;

/// Identifier of a vertex. Matches the 64-bit signed integer arrays the
/// storage format persists.
pub type VertexId = i64;

/// Errors that can occur while constructing or loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The backing array store failed or held malformed datasets.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// An edge referenced a vertex absent from the vertex set while the
    /// validating construction path was in use.
    #[error("edge ({from}, {to}) references vertex {missing}, which is not in the vertex set")]
    DanglingEndpoint {
        /// Source endpoint of the offending edge
        from: VertexId,
        /// Target endpoint of the offending edge
        to: VertexId,
        /// The endpoint missing from the vertex set
        missing: VertexId,
    },
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Node weight: a vertex id plus whether the id was named in the
/// constructor's vertex sequence. Edge endpoints may intern nodes without
/// joining the vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Vertex {
    id: VertexId,
    declared: bool,
}

/// An immutable directed graph over integer vertex ids.
///
/// The graph is built once from a sequence of vertices and a sequence of
/// `(from, to)` edges; duplicates in either input are silently collapsed.
/// Membership cannot change afterwards, so every derived statistic depends
/// only on the construction inputs.
///
/// Edge endpoints are not required to belong to the vertex set; use
/// [`DirectedGraph::from_parts_validated`] to opt into that check.
///
/// # Example
///
/// ```rust
/// use graphstash::graph::DirectedGraph;
///
/// let graph = DirectedGraph::from_parts(vec![0, 1, 2], vec![(0, 1), (1, 2)]);
///
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.num_edges(), 2);
/// assert!(graph.contains_edge(0, 1));
/// assert!(!graph.contains_edge(1, 0));
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph {
    /// The underlying directed graph
    graph: DiGraph<Vertex, ()>,
    /// Maps vertex ids to their node indices for O(1) lookup
    vertex_indices: HashMap<VertexId, NodeIndex>,
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self {
            graph: DiGraph::new(),
            vertex_indices: HashMap::new(),
        }
    }
}

impl DirectedGraph {
    /// Builds a graph from vertex and edge sequences.
    ///
    /// Both inputs may contain duplicates; they are deduplicated with set
    /// semantics. Insertion order of first occurrence is preserved for
    /// iteration and display. Empty inputs produce a valid empty graph.
    ///
    /// Edges whose endpoints are absent from the vertex set are accepted;
    /// such endpoints count for [`num_edges`](Self::num_edges) but never
    /// appear in the vertex set or the out-degree mapping.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphstash::graph::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_parts(vec![1, 2, 1], vec![(1, 2), (2, 2)]);
    /// assert_eq!(graph.num_vertices(), 2);
    /// assert_eq!(graph.num_edges(), 2);
    /// ```
    pub fn from_parts<V, E>(vertices: V, edges: E) -> Self
    where
        V: IntoIterator<Item = VertexId>,
        E: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut graph = Self::default();
        for id in vertices {
            graph.intern_vertex(id, true);
        }
        for (from, to) in edges {
            graph.intern_edge(from, to);
        }
        graph
    }

    /// Builds a graph like [`from_parts`](Self::from_parts), additionally
    /// requiring every edge endpoint to belong to the vertex set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingEndpoint`] for the first edge whose
    /// source or target is not in the deduplicated vertex sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphstash::graph::DirectedGraph;
    ///
    /// assert!(DirectedGraph::from_parts_validated(vec![0, 1], vec![(0, 1)]).is_ok());
    /// assert!(DirectedGraph::from_parts_validated(vec![0, 1], vec![(0, 9)]).is_err());
    /// ```
    pub fn from_parts_validated<V, E>(vertices: V, edges: E) -> GraphResult<Self>
    where
        V: IntoIterator<Item = VertexId>,
        E: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut graph = Self::default();
        for id in vertices {
            graph.intern_vertex(id, true);
        }
        for (from, to) in edges {
            for endpoint in [from, to] {
                if !graph.contains_vertex(endpoint) {
                    return Err(GraphError::DanglingEndpoint {
                        from,
                        to,
                        missing: endpoint,
                    });
                }
            }
            graph.intern_edge(from, to);
        }
        Ok(graph)
    }

    /// Returns the number of distinct vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphstash::graph::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_parts(vec![7, 7, 8], Vec::new());
    /// assert_eq!(graph.num_vertices(), 2);
    /// ```
    pub fn num_vertices(&self) -> usize {
        self.graph.node_weights().filter(|v| v.declared).count()
    }

    /// Returns the number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Reports the vertex count on the console.
    pub fn print_num_vertices(&self) {
        println!("The graph has {} (unique) vertices.", self.num_vertices());
    }

    /// Reports the edge count on the console.
    pub fn print_num_edges(&self) {
        println!("The graph has {} (unique) edges.", self.num_edges());
    }

    /// Returns true if the vertex set is empty.
    pub fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }

    /// Returns true if the vertex set contains `id`.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex_indices
            .get(&id)
            .and_then(|&idx| self.graph.node_weight(idx))
            .is_some_and(|vertex| vertex.declared)
    }

    /// Returns true if the edge set contains `(from, to)`.
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        let (Some(&from_idx), Some(&to_idx)) =
            (self.vertex_indices.get(&from), self.vertex_indices.get(&to))
        else {
            return false;
        };
        self.graph.contains_edge(from_idx, to_idx)
    }

    /// Returns the vertex set in insertion order.
    pub fn vertices(&self) -> Vec<VertexId> {
        self.graph
            .node_weights()
            .filter(|vertex| vertex.declared)
            .map(|vertex| vertex.id)
            .collect()
    }

    /// Returns the edge set in insertion order of first occurrence.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.graph
            .edge_references()
            .filter_map(|edge| {
                let from = self.graph.node_weight(edge.source())?;
                let to = self.graph.node_weight(edge.target())?;
                Some((from.id, to.id))
            })
            .collect()
    }

    /// Computes the out-degree of every vertex.
    ///
    /// The mapping is total over the vertex set: vertices with no outgoing
    /// edges are present with value 0. The result is recomputed on each call
    /// from the edge set alone.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphstash::graph::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_parts(vec![0, 1, 2], vec![(0, 1), (0, 1), (1, 2)]);
    /// let degrees = graph.out_degrees();
    ///
    /// assert_eq!(degrees.len(), 3);
    /// assert_eq!(degrees[&0], 1);
    /// assert_eq!(degrees[&1], 1);
    /// assert_eq!(degrees[&2], 0); // sink vertex still listed
    /// ```
    pub fn out_degrees(&self) -> BTreeMap<VertexId, usize> {
        self.graph
            .node_indices()
            .filter_map(|idx| {
                let vertex = self.graph.node_weight(idx)?;
                vertex.declared.then(|| {
                    let degree = self.graph.edges_directed(idx, Direction::Outgoing).count();
                    (vertex.id, degree)
                })
            })
            .collect()
    }

    /// Builds the out-degree frequency distribution: how many vertices have
    /// each out-degree value.
    pub fn out_degree_histogram(&self) -> Histogram {
        Histogram::from_degrees(self.out_degrees().into_values())
    }

    /// Renders the out-degree histogram as an SVG bar chart.
    ///
    /// With [`RenderTarget::File`] the chart is written to the given path
    /// and `None` is returned; with [`RenderTarget::Buffer`] the SVG
    /// document is returned as `Some(String)` and nothing touches the
    /// filesystem. There is no interactive display mode.
    ///
    /// # Errors
    ///
    /// Propagates any error from creating or writing the output file.
    pub fn plot_out_degrees(&self, target: &RenderTarget) -> io::Result<Option<String>> {
        plot::render(&self.out_degree_histogram(), target)
    }

    /// Interns `id`, marking it as part of the vertex set when `declared`.
    ///
    /// Returns the existing index untouched for ids seen before; declared
    /// vertices are always interned before any edge endpoint, so a declared
    /// node is never demoted by a later endpoint.
    fn intern_vertex(&mut self, id: VertexId, declared: bool) -> NodeIndex {
        if let Some(&idx) = self.vertex_indices.get(&id) {
            return idx;
        }

        let idx = self.graph.add_node(Vertex { id, declared });
        self.vertex_indices.insert(id, idx);
        idx
    }

    /// Interns an edge, collapsing duplicates of the same `(from, to)` pair.
    fn intern_edge(&mut self, from: VertexId, to: VertexId) {
        let from_idx = self.intern_vertex(from, false);
        let to_idx = self.intern_vertex(to, false);
        self.graph.update_edge(from_idx, to_idx, ());
    }

    /// The vertex set as an ordered set, for order-independent comparison.
    fn vertex_set(&self) -> BTreeSet<VertexId> {
        self.vertices().into_iter().collect()
    }

    /// The edge set as an ordered set, for order-independent comparison.
    fn edge_set(&self) -> BTreeSet<(VertexId, VertexId)> {
        self.edges().into_iter().collect()
    }
}

/// Order-independent equality over the vertex set and edge set.
impl PartialEq for DirectedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_set() == other.vertex_set() && self.edge_set() == other.edge_set()
    }
}

impl Eq for DirectedGraph {}
