//! Graph persistence over the array store.
//!
//! A graph is stored as two datasets under a named group: `vertices`
//! (1-D) and `edges` (N×2, column 0 = from, column 1 = to). Loading goes
//! through the same deduplicating constructor as direct construction, so a
//! save→load round trip reproduces the original vertex and edge sets.

use std::path::Path;

use crate::graph::{DirectedGraph, GraphResult};
use crate::store::{ArrayStore, Dataset};

/// Name of the 1-D vertex-id dataset within a graph group.
pub const DATASET_VERTICES: &str = "vertices";

/// Name of the N×2 edge dataset within a graph group.
pub const DATASET_EDGES: &str = "edges";

impl DirectedGraph {
    /// Serializes the graph under `group_name` within the store at `path`.
    ///
    /// The file is created when absent; when it already exists, its other
    /// groups are preserved and the new group is added alongside them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupExists`](crate::store::StoreError::GroupExists)
    /// if the group is already present — existing graphs are never
    /// overwritten — and propagates any store I/O or encoding failure.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use std::path::Path;
    /// use graphstash::graph::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_parts(vec![5, 6, 7], vec![(5, 6), (6, 7)]);
    /// graph.save_to_store(Path::new("my_graph.stash"), "g1")?;
    /// ```
    pub fn save_to_store(&self, path: &Path, group_name: &str) -> GraphResult<()> {
        let mut store = if path.exists() {
            ArrayStore::open(path)?
        } else {
            ArrayStore::new()
        };

        let group = store.create_group(group_name)?;
        group.create_dataset(DATASET_VERTICES, Dataset::from_values(self.vertices()));
        group.create_dataset(DATASET_EDGES, Dataset::from_pairs(&self.edges()));
        store.save(path)?;

        log::debug!(
            "saved graph ({} vertices, {} edges) to {} group '{}'",
            self.num_vertices(),
            self.num_edges(),
            path.display(),
            group_name
        );
        Ok(())
    }

    /// Reconstructs a graph from `group_name` within the store at `path`.
    ///
    /// # Errors
    ///
    /// Fails loudly when the file is missing or undecodable, the group or
    /// either dataset is absent, or the datasets do not have the expected
    /// ranks (1-D vertices, N×2 edges). No recovery is attempted.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use std::path::Path;
    /// use graphstash::graph::DirectedGraph;
    ///
    /// let graph = DirectedGraph::load_from_store(Path::new("my_graph.stash"), "g1")?;
    /// graph.print_num_vertices();
    /// ```
    pub fn load_from_store(path: &Path, group_name: &str) -> GraphResult<Self> {
        let store = ArrayStore::open(path)?;
        let group = store.group(group_name)?;
        let vertices = group.read_values(DATASET_VERTICES)?;
        let edges = group.read_pairs(DATASET_EDGES)?;

        log::debug!(
            "loaded graph ({} vertices, {} edges) from {} group '{}'",
            vertices.len(),
            edges.len(),
            path.display(),
            group_name
        );
        Ok(Self::from_parts(vertices, edges))
    }
}
