//! Binary array storage.
//!
//! This module provides a small hierarchical container file: an [`ArrayStore`]
//! holds named [`Group`]s, and each group holds named integer-array
//! [`Dataset`]s with an explicit shape. The whole store is encoded to disk
//! with bincode and read back in one pass; file handles are scoped to a
//! single open or save call.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while reading or writing an array store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to open, create, or flush the store file.
    #[error("failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode the store into its binary form.
    #[error("failed to encode store: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// The file contents could not be decoded as an array store.
    #[error("failed to decode store: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// The requested group does not exist in the store.
    #[error("group '{0}' not found in store")]
    GroupNotFound(String),

    /// A group with the same name already exists.
    #[error("group '{0}' already exists in store")]
    GroupExists(String),

    /// The requested dataset does not exist in the group.
    #[error("dataset '{0}' not found in group")]
    DatasetNotFound(String),

    /// A dataset does not have the shape the caller expects.
    #[error("dataset '{name}': expected {expected}, found {actual}")]
    ShapeMismatch {
        /// Name of the offending dataset
        name: String,
        /// Human-readable description of the expected shape
        expected: String,
        /// Human-readable description of the actual shape
        actual: String,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A named, shaped integer array.
///
/// Data is stored flat in row-major order; `shape` gives the extent of each
/// dimension. The product of the shape always equals the data length for
/// datasets produced by this module, and is re-checked when a store is
/// opened from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    shape: Vec<u64>,
    data: Vec<i64>,
}

impl Dataset {
    /// Creates a 1-D dataset from a vector of values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphstash::store::Dataset;
    ///
    /// let dataset = Dataset::from_values(vec![5, 6, 7]);
    /// assert_eq!(dataset.shape(), &[3]);
    /// assert_eq!(dataset.rank(), 1);
    /// ```
    pub fn from_values(values: Vec<i64>) -> Self {
        Self {
            shape: vec![values.len() as u64],
            data: values,
        }
    }

    /// Creates a 2-D dataset of shape `[N, 2]` from a slice of pairs.
    ///
    /// Row `i` holds the two elements of `pairs[i]`, in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphstash::store::Dataset;
    ///
    /// let dataset = Dataset::from_pairs(&[(5, 6), (6, 7)]);
    /// assert_eq!(dataset.shape(), &[2, 2]);
    /// assert_eq!(dataset.data(), &[5, 6, 6, 7]);
    /// ```
    pub fn from_pairs(pairs: &[(i64, i64)]) -> Self {
        let mut data = Vec::with_capacity(pairs.len() * 2);
        for &(first, second) in pairs {
            data.push(first);
            data.push(second);
        }
        Self {
            shape: vec![pairs.len() as u64, 2],
            data,
        }
    }

    /// Returns the extent of each dimension.
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the flat row-major data.
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Number of elements the shape describes, or `None` on overflow.
    fn shape_len(&self) -> Option<u64> {
        self.shape.iter().try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
    }
}

/// A named collection of datasets within a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    datasets: BTreeMap<String, Dataset>,
}

impl Group {
    /// Inserts a dataset under `name`, replacing any dataset already stored
    /// under that name within this group.
    pub fn create_dataset(&mut self, name: &str, dataset: Dataset) {
        self.datasets.insert(name.to_string(), dataset);
    }

    /// Looks up a dataset by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatasetNotFound`] if no dataset has that name.
    pub fn dataset(&self, name: &str) -> StoreResult<&Dataset> {
        self.datasets
            .get(name)
            .ok_or_else(|| StoreError::DatasetNotFound(name.to_string()))
    }

    /// Reads a dataset as a flat vector of values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatasetNotFound`] if the dataset is absent, or
    /// [`StoreError::ShapeMismatch`] if it is not 1-D.
    pub fn read_values(&self, name: &str) -> StoreResult<Vec<i64>> {
        let dataset = self.dataset(name)?;
        if dataset.rank() != 1 {
            return Err(StoreError::ShapeMismatch {
                name: name.to_string(),
                expected: "a 1-D dataset".to_string(),
                actual: format!("shape {:?}", dataset.shape()),
            });
        }
        Ok(dataset.data().to_vec())
    }

    /// Reads a dataset of shape `[N, 2]` as a vector of pairs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatasetNotFound`] if the dataset is absent, or
    /// [`StoreError::ShapeMismatch`] if it is not 2-D with two columns.
    pub fn read_pairs(&self, name: &str) -> StoreResult<Vec<(i64, i64)>> {
        let dataset = self.dataset(name)?;
        match dataset.shape() {
            [_, 2] => Ok(dataset
                .data()
                .chunks_exact(2)
                .map(|row| (row[0], row[1]))
                .collect()),
            other => Err(StoreError::ShapeMismatch {
                name: name.to_string(),
                expected: "a 2-D dataset with two columns".to_string(),
                actual: format!("shape {other:?}"),
            }),
        }
    }

    /// Returns the dataset names in this group, sorted.
    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.keys().map(String::as_str).collect()
    }

    /// Returns the number of datasets in this group.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Returns true if the group holds no datasets.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// A hierarchical array-storage file: named groups of named datasets.
///
/// The store is a plain in-memory value; [`ArrayStore::open`] and
/// [`ArrayStore::save`] move it to and from disk in one scoped operation
/// each, so no file handle outlives a call.
///
/// # Example
///
/// ```rust
/// use graphstash::store::{ArrayStore, Dataset};
///
/// let mut store = ArrayStore::new();
/// let group = store.create_group("g1").unwrap();
/// group.create_dataset("vertices", Dataset::from_values(vec![0, 1, 2]));
///
/// assert!(store.contains_group("g1"));
/// assert_eq!(store.group("g1").unwrap().read_values("vertices").unwrap(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayStore {
    groups: BTreeMap<String, Group>,
}

impl ArrayStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a store from a file.
    ///
    /// The file handle is released before this function returns, on success
    /// and on every error path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be opened,
    /// [`StoreError::Decode`] if its contents are not a valid store, or
    /// [`StoreError::ShapeMismatch`] if a dataset's payload disagrees with
    /// its declared shape.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let store: Self = bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        store.validate()?;
        log::debug!(
            "opened store {} with {} group(s)",
            path.display(),
            store.groups.len()
        );
        Ok(store)
    }

    /// Writes the store to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be created or written,
    /// or [`StoreError::Encode`] if encoding fails.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        writer.flush()?;
        log::debug!(
            "saved store {} with {} group(s)",
            path.display(),
            self.groups.len()
        );
        Ok(())
    }

    /// Creates a new group and returns a mutable handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupExists`] if a group with the same name is
    /// already present. Existing groups are never overwritten; callers that
    /// want a fresh group must pick a new name or start from a new store.
    pub fn create_group(&mut self, name: &str) -> StoreResult<&mut Group> {
        if self.groups.contains_key(name) {
            return Err(StoreError::GroupExists(name.to_string()));
        }
        Ok(self.groups.entry(name.to_string()).or_default())
    }

    /// Looks up a group by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupNotFound`] if no group has that name.
    pub fn group(&self, name: &str) -> StoreResult<&Group> {
        self.groups
            .get(name)
            .ok_or_else(|| StoreError::GroupNotFound(name.to_string()))
    }

    /// Returns true if a group with the given name exists.
    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Returns the group names in this store, sorted.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Checks every dataset's payload length against its declared shape.
    fn validate(&self) -> StoreResult<()> {
        for (group_name, group) in &self.groups {
            for (dataset_name, dataset) in &group.datasets {
                if dataset.shape_len() != Some(dataset.data.len() as u64) {
                    return Err(StoreError::ShapeMismatch {
                        name: format!("{group_name}/{dataset_name}"),
                        expected: format!("a payload matching shape {:?}", dataset.shape),
                        actual: format!("{} element(s)", dataset.data.len()),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ArrayStore {
        let mut store = ArrayStore::new();
        let group = store.create_group("g1").unwrap();
        group.create_dataset("vertices", Dataset::from_values(vec![5, 6, 7]));
        group.create_dataset("edges", Dataset::from_pairs(&[(5, 6), (6, 7)]));
        store
    }

    #[test]
    fn test_dataset_from_values_shape() {
        let dataset = Dataset::from_values(vec![1, 2, 3, 4]);
        assert_eq!(dataset.shape(), &[4]);
        assert_eq!(dataset.rank(), 1);
        assert_eq!(dataset.data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_dataset_from_pairs_is_row_major() {
        let dataset = Dataset::from_pairs(&[(0, 1), (2, 3), (4, 5)]);
        assert_eq!(dataset.shape(), &[3, 2]);
        assert_eq!(dataset.data(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_datasets_are_valid() {
        let values = Dataset::from_values(Vec::new());
        assert_eq!(values.shape(), &[0]);
        let pairs = Dataset::from_pairs(&[]);
        assert_eq!(pairs.shape(), &[0, 2]);
    }

    #[test]
    fn test_create_group_rejects_collision() {
        let mut store = sample_store();
        let err = store.create_group("g1").unwrap_err();
        assert!(matches!(err, StoreError::GroupExists(name) if name == "g1"));
    }

    #[test]
    fn test_group_lookup_missing() {
        let store = sample_store();
        let err = store.group("g2").unwrap_err();
        assert!(matches!(err, StoreError::GroupNotFound(name) if name == "g2"));
    }

    #[test]
    fn test_dataset_lookup_missing() {
        let store = sample_store();
        let err = store.group("g1").unwrap().dataset("weights").unwrap_err();
        assert!(matches!(err, StoreError::DatasetNotFound(name) if name == "weights"));
    }

    #[test]
    fn test_read_values_rejects_rank_2() {
        let store = sample_store();
        let err = store.group("g1").unwrap().read_values("edges").unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_read_pairs_rejects_rank_1() {
        let store = sample_store();
        let err = store.group("g1").unwrap().read_pairs("vertices").unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_read_pairs_rejects_wrong_width() {
        let mut store = ArrayStore::new();
        let group = store.create_group("g1").unwrap();
        group.create_dataset(
            "edges",
            Dataset {
                shape: vec![2, 3],
                data: vec![0, 1, 2, 3, 4, 5],
            },
        );
        let err = store.group("g1").unwrap().read_pairs("edges").unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_save_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.stash");

        let store = sample_store();
        store.save(&path).unwrap();

        let reloaded = ArrayStore::open(&path).unwrap();
        assert_eq!(reloaded, store);
        assert_eq!(
            reloaded.group("g1").unwrap().read_pairs("edges").unwrap(),
            vec![(5, 6), (6, 7)]
        );
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArrayStore::open(&dir.path().join("absent.stash")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn test_open_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.stash");
        std::fs::write(&path, b"not a store").unwrap();
        let err = ArrayStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn test_open_rejects_inconsistent_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lying.stash");

        let mut store = ArrayStore::new();
        let group = store.create_group("g1").unwrap();
        group.create_dataset(
            "vertices",
            Dataset {
                shape: vec![5],
                data: vec![1, 2],
            },
        );
        store.save(&path).unwrap();

        let err = ArrayStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_group_names_sorted() {
        let mut store = ArrayStore::new();
        store.create_group("zeta").unwrap();
        store.create_group("alpha").unwrap();
        assert_eq!(store.group_names(), vec!["alpha", "zeta"]);
    }
}
