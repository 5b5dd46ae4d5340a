//! Out-degree histogram plotting.
//!
//! This module turns an out-degree mapping into a frequency distribution
//! ([`Histogram`]) and renders it as an SVG bar chart, either to a file or
//! into an in-memory buffer ([`RenderTarget`]). The renderer only ever sees
//! aggregated degree → frequency data, never per-vertex detail.

pub mod svg;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;

/// Frequency distribution of out-degree values.
///
/// Maps each observed out-degree to the number of vertices carrying it.
/// Degrees nobody carries are absent from the map.
///
/// # Example
///
/// ```rust
/// use graphstash::plot::Histogram;
///
/// let hist = Histogram::from_degrees(vec![1, 1, 0]);
/// assert_eq!(hist.counts().get(&1), Some(&2));
/// assert_eq!(hist.counts().get(&0), Some(&1));
/// assert_eq!(hist.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: BTreeMap<usize, usize>,
}

impl Histogram {
    /// Builds the distribution from a sequence of per-vertex degrees.
    pub fn from_degrees<I>(degrees: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for degree in degrees {
            *counts.entry(degree).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// The degree → frequency mapping.
    pub fn counts(&self) -> &BTreeMap<usize, usize> {
        &self.counts
    }

    /// Total number of vertices across all bars.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The largest frequency of any single degree, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// The largest observed degree, `None` when empty.
    pub fn max_degree(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }

    /// Returns true if no degrees were observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Where a rendered chart goes.
///
/// The explicit file/buffer split replaces the interactive display mode of
/// typical plotting toolkits, which has no equivalent in a non-interactive
/// deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Write the SVG document to this path.
    File(PathBuf),
    /// Return the SVG document as a string.
    Buffer,
}

/// Renders a histogram to the given target.
///
/// Returns `Some(svg)` for [`RenderTarget::Buffer`] and `None` for
/// [`RenderTarget::File`].
///
/// # Errors
///
/// Propagates any error from creating or writing the output file.
pub fn render(hist: &Histogram, target: &RenderTarget) -> io::Result<Option<String>> {
    match target {
        RenderTarget::File(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            svg::render_svg(hist, &mut writer)?;
            writer.flush()?;
            log::debug!("wrote out-degree histogram to {}", path.display());
            Ok(None)
        }
        RenderTarget::Buffer => svg::render_svg_to_string(hist).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_frequencies() {
        let hist = Histogram::from_degrees(vec![0, 2, 2, 2, 5]);
        assert_eq!(hist.counts().get(&0), Some(&1));
        assert_eq!(hist.counts().get(&2), Some(&3));
        assert_eq!(hist.counts().get(&5), Some(&1));
        assert_eq!(hist.counts().get(&1), None);
    }

    #[test]
    fn test_histogram_empty() {
        let hist = Histogram::from_degrees(Vec::new());
        assert!(hist.is_empty());
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.max_count(), 0);
        assert_eq!(hist.max_degree(), None);
    }

    #[test]
    fn test_histogram_serializes_as_plain_map() {
        let hist = Histogram::from_degrees(vec![0, 1, 1]);
        let json = serde_json::to_string(&hist).unwrap();
        assert_eq!(json, r#"{"0":1,"1":2}"#);
    }

    #[test]
    fn test_histogram_extremes() {
        let hist = Histogram::from_degrees(vec![3, 3, 7, 1]);
        assert_eq!(hist.max_degree(), Some(7));
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_render_to_buffer() {
        let hist = Histogram::from_degrees(vec![0, 1, 1]);
        let svg = render(&hist, &RenderTarget::Buffer).unwrap().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.svg");

        let hist = Histogram::from_degrees(vec![0, 1, 1, 2]);
        let returned = render(&hist, &RenderTarget::File(path.clone())).unwrap();
        assert!(returned.is_none());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Out-degree histogram"));
    }

    #[test]
    fn test_render_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("hist.svg");

        let hist = Histogram::from_degrees(vec![1]);
        assert!(render(&hist, &RenderTarget::File(path)).is_err());
    }
}
