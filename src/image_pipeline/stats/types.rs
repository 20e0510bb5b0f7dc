//! Statistic result types

use ndarray::{Array2, ArrayView1};

use crate::image_pipeline::common::error::{Result, StatsError};
use crate::image_pipeline::raw::types::basename;

/// Per-channel means of one block, indexed by channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMeans(Vec<f64>);

impl ChannelMeans {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, channel: usize) -> Option<f64> {
        self.0.get(channel).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Means for every block and channel of a file, shape `(blocks, channels)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanMatrix {
    means: Array2<f64>,
}

impl MeanMatrix {
    /// Stacks per-block results in block order. All rows must have the same
    /// channel count.
    pub fn from_rows(rows: Vec<ChannelMeans>) -> Result<Self> {
        let blocks = rows.len();
        let channels = rows.first().map_or(0, ChannelMeans::len);

        if let Some(bad) = rows.iter().find(|row| row.len() != channels) {
            return Err(StatsError::InvalidGeometryError(format!(
                "inconsistent channel count across blocks: {} vs {}",
                bad.len(),
                channels
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flat_map(|row| row.0).collect();
        let means = Array2::from_shape_vec((blocks, channels), flat)
            .map_err(|e| StatsError::InvalidGeometryError(e.to_string()))?;

        Ok(Self { means })
    }

    pub fn blocks(&self) -> usize {
        self.means.nrows()
    }

    pub fn channels(&self) -> usize {
        self.means.ncols()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.means
    }

    /// Mean of `channel` in `block`, or `ChannelIndexError` when either
    /// index is outside the matrix.
    pub fn get(&self, block: usize, channel: usize) -> Result<f64> {
        self.means
            .get((block, channel))
            .copied()
            .ok_or(StatsError::ChannelIndexError {
                block,
                channel,
                blocks: self.blocks(),
                channels: self.channels(),
            })
    }

    pub fn block(&self, block: usize) -> Option<ArrayView1<'_, f64>> {
        (block < self.blocks()).then(|| self.means.row(block))
    }

    /// Column names of the flattened `(block, channel)` table
    pub fn column_names(&self) -> Vec<String> {
        (0..self.blocks())
            .flat_map(|b| (0..self.channels()).map(move |c| format!("B{}_CH{}", b, c)))
            .collect()
    }

    /// Values in the same order as [`MeanMatrix::column_names`]
    pub fn row(&self) -> Vec<f64> {
        self.means.iter().copied().collect()
    }
}

/// Canonical per-file result
#[derive(Debug, Clone, PartialEq)]
pub struct FileStats {
    /// Identifier as supplied by the file source
    pub identifier: String,
    /// Basename of the identifier
    pub filename: String,
    pub means: MeanMatrix,
}

impl FileStats {
    pub fn new(identifier: impl Into<String>, means: MeanMatrix) -> Self {
        let identifier = identifier.into();
        Self {
            filename: basename(&identifier),
            identifier,
            means,
        }
    }
}

/// Row of the four-column legacy table (`Filename`, `CH0`, `CH1`, `CH2`).
///
/// Despite the names, the three values are channel 1 of blocks 0, 1 and 2,
/// not three channels of one block. See [`LegacyRecord::from_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyRecord {
    pub filename: String,
    pub ch0: f64,
    pub ch1: f64,
    pub ch2: f64,
}
