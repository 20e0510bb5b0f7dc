//! Raw stack data types

use std::path::Path;

use ndarray::{ArrayView2, ArrayView3, Axis};

use crate::image_pipeline::common::error::{Result, StatsError};

/// Shape of the stacked images inside a raw file.
///
/// The format has no header, so this is always supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    stack_depth: usize,
    rows: usize,
    cols: usize,
    channels: usize,
    block_len: usize,
}

impl Geometry {
    /// Validates that every dimension is positive and that the full stack
    /// size fits in `usize`.
    pub fn new(stack_depth: usize, rows: usize, cols: usize, channels: usize) -> Result<Self> {
        if stack_depth == 0 || rows == 0 || cols == 0 || channels == 0 {
            return Err(StatsError::InvalidGeometryError(format!(
                "all dimensions must be positive (stack_depth={}, rows={}, cols={}, channels={})",
                stack_depth, rows, cols, channels
            )));
        }

        let overflow = || {
            StatsError::InvalidGeometryError(format!(
                "{}x{}x{}x{} overflows the addressable size",
                stack_depth, rows, cols, channels
            ))
        };

        let block_len = rows
            .checked_mul(cols)
            .and_then(|pixels| pixels.checked_mul(channels))
            .ok_or_else(overflow)?;
        block_len.checked_mul(stack_depth).ok_or_else(overflow)?;

        Ok(Self {
            stack_depth,
            rows,
            cols,
            channels,
            block_len,
        })
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples in one stacked image (`rows * cols * channels`)
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Bytes needed to hold `stack_depth` blocks
    pub fn required_len(&self) -> usize {
        self.block_len * self.stack_depth
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.channels)
    }
}

/// One raw file as handed over by a file source
#[derive(Debug, Clone)]
pub struct RawFile {
    /// Path-like identifier of the file
    pub identifier: String,
    /// Complete file content, 8-bit samples
    pub data: Vec<u8>,
}

impl RawFile {
    pub fn new(identifier: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            identifier: identifier.into(),
            data,
        }
    }

    pub fn filename(&self) -> String {
        basename(&self.identifier)
    }
}

/// Last path component of an identifier, or the identifier itself when it
/// has none.
pub fn basename(identifier: &str) -> String {
    Path::new(identifier)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| identifier.to_string())
}

/// A single stacked image, borrowed from the raw buffer.
///
/// The view is `(rows, cols, channels)` with the channel index varying
/// fastest, matching the interleaved byte order on disk.
#[derive(Debug, Clone)]
pub struct ImageBlock<'a> {
    index: usize,
    view: ArrayView3<'a, u8>,
}

impl<'a> ImageBlock<'a> {
    pub fn new(index: usize, view: ArrayView3<'a, u8>) -> Self {
        Self { index, view }
    }

    /// Position of the block in its stack
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rows(&self) -> usize {
        self.view.dim().0
    }

    pub fn cols(&self) -> usize {
        self.view.dim().1
    }

    pub fn channels(&self) -> usize {
        self.view.dim().2
    }

    pub fn view(&self) -> &ArrayView3<'a, u8> {
        &self.view
    }

    /// All `rows x cols` samples of one channel
    pub fn channel(&self, channel: usize) -> ArrayView2<'_, u8> {
        self.view.index_axis(Axis(2), channel)
    }

    /// The underlying byte range, when the view is contiguous
    pub fn as_slice(&self) -> Option<&'a [u8]> {
        self.view.to_slice()
    }

    /// Copies the samples back out in row-major interleaved order
    pub fn to_bytes(&self) -> Vec<u8> {
        self.view.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_rejects_zero_dimension() {
        let result = Geometry::new(4, 0, 10, 3);
        assert!(matches!(result, Err(StatsError::InvalidGeometryError(_))));
    }

    #[test]
    fn test_geometry_rejects_overflow() {
        let result = Geometry::new(usize::MAX, 2, 2, 3);
        assert!(matches!(result, Err(StatsError::InvalidGeometryError(_))));
    }

    #[test]
    fn test_geometry_sizes() {
        let geometry = Geometry::new(4, 2160, 4096, 3).unwrap();
        assert_eq!(geometry.block_len(), 2160 * 4096 * 3);
        assert_eq!(geometry.required_len(), 4 * 2160 * 4096 * 3);
        assert_eq!(geometry.shape(), (2160, 4096, 3));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/user/someone/uo_images/cam0_001.raw"), "cam0_001.raw");
        assert_eq!(basename("hdfs://namenode:8020/data/frame.raw"), "frame.raw");
        assert_eq!(basename("frame.raw"), "frame.raw");
    }

    #[test]
    fn test_block_channel_view() {
        let data: Vec<u8> = (0..12).collect();
        let view = ArrayView3::from_shape((2, 2, 3), &data[..]).unwrap();
        let block = ImageBlock::new(0, view);

        let green: Vec<u8> = block.channel(1).iter().copied().collect();
        assert_eq!(green, vec![1, 4, 7, 10]);
        assert_eq!(block.as_slice(), Some(&data[..]));
    }
}
