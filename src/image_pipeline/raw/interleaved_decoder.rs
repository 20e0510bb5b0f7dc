//! Decoder for headerless stacks of interleaved 8-bit rasters.
//!
//! A stack file is `stack_depth` images written back to back. Each image is
//! `rows x cols` pixels with the channels of one pixel stored contiguously,
//! so block `i` occupies bytes `[i * block_len, (i + 1) * block_len)`.

use ndarray::ArrayView3;
use tracing::{debug, warn};

use crate::image_pipeline::common::config::PipelineConfig;
use crate::image_pipeline::common::error::{Result, StatsError};
use crate::image_pipeline::raw::reader::BlockDecoder;
use crate::image_pipeline::raw::types::ImageBlock;

/// Zero-copy decoder that slices the buffer into `ndarray` views.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterleavedStackDecoder;

impl BlockDecoder for InterleavedStackDecoder {
    /// Splits `data` into `stack_depth` blocks of shape `(rows, cols, channels)`.
    ///
    /// # Errors
    ///
    /// * `GeometryError` - the buffer is shorter than the declared stack, is
    ///   not a whole number of blocks, or (with `strict_length`) holds more
    ///   blocks than declared
    fn decode<'a>(&self, data: &'a [u8], config: &PipelineConfig) -> Result<Vec<ImageBlock<'a>>> {
        let geometry = config.geometry;
        let block_len = geometry.block_len();
        let expected = geometry.required_len();

        debug!(
            "Decoding {} bytes as {}x{}x{}x{}",
            data.len(),
            geometry.stack_depth(),
            geometry.rows(),
            geometry.cols(),
            geometry.channels()
        );

        let mismatch = || StatsError::GeometryError {
            expected,
            actual: data.len(),
            block_len,
        };

        if data.len() < expected || data.len() % block_len != 0 {
            return Err(mismatch());
        }

        let available = data.len() / block_len;
        if available > geometry.stack_depth() {
            if config.strict_length {
                return Err(mismatch());
            }
            warn!(
                available,
                stack_depth = geometry.stack_depth(),
                "Ignoring trailing blocks beyond the declared stack depth"
            );
        }

        data[..expected]
            .chunks_exact(block_len)
            .enumerate()
            .map(|(index, chunk)| {
                ArrayView3::from_shape(geometry.shape(), chunk)
                    .map(|view| ImageBlock::new(index, view))
                    .map_err(|e| StatsError::InvalidGeometryError(e.to_string()))
            })
            .collect()
    }
}
