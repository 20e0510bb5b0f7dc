//! Per-channel arithmetic mean of an 8-bit block.
//!
//! Samples are summed into `u64` accumulators, which is exact for any block
//! that fits in memory, and divided once as `f64` at the end.

use tracing::trace;

use crate::image_pipeline::common::error::{Result, StatsError};
use crate::image_pipeline::raw::types::ImageBlock;
use crate::image_pipeline::stats::reducer::BlockReducer;
use crate::image_pipeline::stats::types::ChannelMeans;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelMeanReducer;

impl BlockReducer for ChannelMeanReducer {
    fn reduce(&self, block: &ImageBlock<'_>) -> Result<ChannelMeans> {
        let channels = block.channels();
        let pixels = block.rows() * block.cols();

        if pixels == 0 || channels == 0 {
            return Err(StatsError::InvalidGeometryError(format!(
                "block {} is empty ({}x{}x{})",
                block.index(),
                block.rows(),
                block.cols(),
                channels
            )));
        }

        let mut sums = vec![0u64; channels];
        match block.as_slice() {
            // one linear pass over interleaved pixels
            Some(samples) => {
                for pixel in samples.chunks_exact(channels) {
                    for (sum, &sample) in sums.iter_mut().zip(pixel) {
                        *sum += u64::from(sample);
                    }
                }
            }
            None => {
                for (channel, sum) in sums.iter_mut().enumerate() {
                    *sum = block.channel(channel).iter().map(|&v| u64::from(v)).sum();
                }
            }
        }

        let count = pixels as f64;
        let means: Vec<f64> = sums.into_iter().map(|sum| sum as f64 / count).collect();
        trace!(block = block.index(), ?means, "Reduced block");

        Ok(ChannelMeans::new(means))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, ArrayView3};
    use proptest::prelude::*;

    #[test]
    fn test_constant_channels() {
        let data: Vec<u8> = std::iter::repeat([7u8, 200, 255]).take(16).flatten().collect();
        let view = ArrayView3::from_shape((4, 4, 3), &data[..]).unwrap();

        let means = ChannelMeanReducer.reduce(&ImageBlock::new(0, view)).unwrap();
        assert_eq!(means.values(), &[7.0, 200.0, 255.0]);
    }

    #[test]
    fn test_mean_of_known_channel() {
        // channel 1 holds 10, 20, 30, 40
        let data: Vec<u8> = vec![0, 10, 0, 0, 20, 0, 0, 30, 0, 0, 40, 0];
        let view = ArrayView3::from_shape((2, 2, 3), &data[..]).unwrap();

        let means = ChannelMeanReducer.reduce(&ImageBlock::new(0, view)).unwrap();
        assert_eq!(means.get(1), Some(25.0));
        assert_eq!(means.get(0), Some(0.0));
    }

    #[test]
    fn test_non_contiguous_view_matches_contiguous() {
        let data: Vec<u8> = (0..48).map(|v| (v * 5) as u8).collect();
        let owned = Array3::from_shape_vec((4, 4, 3), data).unwrap();
        // every other row, so the view is strided
        let strided = owned.slice(ndarray::s![..;2, .., ..]);
        assert!(strided.to_slice().is_none());

        let compact = strided.to_owned();
        let expected = ChannelMeanReducer.reduce(&ImageBlock::new(0, compact.view())).unwrap();
        let actual = ChannelMeanReducer.reduce(&ImageBlock::new(0, strided)).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_large_block_does_not_saturate() {
        let data = vec![255u8; 1024 * 1024 * 2];
        let view = ArrayView3::from_shape((1024, 1024, 2), &data[..]).unwrap();

        let means = ChannelMeanReducer.reduce(&ImageBlock::new(0, view)).unwrap();
        assert_eq!(means.values(), &[255.0, 255.0]);
    }

    proptest! {
        #[test]
        fn prop_means_within_sample_range(
            rows in 1usize..6,
            cols in 1usize..6,
            channels in 1usize..5,
            samples in proptest::collection::vec(any::<u8>(), 150),
        ) {
            let len = rows * cols * channels;
            let view = ArrayView3::from_shape((rows, cols, channels), &samples[..len]).unwrap();
            let block = ImageBlock::new(0, view);
            let means = ChannelMeanReducer.reduce(&block).unwrap();

            prop_assert_eq!(means.len(), channels);
            for (channel, &mean) in means.values().iter().enumerate() {
                let lane = block.channel(channel);
                let min = *lane.iter().min().unwrap() as f64;
                let max = *lane.iter().max().unwrap() as f64;
                prop_assert!((0.0..=255.0).contains(&mean));
                prop_assert!(mean >= min && mean <= max);
            }
        }
    }
}
