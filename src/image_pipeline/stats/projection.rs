//! Legacy four-column table view.
//!
//! The historical output schema is `Filename, CH0, CH1, CH2`, where each `CHk`
//! column holds the channel-1 mean of block `k`. Channels 0 and 2 and every
//! block past index 2 are dropped. This looks like block and channel indices
//! were mixed up at some point, but downstream tables depend on the exact
//! values, so the view is kept as-is. Use [`MeanMatrix`] for the full result.
//!
//! [`MeanMatrix`]: crate::image_pipeline::stats::MeanMatrix

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::stats::types::{FileStats, LegacyRecord};

pub const LEGACY_SCHEMA: [&str; 4] = ["Filename", "CH0", "CH1", "CH2"];

/// Channel sampled by every legacy column
pub const LEGACY_CHANNEL: usize = 1;

/// `(block, channel)` source of `CH0`, `CH1` and `CH2`
pub const LEGACY_COLUMNS: [(usize, usize); 3] = [
    (0, LEGACY_CHANNEL),
    (1, LEGACY_CHANNEL),
    (2, LEGACY_CHANNEL),
];

impl LegacyRecord {
    /// Projects the canonical matrix onto the legacy columns.
    ///
    /// Fails with `ChannelIndexError` when the file has fewer than three
    /// blocks or fewer than two channels.
    pub fn from_stats(stats: &FileStats) -> Result<Self> {
        let [ch0, ch1, ch2] = LEGACY_COLUMNS.map(|(block, channel)| stats.means.get(block, channel));

        Ok(Self {
            filename: stats.filename.clone(),
            ch0: ch0?,
            ch1: ch1?,
            ch2: ch2?,
        })
    }

    pub fn values(&self) -> [f64; 3] {
        [self.ch0, self.ch1, self.ch2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::StatsError;
    use crate::image_pipeline::stats::types::{ChannelMeans, MeanMatrix};

    fn stats_with(rows: Vec<Vec<f64>>) -> FileStats {
        let means = MeanMatrix::from_rows(rows.into_iter().map(ChannelMeans::new).collect()).unwrap();
        FileStats::new("/data/stack.raw", means)
    }

    #[test]
    fn test_columns_take_channel_one_of_first_three_blocks() {
        let stats = stats_with(vec![
            vec![1.0, 11.0, 21.0],
            vec![2.0, 12.0, 22.0],
            vec![3.0, 13.0, 23.0],
            vec![4.0, 14.0, 24.0],
        ]);

        let record = LegacyRecord::from_stats(&stats).unwrap();
        assert_eq!(record.filename, "stack.raw");
        assert_eq!(record.values(), [11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_two_blocks_is_an_index_error() {
        let stats = stats_with(vec![vec![0.0, 25.0, 0.0], vec![0.0, 65.0, 0.0]]);

        let result = LegacyRecord::from_stats(&stats);
        assert!(matches!(
            result,
            Err(StatsError::ChannelIndexError { block: 2, channel: 1, .. })
        ));
    }

    #[test]
    fn test_single_channel_is_an_index_error() {
        let stats = stats_with(vec![vec![5.0], vec![6.0], vec![7.0]]);

        let result = LegacyRecord::from_stats(&stats);
        assert!(matches!(
            result,
            Err(StatsError::ChannelIndexError { block: 0, channel: 1, channels: 1, .. })
        ));
    }
}
