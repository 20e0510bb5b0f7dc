//! Block statistics module
//!
//! Per-block reducers, the per-file mean matrix, and the legacy table view.

mod reducer;
mod mean_reducer;
mod projection;
pub mod types;

pub use reducer::BlockReducer;
pub use mean_reducer::ChannelMeanReducer;
pub use projection::{LEGACY_CHANNEL, LEGACY_COLUMNS, LEGACY_SCHEMA};
pub use types::{ChannelMeans, FileStats, LegacyRecord, MeanMatrix};
