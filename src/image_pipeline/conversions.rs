//! Pipeline conversions module
//!
//! This module contains orchestration logic that turns raw stacks into
//! per-file statistics.

mod raw_to_stats;
mod report;


pub use raw_to_stats::RawToStatsPipeline;
pub use report::{BatchReport, FileFailure, LegacyTable};
