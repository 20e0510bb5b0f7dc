//! Image processing pipeline module
//!
//! This module provides a structured approach to raw stack statistics,
//! with separate modules for decoding stacks, reducing blocks, loading files,
//! and orchestrating per-file runs.

pub mod raw;
pub mod stats;
pub mod conversions;
pub mod source;
pub mod common;

pub use common::{
    PipelineConfig,
    PipelineConfigBuilder,
    StatsError,
    Result,
};

pub use raw::{
    BlockDecoder,
    Geometry,
    ImageBlock,
    InterleavedStackDecoder,
    RawFile,
};

pub use stats::{
    BlockReducer,
    ChannelMeanReducer,
    ChannelMeans,
    FileStats,
    LegacyRecord,
    MeanMatrix,
    LEGACY_SCHEMA,
};

pub use conversions::{
    BatchReport,
    FileFailure,
    LegacyTable,
    RawToStatsPipeline,
};

pub use source::{RawFileSource, Selection};
