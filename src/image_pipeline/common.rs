//! Common utilities module
//!
//! This module contains shared utilities used across the image pipeline.

pub mod config;
pub mod error;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{StatsError, Result};
