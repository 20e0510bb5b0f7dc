//! Pipeline configuration types

use crate::image_pipeline::raw::types::Geometry;

/// Configuration for a raw stack statistics run.
///
/// There is no default geometry: raw stacks carry no header, so every run
/// must state its shape explicitly through [`PipelineConfig::builder`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Shape shared by every file in the run
    pub geometry: Geometry,
    /// Reject buffers holding more whole blocks than `geometry.stack_depth()`
    pub strict_length: bool,
    /// Reduce the blocks of a single file on the rayon pool
    pub parallel_blocks: bool,
}

impl PipelineConfig {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            strict_length: false,
            parallel_blocks: true,
        }
    }

    pub fn builder(geometry: Geometry) -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            geometry,
            strict_length: None,
            parallel_blocks: None,
        }
    }
}

/// Builder for PipelineConfig
pub struct PipelineConfigBuilder {
    geometry: Geometry,
    strict_length: Option<bool>,
    parallel_blocks: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn strict_length(mut self, strict: bool) -> Self {
        self.strict_length = Some(strict);
        self
    }

    pub fn parallel_blocks(mut self, enable: bool) -> Self {
        self.parallel_blocks = Some(enable);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::new(self.geometry);
        PipelineConfig {
            geometry: self.geometry,
            strict_length: self.strict_length.unwrap_or(default.strict_length),
            parallel_blocks: self.parallel_blocks.unwrap_or(default.parallel_blocks),
        }
    }
}
