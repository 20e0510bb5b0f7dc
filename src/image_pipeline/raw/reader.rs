use crate::image_pipeline::common::config::PipelineConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::ImageBlock;

pub trait BlockDecoder: Send + Sync {
    fn decode<'a>(&self, data: &'a [u8], config: &PipelineConfig) -> Result<Vec<ImageBlock<'a>>>;
}
