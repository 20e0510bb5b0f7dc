use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::ImageBlock;
use crate::image_pipeline::stats::types::ChannelMeans;

pub trait BlockReducer: Send + Sync {
    fn reduce(&self, block: &ImageBlock<'_>) -> Result<ChannelMeans>;
}
