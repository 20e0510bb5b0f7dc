//! Raw stack decoding module
//!
//! This module turns headerless byte buffers into typed image blocks.

mod reader;
mod interleaved_decoder;
pub mod types;

pub use reader::BlockDecoder;
pub use interleaved_decoder::InterleavedStackDecoder;
pub use types::{basename, Geometry, ImageBlock, RawFile};
