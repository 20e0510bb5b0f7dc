use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometryError(String),

    #[error("Buffer length {actual} does not match geometry: expected {expected} bytes (block size {block_len})")]
    GeometryError {
        expected: usize,
        actual: usize,
        block_len: usize,
    },

    #[error("No statistic for block {block}, channel {channel}: have {blocks} blocks x {channels} channels")]
    ChannelIndexError {
        block: usize,
        channel: usize,
        blocks: usize,
        channels: usize,
    },

    #[error("No input files found")]
    EmptyInputError,

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
