use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    common::{config::PipelineConfig, error::Result},
    conversions::report::{BatchReport, FileFailure},
    raw::{BlockDecoder, InterleavedStackDecoder, RawFile},
    stats::{BlockReducer, ChannelMeanReducer, ChannelMeans, FileStats, MeanMatrix},
};

/// Decode-and-reduce pipeline over already loaded buffers.
///
/// Holds no mutable state, so one instance can be shared by any number of
/// workers.
pub struct RawToStatsPipeline<D: BlockDecoder, R: BlockReducer> {
    decoder: D,
    reducer: R,
    config: PipelineConfig,
}

impl RawToStatsPipeline<InterleavedStackDecoder, ChannelMeanReducer> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            decoder: InterleavedStackDecoder,
            reducer: ChannelMeanReducer,
            config,
        }
    }
}

impl<D: BlockDecoder, R: BlockReducer> RawToStatsPipeline<D, R> {
    pub fn with_custom(decoder: D, reducer: R, config: PipelineConfig) -> Self {
        Self {
            decoder,
            reducer,
            config,
        }
    }

    /// Computes the full mean matrix of one file.
    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn process(&self, identifier: &str, data: &[u8]) -> Result<FileStats> {
        let blocks = {
            let _span = tracing::info_span!("decode_blocks").entered();
            self.decoder.decode(data, &self.config)?
        };

        let rows: Vec<ChannelMeans> = {
            let _span = tracing::info_span!("reduce_blocks", blocks = blocks.len()).entered();
            if self.config.parallel_blocks {
                blocks
                    .par_iter()
                    .map(|block| self.reducer.reduce(block))
                    .collect::<Result<_>>()?
            } else {
                blocks
                    .iter()
                    .map(|block| self.reducer.reduce(block))
                    .collect::<Result<_>>()?
            }
        };

        let means = MeanMatrix::from_rows(rows)?;
        debug!(
            blocks = means.blocks(),
            channels = means.channels(),
            "File reduced"
        );

        Ok(FileStats::new(identifier, means))
    }

    pub fn process_file(&self, file: &RawFile) -> Result<FileStats> {
        self.process(&file.identifier, &file.data)
    }

    /// Runs every `(identifier, buffer)` pair on the rayon pool.
    ///
    /// A failing file is recorded in the report and does not affect the
    /// others. No input yields an empty report.
    pub fn process_batch<'a, I>(&self, inputs: I) -> BatchReport
    where
        I: IntoParallelIterator<Item = (&'a str, &'a [u8])>,
    {
        let outcomes: Vec<(&'a str, Result<FileStats>)> = inputs
            .into_par_iter()
            .map(|(identifier, data)| (identifier, self.process(identifier, data)))
            .collect();

        if outcomes.is_empty() {
            debug!("Empty batch");
            return BatchReport::default();
        }

        let mut report = BatchReport::default();
        for (identifier, outcome) in outcomes {
            match outcome {
                Ok(stats) => report.records.push(stats),
                Err(error) => {
                    warn!(file = identifier, %error, "File failed");
                    report.failures.push(FileFailure::new(identifier, error));
                }
            }
        }

        info!(
            succeeded = report.records.len(),
            failed = report.failures.len(),
            "Batch complete"
        );
        report
    }

    pub fn process_files(&self, files: &[RawFile]) -> BatchReport {
        self.process_batch(
            files
                .par_iter()
                .map(|file| (file.identifier.as_str(), file.data.as_slice())),
        )
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
