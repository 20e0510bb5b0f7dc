use crate::image_pipeline::common::error::StatsError;
use crate::image_pipeline::raw::types::basename;
use crate::image_pipeline::stats::{FileStats, LegacyRecord};

/// A file that produced no result, with the reason
#[derive(Debug)]
pub struct FileFailure {
    pub identifier: String,
    pub error: StatsError,
}

impl FileFailure {
    pub fn new(identifier: impl Into<String>, error: StatsError) -> Self {
        Self {
            identifier: identifier.into(),
            error,
        }
    }

    pub fn filename(&self) -> String {
        basename(&self.identifier)
    }
}

/// Outcome of a batch: successful records next to per-file failures
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<FileStats>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn record(&self, filename: &str) -> Option<&FileStats> {
        self.records.iter().find(|r| r.filename == filename)
    }

    /// Orders records and failures by basename, then full identifier.
    pub fn sort_by_filename(&mut self) {
        self.records
            .sort_by(|a, b| (&a.filename, &a.identifier).cmp(&(&b.filename, &b.identifier)));
        self.failures
            .sort_by(|a, b| (a.filename(), &a.identifier).cmp(&(b.filename(), &b.identifier)));
    }

    /// Legacy view of every successful record. Files that cannot fill the
    /// legacy columns are listed as failures; their canonical records stay
    /// in `self.records`.
    pub fn legacy_table(&self) -> LegacyTable {
        let mut table = LegacyTable::default();
        for stats in &self.records {
            match LegacyRecord::from_stats(stats) {
                Ok(row) => table.rows.push(row),
                Err(error) => table.failures.push(FileFailure::new(&stats.identifier, error)),
            }
        }
        table
    }
}

#[derive(Debug, Default)]
pub struct LegacyTable {
    pub rows: Vec<LegacyRecord>,
    pub failures: Vec<FileFailure>,
}
