//! Local filesystem source of raw stacks.
//!
//! Selects either one named file in a directory or every file with a given
//! extension, and loads them whole. The statistics pipeline itself never
//! touches the filesystem.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::common::error::{Result, StatsError};
use crate::image_pipeline::conversions::FileFailure;
use crate::image_pipeline::raw::types::RawFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One file name inside the directory
    Single(String),
    /// Every regular file whose extension matches, without the dot
    Extension(String),
}

#[derive(Debug, Clone)]
pub struct RawFileSource {
    dir: PathBuf,
    selection: Selection,
}

impl RawFileSource {
    pub fn single<P: AsRef<Path>>(dir: P, name: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            selection: Selection::Single(name.into()),
        }
    }

    pub fn by_extension<P: AsRef<Path>>(dir: P, extension: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            selection: Selection::Extension(extension.trim_start_matches('.').to_string()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Lists matching paths in sorted order.
    ///
    /// Returns `EmptyInputError` when nothing matches.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut paths = match &self.selection {
            Selection::Single(name) => {
                let path = self.dir.join(name);
                if path.is_file() { vec![path] } else { Vec::new() }
            }
            Selection::Extension(extension) => {
                let entries = std::fs::read_dir(&self.dir).map_err(|e| {
                    StatsError::InputReadError(format!("{}: {}", self.dir.display(), e))
                })?;

                let mut paths = Vec::new();
                for entry in entries {
                    let path = entry?.path();
                    let matches = path.extension().is_some_and(|ext| ext == extension.as_str());
                    if matches && path.is_file() {
                        paths.push(path);
                    }
                }
                paths
            }
        };

        if paths.is_empty() {
            return Err(StatsError::EmptyInputError);
        }

        paths.sort();
        debug!(count = paths.len(), "Discovered raw files");
        Ok(paths)
    }

    pub fn load(path: &Path) -> Result<RawFile> {
        let data = std::fs::read(path)
            .map_err(|e| StatsError::InputReadError(format!("{}: {}", path.display(), e)))?;
        Ok(RawFile::new(path.to_string_lossy(), data))
    }

    /// Discovers and reads every matching file. Unreadable files are
    /// returned as failures next to the loaded ones.
    pub fn load_all(&self) -> Result<(Vec<RawFile>, Vec<FileFailure>)> {
        let paths = self.discover()?;

        let outcomes: Vec<(PathBuf, Result<RawFile>)> = paths
            .into_par_iter()
            .map(|path| {
                let outcome = Self::load(&path);
                (path, outcome)
            })
            .collect();

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(file) => files.push(file),
                Err(error) => {
                    warn!(file = %path.display(), %error, "Could not load file");
                    failures.push(FileFailure::new(path.to_string_lossy(), error));
                }
            }
        }

        let bytes: usize = files.iter().map(|f| f.data.len()).sum();
        info!(loaded = files.len(), failed = failures.len(), bytes, "Loaded raw files");
        Ok((files, failures))
    }
}
