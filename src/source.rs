//! Dataset acquisition behind a trait so hosts can plug in their own retrieval and caching.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::data::model::Dataset;
use crate::foundation::error::GitnetResult;

/// Produces the dataset to display. `Ok(None)` means nothing is available (yet).
pub trait DataSource {
    fn load(&mut self) -> GitnetResult<Option<Dataset>>;
}

/// Reads datasets from JSON files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonFileSource {
    /// One `{ "meta": .., "commits": .. }` document.
    Single(PathBuf),
    /// The network endpoint's meta response and one chunk response holding `commits`.
    MetaAndChunk { meta: PathBuf, chunk: PathBuf },
}

impl JsonFileSource {
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::Single(path.into())
    }

    pub fn meta_and_chunk(meta: impl Into<PathBuf>, chunk: impl Into<PathBuf>) -> Self {
        Self::MetaAndChunk {
            meta: meta.into(),
            chunk: chunk.into(),
        }
    }
}

fn read(path: &Path) -> GitnetResult<String> {
    Ok(std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?)
}

impl DataSource for JsonFileSource {
    #[tracing::instrument(skip(self))]
    fn load(&mut self) -> GitnetResult<Option<Dataset>> {
        let ds = match self {
            Self::Single(path) => Dataset::from_path(path)?,
            Self::MetaAndChunk { meta, chunk } => {
                Dataset::from_meta_and_chunk(&read(meta)?, &read(chunk)?)?
            }
        };
        ds.validate()?;
        tracing::debug!(
            commits = ds.commits.len(),
            blocks = ds.meta.blocks.len(),
            "dataset loaded"
        );
        Ok(Some(ds))
    }
}

#[cfg(test)]
#[path = "../tests/unit/source.rs"]
mod tests;
