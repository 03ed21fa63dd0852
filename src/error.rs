use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write catalog {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("unexpected catalog shape: {0}")]
    Shape(&'static str),

    #[error("job record #{position} is malformed: {source}")]
    Record {
        position: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failures while turning saved job pages into records.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no job pages found in {0}")]
    Empty(PathBuf),

    #[error("could not extract any text from {0}")]
    NoContent(PathBuf),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Failures while exporting a ranking.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
