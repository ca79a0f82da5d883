use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("similarity matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("similarity matrix has a non-finite score at [{row}][{col}]")]
    NonFiniteScore { row: usize, col: usize },

    #[error("similarity matrix is {matrix}x{matrix} but the catalog has {catalog} songs")]
    DimensionMismatch { matrix: usize, catalog: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` when the error came from reading or decoding an
    /// artifact rather than from its contents.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
