//! Loading the catalog and similarity artifacts from disk.
//!
//! Both artifacts are JSON. A path ending in `.gz` is read through a gzip
//! decoder, which keeps large similarity matrices manageable on disk.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

/// Load the song catalog: a JSON array of objects with a `title` key.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog: Catalog = read_json(path)?;
    log::info!("Loaded {} songs from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load the similarity matrix: a JSON array of equal-length numeric rows.
pub fn load_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let rows: Vec<Vec<f64>> = read_json(path)?;
    let matrix = SimilarityMatrix::from_rows(rows)?;
    log::info!(
        "Loaded {0}x{0} similarity matrix from {1}",
        matrix.len(),
        path.display()
    );
    Ok(matrix)
}

/// Returns `true` if the path names a gzip-compressed artifact.
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn Read> = if is_gzip(path) {
        log::debug!("Decompressing {}", path.display());
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    serde_json::from_reader(BufReader::new(reader)).map_err(|source| {
        // serde_json reports read failures (e.g. a corrupt gzip stream)
        // through its own error type.
        if source.is_io() {
            Error::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            Error::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
