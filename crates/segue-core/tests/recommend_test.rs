//! End-to-end tests: artifacts on disk through to recommendations.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use segue_core::{
    Catalog, Error, Exclusion, Recommendation, RecommendOptions, Recommender, SimilarityMatrix,
};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn write_gz(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

const BEATLES_CATALOG: &str = r#"[
    {"title": "Yesterday", "artist": "The Beatles"},
    {"title": "Let It Be", "artist": "The Beatles"},
    {"title": "Hey Jude", "artist": "The Beatles"}
]"#;

const BEATLES_MATRIX: &str = "[[1.0, 0.8, 0.6], [0.8, 1.0, 0.3], [0.6, 0.3, 1.0]]";

/// `count` tracks with distinct titles; closer indices are more similar.
fn tracks(count: usize) -> Recommender {
    let catalog = Catalog::from_titles((0..count).map(|i| format!("Track {i}")));
    let rows = (0..count)
        .map(|i| {
            (0..count)
                .map(|j| 1.0 / (1.0 + i.abs_diff(j) as f64))
                .collect()
        })
        .collect();
    let matrix = SimilarityMatrix::from_rows(rows).unwrap();
    Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap()
}

#[test]
fn test_load_and_recommend() {
    let dir = TempDir::new().unwrap();
    let catalog = write_file(dir.path(), "catalog.json", BEATLES_CATALOG);
    let similarity = write_file(dir.path(), "similarity.json", BEATLES_MATRIX);

    let recommender =
        Recommender::load(&catalog, &similarity, RecommendOptions::default()).unwrap();
    assert_eq!(recommender.catalog().len(), 3);

    let result = recommender.recommend("yesterday");
    assert!(result.is_found());
    assert_eq!(result.titles(), vec!["Let It Be", "Hey Jude"]);

    assert_eq!(recommender.recommend("zzqqxx"), Recommendation::NotFound);
}

#[test]
fn test_load_gzipped_artifacts() {
    let dir = TempDir::new().unwrap();
    let catalog = write_gz(dir.path(), "catalog.json.gz", BEATLES_CATALOG);
    let similarity = write_gz(dir.path(), "similarity.json.gz", BEATLES_MATRIX);

    let recommender =
        Recommender::load(&catalog, &similarity, RecommendOptions::default()).unwrap();
    assert_eq!(recommender.matrix().len(), 3);
    assert_eq!(
        recommender.recommend("Hey Jude").titles(),
        vec!["Yesterday", "Let It Be"]
    );
}

#[test]
fn test_missing_artifact() {
    let dir = TempDir::new().unwrap();
    let similarity = write_file(dir.path(), "similarity.json", BEATLES_MATRIX);
    let err = Recommender::load(
        &dir.path().join("missing.json"),
        &similarity,
        RecommendOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_malformed_artifact() {
    let dir = TempDir::new().unwrap();
    let catalog = write_file(dir.path(), "catalog.json", "{not json");
    let similarity = write_file(dir.path(), "similarity.json", BEATLES_MATRIX);
    let err = Recommender::load(&catalog, &similarity, RecommendOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_corrupt_gzip_is_rejected() {
    let dir = TempDir::new().unwrap();
    let catalog = write_file(dir.path(), "catalog.json", BEATLES_CATALOG);
    let similarity = write_file(dir.path(), "similarity.json.gz", BEATLES_MATRIX);
    let result = Recommender::load(&catalog, &similarity, RecommendOptions::default());
    assert!(matches!(result, Err(Error::Io { .. } | Error::Parse { .. })));
}

#[test]
fn test_non_square_artifact() {
    let dir = TempDir::new().unwrap();
    let catalog = write_file(dir.path(), "catalog.json", BEATLES_CATALOG);
    let similarity = write_file(dir.path(), "similarity.json", "[[1.0, 0.5], [0.5, 1.0, 0.2]]");
    let err = Recommender::load(&catalog, &similarity, RecommendOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NotSquare { row: 1, .. }));
}

#[test]
fn test_dimension_mismatch_artifact() {
    let dir = TempDir::new().unwrap();
    let catalog = write_file(dir.path(), "catalog.json", BEATLES_CATALOG);
    let similarity = write_file(dir.path(), "similarity.json", "[[1.0, 0.5], [0.5, 1.0]]");
    let err = Recommender::load(&catalog, &similarity, RecommendOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            matrix: 2,
            catalog: 3
        }
    ));
}

#[test]
fn test_exact_title_yields_min_five_or_rest() {
    for size in [1, 2, 4, 6, 12] {
        let recommender = tracks(size);
        for i in 0..size {
            let result = recommender.recommend(&format!("track {i}"));
            let expected = 5.min(size - 1);
            assert!(result.is_found(), "track {i} of {size} should match");
            assert_eq!(result.titles().len(), expected, "track {i} of {size}");
        }
    }
}

#[test]
fn test_recommendations_are_non_increasing() {
    let recommender = tracks(12);
    for i in 0..12 {
        let recs = recommender.recommendations_for(i);
        assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_recommendations_skip_self() {
    let recommender = tracks(8);
    let recs = recommender.recommendations_for(3);
    assert!(recs.iter().all(|r| r.index != 3));
    // neighbours at distance 1 come first, lower index breaking the tie
    assert_eq!(recs[0].index, 2);
    assert_eq!(recs[1].index, 4);
}

#[test]
fn test_lookup_is_idempotent() {
    let recommender = tracks(10);
    let first = recommender.recommend("Track 7");
    for _ in 0..5 {
        assert_eq!(recommender.recommend("Track 7"), first);
    }
}

#[test]
fn test_case_and_whitespace_insensitive() {
    let catalog = Catalog::from_titles(["Shape of You", "Perfect", "Photograph"]);
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.4, 0.7],
        vec![0.4, 1.0, 0.5],
        vec![0.7, 0.5, 1.0],
    ])
    .unwrap();
    let recommender = Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap();

    let expected = recommender.recommend("Shape of You");
    assert!(expected.is_found());
    assert_eq!(recommender.recommend("shape of you"), expected);
    assert_eq!(recommender.recommend("  shape of you  "), expected);
    assert_eq!(expected.titles(), vec!["Photograph", "Perfect"]);
}

#[test]
fn test_typo_still_matches() {
    let catalog = Catalog::from_titles(["Bohemian Rhapsody", "Imagine"]);
    let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.1], vec![0.1, 1.0]]).unwrap();
    let recommender = Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap();
    assert_eq!(recommender.match_title("bohemian rapsody"), Some(0));
}

#[test]
fn test_duplicate_titles_resolve_to_first_row() {
    let catalog = Catalog::from_titles(["Intro", "Interlude", "INTRO"]);
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.2, 0.9],
        vec![0.2, 1.0, 0.1],
        vec![0.9, 0.1, 1.0],
    ])
    .unwrap();
    let recommender = Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap();

    match recommender.recommend("intro") {
        Recommendation::Found { song, index, .. } => {
            assert_eq!(song, "Intro");
            assert_eq!(index, 0);
        }
        Recommendation::NotFound => panic!("expected a match"),
    }
}

fn tied_top() -> (Catalog, SimilarityMatrix) {
    let catalog = Catalog::from_titles(["Alpha", "Beta", "Gamma"]);
    // Alpha ties Beta's self-score and sorts ahead of it
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.2, 0.1],
        vec![1.0, 1.0, 0.5],
        vec![0.1, 0.5, 1.0],
    ])
    .unwrap();
    (catalog, matrix)
}

#[test]
fn test_positional_exclusion_drops_rank_zero() {
    let (catalog, matrix) = tied_top();
    let recommender = Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap();
    assert_eq!(recommender.recommend("beta").titles(), vec!["Beta", "Gamma"]);
}

#[test]
fn test_self_index_exclusion_filters_own_column() {
    let (catalog, matrix) = tied_top();
    let options = RecommendOptions::default().with_exclusion(Exclusion::SelfIndex);
    let recommender = Recommender::new(catalog, matrix, options).unwrap();
    assert_eq!(recommender.recommend("beta").titles(), vec!["Alpha", "Gamma"]);
}

#[test]
fn test_custom_limit_and_cutoff() {
    let catalog = Catalog::from_titles((0..10).map(|i| format!("Track {i}")));
    let rows = (0..10)
        .map(|i| (0..10).map(|j| if i == j { 1.0 } else { 0.5 }).collect())
        .collect();
    let matrix = SimilarityMatrix::from_rows(rows).unwrap();
    let options = RecommendOptions::default().with_limit(3).with_cutoff(1.0);
    let recommender = Recommender::new(catalog, matrix, options).unwrap();

    assert_eq!(recommender.recommend("track 4").titles().len(), 3);
    // a near miss no longer clears a cutoff of 1.0
    assert_eq!(recommender.recommend("track 44"), Recommendation::NotFound);
}
