//! Resolving a free-text query to a catalog song and its nearest
//! neighbours in the similarity matrix.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::matcher;
use crate::similarity::SimilarityMatrix;

/// Fuzzy matches are always resolved to a single song.
const MATCH_COUNT: usize = 1;

/// How the matched song itself is kept out of its own recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    /// Drop whatever ranks first in the sorted row.
    ///
    /// With well-formed scores that is the song itself. If another song
    /// ties the self-score and sorts ahead of it, that song is dropped
    /// instead and the matched song shows up as a recommendation.
    #[default]
    Positional,

    /// Remove the matched song's own column, wherever it ranks.
    SelfIndex,
}

/// Tuning for [`Recommender`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendOptions {
    /// Minimum similarity ratio for a fuzzy title match, in `[0, 1]`.
    pub cutoff: f64,

    /// Maximum number of recommendations returned.
    pub limit: usize,

    pub exclusion: Exclusion,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            cutoff: 0.7,
            limit: 5,
            exclusion: Exclusion::Positional,
        }
    }
}

impl RecommendOptions {
    #[must_use]
    pub const fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the cutoff is outside `[0, 1]`
    /// or the limit is zero.
    pub fn validate(&self) -> Result<()> {
        matcher::validate_arguments(MATCH_COUNT, self.cutoff)?;
        if self.limit == 0 {
            return Err(Error::InvalidArgument(
                "recommendation limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// One recommended song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommended {
    pub title: String,
    pub index: usize,
    pub score: f64,
}

/// The outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Found {
        /// Canonical catalog title of the matched song.
        song: String,
        index: usize,
        recommendations: Vec<Recommended>,
    },
    NotFound,
}

impl Recommendation {
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Recommended titles in rank order; empty when nothing matched.
    pub fn titles(&self) -> Vec<&str> {
        match self {
            Self::Found {
                recommendations, ..
            } => recommendations.iter().map(|r| r.title.as_str()).collect(),
            Self::NotFound => Vec::new(),
        }
    }
}

/// Read-only lookup state: the catalog, its similarity matrix, and the
/// case-folded titles matched against.
///
/// Built once at start-up and shared by reference afterwards. Nothing in
/// here is mutated after construction.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
    folded: Vec<String>,
    options: RecommendOptions,
}

impl Recommender {
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the matrix size differs from
    /// the catalog length, or [`Error::InvalidArgument`] for bad options.
    pub fn new(
        catalog: Catalog,
        matrix: SimilarityMatrix,
        options: RecommendOptions,
    ) -> Result<Self> {
        options.validate()?;
        if matrix.len() != catalog.len() {
            return Err(Error::DimensionMismatch {
                matrix: matrix.len(),
                catalog: catalog.len(),
            });
        }

        let folded = catalog.folded_titles();
        Ok(Self {
            catalog,
            matrix,
            folded,
            options,
        })
    }

    /// Load both artifacts from disk and build a recommender from them.
    pub fn load(
        catalog_path: &Path,
        similarity_path: &Path,
        options: RecommendOptions,
    ) -> Result<Self> {
        let catalog = artifact::load_catalog(catalog_path)?;
        let matrix = artifact::load_similarity(similarity_path)?;
        Self::new(catalog, matrix, options)
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub const fn options(&self) -> &RecommendOptions {
        &self.options
    }

    /// Case-fold and trim a raw query.
    pub fn normalize(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Catalog index of the song a query resolves to, if any.
    pub fn match_title(&self, query: &str) -> Option<usize> {
        let query = Self::normalize(query);
        let (best, score) = matcher::rank_checked(
            &query,
            &self.folded,
            MATCH_COUNT,
            self.options.cutoff,
        )
        .into_iter()
        .next()?;

        let matched = &self.folded[best];
        log::debug!("Query {:?} matched {:?} (ratio {:.3})", query, matched, score);

        // First row carrying the matched title; for duplicate titles this
        // is the earliest copy.
        self.folded.iter().position(|title| title == matched)
    }

    /// Look up a query and return the matched song with its neighbours.
    pub fn recommend(&self, query: &str) -> Recommendation {
        let Some(index) = self.match_title(query) else {
            return Recommendation::NotFound;
        };

        self.found(index)
    }

    fn found(&self, index: usize) -> Recommendation {
        let Some(song) = self.catalog.get(index) else {
            return Recommendation::NotFound;
        };

        Recommendation::Found {
            song: song.title.clone(),
            index,
            recommendations: self.recommendations_for(index),
        }
    }

    /// The top recommendations for the song at `index`, best first.
    ///
    /// Returns an empty list for an index outside the catalog.
    pub fn recommendations_for(&self, index: usize) -> Vec<Recommended> {
        let Some(ranked) = self.matrix.ranked(index) else {
            return Vec::new();
        };

        let limit = self.options.limit;
        let picked: Vec<(usize, f64)> = match self.options.exclusion {
            Exclusion::Positional => ranked.into_iter().skip(1).take(limit).collect(),
            Exclusion::SelfIndex => ranked
                .into_iter()
                .filter(|&(col, _)| col != index)
                .take(limit)
                .collect(),
        };

        picked
            .into_iter()
            .filter_map(|(col, score)| {
                self.catalog.get(col).map(|song| Recommended {
                    title: song.title.clone(),
                    index: col,
                    score,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beatles() -> Recommender {
        let catalog = Catalog::from_titles(["Yesterday", "Let It Be", "Hey Jude"]);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.8, 0.6],
            vec![0.8, 1.0, 0.3],
            vec![0.6, 0.3, 1.0],
        ])
        .unwrap();
        Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = RecommendOptions::default();
        assert!((options.cutoff - 0.7).abs() < f64::EPSILON);
        assert_eq!(options.limit, 5);
        assert_eq!(options.exclusion, Exclusion::Positional);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        assert!(RecommendOptions::default().with_cutoff(1.2).validate().is_err());
        assert!(RecommendOptions::default().with_limit(0).validate().is_err());
    }

    #[test]
    fn test_exclusion_serde_names() {
        let json = serde_json::to_string(&Exclusion::SelfIndex).unwrap();
        assert_eq!(json, "\"self_index\"");
        let parsed: Exclusion = serde_json::from_str("\"positional\"").unwrap();
        assert_eq!(parsed, Exclusion::Positional);
    }

    #[test]
    fn test_dimension_mismatch() {
        let catalog = Catalog::from_titles(["A", "B"]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let err = Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                matrix: 1,
                catalog: 2
            }
        ));
    }

    #[test]
    fn test_recommend_scenario() {
        let result = beatles().recommend("yesterday");
        match &result {
            Recommendation::Found {
                song,
                index,
                recommendations,
            } => {
                assert_eq!(song, "Yesterday");
                assert_eq!(*index, 0);
                assert_eq!(recommendations.len(), 2);
            }
            Recommendation::NotFound => panic!("expected a match"),
        }
        assert_eq!(result.titles(), vec!["Let It Be", "Hey Jude"]);
    }

    #[test]
    fn test_recommend_not_found() {
        let result = beatles().recommend("zzqqxx");
        assert_eq!(result, Recommendation::NotFound);
        assert!(!result.is_found());
        assert!(result.titles().is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(Recommender::normalize("  Shape of You \n"), "shape of you");
    }

    #[test]
    fn test_match_title_is_case_and_space_insensitive() {
        let recommender = beatles();
        for query in ["Hey Jude", "hey jude", "  HEY JUDE  "] {
            assert_eq!(recommender.match_title(query), Some(2));
        }
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert_eq!(beatles().match_title("   "), None);
    }

    #[test]
    fn test_found_out_of_range_is_not_found() {
        assert_eq!(beatles().found(42), Recommendation::NotFound);
    }

    #[test]
    fn test_signed_zero_scores_keep_column_order() {
        let catalog = Catalog::from_titles(["Alpha", "Beta", "Gamma"]);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, -0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        let recommender =
            Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap();
        assert_eq!(recommender.recommend("alpha").titles(), vec!["Beta", "Gamma"]);
    }

    #[test]
    fn test_match_title_prefers_first_duplicate() {
        let catalog = Catalog::from_titles(["Intro", "Outro", "INTRO"]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.0; 3]; 3]).unwrap();
        let recommender =
            Recommender::new(catalog, matrix, RecommendOptions::default()).unwrap();
        assert_eq!(recommender.match_title("intro"), Some(0));
        assert_eq!(recommender.match_title("OUTRO"), Some(1));
        assert_eq!(recommender.match_title("bridge"), None);
    }

    #[test]
    fn test_recommendations_for_out_of_range() {
        assert!(beatles().recommendations_for(42).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let recommender = Recommender::new(
            Catalog::default(),
            SimilarityMatrix::default(),
            RecommendOptions::default(),
        )
        .unwrap();
        assert_eq!(recommender.recommend("anything"), Recommendation::NotFound);
    }
}
