//! Core lookup engine for segue.
//!
//! This crate holds the song catalog, the precomputed similarity matrix,
//! the loaders for both artifacts, the gestalt fuzzy matcher used to
//! resolve free-text queries, and the [`Recommender`] that ties them
//! together.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod artifact;
pub mod catalog;
pub mod error;
pub mod matcher;
pub mod recommend;
pub mod similarity;

pub use catalog::{Catalog, Song};
pub use error::{Error, Result};
pub use matcher::{get_close_matches, rank_close_matches, ratio, SequenceMatcher};
pub use recommend::{
    Exclusion, Recommendation, RecommendOptions, Recommended, Recommender,
};
pub use similarity::SimilarityMatrix;
