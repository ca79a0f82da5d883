use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single song in the catalog.
///
/// Only `title` takes part in the lookup. Any other keys present in the
/// catalog artifact are kept in `extra` so that a catalog round-trips
/// without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Song {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// The title case-folded for matching.
    pub fn folded_title(&self) -> String {
        self.title.to_lowercase()
    }
}

/// The ordered list of known songs.
///
/// A song's position is its index into the rows and columns of the
/// similarity matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    #[must_use]
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Build a catalog from bare titles.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(titles.into_iter().map(Song::new).collect())
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    /// Case-folded titles in catalog order.
    pub fn folded_titles(&self) -> Vec<String> {
        self.songs.iter().map(Song::folded_title).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}
