//! The library view filter: search term plus genre filter.

use super::model::{Track, TrackId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    /// Parse user input: blank or `all` (any case) means no genre filter.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Genre(input.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Genre(g) => g,
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    search: String,
    genre: GenreFilter,
}

impl ViewFilter {
    pub fn new(search: impl Into<String>, genre: GenreFilter) -> Self {
        Self {
            search: search.into(),
            genre,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn genre(&self) -> &GenreFilter {
        &self.genre
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.genre = genre;
    }

    /// True when the filter hides anything at all.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.genre != GenreFilter::All
    }

    pub fn matches(&self, track: &Track) -> bool {
        let genre_ok = match &self.genre {
            GenreFilter::All => true,
            GenreFilter::Genre(g) => contains_ci(&track.genre, &g.to_lowercase()),
        };
        if !genre_ok {
            return false;
        }

        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        contains_ci(&track.name, &term)
            || contains_ci(&track.artist, &term)
            || contains_ci(&track.album, &term)
    }

    /// The visible subsequence of `tracks`, in library order.
    pub fn apply(&self, tracks: &[Track]) -> Vec<TrackId> {
        tracks
            .iter()
            .filter(|t| self.matches(t))
            .map(|t| t.id)
            .collect()
    }
}
