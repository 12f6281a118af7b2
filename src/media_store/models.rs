//! Media catalog models.
//!
//! The same snake_case field names are used on disk, in HTTP bodies and
//! by the API client.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::ValidationError;

// =============================================================================
// Enumerations
// =============================================================================

/// Category of a media item.
///
/// Parsing is case-insensitive, while display and serialization always use
/// the canonical names `Book`, `Film` and `Magazine`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum MediaCategory {
    Book,
    Film,
    Magazine,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 3] = [
        MediaCategory::Book,
        MediaCategory::Film,
        MediaCategory::Magazine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Book => "Book",
            MediaCategory::Film => "Film",
            MediaCategory::Magazine => "Magazine",
        }
    }

    /// Comma separated list of the canonical names, used in error messages.
    pub fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(MediaCategory::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidCategory(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for MediaCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Records
// =============================================================================

/// A single catalog entry as stored and served.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    pub name: String,
    pub author: String,
    pub publication_date: String,
    pub category: MediaCategory,
}

/// Body of a create request.
///
/// Every field is optional here so that missing fields can be reported
/// together by validation instead of failing at deserialization.
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateMediaRequest {
    pub name: Option<String>,
    pub author: Option<String>,
    pub publication_date: Option<String>,
    pub category: Option<String>,
}

impl CreateMediaRequest {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        publication_date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        CreateMediaRequest {
            name: Some(name.into()),
            author: Some(author.into()),
            publication_date: Some(publication_date.into()),
            category: Some(category.into()),
        }
    }
}

/// A validated create request, still waiting for its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMediaRecord {
    pub name: String,
    pub author: String,
    pub publication_date: String,
    pub category: MediaCategory,
}

impl NewMediaRecord {
    pub fn into_record(self, id: String) -> MediaRecord {
        MediaRecord {
            id,
            name: self.name,
            author: self.author,
            publication_date: self.publication_date,
            category: self.category,
        }
    }
}

/// Number of records per category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub book: usize,
    pub film: usize,
    pub magazine: usize,
}

impl CategoryCounts {
    pub fn increment(&mut self, category: MediaCategory) {
        match category {
            MediaCategory::Book => self.book += 1,
            MediaCategory::Film => self.film += 1,
            MediaCategory::Magazine => self.magazine += 1,
        }
    }

    pub fn get(&self, category: MediaCategory) -> usize {
        match category {
            MediaCategory::Book => self.book,
            MediaCategory::Film => self.film,
            MediaCategory::Magazine => self.magazine,
        }
    }

    pub fn total(&self) -> usize {
        self.book + self.film + self.magazine
    }
}
