//! Validation for incoming media records.
//!
//! Create requests go through [`validate_create_request`] before an id is
//! assigned, so an invalid request never reaches the stored collection.

use super::models::{CreateMediaRequest, MediaCategory, NewMediaRecord};
use thiserror::Error;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(
        "Invalid category '{0}', must be one of: {}",
        MediaCategory::allowed_names()
    )]
    InvalidCategory(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Validate a create request.
///
/// A field is missing when it is absent, null or blank. All missing fields
/// are reported at once; the category is only checked when nothing is
/// missing.
pub fn validate_create_request(request: CreateMediaRequest) -> ValidationResult<NewMediaRecord> {
    let name = present(request.name);
    let author = present(request.author);
    let publication_date = present(request.publication_date);
    let category = present(request.category);

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push("name");
    }
    if author.is_none() {
        missing.push("author");
    }
    if publication_date.is_none() {
        missing.push("publication_date");
    }
    if category.is_none() {
        missing.push("category");
    }

    match (name, author, publication_date, category) {
        (Some(name), Some(author), Some(publication_date), Some(category)) => Ok(NewMediaRecord {
            name,
            author,
            publication_date,
            category: category.parse()?,
        }),
        _ => Err(ValidationError::MissingFields(missing)),
    }
}
