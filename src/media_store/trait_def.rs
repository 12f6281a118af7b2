//! MediaStore trait definition.

use super::errors::MediaStoreResult;
use super::models::{CategoryCounts, CreateMediaRequest, MediaRecord};

/// Trait for media storage backends.
///
/// Reads never fail: they answer from the collection loaded at startup.
/// Mutations return only after the new collection is durable.
pub trait MediaStore: Send + Sync {
    // =========================================================================
    // Queries
    // =========================================================================

    /// All records, in stored order.
    fn list_all(&self) -> Vec<MediaRecord>;

    /// Records whose category matches `category`, ignoring case.
    /// Unknown categories yield an empty list.
    fn list_by_category(&self, category: &str) -> Vec<MediaRecord>;

    /// The record with exactly this id, or `NotFound`.
    fn find_by_id(&self, id: &str) -> MediaStoreResult<MediaRecord>;

    /// Records whose whole name equals `name` after case folding.
    fn search_by_name(&self, name: &str) -> Vec<MediaRecord>;

    // =========================================================================
    // Counts
    // =========================================================================

    fn count(&self) -> usize;

    fn count_by_category(&self) -> CategoryCounts;

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Validate the request, assign a fresh id and persist the new record.
    /// Returns the stored record.
    fn create(&self, request: CreateMediaRequest) -> MediaStoreResult<MediaRecord>;

    /// Remove the record with this id and persist, or fail with `NotFound`.
    fn delete(&self, id: &str) -> MediaStoreResult<()>;
}
