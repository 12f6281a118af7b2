use tracing::info;

use super::errors::MediaStoreResult;
use super::models::CreateMediaRequest;
use super::trait_def::MediaStore;

fn demo_requests() -> Vec<CreateMediaRequest> {
    vec![
        CreateMediaRequest::new("The Martian", "Andy Weir", "2011", "Book"),
        CreateMediaRequest::new("Dune", "Denis Villeneuve", "2021", "Film"),
        CreateMediaRequest::new("Time Magazine", "Various", "2023", "Magazine"),
    ]
}

/// Fills an empty store with a few demo items.
/// Returns how many items were created, zero if the store already had content.
pub fn seed_demo_records(store: &dyn MediaStore) -> MediaStoreResult<usize> {
    if store.count() > 0 {
        info!("Media store is not empty, skipping demo data.");
        return Ok(0);
    }

    let requests = demo_requests();
    let count = requests.len();
    for request in requests {
        store.create(request)?;
    }
    info!("Seeded media store with {} demo items.", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_store::{JsonMediaStore, MediaCategory, MEDIA_STORE_FILE_NAME};
    use tempfile::TempDir;

    #[test]
    fn test_seed_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonMediaStore::open(temp_dir.path().join(MEDIA_STORE_FILE_NAME)).unwrap();

        assert_eq!(seed_demo_records(&store).unwrap(), 3);

        let counts = store.count_by_category();
        assert_eq!(counts.book, 1);
        assert_eq!(counts.film, 1);
        assert_eq!(counts.magazine, 1);
        assert_eq!(
            store.search_by_name("the martian")[0].category,
            MediaCategory::Book
        );
    }

    #[test]
    fn test_seed_leaves_existing_content_alone() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonMediaStore::open(temp_dir.path().join(MEDIA_STORE_FILE_NAME)).unwrap();
        store
            .create(CreateMediaRequest::new("Solaris", "Stanislaw Lem", "1961", "Book"))
            .unwrap();

        assert_eq!(seed_demo_records(&store).unwrap(), 0);
        assert_eq!(store.count(), 1);
    }
}
