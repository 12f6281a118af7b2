mod errors;
mod models;
mod seed;
mod store;
mod trait_def;
mod validation;

pub use errors::{MediaStoreError, MediaStoreResult};
pub use models::*;
pub use seed::seed_demo_records;
pub use store::{JsonMediaStore, MEDIA_STORE_FILE_NAME};
pub use trait_def::MediaStore;
pub use validation::{validate_create_request, ValidationError, ValidationResult};
