//! Local filesystem storage for uploaded files.

mod store;

pub use store::{sanitize_filename, StorageError, StorageResult, UploadStore};
