//! OE document storage library
//!
//! Read access to document blobs and to the placeholder assets served when a
//! thumbnail cannot be resolved.
//!
//! # Blob key format
//!
//! Blobs are sharded by the first two characters of the lowercase guid:
//! `content/{guid[0..2]}/{guid}/file`. Keys must not contain `..` or a
//! leading `/`. Key generation lives in the `keys` module.

pub mod assets;
pub(crate) mod keys;
pub mod local;
pub mod traits;

pub use assets::AssetDirectory;
pub use local::LocalBlobStore;
pub use traits::{BlobStore, BlobStream, StorageError, StorageResult};

impl From<StorageError> for oedoc_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => {
                oedoc_core::AppError::NotFound(format!("File '{}' not found", key))
            }
            StorageError::InvalidKey(msg) => oedoc_core::AppError::InvalidInput(msg),
            other => oedoc_core::AppError::Storage(other.to_string()),
        }
    }
}
