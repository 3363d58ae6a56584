//! Object storage backends.
//!
//! Every backend moves whole objects: downloads are read fully into memory
//! and uploads overwrite whatever is stored at the key.

mod local;
mod memory;
mod s3;

pub use local::LocalStore;
pub use memory::{MemoryStore, StoredObject};
pub use s3::S3Store;

use crate::error::Result;

/// A bucket/key object store.
///
/// Implementations are used from a single thread and need not be `Sync`.
pub trait ObjectStore {
    /// Download the object at `key` in `bucket`.
    ///
    /// Any failure, including a missing key, is an [`Error::ObjectFetch`].
    ///
    /// [`Error::ObjectFetch`]: crate::Error::ObjectFetch
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Store `bytes` at `key` in `bucket` with the given content type,
    /// replacing any existing object.
    fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        (**self).fetch(bucket, key)
    }

    fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        (**self).upload(bucket, key, bytes, content_type)
    }
}
