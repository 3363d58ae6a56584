//! In-memory object store.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::ObjectStore;
use crate::error::{Error, Result};

/// An object held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object contents.
    pub bytes: Vec<u8>,
    /// Content type given at upload, if any.
    pub content_type: Option<String>,
}

/// Object store that keeps everything in a map, keyed by `(bucket, key)`.
///
/// Counts uploads so callers can tell overwrites from distinct objects.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<(String, String), StoredObject>>,
    uploads: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without counting it as an upload.
    pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects.borrow_mut().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: None,
            },
        );
    }

    /// Look up an object.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .borrow()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All keys stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .borrow()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }

    /// Number of successful uploads so far.
    pub fn upload_count(&self) -> usize {
        self.uploads.get()
    }
}

impl ObjectStore for MemoryStore {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.get(bucket, key)
            .map(|object| object.bytes)
            .ok_or_else(|| Error::ObjectFetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: "no such key".to_string(),
            })
    }

    fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.objects.borrow_mut().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: Some(content_type.to_string()),
            },
        );
        self.uploads.set(self.uploads.get() + 1);
        Ok(())
    }
}
