//! Directory-backed object store.
//!
//! Layout: `<root>/<bucket>/<key>`, with `/` in keys mapped to nested
//! directories. Content types are not persisted.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::ObjectStore;
use crate::error::{Error, Result};

/// Object store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`. The directory need not exist yet.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the on-disk path of an object.
    ///
    /// Bucket and key must be relative paths made only of normal
    /// components, so nothing can resolve outside the bucket directory.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        check_relative(bucket, "bucket name")?;
        check_relative(key, "object key")?;
        Ok(self.root.join(bucket).join(key))
    }
}

fn check_relative(value: &str, what: &str) -> Result<()> {
    let path = Path::new(value);
    let only_normal = path
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    if value.is_empty() || !only_normal {
        return Err(Error::InvalidObjectKey {
            key: value.to_string(),
            reason: format!("{what} must be a non-empty relative path without '..'"),
        });
    }
    Ok(())
}

impl ObjectStore for LocalStore {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        let bytes = fs::read(&path).map_err(|e| Error::ObjectFetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes)
    }

    fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        let upload_error = |e: std::io::Error| Error::ObjectUpload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: format!("{}: {e}", path.display()),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(upload_error)?;
        }
        fs::write(&path, &bytes).map_err(upload_error)?;

        debug!(
            "Wrote {} ({} bytes, {content_type})",
            path.display(),
            bytes.len()
        );
        Ok(())
    }
}
