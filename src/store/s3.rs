//! S3 backend using the AWS SDK.
//!
//! The SDK is async; this store owns a current-thread tokio runtime and
//! blocks on each request so callers stay synchronous.

use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tokio::runtime::Runtime;
use tracing::debug;

use super::ObjectStore;
use crate::config::{Config, require_credentials};
use crate::constants::APP_NAME;
use crate::error::{Error, Result};

/// Object store backed by S3 or an S3-compatible service.
pub struct S3Store {
    client: Client,
    runtime: Runtime,
}

impl S3Store {
    /// Build a client from the `[credentials]` and `[storage]` sections.
    ///
    /// Fails with [`Error::MissingCredential`] if either access key is absent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (access_key, secret_access_key) = require_credentials(&config.credentials)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::StoreInit {
                reason: format!("failed to create async runtime: {e}"),
            })?;

        let credentials = Credentials::new(access_key, secret_access_key, None, None, APP_NAME);

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.storage.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(config.storage.force_path_style);

        if let Some(endpoint) = &config.storage.endpoint {
            debug!("Using custom storage endpoint {endpoint}");
            builder = builder.endpoint_url(endpoint);
        }

        let client = {
            let _guard = runtime.enter();
            Client::from_conf(builder.build())
        };

        Ok(Self { client, runtime })
    }
}

impl ObjectStore for S3Store {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| Error::ObjectFetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason,
        };

        self.runtime.block_on(async {
            let output = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| fetch_error(DisplayErrorContext(e).to_string()))?;

            let body = output
                .body
                .collect()
                .await
                .map_err(|e| fetch_error(e.to_string()))?;

            let bytes = body.into_bytes().to_vec();
            debug!("Downloaded s3://{bucket}/{key} ({} bytes)", bytes.len());
            Ok::<_, Error>(bytes)
        })
    }

    fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let len = bytes.len();

        self.runtime.block_on(async {
            self.client
                .put_object()
                .bucket(bucket)
                .key(key)
                .content_type(content_type)
                .body(ByteStream::from(bytes))
                .send()
                .await
                .map_err(|e| Error::ObjectUpload {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    reason: DisplayErrorContext(e).to_string(),
                })
        })?;

        debug!("Uploaded s3://{bucket}/{key} ({len} bytes)");
        Ok(())
    }
}
