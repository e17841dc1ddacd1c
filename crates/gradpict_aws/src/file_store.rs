use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use gradpict_core::config::Settings;
use gradpict_core::object_url::public_object_url;
use tracing::{error, info};

use crate::adapters::object_store::{ObjectBackend, S3ObjectBackend};
use crate::error::StorageError;
use crate::sdk;

/// Upload and delete against the single configured bucket.
#[derive(Debug, Clone)]
pub struct FileStore<B> {
    bucket: String,
    backend: B,
}

impl FileStore<S3ObjectBackend> {
    pub fn from_settings(
        sdk_config: &SdkConfig,
        settings: &Settings,
    ) -> Result<Self, StorageError> {
        let bucket = settings.bucket_name()?;
        let client = sdk::s3_client(sdk_config, &settings.region);
        Ok(Self::new(bucket, S3ObjectBackend::new(client)))
    }
}

impl<B: ObjectBackend> FileStore<B> {
    pub fn new(bucket: impl Into<String>, backend: B) -> Self {
        Self {
            bucket: bucket.into(),
            backend,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Streams `content` to `key` and returns the object's public URL.
    /// `content_type` is only attached when given.
    ///
    /// The body goes out as a single `PutObject`, so it must have a known
    /// length and stay within S3's 5 GiB single-request limit.
    pub async fn upload(
        &self,
        content: ByteStream,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        if let Err(upload_error) = self
            .backend
            .put_object(&self.bucket, key, content, content_type)
            .await
        {
            error!(
                component = "file_store",
                event = "upload_failed",
                bucket = %self.bucket,
                key,
                error = %upload_error,
            );
            return Err(upload_error);
        }

        info!(
            component = "file_store",
            event = "object_uploaded",
            bucket = %self.bucket,
            key,
            content_type,
        );
        Ok(public_object_url(&self.bucket, key))
    }

    /// Removes `key`. Missing keys count as deleted.
    pub async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        if let Err(delete_error) = self.backend.delete_object(&self.bucket, key).await {
            error!(
                component = "file_store",
                event = "delete_failed",
                bucket = %self.bucket,
                key,
                error = %delete_error,
            );
            return Err(delete_error);
        }

        info!(
            component = "file_store",
            event = "object_deleted",
            bucket = %self.bucket,
            key,
        );
        Ok(true)
    }
}
