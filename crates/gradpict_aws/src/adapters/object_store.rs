use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::StorageError;

/// Object-level operations against an S3-compatible bucket.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// One request per object; no multipart transfer.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct S3ObjectBackend {
    client: aws_sdk_s3::Client,
}

impl S3ObjectBackend {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectBackend for S3ObjectBackend {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StorageError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StorageError::Delete {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })
    }
}
