use gradpict_core::error::{ConfigError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create S3 bucket '{bucket}': {message}")]
    CreateBucket { bucket: String, message: String },
    #[error("failed to enable versioning on bucket '{bucket}': {message}")]
    EnableVersioning { bucket: String, message: String },
    #[error("failed to configure CORS on bucket '{bucket}': {message}")]
    ConfigureCors { bucket: String, message: String },
    #[error("failed to create DynamoDB table '{table}': {message}")]
    CreateTable { table: String, message: String },
    #[error("DynamoDB table '{table}' already exists")]
    TableAlreadyExists { table: String },
    #[error("failed to create SNS topic '{topic}': {message}")]
    CreateTopic { topic: String, message: String },
    #[error("SNS did not return an ARN for topic '{topic}'")]
    MissingTopicArn { topic: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to upload '{key}' to bucket '{bucket}': {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("failed to delete '{key}' from bucket '{bucket}': {message}")]
    Delete {
        bucket: String,
        key: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid memory request: {0}")]
    InvalidRequest(#[from] ValidationError),
    #[error("failed to create memory in table '{table}': {message}")]
    Put { table: String, message: String },
    #[error("failed to get memory from table '{table}': {message}")]
    Get { table: String, message: String },
    #[error("failed to update memory in table '{table}': {message}")]
    Update { table: String, message: String },
    #[error("attribute '{field}' has unsupported DynamoDB type {kind}")]
    UnsupportedAttribute { field: String, kind: &'static str },
}
