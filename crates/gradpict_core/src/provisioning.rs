//! Fixed shape of the provisioned resources.
//!
//! These values are the single source for what the provisioner asks AWS to
//! create; the SDK adapters translate them into request builders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::memory::{ID_ATTRIBUTE, USER_ID_ATTRIBUTE};

/// S3 treats this region as the default location and rejects it as an
/// explicit location constraint.
pub const US_EAST_1: &str = "us-east-1";

pub const READ_CAPACITY_UNITS: i64 = 5;
pub const WRITE_CAPACITY_UNITS: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorsRule {
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub expose_headers: Vec<String>,
}

pub fn bucket_cors_rule() -> CorsRule {
    CorsRule {
        allowed_headers: vec!["*".to_string()],
        allowed_methods: ["GET", "PUT", "POST", "DELETE"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        allowed_origins: vec!["*".to_string()],
        expose_headers: vec!["ETag".to_string()],
    }
}

pub fn location_constraint(region: &str) -> Option<&str> {
    if region == US_EAST_1 {
        None
    } else {
        Some(region)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub hash_key: String,
    pub range_key: String,
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl TableSchema {
    pub fn memories(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            hash_key: ID_ATTRIBUTE.to_string(),
            range_key: USER_ID_ATTRIBUTE.to_string(),
            read_capacity_units: READ_CAPACITY_UNITS,
            write_capacity_units: WRITE_CAPACITY_UNITS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableStatus {
    Created,
    Existing,
}

/// Handle to a provisioned table, fresh or pre-existing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableHandle {
    pub table_name: String,
    pub status: TableStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisioningSummary {
    pub bucket_name: String,
    pub table_name: String,
    pub topic_arn: String,
}

impl fmt::Display for ProvisioningSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AWS resources setup complete!")?;
        writeln!(f, "S3 bucket: {}", self.bucket_name)?;
        writeln!(f, "DynamoDB table: {}", self.table_name)?;
        write!(f, "SNS topic ARN: {}", self.topic_arn)
    }
}
