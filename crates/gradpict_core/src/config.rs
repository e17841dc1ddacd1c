use crate::error::ConfigError;

pub const BUCKET_NAME_ENV: &str = "AWS_STORAGE_BUCKET_NAME";
pub const REGION_ENV: &str = "AWS_S3_REGION_NAME";
pub const TABLE_NAME_ENV: &str = "DYNAMODB_TABLE_NAME";

pub const DEFAULT_REGION: &str = "eu-west-2";
pub const DEFAULT_TABLE_NAME: &str = "gradpict-memories";
pub const TOPIC_NAME: &str = "gradpict-notifications";

/// Resource names and placement resolved from the process environment.
///
/// The bucket name has no default. It stays `None` until something needs it,
/// so a table-only caller can run without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bucket_name: Option<String>,
    pub region: String,
    pub table_name: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            bucket_name: non_empty(BUCKET_NAME_ENV),
            region: non_empty(REGION_ENV).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            table_name: non_empty(TABLE_NAME_ENV).unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
        }
    }

    pub fn bucket_name(&self) -> Result<&str, ConfigError> {
        self.bucket_name
            .as_deref()
            .ok_or(ConfigError::Missing(BUCKET_NAME_ENV))
    }

    pub fn topic_name(&self) -> &'static str {
        TOPIC_NAME
    }
}
