use aws_config::SdkConfig;
use gradpict_core::config::Settings;
use gradpict_core::provisioning::{
    bucket_cors_rule, ProvisioningSummary, TableHandle, TableSchema, TableStatus,
};
use tracing::{error, info, warn};

use crate::adapters::provisioning::{AwsProvisioningBackend, ProvisioningBackend};
use crate::error::ProvisioningError;
use crate::sdk;

/// One-shot creation of the bucket, table and topic.
///
/// Steps run in a fixed order and stop at the first failure. Nothing created
/// by an earlier step is rolled back.
#[derive(Debug, Clone)]
pub struct Provisioner<B> {
    settings: Settings,
    backend: B,
}

impl Provisioner<AwsProvisioningBackend> {
    pub fn from_settings(sdk_config: &SdkConfig, settings: Settings) -> Self {
        let backend = AwsProvisioningBackend::new(
            sdk::s3_client(sdk_config, &settings.region),
            sdk::dynamodb_client(sdk_config),
            sdk::sns_client(sdk_config),
        );
        Self::new(settings, backend)
    }
}

impl<B: ProvisioningBackend> Provisioner<B> {
    pub fn new(settings: Settings, backend: B) -> Self {
        Self { settings, backend }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates the bucket, then turns on versioning and the CORS rule.
    pub async fn create_bucket(&self) -> Result<String, ProvisioningError> {
        let bucket = self.settings.bucket_name()?;
        let region = &self.settings.region;

        let result = async {
            self.backend.create_bucket(bucket, region).await?;
            info!(component = "provisioner", event = "bucket_created", bucket, region = %region);

            self.backend.enable_versioning(bucket).await?;
            self.backend.put_cors(bucket, &bucket_cors_rule()).await?;
            info!(component = "provisioner", event = "bucket_configured", bucket);
            Ok::<_, ProvisioningError>(bucket.to_string())
        }
        .await;

        if let Err(bucket_error) = &result {
            error!(
                component = "provisioner",
                event = "bucket_failed",
                bucket,
                error = %bucket_error,
            );
        }
        result
    }

    /// Creates the memories table. An existing table counts as success.
    pub async fn create_table(&self) -> Result<TableHandle, ProvisioningError> {
        let schema = TableSchema::memories(self.settings.table_name.clone());

        match self.backend.create_table(&schema).await {
            Ok(()) => {
                info!(
                    component = "provisioner",
                    event = "table_created",
                    table = %schema.table_name,
                );
                Ok(TableHandle {
                    table_name: schema.table_name,
                    status: TableStatus::Created,
                })
            }
            Err(ProvisioningError::TableAlreadyExists { table }) => {
                warn!(
                    component = "provisioner",
                    event = "table_exists",
                    table = %table,
                );
                Ok(TableHandle {
                    table_name: table,
                    status: TableStatus::Existing,
                })
            }
            Err(table_error) => {
                error!(
                    component = "provisioner",
                    event = "table_failed",
                    table = %schema.table_name,
                    error = %table_error,
                );
                Err(table_error)
            }
        }
    }

    /// Creates the notification topic and returns its ARN.
    pub async fn create_topic(&self) -> Result<String, ProvisioningError> {
        let topic = self.settings.topic_name();

        match self.backend.create_topic(topic).await {
            Ok(topic_arn) => {
                info!(
                    component = "provisioner",
                    event = "topic_created",
                    topic,
                    topic_arn = %topic_arn,
                );
                Ok(topic_arn)
            }
            Err(topic_error) => {
                error!(
                    component = "provisioner",
                    event = "topic_failed",
                    topic,
                    error = %topic_error,
                );
                Err(topic_error)
            }
        }
    }

    pub async fn setup(&self) -> Result<ProvisioningSummary, ProvisioningError> {
        let bucket_name = self.create_bucket().await?;
        let table = self.create_table().await?;
        let topic_arn = self.create_topic().await?;

        Ok(ProvisioningSummary {
            bucket_name,
            table_name: table.table_name,
            topic_arn,
        })
    }
}
