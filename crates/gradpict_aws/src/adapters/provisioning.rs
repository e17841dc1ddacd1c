use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
};
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CorsConfiguration, CreateBucketConfiguration,
    VersioningConfiguration,
};
use gradpict_core::provisioning::{location_constraint, CorsRule, TableSchema};

use crate::error::ProvisioningError;

/// Resource-creation calls issued by the provisioner, one per AWS request.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), ProvisioningError>;

    async fn enable_versioning(&self, bucket: &str) -> Result<(), ProvisioningError>;

    async fn put_cors(&self, bucket: &str, rule: &CorsRule) -> Result<(), ProvisioningError>;

    /// Fails with [`ProvisioningError::TableAlreadyExists`] when the table is
    /// already present.
    async fn create_table(&self, schema: &TableSchema) -> Result<(), ProvisioningError>;

    /// Returns the topic ARN. SNS answers repeated creation with the existing
    /// topic.
    async fn create_topic(&self, topic: &str) -> Result<String, ProvisioningError>;
}

#[derive(Debug, Clone)]
pub struct AwsProvisioningBackend {
    s3_client: aws_sdk_s3::Client,
    dynamodb_client: aws_sdk_dynamodb::Client,
    sns_client: aws_sdk_sns::Client,
}

impl AwsProvisioningBackend {
    pub fn new(
        s3_client: aws_sdk_s3::Client,
        dynamodb_client: aws_sdk_dynamodb::Client,
        sns_client: aws_sdk_sns::Client,
    ) -> Self {
        Self {
            s3_client,
            dynamodb_client,
            sns_client,
        }
    }
}

#[async_trait]
impl ProvisioningBackend for AwsProvisioningBackend {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), ProvisioningError> {
        let configuration = location_constraint(region).map(|constraint| {
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(constraint))
                .build()
        });

        self.s3_client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(configuration)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| ProvisioningError::CreateBucket {
                bucket: bucket.to_string(),
                message: aws_sdk_s3::error::DisplayErrorContext(&error).to_string(),
            })
    }

    async fn enable_versioning(&self, bucket: &str) -> Result<(), ProvisioningError> {
        let configuration = VersioningConfiguration::builder()
            .status(BucketVersioningStatus::Enabled)
            .build();

        self.s3_client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(configuration)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| ProvisioningError::EnableVersioning {
                bucket: bucket.to_string(),
                message: aws_sdk_s3::error::DisplayErrorContext(&error).to_string(),
            })
    }

    async fn put_cors(&self, bucket: &str, rule: &CorsRule) -> Result<(), ProvisioningError> {
        let cors_error = |message: String| ProvisioningError::ConfigureCors {
            bucket: bucket.to_string(),
            message,
        };

        let sdk_rule = aws_sdk_s3::types::CorsRule::builder()
            .set_allowed_headers(Some(rule.allowed_headers.clone()))
            .set_allowed_methods(Some(rule.allowed_methods.clone()))
            .set_allowed_origins(Some(rule.allowed_origins.clone()))
            .set_expose_headers(Some(rule.expose_headers.clone()))
            .build()
            .map_err(|error| cors_error(error.to_string()))?;
        let configuration = CorsConfiguration::builder()
            .cors_rules(sdk_rule)
            .build()
            .map_err(|error| cors_error(error.to_string()))?;

        self.s3_client
            .put_bucket_cors()
            .bucket(bucket)
            .cors_configuration(configuration)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                cors_error(aws_sdk_s3::error::DisplayErrorContext(&error).to_string())
            })
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<(), ProvisioningError> {
        let table_error = |message: String| ProvisioningError::CreateTable {
            table: schema.table_name.clone(),
            message,
        };

        let key_schema = vec![
            KeySchemaElement::builder()
                .attribute_name(&schema.hash_key)
                .key_type(KeyType::Hash)
                .build()
                .map_err(|error| table_error(error.to_string()))?,
            KeySchemaElement::builder()
                .attribute_name(&schema.range_key)
                .key_type(KeyType::Range)
                .build()
                .map_err(|error| table_error(error.to_string()))?,
        ];
        let attribute_definitions = vec![
            AttributeDefinition::builder()
                .attribute_name(&schema.hash_key)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|error| table_error(error.to_string()))?,
            AttributeDefinition::builder()
                .attribute_name(&schema.range_key)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|error| table_error(error.to_string()))?,
        ];
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(schema.read_capacity_units)
            .write_capacity_units(schema.write_capacity_units)
            .build()
            .map_err(|error| table_error(error.to_string()))?;

        let result = self
            .dynamodb_client
            .create_table()
            .table_name(&schema.table_name)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions))
            .provisioned_throughput(throughput)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_table_in_use(&error) => Err(ProvisioningError::TableAlreadyExists {
                table: schema.table_name.clone(),
            }),
            Err(error) => Err(table_error(
                aws_sdk_dynamodb::error::DisplayErrorContext(&error).to_string(),
            )),
        }
    }

    async fn create_topic(&self, topic: &str) -> Result<String, ProvisioningError> {
        let output = self
            .sns_client
            .create_topic()
            .name(topic)
            .send()
            .await
            .map_err(|error| ProvisioningError::CreateTopic {
                topic: topic.to_string(),
                message: aws_sdk_sns::error::DisplayErrorContext(&error).to_string(),
            })?;

        output
            .topic_arn
            .ok_or_else(|| ProvisioningError::MissingTopicArn {
                topic: topic.to_string(),
            })
    }
}

fn is_table_in_use<R>(error: &SdkError<CreateTableError, R>) -> bool {
    match error {
        SdkError::ServiceError(service_error) => {
            matches!(
                service_error.err(),
                CreateTableError::ResourceInUseException(_)
            )
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::types::error::{LimitExceededException, ResourceInUseException};

    use super::*;

    #[test]
    fn resource_in_use_means_table_exists() {
        let error: SdkError<CreateTableError, ()> = SdkError::service_error(
            CreateTableError::ResourceInUseException(ResourceInUseException::builder().build()),
            (),
        );
        assert!(is_table_in_use(&error));
    }

    #[test]
    fn other_create_table_failures_are_not_conflicts() {
        let error: SdkError<CreateTableError, ()> = SdkError::service_error(
            CreateTableError::LimitExceededException(LimitExceededException::builder().build()),
            (),
        );
        assert!(!is_table_in_use(&error));
    }
}
