#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use gradpict_aws::adapters::object_store::ObjectBackend;
use gradpict_aws::adapters::provisioning::ProvisioningBackend;
use gradpict_aws::adapters::table_store::{PutReceipt, TableBackend};
use gradpict_aws::error::{ProvisioningError, StorageError, TableError};
use gradpict_core::memory::{Fields, MemoryKey, ID_ATTRIBUTE, USER_ID_ATTRIBUTE};
use gradpict_core::provisioning::{CorsRule, TableSchema};
use gradpict_core::update_expression::UpdateExpression;
use serde_json::Value;

/// Bucket contents keyed by `(bucket, key)`, with the content type stored
/// next to the bytes.
#[derive(Default)]
pub struct InMemoryBuckets {
    objects: Mutex<BTreeMap<(String, String), (Vec<u8>, Option<String>)>>,
}

impl InMemoryBuckets {
    pub fn body(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(body, _)| body.clone())
    }

    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(&(bucket.to_string(), key.to_string()))
            .and_then(|(_, content_type)| content_type.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().expect("poisoned mutex").len()
    }
}

#[async_trait]
impl ObjectBackend for InMemoryBuckets {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let bytes = body
            .collect()
            .await
            .map_err(|error| StorageError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: error.to_string(),
            })?
            .into_bytes()
            .to_vec();
        self.objects.lock().expect("poisoned mutex").insert(
            (bucket.to_string(), key.to_string()),
            (bytes, content_type.map(str::to_string)),
        );
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}

/// Table that mirrors DynamoDB's put/get/update semantics for one key schema.
#[derive(Default)]
pub struct InMemoryTable {
    rows: Mutex<BTreeMap<(String, MemoryKey), Fields>>,
}

impl InMemoryTable {
    pub fn row_count(&self) -> usize {
        self.rows.lock().expect("poisoned mutex").len()
    }
}

#[async_trait]
impl TableBackend for InMemoryTable {
    async fn put_item(&self, table: &str, item: &Fields) -> Result<PutReceipt, TableError> {
        let key = MemoryKey::from_fields(item)?;
        self.rows
            .lock()
            .expect("poisoned mutex")
            .insert((table.to_string(), key), item.clone());
        Ok(PutReceipt::default())
    }

    async fn get_item(&self, table: &str, key: &MemoryKey) -> Result<Option<Fields>, TableError> {
        Ok(self
            .rows
            .lock()
            .expect("poisoned mutex")
            .get(&(table.to_string(), key.clone()))
            .cloned())
    }

    async fn update_item(
        &self,
        table: &str,
        key: &MemoryKey,
        update: &UpdateExpression,
    ) -> Result<Fields, TableError> {
        let mut rows = self.rows.lock().expect("poisoned mutex");
        let row = rows
            .entry((table.to_string(), key.clone()))
            .or_insert_with(|| {
                Fields::from([
                    (ID_ATTRIBUTE.to_string(), Value::from(key.id.clone())),
                    (USER_ID_ATTRIBUTE.to_string(), Value::from(key.user_id.clone())),
                ])
            });
        for (field, value) in update.assignments() {
            row.insert(field.to_string(), value.clone());
        }
        Ok(row.clone())
    }
}

/// Account-level resource registry that answers like the AWS control planes:
/// tables conflict on re-creation, topics are idempotent.
#[derive(Default)]
pub struct InMemoryAccount {
    buckets: Mutex<BTreeMap<String, BucketState>>,
    tables: Mutex<BTreeSet<String>>,
    topics: Mutex<BTreeSet<String>>,
    deny_tables: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketState {
    pub region: String,
    pub versioning: bool,
    pub cors: Option<CorsRule>,
}

impl InMemoryAccount {
    pub fn denying_tables() -> Self {
        Self {
            deny_tables: true,
            ..Self::default()
        }
    }

    pub fn bucket(&self, bucket: &str) -> Option<BucketState> {
        self.buckets
            .lock()
            .expect("poisoned mutex")
            .get(bucket)
            .cloned()
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.lock().expect("poisoned mutex").contains(table)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.lock().expect("poisoned mutex").len()
    }

    fn with_bucket(
        &self,
        bucket: &str,
        update: impl FnOnce(&mut BucketState),
    ) -> Result<(), String> {
        let mut buckets = self.buckets.lock().expect("poisoned mutex");
        let state = buckets
            .get_mut(bucket)
            .ok_or_else(|| format!("NoSuchBucket: {bucket}"))?;
        update(state);
        Ok(())
    }
}

#[async_trait]
impl ProvisioningBackend for InMemoryAccount {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), ProvisioningError> {
        let mut buckets = self.buckets.lock().expect("poisoned mutex");
        if buckets.contains_key(bucket) {
            return Err(ProvisioningError::CreateBucket {
                bucket: bucket.to_string(),
                message: "BucketAlreadyOwnedByYou".to_string(),
            });
        }
        buckets.insert(
            bucket.to_string(),
            BucketState {
                region: region.to_string(),
                ..BucketState::default()
            },
        );
        Ok(())
    }

    async fn enable_versioning(&self, bucket: &str) -> Result<(), ProvisioningError> {
        self.with_bucket(bucket, |state| state.versioning = true)
            .map_err(|message| ProvisioningError::EnableVersioning {
                bucket: bucket.to_string(),
                message,
            })
    }

    async fn put_cors(&self, bucket: &str, rule: &CorsRule) -> Result<(), ProvisioningError> {
        self.with_bucket(bucket, |state| state.cors = Some(rule.clone()))
            .map_err(|message| ProvisioningError::ConfigureCors {
                bucket: bucket.to_string(),
                message,
            })
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<(), ProvisioningError> {
        if self.deny_tables {
            return Err(ProvisioningError::CreateTable {
                table: schema.table_name.clone(),
                message: "AccessDeniedException".to_string(),
            });
        }
        let mut tables = self.tables.lock().expect("poisoned mutex");
        if !tables.insert(schema.table_name.clone()) {
            return Err(ProvisioningError::TableAlreadyExists {
                table: schema.table_name.clone(),
            });
        }
        Ok(())
    }

    async fn create_topic(&self, topic: &str) -> Result<String, ProvisioningError> {
        self.topics
            .lock()
            .expect("poisoned mutex")
            .insert(topic.to_string());
        Ok(format!("arn:aws:sns:eu-west-2:123456789012:{topic}"))
    }
}
