use aws_config::SdkConfig;
use gradpict_core::config::Settings;
use gradpict_core::memory::{Fields, MemoryKey};
use gradpict_core::provisioning::TableHandle;
use gradpict_core::update_expression::build_update_expression;
use tracing::{error, info};

use crate::adapters::table_store::{DynamoTableBackend, PutReceipt, TableBackend};
use crate::error::TableError;
use crate::sdk;

/// Memory rows in the single configured table, keyed by `(id, user_id)`.
#[derive(Debug, Clone)]
pub struct MemoryStore<B> {
    table: String,
    backend: B,
}

impl MemoryStore<DynamoTableBackend> {
    pub fn from_settings(sdk_config: &SdkConfig, settings: &Settings) -> Self {
        let client = sdk::dynamodb_client(sdk_config);
        Self::new(settings.table_name.clone(), DynamoTableBackend::new(client))
    }
}

impl<B: TableBackend> MemoryStore<B> {
    pub fn new(table: impl Into<String>, backend: B) -> Self {
        Self {
            table: table.into(),
            backend,
        }
    }

    pub fn for_handle(handle: &TableHandle, backend: B) -> Self {
        Self::new(handle.table_name.clone(), backend)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes `record` as a full row, replacing any row with the same key.
    pub async fn create_memory(&self, record: &Fields) -> Result<PutReceipt, TableError> {
        let key = MemoryKey::from_fields(record)?;
        let result = self.backend.put_item(&self.table, record).await;
        self.log_outcome("create_memory", &key, &result);
        result
    }

    /// Returns `Ok(None)` when no row has this key.
    pub async fn get_memory(&self, id: &str, user_id: &str) -> Result<Option<Fields>, TableError> {
        let key = MemoryKey::new(id, user_id)?;
        let result = self.backend.get_item(&self.table, &key).await;
        if let Err(get_error) = &result {
            self.log_failure("get_memory", &key, get_error);
        }
        result
    }

    /// Sets exactly the given non-key fields and returns the full row
    /// afterwards. Empty updates are rejected before any request is made.
    pub async fn update_memory(
        &self,
        id: &str,
        user_id: &str,
        fields: &Fields,
    ) -> Result<Fields, TableError> {
        let key = MemoryKey::new(id, user_id)?;
        let update = build_update_expression(fields)?;
        let result = self.backend.update_item(&self.table, &key, &update).await;
        self.log_outcome("update_memory", &key, &result);
        result
    }

    fn log_outcome<T>(&self, operation: &str, key: &MemoryKey, result: &Result<T, TableError>) {
        match result {
            Ok(_) => info!(
                component = "memory_store",
                event = operation,
                table = %self.table,
                id = %key.id,
                user_id = %key.user_id,
            ),
            Err(table_error) => self.log_failure(operation, key, table_error),
        }
    }

    fn log_failure(&self, operation: &str, key: &MemoryKey, table_error: &TableError) {
        error!(
            component = "memory_store",
            event = "operation_failed",
            operation,
            table = %self.table,
            id = %key.id,
            user_id = %key.user_id,
            error = %table_error,
        );
    }
}
