use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use gradpict_core::memory::{Fields, MemoryKey, ID_ATTRIBUTE, USER_ID_ATTRIBUTE};
use gradpict_core::update_expression::UpdateExpression;

use crate::adapters::attribute::{fields_to_item, item_to_fields, to_attribute_value};
use crate::error::TableError;

/// Acknowledgement of an unconditional row write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutReceipt {
    pub request_id: Option<String>,
}

/// Row-level operations against a table keyed by `(id, user_id)`.
#[async_trait]
pub trait TableBackend: Send + Sync {
    async fn put_item(&self, table: &str, item: &Fields) -> Result<PutReceipt, TableError>;

    async fn get_item(&self, table: &str, key: &MemoryKey) -> Result<Option<Fields>, TableError>;

    /// Applies `update` and returns every attribute of the row afterwards.
    async fn update_item(
        &self,
        table: &str,
        key: &MemoryKey,
        update: &UpdateExpression,
    ) -> Result<Fields, TableError>;
}

#[derive(Debug, Clone)]
pub struct DynamoTableBackend {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoTableBackend {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

fn key_attributes(key: &MemoryKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ID_ATTRIBUTE.to_string(), AttributeValue::S(key.id.clone())),
        (
            USER_ID_ATTRIBUTE.to_string(),
            AttributeValue::S(key.user_id.clone()),
        ),
    ])
}

#[async_trait]
impl TableBackend for DynamoTableBackend {
    async fn put_item(&self, table: &str, item: &Fields) -> Result<PutReceipt, TableError> {
        let output = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(fields_to_item(item)))
            .send()
            .await
            .map_err(|error| TableError::Put {
                table: table.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })?;

        Ok(PutReceipt {
            request_id: output.request_id().map(str::to_string),
        })
    }

    async fn get_item(&self, table: &str, key: &MemoryKey) -> Result<Option<Fields>, TableError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key_attributes(key)))
            .send()
            .await
            .map_err(|error| TableError::Get {
                table: table.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })?;

        output.item().map(item_to_fields).transpose()
    }

    async fn update_item(
        &self,
        table: &str,
        key: &MemoryKey,
        update: &UpdateExpression,
    ) -> Result<Fields, TableError> {
        let names: HashMap<String, String> = update
            .names()
            .iter()
            .map(|(placeholder, field)| (placeholder.clone(), field.clone()))
            .collect();
        let values: HashMap<String, AttributeValue> = update
            .values()
            .iter()
            .map(|(placeholder, value)| (placeholder.clone(), to_attribute_value(value)))
            .collect();

        let output = self
            .client
            .update_item()
            .table_name(table)
            .set_key(Some(key_attributes(key)))
            .update_expression(update.expression())
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|error| TableError::Update {
                table: table.to_string(),
                message: DisplayErrorContext(&error).to_string(),
            })?;

        output
            .attributes()
            .map(item_to_fields)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}
