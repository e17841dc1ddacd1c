use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use gradpict_core::memory::Fields;
use serde_json::{Map, Number, Value};

use crate::error::TableError;

pub type Item = HashMap<String, AttributeValue>;

pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => {
            AttributeValue::L(values.iter().map(to_attribute_value).collect())
        }
        Value::Object(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(name, value)| (name.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

pub fn fields_to_item(fields: &Fields) -> Item {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect()
}

pub fn item_to_fields(item: &Item) -> Result<Fields, TableError> {
    item.iter()
        .map(|(name, value)| -> Result<(String, Value), TableError> {
            Ok((name.clone(), from_attribute_value(name, value)?))
        })
        .collect()
}

pub fn from_attribute_value(field: &str, value: &AttributeValue) -> Result<Value, TableError> {
    let converted = match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => parse_number(number),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => {
            Value::Array(values.iter().map(String::as_str).map(parse_number).collect())
        }
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(|value| from_attribute_value(field, value))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, value)| -> Result<(String, Value), TableError> {
                    Ok((name.clone(), from_attribute_value(field, value)?))
                })
                .collect::<Result<Map<_, _>, _>>()?,
        ),
        AttributeValue::B(_) => return Err(unsupported(field, "B")),
        AttributeValue::Bs(_) => return Err(unsupported(field, "BS")),
        _ => return Err(unsupported(field, "unknown")),
    };
    Ok(converted)
}

/// DynamoDB numbers arrive as decimal strings of up to 38 digits. They are
/// kept in their exact textual form so a read-modify-write never rounds them.
fn parse_number(text: &str) -> Value {
    text.parse::<Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(text.to_string()))
}

fn unsupported(field: &str, kind: &'static str) -> TableError {
    TableError::UnsupportedAttribute {
        field: field.to_string(),
        kind,
    }
}
