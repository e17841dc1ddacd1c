use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

pub const ID_ATTRIBUTE: &str = "id";
pub const USER_ID_ATTRIBUTE: &str = "user_id";

/// Free-form row attributes keyed by field name.
pub type Fields = BTreeMap<String, Value>;

/// Composite primary key of a memory row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryKey {
    pub id: String,
    pub user_id: String,
}

impl MemoryKey {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let user_id = user_id.into();
        if id.is_empty() {
            return Err(ValidationError::new("id cannot be empty"));
        }
        if user_id.is_empty() {
            return Err(ValidationError::new("user_id cannot be empty"));
        }
        Ok(Self { id, user_id })
    }

    /// Extracts the key from a full record, which must carry both key
    /// attributes as strings.
    pub fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        let id = string_attribute(fields, ID_ATTRIBUTE)?;
        let user_id = string_attribute(fields, USER_ID_ATTRIBUTE)?;
        Self::new(id, user_id)
    }
}

pub fn is_key_attribute(name: &str) -> bool {
    name == ID_ATTRIBUTE || name == USER_ID_ATTRIBUTE
}

fn string_attribute<'a>(fields: &'a Fields, name: &str) -> Result<&'a str, ValidationError> {
    match fields.get(name) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ValidationError::new(format!(
            "memory record field '{name}' must be a string"
        ))),
        None => Err(ValidationError::new(format!(
            "memory record is missing key field '{name}'"
        ))),
    }
}
