use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;
use crate::memory::{is_key_attribute, Fields};

/// A `SET` update with every field name and value behind a placeholder.
///
/// Field names are never spliced into the expression text, so reserved words
/// and names containing punctuation stay legal.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    expression: String,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdateExpression {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Resolved `(field, value)` pairs in expression order, for backends that
    /// apply the update in memory instead of sending the expression.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        (0..self.names.len()).filter_map(move |index| {
            let field = self.names.get(&name_placeholder(index))?;
            let value = self.values.get(&value_placeholder(index))?;
            Some((field.as_str(), value))
        })
    }
}

pub fn build_update_expression(fields: &Fields) -> Result<UpdateExpression, ValidationError> {
    if fields.is_empty() {
        return Err(ValidationError::new(
            "update requires at least one field to set",
        ));
    }

    let mut clauses = Vec::with_capacity(fields.len());
    let mut names = BTreeMap::new();
    let mut values = BTreeMap::new();

    for (index, (field, value)) in fields.iter().enumerate() {
        if field.is_empty() {
            return Err(ValidationError::new("update field names cannot be empty"));
        }
        if is_key_attribute(field) {
            return Err(ValidationError::new(format!(
                "key field '{field}' cannot be updated"
            )));
        }

        let name = name_placeholder(index);
        let placeholder = value_placeholder(index);
        clauses.push(format!("{name} = {placeholder}"));
        names.insert(name, field.clone());
        values.insert(placeholder, value.clone());
    }

    Ok(UpdateExpression {
        expression: format!("SET {}", clauses.join(", ")),
        names,
        values,
    })
}

fn name_placeholder(index: usize) -> String {
    format!("#f{index}")
}

fn value_placeholder(index: usize) -> String {
    format!(":v{index}")
}
