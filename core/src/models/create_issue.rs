//! Payload for creating an issue.
//!
//! Jira accepts arbitrary custom fields on create, so the payload is an
//! ordered map from field name to `FieldValue` rather than a fixed struct.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{JiraClientError, Result};

/// A value of an issue field in a create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Object(IndexMap<String, FieldValue>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// An object value from `(name, value)` pairs, in order.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        FieldValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// A list value.
    pub fn list<V: Into<FieldValue>>(values: impl IntoIterator<Item = V>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for FieldValue {
    fn from(values: Vec<V>) -> Self {
        FieldValue::list(values)
    }
}

/// Serialized as `{"fields": {...}}` with fields in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIssue {
    fields: IndexMap<String, FieldValue>,
}

impl CreateIssue {
    pub fn new<L>(
        project_key: &str,
        summary: &str,
        description: &str,
        issue_type_id: &str,
        priority_id: &str,
        labels: L,
    ) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let mut fields = IndexMap::new();
        fields.insert("project".to_string(), FieldValue::object([("key", project_key)]));
        fields.insert("summary".to_string(), summary.into());
        fields.insert("description".to_string(), description.into());
        fields.insert("issuetype".to_string(), FieldValue::object([("id", issue_type_id)]));
        fields.insert("priority".to_string(), FieldValue::object([("id", priority_id)]));
        fields.insert(
            "labels".to_string(),
            FieldValue::list(labels.into_iter().map(|l| FieldValue::String(l.into()))),
        );
        Self { fields }
    }

    /// Append a field. Fails if a field with this name is already present;
    /// existing entries are never overwritten.
    pub fn add_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<&mut Self> {
        if self.fields.contains_key(name) {
            return Err(JiraClientError::message(format!(
                "field '{name}' is already present in the create payload"
            )));
        }
        self.fields.insert(name.to_string(), value.into());
        Ok(self)
    }

    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
