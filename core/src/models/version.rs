use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;

/// A release version of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Version {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub archived: bool,
    pub released: bool,
    pub release_date: Option<NaiveDate>,
    pub user_release_date: Option<String>,
    #[serde(deserialize_with = "de::string_or_number")]
    pub project_id: String,
}

/// A version as embedded in an issue's `versions` and `fixVersions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixVersion {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de::bool_or_string")]
    pub archived: bool,
    #[serde(deserialize_with = "de::bool_or_string")]
    pub released: bool,
    pub release_date: Option<NaiveDate>,
}

/// Payload for `POST version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion {
    pub name: String,
    /// Key of the owning project.
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    pub released: bool,
    pub archived: bool,
}

impl NewVersion {
    pub fn new(project_key: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            project: project_key.to_string(),
            description: None,
            release_date: None,
            released: false,
            archived: false,
        }
    }
}

/// Payload for `PUT version`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVersion {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}
