use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub key: String,
    pub name: String,
    pub project_type_key: Option<String>,
    pub avatar_urls: HashMap<String, String>,
}

/// Creation metadata for one project: the issue types it accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "issuetypes")]
    pub issue_types: Vec<IssueType>,
}

/// Response of `issue/createmeta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueCreateMeta {
    pub expand: Option<String>,
    pub projects: Vec<ProjectMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueType {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub subtask: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Priority {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: String,
    pub status_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: String,
    pub status_category: Option<StatusCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCategory {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub key: String,
    pub name: String,
    pub color_name: String,
}

/// A server-wide setting exposed by `application-properties`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationProperty {
    pub id: String,
    pub key: String,
    pub value: String,
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub default_value: String,
}
