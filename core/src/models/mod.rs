//! Data transfer objects mirroring the Jira REST API v2 schema.
//!
//! # Design
//! Response types derive `Default` and default every missing field, so a
//! body that lacks the expected shape (Jira's `{"errorMessages": [...]}` on
//! a 404, for instance) decodes into an empty entity instead of failing.
//! Outbound payloads (`CreateIssue`, `NewVersion`, `UpdateVersion`,
//! `TimetrackingUpdate`) are separate, narrower types.

pub mod attachment;
pub mod create_issue;
pub mod issue;
pub mod project;
pub mod version;

pub use attachment::Attachment;
pub use create_issue::{CreateIssue, FieldValue};
pub use issue::{
    Author, BasicIssue, Comment, Comments, Component, Fields, Issue, IssueLink, Issues, LinkType, Progress,
    Resolution, Subtask, SubtaskFields, Timetracking, TimetrackingUpdate, Votes, Watches, Worklog, Worklogs,
};
pub use project::{ApplicationProperty, IssueCreateMeta, IssueType, Priority, Project, ProjectMeta, Status, StatusCategory};
pub use version::{FixVersion, NewVersion, UpdateVersion, Version};

/// Deserialization helpers for fields Jira sends with inconsistent types.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    /// Accepts `"10000"`, `10000` or `null` and yields a string.
    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) => s,
            Some(StringOrNumber::Int(n)) => n.to_string(),
            Some(StringOrNumber::Float(n)) => n.to_string(),
            None => String::new(),
        })
    }

    /// Accepts `true`, `"true"` or `null`; anything else is `false`.
    pub fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BoolOrString {
            Bool(bool),
            String(String),
        }

        Ok(match Option::<BoolOrString>::deserialize(deserializer)? {
            Some(BoolOrString::Bool(b)) => b,
            Some(BoolOrString::String(s)) => s.eq_ignore_ascii_case("true"),
            None => false,
        })
    }
}
