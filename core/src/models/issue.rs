use serde::{Deserialize, Serialize};

use super::attachment::Attachment;
use super::de;
use super::project::{IssueType, Priority, Project, Status};
use super::version::FixVersion;

/// A Jira user as it appears in reporter, assignee and author fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    #[serde(rename = "self")]
    pub self_url: String,
    pub name: String,
    pub account_id: Option<String>,
    pub email_address: String,
    pub display_name: String,
    pub active: bool,
}

/// A Jira issue.
///
/// `fields` is `None` when the payload had no field aggregate, which is how
/// Jira answers for an issue that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub expand: Option<String>,
    pub fields: Option<Fields>,
}

/// The attributes of an issue. Every member may be absent when the request
/// narrowed the field selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    pub summary: String,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,
    pub project: Option<Project>,
    pub resolution: Option<Resolution>,
    #[serde(rename = "resolutiondate")]
    pub resolution_date: Option<String>,
    pub reporter: Option<Author>,
    pub assignee: Option<Author>,
    pub created: Option<String>,
    pub updated: Option<String>,
    #[serde(rename = "duedate")]
    pub due_date: Option<String>,
    pub labels: Vec<String>,
    pub components: Vec<Component>,
    pub versions: Vec<FixVersion>,
    #[serde(rename = "fixVersions")]
    pub fix_versions: Vec<FixVersion>,
    #[serde(rename = "issuelinks")]
    pub issue_links: Vec<IssueLink>,
    #[serde(rename = "subtasks")]
    pub sub_tasks: Vec<Subtask>,
    #[serde(rename = "attachment")]
    pub attachments: Vec<Attachment>,
    pub comment: Option<Comments>,
    pub worklog: Option<Worklogs>,
    pub votes: Option<Votes>,
    pub watches: Option<Watches>,
    pub progress: Option<Progress>,
    #[serde(rename = "aggregateprogress")]
    pub aggregate_progress: Option<Progress>,
    pub timetracking: Option<Timetracking>,
    #[serde(rename = "timespent")]
    pub time_spent: Option<i64>,
    #[serde(rename = "timeestimate")]
    pub time_estimate: Option<i64>,
    #[serde(rename = "timeoriginalestimate")]
    pub time_original_estimate: Option<i64>,
    #[serde(rename = "aggregatetimespent")]
    pub aggregate_time_spent: Option<i64>,
    #[serde(rename = "aggregatetimeestimate")]
    pub aggregate_time_estimate: Option<i64>,
    #[serde(rename = "aggregatetimeoriginalestimate")]
    pub aggregate_time_original_estimate: Option<i64>,
    #[serde(rename = "workratio")]
    pub work_ratio: Option<i64>,
}

/// One page of JQL search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issues {
    pub expand: Option<String>,
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    pub issues: Vec<Issue>,
}

/// The identity of a freshly created issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub progress: i64,
    pub total: i64,
    pub percent: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timetracking {
    pub original_estimate: Option<String>,
    pub remaining_estimate: Option<String>,
    pub time_spent: Option<String>,
    pub original_estimate_seconds: Option<i64>,
    pub remaining_estimate_seconds: Option<i64>,
    pub time_spent_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Votes {
    #[serde(rename = "self")]
    pub self_url: String,
    pub votes: i64,
    pub has_voted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Watches {
    #[serde(rename = "self")]
    pub self_url: String,
    pub watch_count: i64,
    pub is_watching: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtask {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub fields: Option<SubtaskFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtaskFields {
    pub summary: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkType {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    pub inward: String,
    pub outward: String,
}

/// A link between two issues. Only the far end of the link is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueLink {
    pub id: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub outward_issue: Option<Box<Issue>>,
    pub inward_issue: Option<Box<Issue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub author: Option<Author>,
    pub body: String,
    pub update_author: Option<Author>,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comments {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Worklog {
    #[serde(rename = "self")]
    pub self_url: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub author: Option<Author>,
    pub update_author: Option<Author>,
    pub comment: Option<String>,
    pub created: String,
    pub updated: String,
    pub started: String,
    pub time_spent: String,
    pub time_spent_seconds: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Worklogs {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    pub worklogs: Vec<Worklog>,
}

/// Body of a time-tracking edit:
/// `{"update": {"timetracking": [{"edit": {...}}]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetrackingUpdate {
    update: TimetrackingOperations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TimetrackingOperations {
    timetracking: Vec<TimetrackingOperation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TimetrackingOperation {
    edit: TimetrackingEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimetrackingEdit {
    original_estimate: String,
    remaining_estimate: String,
}

impl TimetrackingUpdate {
    /// Estimates are whole minutes and are sent with an `m` suffix.
    pub fn from_minutes(original_estimate_minutes: u32, remaining_estimate_minutes: u32) -> Self {
        Self {
            update: TimetrackingOperations {
                timetracking: vec![TimetrackingOperation {
                    edit: TimetrackingEdit {
                        original_estimate: format!("{original_estimate_minutes}m"),
                        remaining_estimate: format!("{remaining_estimate_minutes}m"),
                    },
                }],
            },
        }
    }
}
