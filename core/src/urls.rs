//! Resource paths of the Jira REST API, relative to the server URL.
//!
//! Identifiers are interpolated verbatim. A malformed key comes back from
//! the server as a 400/404, never as a local error.

/// Root of every resource path.
pub const API_BASE: &str = "/rest/api/2/";

fn url(resource: &str) -> String {
    format!("{API_BASE}{resource}")
}

pub fn issue_by_key(issue_key: &str) -> String {
    url(&format!("issue/{issue_key}"))
}

pub fn issue() -> String {
    url("issue")
}

pub fn search() -> String {
    url("search")
}

pub fn priority() -> String {
    url("priority")
}

pub fn create_meta() -> String {
    url("issue/createmeta")
}

pub fn status() -> String {
    url("status")
}

pub fn versions(project_key: &str) -> String {
    url(&format!("project/{project_key}/versions"))
}

pub fn version() -> String {
    url("version")
}

pub fn application_properties() -> String {
    url("application-properties")
}

pub fn attachment_by_id(attachment_id: &str) -> String {
    url(&format!("attachment/{attachment_id}"))
}

pub fn project() -> String {
    url("project")
}
