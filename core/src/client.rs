//! Request builder and response parser for the Jira REST API.
//!
//! # Design
//! `JiraClient` holds only its `JiraConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes the
//! `HttpResponse`. The exchange in between belongs to the caller or to a
//! `Transport`.
//!
//! Every `parse_*` method runs `validate_response` first. It fails only when
//! the exchange did not complete or captured an error; a 4xx/5xx that
//! completed is decoded like any other body. The three write operations
//! that report a status (`update_issue_fields`, `update_timetracking`,
//! `delete_attachment`) look at the status code themselves.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::JiraConfig;
use crate::error::{JiraClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::{
    ApplicationProperty, Attachment, BasicIssue, CreateIssue, Issue, IssueCreateMeta, Issues, NewVersion, Priority,
    Project, ProjectMeta, Status, TimetrackingUpdate, UpdateVersion, Version,
};
use crate::urls;

/// Query parameter names used by the read endpoints.
pub mod query {
    pub const JQL: &str = "jql";
    pub const FIELDS: &str = "fields";
    pub const START_AT: &str = "startAt";
    pub const MAX_RESULTS: &str = "maxResults";
    pub const PROJECT_KEYS: &str = "projectKeys";
    pub const KEY: &str = "key";
}

const NO_CONTENT: u16 = 204;

/// Stateless request builder and response parser for one Jira server.
#[derive(Clone)]
pub struct JiraClient {
    config: JiraConfig,
    auth_header: String,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Self {
        let auth_header = config.basic_auth_header();
        Self { config, auth_header }
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Issues
    // -----------------------------------------------------------------------

    pub fn build_get_issue(&self, issue_key: &str, fields: Option<&[&str]>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, &urls::issue_by_key(issue_key));
        req.query.push((query::FIELDS.to_string(), fields_to_string(fields)));
        req
    }

    /// `None` when the payload carried no field aggregate.
    pub fn parse_get_issue(&self, response: HttpResponse) -> Result<Option<Issue>> {
        let issue: Issue = decode(&response)?;
        Ok(issue.fields.is_some().then_some(issue))
    }

    /// `fields` is any serializable update body, e.g.
    /// `{"fields": {"summary": "..."}}`.
    pub fn build_update_issue_fields<F>(&self, issue_key: &str, fields: &F) -> Result<HttpRequest>
    where
        F: Serialize + ?Sized,
    {
        self.json_request(HttpMethod::Put, &urls::issue_by_key(issue_key), fields)
    }

    /// `true` on 204, `false` on any other completed status.
    pub fn parse_update_issue_fields(&self, response: HttpResponse) -> Result<bool> {
        validate_response(&response)?;
        Ok(response.status == NO_CONTENT)
    }

    pub fn build_search(&self, jql: &str, start_at: u32, max_results: u32, fields: Option<&[&str]>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, &urls::search());
        req.query = vec![
            (query::JQL.to_string(), jql.to_string()),
            (query::FIELDS.to_string(), fields_to_string(fields)),
            (query::START_AT.to_string(), start_at.to_string()),
            (query::MAX_RESULTS.to_string(), max_results.to_string()),
        ];
        req
    }

    /// Search restricted to one project; the key is not quoted or escaped.
    pub fn build_search_by_project(
        &self,
        project_key: &str,
        start_at: u32,
        max_results: u32,
        fields: Option<&[&str]>,
    ) -> HttpRequest {
        self.build_search(&project_jql(project_key), start_at, max_results, fields)
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Issues> {
        decode(&response)
    }

    pub fn build_create_issue(&self, new_issue: &CreateIssue) -> Result<HttpRequest> {
        self.json_request(HttpMethod::Post, &urls::issue(), new_issue)
    }

    pub fn parse_create_issue(&self, response: HttpResponse) -> Result<BasicIssue> {
        decode(&response)
    }

    pub fn build_update_timetracking(
        &self,
        issue_key: &str,
        original_estimate_minutes: u32,
        remaining_estimate_minutes: u32,
    ) -> Result<HttpRequest> {
        let body = TimetrackingUpdate::from_minutes(original_estimate_minutes, remaining_estimate_minutes);
        self.json_request(HttpMethod::Put, &urls::issue_by_key(issue_key), &body)
    }

    pub fn parse_update_timetracking(&self, response: HttpResponse) -> Result<bool> {
        validate_response(&response)?;
        Ok(response.status == NO_CONTENT)
    }

    // -----------------------------------------------------------------------
    // Projects and metadata
    // -----------------------------------------------------------------------

    pub fn build_get_projects(&self) -> HttpRequest {
        self.request(HttpMethod::Get, &urls::project())
    }

    pub fn parse_get_projects(&self, response: HttpResponse) -> Result<Vec<Project>> {
        decode(&response)
    }

    pub fn build_get_priorities(&self) -> HttpRequest {
        self.request(HttpMethod::Get, &urls::priority())
    }

    pub fn parse_get_priorities(&self, response: HttpResponse) -> Result<Vec<Priority>> {
        decode(&response)
    }

    pub fn build_get_statuses(&self) -> HttpRequest {
        self.request(HttpMethod::Get, &urls::status())
    }

    pub fn parse_get_statuses(&self, response: HttpResponse) -> Result<Vec<Status>> {
        decode(&response)
    }

    pub fn build_get_project_meta(&self, project_key: &str) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, &urls::create_meta());
        req.query.push((query::PROJECT_KEYS.to_string(), project_key.to_string()));
        req
    }

    /// The response must hold exactly one project, and its key must be
    /// `project_key`.
    pub fn parse_get_project_meta(&self, project_key: &str, response: HttpResponse) -> Result<ProjectMeta> {
        let create_meta: IssueCreateMeta = decode(&response)?;
        let mut projects = create_meta.projects;
        if projects.len() != 1 || projects[0].key != project_key {
            warn!(
                project_key,
                returned = projects.len(),
                "create metadata does not match the requested project"
            );
            return Err(JiraClientError::message(format!(
                "expected create metadata for exactly one project '{project_key}', got {}",
                describe_keys(&projects)
            )));
        }
        Ok(projects.remove(0))
    }

    pub fn build_get_application_property(&self, property_key: &str) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, &urls::application_properties());
        req.query.push((query::KEY.to_string(), property_key.to_string()));
        req
    }

    pub fn parse_get_application_property(&self, response: HttpResponse) -> Result<ApplicationProperty> {
        decode(&response)
    }

    // -----------------------------------------------------------------------
    // Versions
    // -----------------------------------------------------------------------

    pub fn build_create_version(&self, new_version: &NewVersion) -> Result<HttpRequest> {
        self.json_request(HttpMethod::Post, &urls::version(), new_version)
    }

    pub fn parse_create_version(&self, response: HttpResponse) -> Result<Version> {
        decode(&response)
    }

    pub fn build_update_version(&self, version: &UpdateVersion) -> Result<HttpRequest> {
        self.json_request(HttpMethod::Put, &urls::version(), version)
    }

    pub fn parse_update_version(&self, response: HttpResponse) -> Result<Version> {
        decode(&response)
    }

    pub fn build_get_versions(&self, project_key: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &urls::versions(project_key))
    }

    pub fn parse_get_versions(&self, response: HttpResponse) -> Result<Vec<Version>> {
        decode(&response)
    }

    // -----------------------------------------------------------------------
    // Attachments
    // -----------------------------------------------------------------------

    pub fn build_get_attachment(&self, attachment_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &urls::attachment_by_id(attachment_id))
    }

    pub fn parse_get_attachment(&self, response: HttpResponse) -> Result<Attachment> {
        decode(&response)
    }

    pub fn build_delete_attachment(&self, attachment_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &urls::attachment_by_id(attachment_id))
    }

    /// Anything but a completed 204 is an error.
    pub fn parse_delete_attachment(&self, attachment_id: &str, response: HttpResponse) -> Result<bool> {
        if !response.is_completed() || response.status != NO_CONTENT {
            warn!(attachment_id, status = response.status, "attachment delete not confirmed");
            return Err(JiraClientError::message(format!(
                "Failed to delete attachment with id={attachment_id}"
            )));
        }
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Request assembly
    // -----------------------------------------------------------------------

    fn request(&self, method: HttpMethod, resource: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{resource}", self.config.base_url()),
            query: Vec::new(),
            headers: vec![
                ("authorization".to_string(), self.auth_header.clone()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body: None,
            timeout: self.config.timeout,
        }
    }

    fn json_request<B>(&self, method: HttpMethod, resource: &str, body: &B) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|e| JiraClientError::Serialization(e.to_string()))?;
        let mut req = self.request(method, resource);
        req.headers.push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Fail when the exchange did not complete or captured an error.
///
/// The HTTP status is deliberately not inspected here.
pub fn validate_response(response: &HttpResponse) -> Result<()> {
    if !response.is_completed() || response.error.is_some() {
        warn!(
            response_status = %response.response_status,
            status = response.status,
            "exchange failed"
        );
        return Err(JiraClientError::exchange(response));
    }
    Ok(())
}

/// Comma-joined field names in caller order; empty when absent.
pub fn fields_to_string(fields: Option<&[&str]>) -> String {
    fields.map(|f| f.join(",")).unwrap_or_default()
}

/// The JQL that selects every issue of a project.
pub fn project_jql(project_key: &str) -> String {
    format!("project={project_key}")
}

/// Validate, then decode the body. An empty body yields `T::default()`.
fn decode<T>(response: &HttpResponse) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    validate_response(response)?;
    debug!(status = response.status, bytes = response.body.len(), "decoding response");
    if response.body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&response.body).map_err(|e| JiraClientError::Deserialization(e.to_string()))
}

fn describe_keys(projects: &[ProjectMeta]) -> String {
    if projects.is_empty() {
        return "none".to_string();
    }
    projects.iter().map(|p| format!("'{}'", p.key)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::http::ResponseStatus;

    const BASE: &str = "https://jira.example.com";

    fn client() -> JiraClient {
        JiraClient::new(JiraConfig::new(BASE, "test_user", "test_token"))
    }

    fn body_json(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    // --- field selection ---

    #[test]
    fn fields_to_string_joins_in_order() {
        assert_eq!(fields_to_string(Some(&["summary", "status", "summary"])), "summary,status,summary");
        assert_eq!(fields_to_string(Some(&[])), "");
        assert_eq!(fields_to_string(None), "");
    }

    // --- request assembly ---

    #[test]
    fn every_request_carries_basic_auth() {
        let req = client().build_get_projects();
        assert_eq!(req.header("authorization"), Some("Basic dGVzdF91c2VyOnRlc3RfdG9rZW4="));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn debug_hides_credentials() {
        let output = format!("{:?}", client());
        assert!(!output.contains("dGVzdF91c2VyOnRlc3RfdG9rZW4="));
        assert!(!output.contains("test_token"));
    }

    #[test]
    fn timeout_is_passed_through() {
        let config = JiraConfig::new(BASE, "u", "p").with_timeout(std::time::Duration::from_secs(5));
        let req = JiraClient::new(config).build_get_statuses();
        assert_eq!(req.timeout, Some(std::time::Duration::from_secs(5)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = JiraClient::new(JiraConfig::new("https://jira.example.com/", "u", "p"));
        assert_eq!(client.build_get_priorities().url, "https://jira.example.com/rest/api/2/priority");
    }

    #[test]
    fn build_get_issue_selects_fields() {
        let req = client().build_get_issue("PROJ-1", Some(&["summary", "status"]));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://jira.example.com/rest/api/2/issue/PROJ-1");
        assert_eq!(req.query, vec![("fields".to_string(), "summary,status".to_string())]);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_issue_without_fields_sends_empty_selection() {
        let req = client().build_get_issue("PROJ-1", None);
        assert_eq!(req.full_url(), "https://jira.example.com/rest/api/2/issue/PROJ-1?fields=");
    }

    #[test]
    fn build_search_sets_all_parameters() {
        let req = client().build_search("status=Open", 50, 25, Some(&["key"]));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://jira.example.com/rest/api/2/search");
        assert_eq!(req.query_param("jql"), Some("status=Open"));
        assert_eq!(req.query_param("fields"), Some("key"));
        assert_eq!(req.query_param("startAt"), Some("50"));
        assert_eq!(req.query_param("maxResults"), Some("25"));
    }

    #[test]
    fn search_by_project_matches_plain_search() {
        let fields: &[&str] = &["summary"];
        let by_project = client().build_search_by_project("PROJ", 0, 10, Some(fields));
        let by_jql = client().build_search("project=PROJ", 0, 10, Some(fields));
        assert_eq!(by_project, by_jql);
    }

    #[test]
    fn project_key_is_not_quoted() {
        let req = client().build_search_by_project("MY PROJ", 0, 10, None);
        assert_eq!(req.query_param("jql"), Some("project=MY PROJ"));
    }

    #[test]
    fn build_update_issue_fields_sends_body_verbatim() {
        let req = client()
            .build_update_issue_fields("PROJ-1", &json!({ "fields": { "summary": "New" } }))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "https://jira.example.com/rest/api/2/issue/PROJ-1");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(body_json(&req), json!({ "fields": { "summary": "New" } }));
    }

    #[test]
    fn build_update_timetracking_nests_edit() {
        let req = client().build_update_timetracking("PROJ-1", 90, 30).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "https://jira.example.com/rest/api/2/issue/PROJ-1");
        let body = body_json(&req);
        assert_eq!(body["update"]["timetracking"][0]["edit"]["originalEstimate"], "90m");
        assert_eq!(body["update"]["timetracking"][0]["edit"]["remainingEstimate"], "30m");
    }

    #[test]
    fn build_create_issue_posts_fields() {
        let mut payload = CreateIssue::new("PROJ", "Summary", "Desc", "1", "2", ["a", "b"]);
        payload.add_field("customfield", "x").unwrap();
        let req = client().build_create_issue(&payload).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://jira.example.com/rest/api/2/issue");
        let body = body_json(&req);
        assert_eq!(body["fields"]["project"]["key"], "PROJ");
        assert_eq!(body["fields"]["customfield"], "x");
    }

    #[test]
    fn build_get_project_meta_filters_by_key() {
        let req = client().build_get_project_meta("PROJ");
        assert_eq!(req.url, "https://jira.example.com/rest/api/2/issue/createmeta");
        assert_eq!(req.query_param("projectKeys"), Some("PROJ"));
    }

    #[test]
    fn build_version_requests() {
        let c = client();
        let create = c.build_create_version(&NewVersion::new("PROJ", "1.0")).unwrap();
        assert_eq!(create.method, HttpMethod::Post);
        assert_eq!(create.url, "https://jira.example.com/rest/api/2/version");
        assert_eq!(body_json(&create)["project"], "PROJ");

        let update = UpdateVersion {
            id: "10100".to_string(),
            released: Some(true),
            ..Default::default()
        };
        let update = c.build_update_version(&update).unwrap();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.url, "https://jira.example.com/rest/api/2/version");

        let list = c.build_get_versions("PROJ");
        assert_eq!(list.method, HttpMethod::Get);
        assert_eq!(list.url, "https://jira.example.com/rest/api/2/project/PROJ/versions");
    }

    #[test]
    fn build_attachment_requests() {
        let get = client().build_get_attachment("10042");
        assert_eq!(get.method, HttpMethod::Get);
        assert_eq!(get.url, "https://jira.example.com/rest/api/2/attachment/10042");

        let delete = client().build_delete_attachment("10042");
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, get.url);
        assert!(delete.body.is_none());
    }

    #[test]
    fn build_get_application_property_uses_key_param() {
        let req = client().build_get_application_property("jira.title");
        assert_eq!(req.full_url(), "https://jira.example.com/rest/api/2/application-properties?key=jira.title");
    }

    // --- validation ---

    #[test]
    fn validate_accepts_completed_error_statuses() {
        assert!(validate_response(&HttpResponse::completed(500, "oops")).is_ok());
        assert!(validate_response(&HttpResponse::completed(404, "")).is_ok());
    }

    #[test]
    fn validate_rejects_incomplete_exchange() {
        let err = validate_response(&HttpResponse::failed(ResponseStatus::TimedOut, "timed out")).unwrap_err();
        assert!(matches!(err, JiraClientError::Exchange { .. }));
        assert!(err.to_string().starts_with("Response status: TimedOut"));
    }

    #[test]
    fn validate_rejects_captured_error() {
        let mut resp = HttpResponse::completed(200, "{}");
        resp.error = Some("body read interrupted".to_string());
        assert!(validate_response(&resp).is_err());
    }

    // --- parsing ---

    #[test]
    fn parse_get_issue_with_fields() {
        let resp = HttpResponse::completed(200, r#"{"id":"1","key":"PROJ-1","fields":{"summary":"Hello"}}"#);
        let issue = client().parse_get_issue(resp).unwrap().unwrap();
        assert_eq!(issue.key, "PROJ-1");
        assert_eq!(issue.fields.unwrap().summary, "Hello");
    }

    #[test]
    fn parse_get_issue_without_fields_is_none() {
        let resp = HttpResponse::completed(404, r#"{"errorMessages":["Issue does not exist"],"errors":{}}"#);
        assert!(client().parse_get_issue(resp).unwrap().is_none());
    }

    #[test]
    fn parse_get_issue_transport_failure_is_error() {
        let resp = HttpResponse::failed(ResponseStatus::Error, "connection refused");
        assert!(client().parse_get_issue(resp).is_err());
    }

    #[test]
    fn parse_update_issue_fields_reports_no_content() {
        let c = client();
        assert!(c.parse_update_issue_fields(HttpResponse::completed(204, "")).unwrap());
        assert!(!c.parse_update_issue_fields(HttpResponse::completed(400, r#"{"errors":{}}"#)).unwrap());
        assert!(c
            .parse_update_issue_fields(HttpResponse::failed(ResponseStatus::Aborted, "aborted"))
            .is_err());
    }

    #[test]
    fn parse_update_timetracking_reports_no_content() {
        let c = client();
        assert!(c.parse_update_timetracking(HttpResponse::completed(204, "")).unwrap());
        assert!(!c.parse_update_timetracking(HttpResponse::completed(200, "")).unwrap());
    }

    #[test]
    fn parse_search_page() {
        let resp = HttpResponse::completed(
            200,
            r#"{"startAt":0,"maxResults":2,"total":3,"issues":[{"key":"A-1","fields":{}},{"key":"A-2","fields":{}}]}"#,
        );
        let page = client().parse_search(resp).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.issues.len(), 2);
    }

    #[test]
    fn parse_lists() {
        let c = client();
        let projects = c
            .parse_get_projects(HttpResponse::completed(200, r#"[{"id":"1","key":"PROJ","name":"Project"}]"#))
            .unwrap();
        assert_eq!(projects[0].key, "PROJ");

        let priorities = c
            .parse_get_priorities(HttpResponse::completed(200, r#"[{"id":"1","name":"Highest"},{"id":"2","name":"High"}]"#))
            .unwrap();
        assert_eq!(priorities.len(), 2);

        let statuses = c
            .parse_get_statuses(HttpResponse::completed(200, r#"[{"id":"1","name":"Open"}]"#))
            .unwrap();
        assert_eq!(statuses[0].name, "Open");

        let versions = c
            .parse_get_versions(HttpResponse::completed(200, r#"[{"id":"10","name":"1.0","projectId":1}]"#))
            .unwrap();
        assert_eq!(versions[0].project_id, "1");
    }

    #[test]
    fn empty_body_yields_default() {
        let projects = client().parse_get_projects(HttpResponse::completed(200, "")).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn malformed_body_is_deserialization_error() {
        let err = client().parse_get_projects(HttpResponse::completed(200, "not json")).unwrap_err();
        assert!(matches!(err, JiraClientError::Deserialization(_)));
    }

    #[test]
    fn parse_project_meta_single_match() {
        let resp = HttpResponse::completed(
            200,
            r#"{"projects":[{"id":"1","key":"PROJ","name":"Project","issuetypes":[{"id":"1","name":"Bug"}]}]}"#,
        );
        let meta = client().parse_get_project_meta("PROJ", resp).unwrap();
        assert_eq!(meta.key, "PROJ");
        assert_eq!(meta.issue_types[0].name, "Bug");
    }

    #[test]
    fn parse_project_meta_rejects_empty() {
        let resp = HttpResponse::completed(200, r#"{"projects":[]}"#);
        let err = client().parse_get_project_meta("PROJ", resp).unwrap_err();
        assert!(matches!(err, JiraClientError::Message(_)));
        assert!(err.to_string().contains("none"));
    }

    #[test]
    fn parse_project_meta_rejects_several() {
        let resp = HttpResponse::completed(200, r#"{"projects":[{"key":"PROJ"},{"key":"PROJ2"}]}"#);
        assert!(client().parse_get_project_meta("PROJ", resp).is_err());
    }

    #[test]
    fn parse_project_meta_rejects_other_key() {
        let resp = HttpResponse::completed(200, r#"{"projects":[{"key":"OTHER"}]}"#);
        let err = client().parse_get_project_meta("PROJ", resp).unwrap_err();
        assert!(err.to_string().contains("'OTHER'"));
    }

    #[test]
    fn parse_created_entities() {
        let c = client();
        let issue = c
            .parse_create_issue(HttpResponse::completed(201, r#"{"id":"10001","key":"PROJ-2","self":"x"}"#))
            .unwrap();
        assert_eq!(issue.key, "PROJ-2");

        let version = c
            .parse_create_version(HttpResponse::completed(201, r#"{"id":"10100","name":"1.0","released":false}"#))
            .unwrap();
        assert_eq!(version.name, "1.0");

        let updated = c
            .parse_update_version(HttpResponse::completed(200, r#"{"id":"10100","name":"1.0","released":true}"#))
            .unwrap();
        assert!(updated.released);
    }

    #[test]
    fn parse_single_entities() {
        let c = client();
        let property = c
            .parse_get_application_property(HttpResponse::completed(
                200,
                r#"{"id":"jira.title","key":"jira.title","value":"Jira"}"#,
            ))
            .unwrap();
        assert_eq!(property.value, "Jira");

        let attachment = c
            .parse_get_attachment(HttpResponse::completed(200, r#"{"id":"10042","filename":"a.txt","size":3}"#))
            .unwrap();
        assert_eq!(attachment.filename, "a.txt");
    }

    #[test]
    fn parse_delete_attachment_requires_no_content() {
        let c = client();
        assert!(c.parse_delete_attachment("10042", HttpResponse::completed(204, "")).unwrap());

        let err = c
            .parse_delete_attachment("10042", HttpResponse::completed(404, ""))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete attachment with id=10042");

        assert!(c.parse_delete_attachment("10042", HttpResponse::completed(200, "")).is_err());
        assert!(c
            .parse_delete_attachment("10042", HttpResponse::failed(ResponseStatus::Error, "reset"))
            .is_err());
    }
}
