//! Blocking façade: one method per Jira operation.
//!
//! Each call builds the request with `JiraClient`, hands it to the
//! `Transport` exactly once and parses the response. Nothing is retried or
//! cached. The deadline comes from `JiraConfig::timeout`; `with_timeout`
//! overrides it for a single call or a group of calls.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::client::JiraClient;
use crate::config::JiraConfig;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::models::{
    ApplicationProperty, Attachment, BasicIssue, CreateIssue, Issue, Issues, NewVersion, Priority, Project,
    ProjectMeta, Status, UpdateVersion, Version,
};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct JiraService<T> {
    client: JiraClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl JiraService<crate::transport::UreqTransport> {
    /// A service talking to `config.server_url` over ureq.
    pub fn connect(config: JiraConfig) -> Self {
        Self::new(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> JiraService<T> {
    pub fn new(config: JiraConfig, transport: T) -> Self {
        Self {
            client: JiraClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &JiraClient {
        &self.client
    }

    /// A view of this service whose requests carry `timeout`, for calls that
    /// need a different deadline than the configured one. Shares the
    /// transport; `self` is unchanged.
    pub fn with_timeout(&self, timeout: Duration) -> JiraService<&T> {
        JiraService {
            client: JiraClient::new(self.client.config().clone().with_timeout(timeout)),
            transport: &self.transport,
        }
    }

    fn exchange(&self, request: HttpRequest) -> HttpResponse {
        debug!(method = %request.method, url = %request.url, "jira request");
        let response = self.transport.execute(&request);
        debug!(
            response_status = %response.response_status,
            status = response.status,
            "jira response"
        );
        response
    }

    /// The issue, or `None` if Jira returned no fields for it.
    #[instrument(skip(self))]
    pub fn get_issue(&self, issue_key: &str, fields: Option<&[&str]>) -> Result<Option<Issue>> {
        let response = self.exchange(self.client.build_get_issue(issue_key, fields));
        self.client.parse_get_issue(response)
    }

    /// `true` when Jira answered 204.
    #[instrument(skip(self, fields))]
    pub fn update_issue_fields<F>(&self, issue_key: &str, fields: &F) -> Result<bool>
    where
        F: Serialize + ?Sized,
    {
        let request = self.client.build_update_issue_fields(issue_key, fields)?;
        self.client.parse_update_issue_fields(self.exchange(request))
    }

    /// One page of results; callers page by advancing `start_at`.
    #[instrument(skip(self))]
    pub fn get_issues_by_jql(
        &self,
        jql: &str,
        start_at: u32,
        max_results: u32,
        fields: Option<&[&str]>,
    ) -> Result<Issues> {
        let response = self.exchange(self.client.build_search(jql, start_at, max_results, fields));
        self.client.parse_search(response)
    }

    #[instrument(skip(self))]
    pub fn get_issues_by_project(
        &self,
        project_key: &str,
        start_at: u32,
        max_results: u32,
        fields: Option<&[&str]>,
    ) -> Result<Issues> {
        self.get_issues_by_jql(&crate::client::project_jql(project_key), start_at, max_results, fields)
    }

    #[instrument(skip(self))]
    pub fn get_projects(&self) -> Result<Vec<Project>> {
        let response = self.exchange(self.client.build_get_projects());
        self.client.parse_get_projects(response)
    }

    #[instrument(skip(self))]
    pub fn get_priorities(&self) -> Result<Vec<Priority>> {
        let response = self.exchange(self.client.build_get_priorities());
        self.client.parse_get_priorities(response)
    }

    #[instrument(skip(self))]
    pub fn get_project_meta(&self, project_key: &str) -> Result<ProjectMeta> {
        let response = self.exchange(self.client.build_get_project_meta(project_key));
        self.client.parse_get_project_meta(project_key, response)
    }

    #[instrument(skip(self))]
    pub fn get_statuses(&self) -> Result<Vec<Status>> {
        let response = self.exchange(self.client.build_get_statuses());
        self.client.parse_get_statuses(response)
    }

    #[instrument(skip(self, new_version), fields(name = %new_version.name))]
    pub fn create_version(&self, new_version: &NewVersion) -> Result<Version> {
        let request = self.client.build_create_version(new_version)?;
        self.client.parse_create_version(self.exchange(request))
    }

    #[instrument(skip(self, version), fields(id = %version.id))]
    pub fn update_version(&self, version: &UpdateVersion) -> Result<Version> {
        let request = self.client.build_update_version(version)?;
        self.client.parse_update_version(self.exchange(request))
    }

    #[instrument(skip(self))]
    pub fn get_versions(&self, project_key: &str) -> Result<Vec<Version>> {
        let response = self.exchange(self.client.build_get_versions(project_key));
        self.client.parse_get_versions(response)
    }

    #[instrument(skip(self, new_issue))]
    pub fn create_issue(&self, new_issue: &CreateIssue) -> Result<BasicIssue> {
        let request = self.client.build_create_issue(new_issue)?;
        self.client.parse_create_issue(self.exchange(request))
    }

    #[instrument(skip(self))]
    pub fn get_application_property(&self, property_key: &str) -> Result<ApplicationProperty> {
        let response = self.exchange(self.client.build_get_application_property(property_key));
        self.client.parse_get_application_property(response)
    }

    #[instrument(skip(self))]
    pub fn get_attachment(&self, attachment_id: &str) -> Result<Attachment> {
        let response = self.exchange(self.client.build_get_attachment(attachment_id));
        self.client.parse_get_attachment(response)
    }

    /// `true` on 204; any other outcome is an error.
    #[instrument(skip(self))]
    pub fn delete_attachment(&self, attachment_id: &str) -> Result<bool> {
        let response = self.exchange(self.client.build_delete_attachment(attachment_id));
        self.client.parse_delete_attachment(attachment_id, response)
    }

    /// Estimates are whole minutes. `true` when Jira answered 204.
    #[instrument(skip(self))]
    pub fn update_timetracking(
        &self,
        issue_key: &str,
        original_estimate_minutes: u32,
        remaining_estimate_minutes: u32,
    ) -> Result<bool> {
        let request =
            self.client
                .build_update_timetracking(issue_key, original_estimate_minutes, remaining_estimate_minutes)?;
        self.client.parse_update_timetracking(self.exchange(request))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::error::JiraClientError;
    use crate::http::{HttpMethod, ResponseStatus};

    /// Records every request and answers from a queue.
    struct ScriptedTransport {
        requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<HttpResponse>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<HttpResponse>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                responses: RefCell::new(responses.into()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> HttpResponse {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| HttpResponse::failed(ResponseStatus::Aborted, "no scripted response"))
        }
    }

    fn service(transport: &ScriptedTransport) -> JiraService<&ScriptedTransport> {
        JiraService::new(JiraConfig::new("https://jira.example.com", "user", "pw"), transport)
    }

    #[test]
    fn each_operation_performs_one_exchange() {
        let transport = ScriptedTransport::new(vec![HttpResponse::completed(200, r#"{"issues":[]}"#)]);
        service(&transport)
            .get_issues_by_project("PROJ", 0, 50, None)
            .unwrap();
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param("jql"), Some("project=PROJ"));
    }

    #[test]
    fn search_by_project_equals_search_by_jql() {
        let transport = ScriptedTransport::new(vec![
            HttpResponse::completed(200, "{}"),
            HttpResponse::completed(200, "{}"),
        ]);
        let svc = service(&transport);
        svc.get_issues_by_project("PROJ", 10, 20, Some(&["summary"])).unwrap();
        svc.get_issues_by_jql("project=PROJ", 10, 20, Some(&["summary"])).unwrap();
        let requests = transport.requests();
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn get_issue_absent_fields_is_none() {
        let transport = ScriptedTransport::new(vec![HttpResponse::completed(404, r#"{"errorMessages":["nope"]}"#)]);
        assert!(service(&transport).get_issue("NOPE-1", None).unwrap().is_none());
    }

    #[test]
    fn transport_failure_surfaces_as_error() {
        let transport = ScriptedTransport::new(Vec::new());
        let err = service(&transport).get_projects().unwrap_err();
        assert!(matches!(err, JiraClientError::Exchange { .. }));
    }

    #[test]
    fn update_timetracking_sends_put() {
        let transport = ScriptedTransport::new(vec![HttpResponse::completed(204, "")]);
        assert!(service(&transport).update_timetracking("PROJ-1", 90, 30).unwrap());
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["update"]["timetracking"][0]["edit"]["originalEstimate"], "90m");
        assert_eq!(body["update"]["timetracking"][0]["edit"]["remainingEstimate"], "30m");
    }

    #[test]
    fn delete_attachment_other_status_is_error() {
        let transport = ScriptedTransport::new(vec![HttpResponse::completed(403, "")]);
        assert!(service(&transport).delete_attachment("10042").is_err());
    }

    #[test]
    fn with_timeout_applies_only_to_the_view() {
        let transport = ScriptedTransport::new(vec![
            HttpResponse::completed(200, "[]"),
            HttpResponse::completed(200, "[]"),
        ]);
        let svc = service(&transport);
        svc.with_timeout(Duration::from_secs(5)).get_statuses().unwrap();
        svc.get_statuses().unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].timeout, Some(Duration::from_secs(5)));
        assert_eq!(requests[1].timeout, None);
        assert_eq!(requests[0].header("authorization"), requests[1].header("authorization"));
    }

    #[test]
    fn project_meta_mismatch_is_error() {
        let transport = ScriptedTransport::new(vec![HttpResponse::completed(200, r#"{"projects":[{"key":"OTHER"}]}"#)]);
        let err = service(&transport).get_project_meta("PROJ").unwrap_err();
        assert!(matches!(err, JiraClientError::Message(_)));
    }
}
