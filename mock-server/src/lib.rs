//! In-memory stand-in for the subset of the Jira REST API v2 the client uses.
//!
//! Every route sits behind Basic auth with `USERNAME`/`PASSWORD`. Error
//! responses use Jira's `{"errorMessages": [...], "errors": {}}` shape.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin";

/// `Basic base64("admin:admin")`.
const EXPECTED_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

const API: &str = "/rest/api/2";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    pub subtask: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(skip)]
    pub issue_types: Vec<IssueType>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub archived: bool,
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub project_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion {
    pub name: String,
    pub project: String,
    pub description: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVersion {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub released: Option<bool>,
    pub archived: Option<bool>,
    pub release_date: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub filename: String,
    pub created: String,
    pub size: u64,
    pub mime_type: String,
    pub content: String,
}

#[derive(Clone, Debug)]
pub struct StoredIssue {
    pub id: u64,
    pub key: String,
    pub project_key: String,
    pub fields: Map<String, Value>,
}

impl StoredIssue {
    fn to_json(&self, selection: &[&str]) -> Value {
        let fields: Map<String, Value> = if selection.is_empty() || selection.contains(&"*all") {
            self.fields.clone()
        } else {
            self.fields
                .iter()
                .filter(|(name, _)| selection.contains(&name.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };
        json!({
            "id": self.id.to_string(),
            "key": self.key,
            "self": format!("{API}/issue/{}", self.id),
            "fields": fields,
        })
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub projects: Vec<Project>,
    pub priorities: Vec<NamedEntity>,
    pub statuses: Vec<NamedEntity>,
    pub issues: Vec<StoredIssue>,
    pub versions: Vec<Version>,
    pub attachments: HashMap<String, Attachment>,
    pub properties: HashMap<String, String>,
    next_id: u64,
    issue_counters: HashMap<String, u64>,
}

impl Store {
    /// Two projects, one issue `PROJ-1` carrying attachment `10042`, and the
    /// `jira.title` application property.
    pub fn seeded() -> Self {
        let issue_types = vec![
            IssueType {
                id: "1".to_string(),
                name: "Bug".to_string(),
                subtask: false,
            },
            IssueType {
                id: "3".to_string(),
                name: "Task".to_string(),
                subtask: false,
            },
        ];
        let named = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(id, name)| NamedEntity {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect::<Vec<_>>()
        };

        let mut store = Store {
            projects: vec![
                Project {
                    id: "10000".to_string(),
                    key: "PROJ".to_string(),
                    name: "Project".to_string(),
                    issue_types: issue_types.clone(),
                },
                Project {
                    id: "10001".to_string(),
                    key: "OPS".to_string(),
                    name: "Operations".to_string(),
                    issue_types,
                },
            ],
            priorities: named(&[("1", "Highest"), ("2", "High"), ("3", "Medium"), ("4", "Low")]),
            statuses: named(&[("1", "Open"), ("3", "In Progress"), ("6", "Closed")]),
            next_id: 10000,
            ..Default::default()
        };
        store.properties.insert("jira.title".to_string(), "Mock Jira".to_string());

        let seeded = json!({
            "project": { "key": "PROJ" },
            "summary": "Seeded issue",
            "description": "Present from the start",
            "issuetype": { "id": "1" },
            "priority": { "id": "3" },
            "labels": ["seed"],
        });
        if let Value::Object(fields) = seeded {
            store.create_issue(fields).expect("seed issue is valid");
        }
        store.attachments.insert(
            "10042".to_string(),
            Attachment {
                self_url: format!("{API}/attachment/10042"),
                id: "10042".to_string(),
                filename: "trace.log".to_string(),
                created: "2024-01-05T10:00:00.000+0000".to_string(),
                size: 2048,
                mime_type: "text/plain".to_string(),
                content: "/secure/attachment/10042/trace.log".to_string(),
            },
        );
        store
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn project(&self, key: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.key == key)
    }

    fn issue_mut(&mut self, key: &str) -> Option<&mut StoredIssue> {
        self.issues.iter_mut().find(|i| i.key == key)
    }

    /// Resolve the references of a create payload and store the issue.
    fn create_issue(&mut self, mut fields: Map<String, Value>) -> Result<&StoredIssue, String> {
        let project_key = fields
            .get("project")
            .and_then(|p| p.get("key"))
            .and_then(Value::as_str)
            .ok_or("project is required")?
            .to_string();
        let project = self.project(&project_key).cloned().ok_or("project does not exist")?;
        if !fields.get("summary").is_some_and(Value::is_string) {
            return Err("summary is required".to_string());
        }

        if let Some(type_id) = fields.get("issuetype").and_then(|t| t.get("id")).and_then(Value::as_str) {
            let issue_type = project
                .issue_types
                .iter()
                .find(|t| t.id == type_id)
                .ok_or("issue type is not valid for this project")?;
            fields.insert("issuetype".to_string(), json!(issue_type));
        }
        if let Some(priority_id) = fields.get("priority").and_then(|p| p.get("id")).and_then(Value::as_str) {
            let priority = self
                .priorities
                .iter()
                .find(|p| p.id == priority_id)
                .ok_or("priority is not valid")?;
            fields.insert("priority".to_string(), json!(priority));
        }
        fields.insert(
            "project".to_string(),
            json!({ "id": project.id, "key": project.key, "name": project.name }),
        );
        fields.insert("status".to_string(), json!(self.statuses[0]));

        let id = self.next_id();
        let counter = self.issue_counters.entry(project_key.clone()).or_insert(0);
        *counter += 1;
        let key = format!("{project_key}-{counter}");
        self.issues.push(StoredIssue {
            id,
            key,
            project_key,
            fields,
        });
        Ok(&self.issues[self.issues.len() - 1])
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "errorMessages": [message.into()], "errors": {} })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route(&format!("{API}/issue"), post(create_issue))
        .route(&format!("{API}/issue/createmeta"), get(create_meta))
        .route(&format!("{API}/issue/{{key}}"), get(get_issue).put(update_issue))
        .route(&format!("{API}/search"), get(search))
        .route(&format!("{API}/project"), get(list_projects))
        .route(&format!("{API}/project/{{key}}/versions"), get(list_versions))
        .route(&format!("{API}/priority"), get(list_priorities))
        .route(&format!("{API}/status"), get(list_statuses))
        .route(&format!("{API}/version"), post(create_version).put(update_version))
        .route(&format!("{API}/application-properties"), get(get_application_property))
        .route(&format!("{API}/attachment/{{id}}"), get(get_attachment).delete(delete_attachment))
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_basic_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == EXPECTED_AUTH);
    if !authorized {
        return api_error(StatusCode::UNAUTHORIZED, "You are not authenticated").into_response();
    }
    next.run(request).await
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FieldsQuery {
    fields: String,
}

fn selection(fields: &str) -> Vec<&str> {
    fields.split(',').map(str::trim).filter(|f| !f.is_empty()).collect()
}

async fn get_issue(
    State(db): State<Db>,
    Path(key): Path<String>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    store
        .issues
        .iter()
        .find(|i| i.key == key)
        .map(|i| Json(i.to_json(&selection(&query.fields))))
        .ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                "Issue does not exist or you do not have permission to see it.",
            )
        })
}

async fn update_issue(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let issue = store.issue_mut(&key).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            "Issue does not exist or you do not have permission to see it.",
        )
    })?;

    if let Some(fields) = body.get("fields").and_then(Value::as_object) {
        for (name, value) in fields {
            issue.fields.insert(name.clone(), value.clone());
        }
    }
    if let Some(edits) = body.pointer("/update/timetracking").and_then(Value::as_array) {
        for edit in edits.iter().filter_map(|op| op.get("edit")) {
            let original = edit.get("originalEstimate").and_then(Value::as_str);
            let remaining = edit.get("remainingEstimate").and_then(Value::as_str);
            let (Some(original), Some(remaining)) = (original, remaining) else {
                return Err(api_error(StatusCode::BAD_REQUEST, "timetracking edit needs both estimates"));
            };
            let to_seconds = |estimate: &str| {
                estimate
                    .strip_suffix('m')
                    .and_then(|m| m.parse::<u64>().ok())
                    .map(|m| m * 60)
            };
            let (Some(original_secs), Some(remaining_secs)) = (to_seconds(original), to_seconds(remaining)) else {
                return Err(api_error(StatusCode::BAD_REQUEST, "estimates must be whole minutes"));
            };
            issue.fields.insert(
                "timetracking".to_string(),
                json!({
                    "originalEstimate": original,
                    "remainingEstimate": remaining,
                    "originalEstimateSeconds": original_secs,
                    "remainingEstimateSeconds": remaining_secs,
                }),
            );
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn create_issue(State(db): State<Db>, Json(body): Json<Value>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(fields) = body.get("fields").and_then(Value::as_object).cloned() else {
        return Err(api_error(StatusCode::BAD_REQUEST, "fields are required"));
    };
    let mut store = db.write().await;
    let issue = store
        .create_issue(fields)
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": issue.id.to_string(),
            "key": issue.key,
            "self": format!("{API}/issue/{}", issue.id),
        })),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchQuery {
    jql: String,
    fields: String,
    start_at: usize,
    max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            jql: String::new(),
            fields: String::new(),
            start_at: 0,
            max_results: 50,
        }
    }
}

/// Understands an empty query and `project=KEY`; anything else is a 400.
async fn search(State(db): State<Db>, Query(query): Query<SearchQuery>) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let jql = query.jql.trim();
    let project_filter = if jql.is_empty() {
        None
    } else if let Some(key) = jql.strip_prefix("project=") {
        Some(key.trim())
    } else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Error in the JQL Query: '{jql}' is not supported"),
        ));
    };

    let matching: Vec<&StoredIssue> = store
        .issues
        .iter()
        .filter(|i| project_filter.map_or(true, |key| i.project_key == key))
        .collect();
    let selection = selection(&query.fields);
    let page: Vec<Value> = matching
        .iter()
        .skip(query.start_at)
        .take(query.max_results)
        .map(|i| i.to_json(&selection))
        .collect();

    Ok(Json(json!({
        "startAt": query.start_at,
        "maxResults": query.max_results,
        "total": matching.len(),
        "issues": page,
    })))
}

async fn list_projects(State(db): State<Db>) -> Json<Vec<Project>> {
    Json(db.read().await.projects.clone())
}

async fn list_priorities(State(db): State<Db>) -> Json<Vec<NamedEntity>> {
    Json(db.read().await.priorities.clone())
}

async fn list_statuses(State(db): State<Db>) -> Json<Vec<NamedEntity>> {
    Json(db.read().await.statuses.clone())
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CreateMetaQuery {
    project_keys: String,
}

async fn create_meta(State(db): State<Db>, Query(query): Query<CreateMetaQuery>) -> Json<Value> {
    let store = db.read().await;
    let keys = selection(&query.project_keys);
    let projects: Vec<Value> = store
        .projects
        .iter()
        .filter(|p| keys.is_empty() || keys.contains(&p.key.as_str()))
        .map(|p| {
            json!({
                "self": format!("{API}/project/{}", p.id),
                "id": p.id,
                "key": p.key,
                "name": p.name,
                "issuetypes": p.issue_types,
            })
        })
        .collect();
    Json(json!({ "expand": "projects", "projects": projects }))
}

async fn list_versions(State(db): State<Db>, Path(key): Path<String>) -> Result<Json<Vec<Version>>, ApiError> {
    let store = db.read().await;
    let project = store
        .project(&key)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No project could be found with key '{key}'.")))?;
    let project_id: u64 = project.id.parse().unwrap_or_default();
    Ok(Json(
        store
            .versions
            .iter()
            .filter(|v| v.project_id == project_id)
            .cloned()
            .collect(),
    ))
}

async fn create_version(
    State(db): State<Db>,
    Json(input): Json<NewVersion>,
) -> Result<(StatusCode, Json<Version>), ApiError> {
    let mut store = db.write().await;
    let project_id: u64 = store
        .project(&input.project)
        .and_then(|p| p.id.parse().ok())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Project must be specified to create a version."))?;
    if store
        .versions
        .iter()
        .any(|v| v.project_id == project_id && v.name == input.name)
    {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("A version with this name already exists in this project: {}", input.name),
        ));
    }
    let id = store.next_id().to_string();
    let version = Version {
        self_url: format!("{API}/version/{id}"),
        id,
        name: input.name,
        description: input.description,
        archived: input.archived,
        released: input.released,
        release_date: input.release_date,
        project_id,
    };
    store.versions.push(version.clone());
    Ok((StatusCode::CREATED, Json(version)))
}

async fn update_version(State(db): State<Db>, Json(input): Json<UpdateVersion>) -> Result<Json<Version>, ApiError> {
    let mut store = db.write().await;
    let version = store
        .versions
        .iter_mut()
        .find(|v| v.id == input.id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Could not find version for id '{}'", input.id)))?;
    if let Some(name) = input.name {
        version.name = name;
    }
    if let Some(description) = input.description {
        version.description = Some(description);
    }
    if let Some(released) = input.released {
        version.released = released;
    }
    if let Some(archived) = input.archived {
        version.archived = archived;
    }
    if let Some(release_date) = input.release_date {
        version.release_date = Some(release_date);
    }
    Ok(Json(version.clone()))
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PropertyQuery {
    key: String,
}

async fn get_application_property(
    State(db): State<Db>,
    Query(query): Query<PropertyQuery>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let value = store
        .properties
        .get(&query.key)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Property '{}' not found", query.key)))?;
    Ok(Json(json!({
        "id": query.key,
        "key": query.key,
        "value": value,
        "name": query.key,
        "desc": "",
        "type": "string",
        "defaultValue": "",
    })))
}

async fn get_attachment(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Attachment>, ApiError> {
    let store = db.read().await;
    store
        .attachments
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("The attachment with id '{id}' does not exist")))
}

async fn delete_attachment(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store
        .attachments
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("The attachment with id '{id}' does not exist")))
}
