use crate::error::{AppError, FieldErrors};
use crate::model::{Task, TaskStatus};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The editable field set sent on create and update. The backend assigns
/// `id` and `created_at`; they never originate here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("api base url is required"));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::http(err.to_string()))?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http,
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/api/tasks/{id}", self.base_url)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let response = self
            .http
            .get(self.tasks_url())
            .send()
            .map_err(|err| AppError::http(err.to_string()))?;
        let body = read_success_body(response)?;
        serde_json::from_str(&body).map_err(|err| AppError::invalid_data(err.to_string()))
    }

    pub fn get_task(&self, id: i64) -> Result<Task, AppError> {
        let response = self
            .http
            .get(self.task_url(id))
            .send()
            .map_err(|err| AppError::http(err.to_string()))?;
        read_task(response)
    }

    pub fn create_task(&self, draft: &TaskDraft) -> Result<Task, AppError> {
        let response = self
            .http
            .post(self.tasks_url())
            .json(&draft_payload(draft))
            .send()
            .map_err(|err| AppError::http(err.to_string()))?;
        read_task(response)
    }

    pub fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task, AppError> {
        let response = self
            .http
            .put(self.task_url(id))
            .json(&draft_payload(draft))
            .send()
            .map_err(|err| AppError::http(err.to_string()))?;
        read_task(response)
    }

    pub fn delete_task(&self, id: i64) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.task_url(id))
            .send()
            .map_err(|err| AppError::http(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            Err(error_from_body(status, &body))
        }
    }
}

/// Parse a task id argument. Backend ids are positive integers.
pub fn parse_task_id(raw: &str) -> Result<i64, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_input("id must be a positive integer")),
    }
}

fn draft_payload(draft: &TaskDraft) -> serde_json::Value {
    serde_json::json!({
        "title": draft.title,
        "description": draft.description,
        "status": draft.status.as_wire(),
        "due_date": draft.due_date,
    })
}

fn read_task(response: Response) -> Result<Task, AppError> {
    let body = read_success_body(response)?;
    serde_json::from_str(&body).map_err(|err| AppError::invalid_data(err.to_string()))
}

fn read_success_body(response: Response) -> Result<String, AppError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| AppError::http(err.to_string()))?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(error_from_body(status, &body))
    }
}

/// Map a non-2xx body onto an AppError. Backends answer either with a plain
/// `detail` message or, for rejected payloads, with a `detail` array of
/// `{loc, msg}` entries keyed by the last path segment. The latter folds into
/// the same field-keyed shape the local form validator produces.
fn error_from_body(status: StatusCode, body: &str) -> AppError {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::Array(entries)) => {
                let fields = fold_detail_entries(entries);
                if !fields.is_empty() {
                    return AppError::validation(fields);
                }
            }
            Some(serde_json::Value::String(message)) => {
                if status == StatusCode::NOT_FOUND {
                    return AppError::invalid_input(message.clone());
                }
                return AppError::http(message.clone());
            }
            _ => {}
        }
    }

    AppError::http(format!("backend returned {status}"))
}

fn fold_detail_entries(entries: &[serde_json::Value]) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for entry in entries {
        let message = entry
            .get("msg")
            .and_then(|value| value.as_str())
            .unwrap_or("invalid value");
        let field = entry
            .get("loc")
            .and_then(|value| value.as_array())
            .and_then(|loc| loc.last())
            .and_then(|segment| {
                segment
                    .as_str()
                    .map(str::to_string)
                    .or_else(|| segment.as_i64().map(|index| index.to_string()))
            })
            .unwrap_or_else(|| "general".to_string());
        fields.insert(field, message.to_string());
    }
    fields
}
