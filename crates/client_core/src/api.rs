use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId, EmployeePatch},
    error::ApiError,
    protocol::{employees_route, DeleteEmployeeResponse, ListEmployeesResponse},
};
use tracing::debug;
use url::Url;

use crate::{error::RemoteError, store::Operation};

/// The four remote calls the directory makes. Each runs exactly once per
/// invocation: no retries, no timeouts, no cancellation.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, RemoteError>;
    async fn add_employee(&self, draft: &EmployeeDraft) -> Result<Employee, RemoteError>;
    async fn update_employee(
        &self,
        id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Result<Employee, RemoteError>;
    /// Returns the server's confirmation message.
    async fn delete_employee(&self, id: &EmployeeId) -> Result<String, RemoteError>;
}

#[derive(Clone)]
pub struct HttpEmployeeApi {
    http: Client,
    base_url: String,
}

impl HttpEmployeeApi {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, RemoteError> {
        let parsed = Url::parse(base_url.trim()).map_err(|err| RemoteError::InvalidUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, employees_route())
    }

    /// Record URL with the id pushed as one percent-encoded path segment, so
    /// `?`, `#`, `/` or `%` inside an id never reach a different route.
    fn record_url(&self, id: &EmployeeId) -> Result<Url, RemoteError> {
        let collection = self.collection_url();
        let invalid = |reason: String| RemoteError::InvalidUrl {
            url: collection.clone(),
            reason,
        };
        let mut url = Url::parse(&collection).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base url cannot carry a path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request.send().await.map_err(|err| RemoteError::Transport {
            message: non_empty_or_default(err.to_string(), operation),
        })?;

        let status = response.status();
        debug!(?operation, status = status.as_u16(), "remote call completed");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = failure_message(operation, &body);
            return Err(if status == StatusCode::NOT_FOUND {
                RemoteError::NotFound { message }
            } else {
                RemoteError::Status {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        response.json::<T>().await.map_err(|err| RemoteError::Decode {
            message: format!(
                "{}: unexpected response body ({err})",
                operation.default_failure_message()
            ),
        })
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, RemoteError> {
        let request = self.http.get(self.collection_url());
        let body: ListEmployeesResponse = self.execute(Operation::Fetch, request).await?;
        Ok(body.employees)
    }

    async fn add_employee(&self, draft: &EmployeeDraft) -> Result<Employee, RemoteError> {
        let request = self.http.post(self.collection_url()).json(draft);
        self.execute(Operation::Add, request).await
    }

    async fn update_employee(
        &self,
        id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Result<Employee, RemoteError> {
        let request = self.http.put(self.record_url(id)?).json(patch);
        self.execute(Operation::Update, request).await
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<String, RemoteError> {
        let request = self.http.delete(self.record_url(id)?);
        let body: DeleteEmployeeResponse = self.execute(Operation::Delete, request).await?;
        Ok(body.message)
    }
}

/// Turns a non-success response body into the message shown to the user:
/// the `error` field of a JSON error body, else the raw text, else the
/// operation's fixed default.
pub fn failure_message(operation: Operation, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return operation.default_failure_message().to_string();
    }
    if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
        return non_empty_or_default(api_error.message, operation);
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(serde_json::Value::String(message)) = map.get("error") {
            return non_empty_or_default(message.clone(), operation);
        }
    }
    body.to_string()
}

fn non_empty_or_default(message: String, operation: Operation) -> String {
    if message.trim().is_empty() {
        operation.default_failure_message().to_string()
    } else {
        message
    }
}
