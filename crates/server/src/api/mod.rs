use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use server_api::{create_employee, delete_employee, list_employees, update_employee};
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId, EmployeePatch},
    error::{ApiError, ErrorCode},
    protocol::{DeleteEmployeeResponse, ListEmployeesResponse, API_PREFIX},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::warn;

use crate::app_state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

type HttpError = (StatusCode, Json<ApiError>);

pub fn build_router(state: Arc<AppState>) -> Router {
    let employees = Router::new()
        .route("/employees", get(http_list_employees).post(http_create_employee))
        .route(
            "/employees/:id",
            put(http_update_employee).delete(http_delete_employee),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, employees)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    state.api.simulate_latency().await;
    let employees = list_employees(&state.api).await.map_err(into_http)?;
    Ok(Json(ListEmployeesResponse { employees }))
}

async fn http_create_employee(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EmployeeDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), HttpError> {
    let Json(draft) = payload.map_err(malformed_body)?;
    state.api.simulate_latency().await;
    let employee = create_employee(&state.api, draft)
        .await
        .map_err(into_http)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn http_update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> Result<Json<Employee>, HttpError> {
    let Json(patch) = payload.map_err(malformed_body)?;
    state.api.simulate_latency().await;
    let employee = update_employee(&state.api, &EmployeeId::from(id), &patch)
        .await
        .map_err(into_http)?;
    Ok(Json(employee))
}

async fn http_delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteEmployeeResponse>, HttpError> {
    state.api.simulate_latency().await;
    let response = delete_employee(&state.api, &EmployeeId::from(id))
        .await
        .map_err(into_http)?;
    Ok(Json(response))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    }
}

fn into_http(err: ApiError) -> HttpError {
    (status_for(err.code), Json(err))
}

fn malformed_body(rejection: JsonRejection) -> HttpError {
    let message = rejection.body_text();
    warn!(%message, "rejected malformed request body");
    into_http(ApiError::new(ErrorCode::Validation, message))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
