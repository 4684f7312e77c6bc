use std::time::Duration;

use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId, EmployeePatch},
    error::ApiError,
    protocol::DeleteEmployeeResponse,
};
use storage::Storage;
use tracing::info;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    /// Artificial delay applied before every response.
    pub latency: Duration,
}

impl ApiContext {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

pub async fn list_employees(ctx: &ApiContext) -> Result<Vec<Employee>, ApiError> {
    Ok(ctx.storage.list_employees().await)
}

pub async fn create_employee(ctx: &ApiContext, draft: EmployeeDraft) -> Result<Employee, ApiError> {
    let employee = ctx.storage.create_employee(draft).await;
    info!(id = %employee.id, "employee created");
    Ok(employee)
}

pub async fn update_employee(
    ctx: &ApiContext,
    id: &EmployeeId,
    patch: &EmployeePatch,
) -> Result<Employee, ApiError> {
    let employee = ctx
        .storage
        .update_employee(id, patch)
        .await
        .ok_or_else(|| not_found(id))?;
    info!(%id, "employee updated");
    Ok(employee)
}

pub async fn delete_employee(
    ctx: &ApiContext,
    id: &EmployeeId,
) -> Result<DeleteEmployeeResponse, ApiError> {
    if !ctx.storage.delete_employee(id).await {
        return Err(not_found(id));
    }
    info!(%id, "employee deleted");
    Ok(DeleteEmployeeResponse {
        message: format!("Employee {id} deleted"),
    })
}

fn not_found(id: &EmployeeId) -> ApiError {
    ApiError::not_found(format!("Employee {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    fn setup() -> ApiContext {
        ApiContext::new(Storage::seeded())
    }

    #[tokio::test]
    async fn lists_seeded_employees() {
        let ctx = setup();
        let employees = list_employees(&ctx).await.expect("list");
        assert_eq!(employees.len(), 10);
    }

    #[tokio::test]
    async fn create_returns_record_with_generated_id() {
        let ctx = setup();
        let created = create_employee(&ctx, EmployeeDraft::new("Amy", "amy@x.com", "QA"))
            .await
            .expect("create");
        assert!(!created.id.as_str().is_empty());
        assert_eq!(ctx.storage.len().await, 11);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let ctx = setup();
        let err = update_employee(&ctx, &EmployeeId::from("999"), &EmployeePatch::default())
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Employee 999 not found");
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found_and_keeps_records() {
        let ctx = setup();
        let err = delete_employee(&ctx, &EmployeeId::from("999"))
            .await
            .expect_err("should fail");
        assert!(matches!(err.code, ErrorCode::NotFound));
        assert_eq!(ctx.storage.len().await, 10);
    }

    #[tokio::test]
    async fn delete_known_id_confirms_with_message() {
        let ctx = setup();
        let response = delete_employee(&ctx, &EmployeeId::from("2"))
            .await
            .expect("delete");
        assert_eq!(response.message, "Employee 2 deleted");
        assert_eq!(ctx.storage.len().await, 9);
    }
}
