//! Backend commands queued from UI to backend worker.

use shared::domain::{EmployeeDraft, EmployeeId, EmployeePatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchAll,
    Create { draft: EmployeeDraft },
    Update { id: EmployeeId, patch: EmployeePatch },
    Delete { id: EmployeeId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchAll => "fetch_all",
            BackendCommand::Create { .. } => "create",
            BackendCommand::Update { .. } => "update",
            BackendCommand::Delete { .. } => "delete",
        }
    }
}
