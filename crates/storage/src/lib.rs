use std::sync::Arc;

use shared::domain::{Employee, EmployeeDraft, EmployeeId, EmployeePatch};
use tokio::sync::RwLock;
use tracing::debug;

mod seed;

pub use seed::seed_employees;

/// In-memory record store. Clones share the same collection.
#[derive(Clone, Default)]
pub struct Storage {
    inner: Arc<RwLock<StorageState>>,
}

#[derive(Default)]
struct StorageState {
    employees: Vec<Employee>,
    last_id: u64,
}

impl StorageState {
    fn next_id(&mut self) -> EmployeeId {
        self.last_id += 1;
        EmployeeId::from(self.last_id)
    }

    /// Keeps the counter ahead of any numeric id inserted from outside, so
    /// generated ids never collide with seeded ones.
    fn observe_id(&mut self, id: &EmployeeId) {
        if let Ok(numeric) = id.as_str().parse::<u64>() {
            self.last_id = self.last_id.max(numeric);
        }
    }
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let mut state = StorageState::default();
        for employee in employees {
            state.observe_id(&employee.id);
            state.employees.push(employee);
        }
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn seeded() -> Self {
        Self::with_employees(seed_employees())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.employees.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.employees.is_empty()
    }

    pub async fn list_employees(&self) -> Vec<Employee> {
        self.inner.read().await.employees.clone()
    }

    pub async fn find_employee(&self, id: &EmployeeId) -> Option<Employee> {
        self.inner
            .read()
            .await
            .employees
            .iter()
            .find(|employee| &employee.id == id)
            .cloned()
    }

    pub async fn create_employee(&self, draft: EmployeeDraft) -> Employee {
        let mut guard = self.inner.write().await;
        let id = guard.next_id();
        let employee = Employee::from_draft(id, draft);
        guard.employees.push(employee.clone());
        debug!(id = %employee.id, total = guard.employees.len(), "employee stored");
        employee
    }

    /// Returns `None` when no record carries `id`.
    pub async fn update_employee(
        &self,
        id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Option<Employee> {
        let mut guard = self.inner.write().await;
        let employee = guard
            .employees
            .iter_mut()
            .find(|employee| &employee.id == id)?;
        patch.apply_to(employee);
        Some(employee.clone())
    }

    /// Returns `false` when no record carries `id`.
    pub async fn delete_employee(&self, id: &EmployeeId) -> bool {
        let mut guard = self.inner.write().await;
        let before = guard.employees.len();
        guard.employees.retain(|employee| &employee.id != id);
        guard.employees.len() != before
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
