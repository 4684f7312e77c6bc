use std::future::Future;

use shared::domain::{Employee, EmployeeDraft, EmployeeId, EmployeePatch};
use tokio::sync::mpsc;
use tracing::warn;

use crate::{
    api::EmployeeApi,
    error::RemoteError,
    store::{Lifecycle, Operation, Outcome},
};

/// Receiving end of the lifecycle events a [`Dispatcher`] emits.
pub trait LifecycleSink: Send + Sync {
    fn emit(&self, event: Lifecycle);
}

impl LifecycleSink for mpsc::UnboundedSender<Lifecycle> {
    fn emit(&self, event: Lifecycle) {
        if self.send(event).is_err() {
            warn!("lifecycle receiver dropped; event discarded");
        }
    }
}

/// Runs remote calls and reports each one as pending, then fulfilled or
/// rejected. The call's own result is handed back to the caller as well.
pub struct Dispatcher<A, S> {
    api: A,
    sink: S,
}

impl<A: EmployeeApi, S: LifecycleSink> Dispatcher<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self { api, sink }
    }

    pub async fn fetch_employees(&self) -> Result<Vec<Employee>, RemoteError> {
        self.run(Operation::Fetch, self.api.fetch_employees(), |employees| {
            Outcome::Fetched(employees.clone())
        })
        .await
    }

    pub async fn add_employee(&self, draft: &EmployeeDraft) -> Result<Employee, RemoteError> {
        self.run(Operation::Add, self.api.add_employee(draft), |employee| {
            Outcome::Added(employee.clone())
        })
        .await
    }

    pub async fn update_employee(
        &self,
        id: &EmployeeId,
        patch: &EmployeePatch,
    ) -> Result<Employee, RemoteError> {
        self.run(
            Operation::Update,
            self.api.update_employee(id, patch),
            |employee| Outcome::Updated(employee.clone()),
        )
        .await
    }

    pub async fn delete_employee(&self, id: &EmployeeId) -> Result<String, RemoteError> {
        self.run(Operation::Delete, self.api.delete_employee(id), |_| {
            Outcome::Deleted(id.clone())
        })
        .await
    }

    async fn run<T, F>(
        &self,
        operation: Operation,
        call: F,
        outcome: impl FnOnce(&T) -> Outcome,
    ) -> Result<T, RemoteError>
    where
        F: Future<Output = Result<T, RemoteError>>,
    {
        self.sink.emit(Lifecycle::Pending(operation));
        match call.await {
            Ok(value) => {
                self.sink.emit(Lifecycle::Fulfilled(outcome(&value)));
                Ok(value)
            }
            Err(err) => {
                warn!(operation = operation.label(), error = %err, "remote call failed");
                self.sink.emit(Lifecycle::Rejected {
                    operation,
                    message: err.message(),
                });
                Err(err)
            }
        }
    }
}
