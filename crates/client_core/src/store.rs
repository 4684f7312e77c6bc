//! Application state container.
//!
//! The container is driven only by three-phase lifecycle events
//! (pending/fulfilled/rejected) for the four remote operations. [`reduce`]
//! is the single transition function; [`EmployeeStore`] owns the state,
//! applies events in arrival order and notifies subscribers after each one.

use shared::domain::{Employee, EmployeeId};
use tokio::sync::{broadcast, mpsc};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Operation {
    pub fn default_failure_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch employees",
            Operation::Add => "Failed to add employee",
            Operation::Update => "Failed to update employee",
            Operation::Delete => "Failed to delete employee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fetched(Vec<Employee>),
    Added(Employee),
    Updated(Employee),
    Deleted(EmployeeId),
}

impl Outcome {
    pub fn operation(&self) -> Operation {
        match self {
            Outcome::Fetched(_) => Operation::Fetch,
            Outcome::Added(_) => Operation::Add,
            Outcome::Updated(_) => Operation::Update,
            Outcome::Deleted(_) => Operation::Delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Pending(Operation),
    Fulfilled(Outcome),
    Rejected { operation: Operation, message: String },
}

impl Lifecycle {
    pub fn operation(&self) -> Operation {
        match self {
            Lifecycle::Pending(operation) => *operation,
            Lifecycle::Fulfilled(outcome) => outcome.operation(),
            Lifecycle::Rejected { operation, .. } => *operation,
        }
    }

    /// Record a fulfilled add, update or delete settled on.
    pub fn record(&self) -> Option<&EmployeeId> {
        match self {
            Lifecycle::Fulfilled(Outcome::Added(employee) | Outcome::Updated(employee)) => {
                Some(&employee.id)
            }
            Lifecycle::Fulfilled(Outcome::Deleted(id)) => Some(id),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Lifecycle::Pending(_) => Phase::Pending,
            Lifecycle::Fulfilled(_) => Phase::Fulfilled,
            Lifecycle::Rejected { .. } => Phase::Rejected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeState {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

pub fn reduce(state: &mut EmployeeState, event: Lifecycle) {
    match event {
        Lifecycle::Pending(_) => {
            state.loading = true;
            state.error = None;
        }
        Lifecycle::Fulfilled(outcome) => {
            state.loading = false;
            match outcome {
                Outcome::Fetched(employees) => state.employees = employees,
                Outcome::Added(employee) => state.employees.push(employee),
                Outcome::Updated(employee) => {
                    if let Some(slot) = state
                        .employees
                        .iter_mut()
                        .find(|existing| existing.id == employee.id)
                    {
                        *slot = employee;
                    }
                }
                Outcome::Deleted(id) => state.employees.retain(|existing| existing.id != id),
            }
        }
        Lifecycle::Rejected { message, .. } => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

/// Notification sent to subscribers after every applied event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub revision: u64,
    pub operation: Operation,
    pub phase: Phase,
    pub record: Option<EmployeeId>,
}

pub struct EmployeeStore {
    state: EmployeeState,
    revision: u64,
    changes: broadcast::Sender<StoreChange>,
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: EmployeeState::default(),
            revision: 0,
            changes,
        }
    }

    pub fn state(&self) -> &EmployeeState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    pub fn apply(&mut self, event: Lifecycle) -> StoreChange {
        let operation = event.operation();
        let phase = event.phase();
        let record = event.record().cloned();
        reduce(&mut self.state, event);
        self.revision += 1;

        let change = StoreChange {
            revision: self.revision,
            operation,
            phase,
            record,
        };
        // No subscribers is not an error.
        let _ = self.changes.send(change.clone());
        change
    }

    /// Applies every event already queued on `events`; returns how many.
    pub fn drain(&mut self, events: &mut mpsc::UnboundedReceiver<Lifecycle>) -> usize {
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
