//! UI-thread owner of the employee store and everything derived from it.
//!
//! Backend events are applied to the [`EmployeeStore`]; the controller then
//! reacts to the store's change notifications: the table view is rebuilt, the
//! modal is closed or released, and toasts are raised. UI actions come back out
//! as [`BackendCommand`]s for the caller to queue.

use client_core::{EmployeeState, EmployeeStore, Operation, Phase, StoreChange};
use shared::domain::{Employee, EmployeeId};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiEvent,
        modal::{FormState, Modal},
        notifications::Notifications,
        view::DirectoryView,
    },
};

pub struct DirectoryController {
    store: EmployeeStore,
    changes: broadcast::Receiver<StoreChange>,
    pub view: DirectoryView,
    pub modal: Modal,
    pub toasts: Notifications,
    pub status: String,
}

impl Default for DirectoryController {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryController {
    pub fn new() -> Self {
        let store = EmployeeStore::new();
        let changes = store.subscribe();
        Self {
            store,
            changes,
            view: DirectoryView::default(),
            modal: Modal::None,
            toasts: Notifications::default(),
            status: "Starting backend...".to_string(),
        }
    }

    pub fn state(&self) -> &EmployeeState {
        self.store.state()
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::BackendReady { server_url } => {
                self.status = format!("Connected to {server_url}");
            }
            UiEvent::Info(message) => self.status = message,
            UiEvent::Lifecycle(lifecycle) => {
                self.store.apply(lifecycle);
                self.process_changes();
            }
            UiEvent::Error(error) => {
                warn!(context = ?error.context(), "{}", error.message());
                self.status = error.message().to_string();
                self.toasts.error(error.message());
            }
        }
    }

    fn process_changes(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(change) => self.on_change(change),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "store change notifications lagged; rebuilding view");
                    self.view.refresh(&self.store.state().employees);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    fn on_change(&mut self, change: StoreChange) {
        match change.phase {
            Phase::Pending => {}
            Phase::Fulfilled => {
                self.view.refresh(&self.store.state().employees);
                match change.operation {
                    Operation::Fetch => {}
                    Operation::Add => self.finish_submit(&change, "Employee saved successfully."),
                    Operation::Update => {
                        self.finish_submit(&change, "Employee updated successfully.")
                    }
                    Operation::Delete => self.toasts.success("Employee deleted successfully."),
                }
            }
            Phase::Rejected => {
                if let Some(form) = self
                    .modal
                    .form_mut()
                    .filter(|form| form.awaits(change.operation, None))
                {
                    form.submitting = false;
                }
                let message = self
                    .store
                    .state()
                    .error
                    .clone()
                    .unwrap_or_else(|| change.operation.default_failure_message().to_string());
                self.toasts.error(message);
            }
        }
    }

    /// Closes the form only when it submitted the operation that settled;
    /// a late completion for a cancelled form leaves the current one alone.
    fn finish_submit(&mut self, change: &StoreChange, message: &str) {
        let record = change.record.as_ref();
        if matches!(&self.modal, Modal::Form(form) if form.awaits(change.operation, record)) {
            self.modal.close();
        }
        self.toasts.success(message);
    }

    pub fn set_filter(&mut self, text: &str) {
        self.view.set_filter(text, &self.store.state().employees);
    }

    pub fn cycle_sort(&mut self) {
        self.view.cycle_sort(&self.store.state().employees);
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Form(FormState::create());
    }

    pub fn open_edit(&mut self, id: &EmployeeId) {
        if let Some(form) = self.find(id).map(FormState::edit) {
            self.modal = Modal::Form(form);
        }
    }

    pub fn open_view(&mut self, id: &EmployeeId) {
        if let Some(form) = self.find(id).map(FormState::view) {
            self.modal = Modal::Form(form);
        }
    }

    pub fn request_delete(&mut self, id: &EmployeeId) {
        let target = self
            .find(id)
            .map(|employee| (employee.id.clone(), employee.name.clone()));
        if let Some((id, name)) = target {
            self.modal = Modal::ConfirmDelete { id, name };
        }
    }

    pub fn submit_form(&mut self) -> Option<BackendCommand> {
        self.modal.form_mut().and_then(FormState::submit)
    }

    /// The confirmation closes as soon as it is accepted; the outcome shows
    /// up as a toast.
    pub fn confirm_delete(&mut self) -> Option<BackendCommand> {
        match std::mem::take(&mut self.modal) {
            Modal::ConfirmDelete { id, .. } => Some(BackendCommand::Delete { id }),
            other => {
                self.modal = other;
                None
            }
        }
    }

    pub fn cancel_modal(&mut self) {
        self.modal.close();
    }

    fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.store.state().employees.iter().find(|e| &e.id == id)
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
