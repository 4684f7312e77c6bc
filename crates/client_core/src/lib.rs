//! Client side of the employee directory: the remote-call layer, the
//! application state container and the dispatcher that connects them.

pub mod api;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod store;

pub use api::{EmployeeApi, HttpEmployeeApi};
pub use dispatch::{Dispatcher, LifecycleSink};
pub use error::RemoteError;
pub use filter::{filter_employees, matches_filter};
pub use store::{
    reduce, EmployeeState, EmployeeStore, Lifecycle, Operation, Outcome, Phase, StoreChange,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
