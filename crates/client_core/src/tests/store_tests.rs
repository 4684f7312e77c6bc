use super::*;

fn employee(id: &str, name: &str) -> Employee {
    Employee {
        id: EmployeeId::from(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        role: "Developer".to_string(),
    }
}

fn loaded(employees: Vec<Employee>) -> EmployeeState {
    EmployeeState {
        employees,
        loading: false,
        error: None,
    }
}

#[test]
fn pending_sets_loading_and_clears_error() {
    let mut state = EmployeeState {
        error: Some("boom".into()),
        ..EmployeeState::default()
    };
    reduce(&mut state, Lifecycle::Pending(Operation::Fetch));
    assert!(state.loading);
    assert_eq!(state.error, None);
}

#[test]
fn fetch_fulfilled_replaces_collection_wholesale() {
    let mut state = loaded(vec![employee("1", "Old")]);
    reduce(&mut state, Lifecycle::Pending(Operation::Fetch));
    reduce(
        &mut state,
        Lifecycle::Fulfilled(Outcome::Fetched(vec![
            employee("2", "Jane"),
            employee("3", "Robert"),
        ])),
    );
    assert!(!state.loading);
    let ids: Vec<_> = state.employees.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["2", "3"]);
}

#[test]
fn add_fulfilled_appends() {
    let mut state = loaded(vec![employee("1", "John")]);
    reduce(
        &mut state,
        Lifecycle::Fulfilled(Outcome::Added(employee("11", "Amy"))),
    );
    assert_eq!(state.employees.len(), 2);
    assert_eq!(state.employees[1].name, "Amy");
}

#[test]
fn update_fulfilled_replaces_matching_id_in_place() {
    let mut state = loaded(vec![employee("1", "John"), employee("2", "Jane")]);
    let mut changed = employee("1", "Johnny");
    changed.role = "Lead".into();
    reduce(&mut state, Lifecycle::Fulfilled(Outcome::Updated(changed.clone())));
    assert_eq!(state.employees[0], changed);
    assert_eq!(state.employees[1].name, "Jane");
}

#[test]
fn update_fulfilled_for_absent_id_is_a_no_op() {
    let mut state = loaded(vec![employee("1", "John")]);
    let before = state.employees.clone();
    reduce(
        &mut state,
        Lifecycle::Fulfilled(Outcome::Updated(employee("42", "Ghost"))),
    );
    assert_eq!(state.employees, before);
}

#[test]
fn delete_fulfilled_removes_matching_id() {
    let mut state = loaded(vec![employee("1", "John"), employee("2", "Jane")]);
    reduce(
        &mut state,
        Lifecycle::Fulfilled(Outcome::Deleted(EmployeeId::from("1"))),
    );
    assert_eq!(state.employees.len(), 1);
    assert!(state.employees.iter().all(|e| e.id.as_str() != "1"));
}

#[test]
fn rejected_records_message_and_keeps_collection() {
    let mut state = loaded(vec![employee("1", "John")]);
    reduce(&mut state, Lifecycle::Pending(Operation::Delete));
    reduce(
        &mut state,
        Lifecycle::Rejected {
            operation: Operation::Delete,
            message: "Employee 999 not found".into(),
        },
    );
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Employee 999 not found"));
    assert_eq!(state.employees.len(), 1);
}

#[test]
fn store_notifies_subscribers_once_per_event() {
    let mut store = EmployeeStore::new();
    let mut changes = store.subscribe();

    store.apply(Lifecycle::Pending(Operation::Add));
    store.apply(Lifecycle::Rejected {
        operation: Operation::Add,
        message: "nope".into(),
    });

    let first = changes.try_recv().expect("pending change");
    assert_eq!(first.revision, 1);
    assert_eq!(first.phase, Phase::Pending);
    let second = changes.try_recv().expect("rejected change");
    assert_eq!(second.revision, 2);
    assert_eq!(second.operation, Operation::Add);
    assert_eq!(second.phase, Phase::Rejected);
    assert_eq!(second.record, None);
    assert!(changes.try_recv().is_err());
}

#[test]
fn fulfilled_changes_name_the_settled_record() {
    let mut store = EmployeeStore::new();
    let mut changes = store.subscribe();

    store.apply(Lifecycle::Fulfilled(Outcome::Updated(employee("3", "Mike"))));
    store.apply(Lifecycle::Fulfilled(Outcome::Deleted(EmployeeId::from("4"))));

    let updated = changes.try_recv().expect("update change");
    assert_eq!(updated.record, Some(EmployeeId::from("3")));
    let deleted = changes.try_recv().expect("delete change");
    assert_eq!(deleted.record, Some(EmployeeId::from("4")));
}

#[test]
fn repeated_identical_failures_each_notify() {
    let mut store = EmployeeStore::new();
    let mut changes = store.subscribe();
    for _ in 0..2 {
        store.apply(Lifecycle::Pending(Operation::Fetch));
        store.apply(Lifecycle::Rejected {
            operation: Operation::Fetch,
            message: "Failed to fetch employees".into(),
        });
    }

    let rejected = std::iter::from_fn(|| changes.try_recv().ok())
        .filter(|change| change.phase == Phase::Rejected)
        .count();
    assert_eq!(rejected, 2);
}

#[test]
fn drain_applies_queued_events_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tx.send(Lifecycle::Pending(Operation::Fetch)).expect("send");
    tx.send(Lifecycle::Fulfilled(Outcome::Fetched(vec![employee("1", "John")])))
        .expect("send");

    let mut store = EmployeeStore::new();
    assert_eq!(store.drain(&mut rx), 2);
    assert_eq!(store.revision(), 2);
    assert!(!store.state().loading);
    assert_eq!(store.state().employees.len(), 1);
}
