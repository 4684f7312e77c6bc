//! Backend worker: owns the tokio runtime, the optional embedded server and
//! the dispatcher, and runs queued commands one at a time.

use std::thread;

use client_core::{Dispatcher, EmployeeApi, HttpEmployeeApi, Lifecycle, LifecycleSink};
use crossbeam_channel::{Receiver, Sender};
use server::{spawn_embedded, EmbeddedServer};
use server_api::ApiContext;
use storage::Storage;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::StartupConfig;

/// Forwards lifecycle events to the UI thread.
struct UiSink(Sender<UiEvent>);

impl LifecycleSink for UiSink {
    fn emit(&self, event: Lifecycle) {
        // Blocking send: lifecycle events must not be dropped.
        if self.0.send(UiEvent::Lifecycle(event)).is_err() {
            tracing::warn!("ui event receiver dropped; lifecycle event discarded");
        }
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    startup: StartupConfig,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                startup_failure(&ui_tx, format!("failed to build runtime: {err}"));
                return;
            }
        };
        runtime.block_on(run(cmd_rx, ui_tx, startup));
    })
}

async fn run(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    let (server_url, _embedded) = match resolve_server(&startup).await {
        Ok(resolved) => resolved,
        Err(err) => {
            startup_failure(&ui_tx, format!("failed to start embedded server: {err}"));
            return;
        }
    };
    let api = match HttpEmployeeApi::new(&server_url) {
        Ok(api) => api,
        Err(err) => {
            startup_failure(&ui_tx, err.to_string());
            return;
        }
    };

    let dispatcher = Dispatcher::new(api, UiSink(ui_tx.clone()));
    tracing::info!(%server_url, "backend worker ready");
    let _ = ui_tx.try_send(UiEvent::BackendReady { server_url });

    while let Ok(cmd) = cmd_rx.recv() {
        execute(&dispatcher, cmd).await;
    }
    tracing::info!("backend command queue closed; worker exiting");
}

async fn resolve_server(
    startup: &StartupConfig,
) -> anyhow::Result<(String, Option<EmbeddedServer>)> {
    match &startup.server_url {
        Some(url) => Ok((url.clone(), None)),
        None => {
            let api = ApiContext::new(Storage::seeded()).with_latency(startup.latency);
            let server = spawn_embedded(api).await?;
            Ok((server.base_url(), Some(server)))
        }
    }
}

/// Runs one command. Success and failure both reach the UI through the
/// dispatcher's lifecycle events.
pub async fn execute<A: EmployeeApi, S: LifecycleSink>(
    dispatcher: &Dispatcher<A, S>,
    cmd: BackendCommand,
) {
    tracing::info!(command = cmd.name(), "backend: running command");
    let _ = match cmd {
        BackendCommand::FetchAll => dispatcher.fetch_employees().await.map(|_| ()),
        BackendCommand::Create { draft } => dispatcher.add_employee(&draft).await.map(|_| ()),
        BackendCommand::Update { id, patch } => {
            dispatcher.update_employee(&id, &patch).await.map(|_| ())
        }
        BackendCommand::Delete { id } => dispatcher.delete_employee(&id).await.map(|_| ()),
    };
}

fn startup_failure(ui_tx: &Sender<UiEvent>, detail: String) {
    tracing::error!("backend worker startup failure: {detail}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        format!("backend worker startup failure: {detail}"),
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{Outcome, Phase};
    use crossbeam_channel::bounded;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(10);

    fn next_lifecycle(ui_rx: &Receiver<UiEvent>) -> Lifecycle {
        loop {
            match ui_rx.recv_timeout(WAIT).expect("ui event") {
                UiEvent::Lifecycle(event) => return event,
                _ => continue,
            }
        }
    }

    #[test]
    fn embedded_worker_fetches_seed_then_creates() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
        let worker = launch(
            cmd_rx,
            ui_tx,
            StartupConfig {
                server_url: None,
                latency: Duration::ZERO,
            },
        );

        cmd_tx.send(BackendCommand::FetchAll).expect("queue fetch");
        assert_eq!(next_lifecycle(&ui_rx).phase(), Phase::Pending);
        match next_lifecycle(&ui_rx) {
            Lifecycle::Fulfilled(Outcome::Fetched(employees)) => assert_eq!(employees.len(), 10),
            other => panic!("unexpected event: {other:?}"),
        }

        cmd_tx
            .send(BackendCommand::Create {
                draft: shared::domain::EmployeeDraft::new("Amy", "amy@x.com", "QA"),
            })
            .expect("queue create");
        assert_eq!(next_lifecycle(&ui_rx).phase(), Phase::Pending);
        match next_lifecycle(&ui_rx) {
            Lifecycle::Fulfilled(Outcome::Added(employee)) => assert_eq!(employee.name, "Amy"),
            other => panic!("unexpected event: {other:?}"),
        }

        drop(cmd_tx);
        worker.join().expect("worker exits");
    }

    #[test]
    fn unknown_delete_is_rejected_through_lifecycle() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
        let worker = launch(
            cmd_rx,
            ui_tx,
            StartupConfig {
                server_url: None,
                latency: Duration::ZERO,
            },
        );

        cmd_tx
            .send(BackendCommand::Delete {
                id: shared::domain::EmployeeId::from("999"),
            })
            .expect("queue delete");
        assert_eq!(next_lifecycle(&ui_rx).phase(), Phase::Pending);
        assert_eq!(
            next_lifecycle(&ui_rx),
            Lifecycle::Rejected {
                operation: client_core::Operation::Delete,
                message: "Employee 999 not found".to_string(),
            }
        );

        drop(cmd_tx);
        worker.join().expect("worker exits");
    }
}
