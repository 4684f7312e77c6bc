use std::{process::ExitCode, time::Duration};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{filter_employees, Dispatcher, EmployeeStore, HttpEmployeeApi};
use server::{spawn_embedded, EmbeddedServer};
use server_api::ApiContext;
use shared::{
    domain::{EmployeeDraft, EmployeeId, EmployeePatch},
    validation::{validate_draft, ValidationErrors},
};
use storage::Storage;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

use render::render_table;

#[derive(Parser, Debug)]
#[command(name = "desktop", about = "Employee directory command-line client")]
struct Args {
    /// Base URL of a running directory server.
    #[arg(long, env = "EMPLOYEE_DIRECTORY_URL")]
    server_url: Option<String>,
    /// Start a seeded in-process server instead of connecting to one.
    #[arg(long)]
    embedded: bool,
    /// Response delay for the embedded server.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    Ok(ExitCode::from(run(args).await?))
}

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;

/// Runs one command and returns the process exit status.
async fn run(args: Args) -> Result<u8> {
    let (base_url, _embedded) = resolve_server(&args).await?;
    let (tx, mut events) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(HttpEmployeeApi::new(&base_url)?, tx);
    let mut store = EmployeeStore::new();

    // Every command works against the current collection.
    let _ = dispatcher.fetch_employees().await;
    store.drain(&mut events);
    if let Some(error) = &store.state().error {
        eprintln!("error: {error}");
        return Ok(EXIT_FAILURE);
    }

    let mut search = String::new();
    match args.command {
        Command::List { search: text } => search = text,
        Command::Add { name, email, role } => {
            let draft = draft_from_args(&name, &email, &role);
            if let Err(errors) = validate_draft(&draft) {
                eprint!("{}", validation_report(&errors));
                return Ok(EXIT_INVALID_INPUT);
            }
            if let Ok(employee) = dispatcher.add_employee(&draft).await {
                println!("Employee saved successfully. (id {})", employee.id);
            }
        }
        Command::Update {
            id,
            name,
            email,
            role,
        } => {
            let id = EmployeeId::from(id);
            let patch = patch_from_args(name, email, role);
            if patch.is_empty() {
                eprintln!("error: nothing to update; pass --name, --email or --role");
                return Ok(EXIT_INVALID_INPUT);
            }
            if let Some(current) = store.state().employees.iter().find(|e| e.id == id) {
                let mut merged = current.clone();
                patch.apply_to(&mut merged);
                if let Err(errors) = validate_draft(&merged.to_draft()) {
                    eprint!("{}", validation_report(&errors));
                    return Ok(EXIT_INVALID_INPUT);
                }
            }
            if dispatcher.update_employee(&id, &patch).await.is_ok() {
                println!("Employee updated successfully.");
            }
        }
        Command::Delete { id } => {
            if dispatcher.delete_employee(&EmployeeId::from(id)).await.is_ok() {
                println!("Employee deleted successfully.");
            }
        }
    }

    store.drain(&mut events);
    let state = store.state();
    if let Some(error) = &state.error {
        eprintln!("error: {error}");
        return Ok(EXIT_FAILURE);
    }
    print!("{}", render_table(&filter_employees(&state.employees, &search)));
    Ok(0)
}

/// Base URL to talk to, plus the embedded server backing it when one was
/// started. The server stops when the handle is dropped.
async fn resolve_server(args: &Args) -> Result<(String, Option<EmbeddedServer>)> {
    if args.embedded {
        let api = ApiContext::new(Storage::seeded())
            .with_latency(Duration::from_millis(args.latency_ms));
        let server = spawn_embedded(api).await?;
        info!(url = %server.base_url(), "using embedded server");
        return Ok((server.base_url(), Some(server)));
    }
    match &args.server_url {
        Some(url) if !url.trim().is_empty() => Ok((url.clone(), None)),
        _ => bail!("pass --server-url (or set EMPLOYEE_DIRECTORY_URL) or use --embedded"),
    }
}

/// Arguments are trimmed before validation and before they are sent, as the
/// GUI form does.
fn draft_from_args(name: &str, email: &str, role: &str) -> EmployeeDraft {
    EmployeeDraft::new(name.trim(), email.trim(), role.trim())
}

fn patch_from_args(
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
) -> EmployeePatch {
    let trimmed = |value: String| value.trim().to_string();
    EmployeePatch {
        name: name.map(trimmed),
        email: email.map(trimmed),
        role: role.map(trimmed),
    }
}

fn validation_report(errors: &ValidationErrors) -> String {
    errors
        .errors
        .iter()
        .map(|error| format!("{}: {}\n", error.field.label(), error.message))
        .collect()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
