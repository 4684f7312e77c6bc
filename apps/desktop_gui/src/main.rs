use std::time::Duration;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{DirectoryApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Employee directory desktop client")]
struct Args {
    /// Base URL of a running directory server.
    #[arg(long, env = "EMPLOYEE_DIRECTORY_URL")]
    server_url: Option<String>,
    /// Use the seeded in-process server even when a URL is configured.
    #[arg(long)]
    embedded: bool,
    /// Response delay for the embedded server.
    #[arg(long, default_value_t = 400)]
    latency_ms: u64,
}

impl Args {
    fn into_startup(self) -> StartupConfig {
        let server_url = self
            .server_url
            .filter(|url| !self.embedded && !url.trim().is_empty());
        StartupConfig {
            server_url,
            latency: Duration::from_millis(self.latency_ms),
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let startup = Args::parse().into_startup();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Directory")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Employee Directory",
        options,
        Box::new(|_cc| Ok(Box::new(DirectoryApp::bootstrap(cmd_tx, ui_rx)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_flag_overrides_server_url() {
        let startup = Args::try_parse_from([
            "desktop_gui",
            "--server-url",
            "http://127.0.0.1:8443",
            "--embedded",
        ])
        .expect("args")
        .into_startup();
        assert_eq!(startup.server_url, None);
        assert_eq!(startup.latency, Duration::from_millis(400));
    }

    #[test]
    fn explicit_server_url_is_used() {
        let startup = Args::try_parse_from([
            "desktop_gui",
            "--server-url",
            "http://10.0.0.5:8443",
            "--latency-ms",
            "0",
        ])
        .expect("args")
        .into_startup();
        assert_eq!(startup.server_url.as_deref(), Some("http://10.0.0.5:8443"));
        assert_eq!(startup.latency, Duration::ZERO);
    }
}
