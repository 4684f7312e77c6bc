//! UI layer for desktop GUI: the directory window and its widgets.

pub mod app;

pub use app::{DirectoryApp, StartupConfig};
