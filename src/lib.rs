//! icevault client orchestration core
//!
//! Drives a remote backup host over a single generic RPC channel: browse a
//! directory tree, launch long-running backup jobs, and watch their progress.
//! This crate is the embeddable core — the UI layer on top of it (rendering,
//! routing, byte formatting) lives elsewhere.
//!
//! - `rpc` — generic method dispatch over one JSON POST endpoint
//! - `alerts` — ordered, dismissible user-facing notifications
//! - `history` — persistent, deduplicated, sorted base-path history
//! - `inventory` — the client-held directory collection
//! - `monitor` — cancellable polling loop reconciling job status by name
//! - `console` — the check/launch/stop flows tying the above together

pub mod alerts;
pub mod config;
pub mod console;
pub mod error;
pub mod history;
pub mod inventory;
pub mod monitor;
pub mod rpc;
pub mod state;

pub use alerts::{Alert, AlertQueue, Severity};
pub use config::ConsoleConfig;
pub use console::Console;
pub use history::DirectoryHistoryStore;
pub use inventory::{DirectoryEntry, DirectoryInventory};
pub use monitor::StatusMonitor;
pub use rpc::{HttpGateway, RemoteCall, RemoteResult, RpcGateway};
pub use state::{AppState, SharedState};
