//! Shared application state.
//!
//! One explicit struct owned by the embedding layer and handed by `Arc` to
//! the console flows and the status monitor. Lock discipline: critical
//! sections are short and never span network I/O; the console owns wholesale
//! inventory replacement, the monitor only flips per-entry liveness flags.

use crate::alerts::AlertQueue;
use crate::inventory::DirectoryInventory;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Initial value of [`AppState::background_status`], before any poll ran.
pub const STATUS_NOT_CHECKED: &str = "Not checked yet";

/// Everything the UI renders from, in one place.
#[derive(Debug)]
pub struct AppState {
    /// Directory entries from the last successful check.
    pub inventory: DirectoryInventory,
    /// Pending user-facing notifications.
    pub alerts: AlertQueue,
    /// True while a directory check is in flight (drives the UI spinner).
    pub busy: bool,
    /// One-line summary of the background job status.
    pub background_status: String,
    /// Multi-line per-process breakdown, present only when the last poll
    /// reported running processes.
    pub extended_status: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inventory: DirectoryInventory::new(),
            alerts: AlertQueue::new(),
            busy: false,
            background_status: STATUS_NOT_CHECKED.to_string(),
            extended_status: None,
        }
    }

    /// Wrap a fresh state for sharing between the console and the monitor.
    pub fn shared() -> SharedState {
        Arc::new(Mutex::new(Self::new()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the state shared between the console flows and the monitor.
pub type SharedState = Arc<Mutex<AppState>>;
