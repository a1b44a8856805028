//! The check/launch/stop flows tying the gateway, history, inventory and
//! alerts together.
//!
//! Every remote outcome is projected into either an alert or a status-text
//! update; nothing here panics or propagates an error to the caller — the
//! user can always retry, stop, or navigate away.

use crate::config::ConsoleConfig;
use crate::history::DirectoryHistoryStore;
use crate::inventory::DirectoryEntry;
use crate::monitor::StatusMonitor;
use crate::rpc::{HttpGateway, RemoteResult, RpcGateway};
use crate::state::{AppState, SharedState};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Alert raised when a directory check fails or returns nothing usable.
pub const LOAD_DIRECTORY_FAILED: &str = "Couldn't load directory";
/// Fallback alert for a backup launch with no server-provided message.
pub const LAUNCH_BACKUP_FAILED: &str = "Couldn't launch backup";
/// Fallback alert for a stop request with no server-provided message.
pub const STOP_PROCESSES_FAILED: &str = "Couldn't stop processes";

const LOAD_DIRECTORY_METHOD: &str = "load_directory";
const LAUNCH_BACKUP_METHOD: &str = "launch_backup";
const STOP_ALL_METHOD: &str = "stop_all_processes";

/// User-initiated operations against the remote backup host.
pub struct Console<G> {
    gateway: Arc<G>,
    state: SharedState,
    history: DirectoryHistoryStore,
}

impl<G: RpcGateway> Console<G> {
    pub fn new(gateway: Arc<G>, state: SharedState, history: DirectoryHistoryStore) -> Self {
        Self {
            gateway,
            state,
            history,
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn history(&self) -> &DirectoryHistoryStore {
        &self.history
    }

    /// Record `path` in the history, then load its directory tree from the
    /// remote host. A usable response replaces the inventory wholesale;
    /// anything else clears it and raises an error alert. The busy flag is
    /// held for the duration of the call.
    pub async fn check_directory(&self, path: &str) {
        self.state.lock().await.busy = true;

        // History trouble must never block the check itself.
        if let Err(err) = self.history.record(path) {
            warn!(path, error = %err, "failed to record directory history");
        }

        let result = self
            .gateway
            .call(LOAD_DIRECTORY_METHOD, vec![Value::String(path.to_string())])
            .await;

        let mut state = self.state.lock().await;
        state.busy = false;
        match parse_directories(&result) {
            Some(entries) => {
                info!(path, count = entries.len(), "directory check complete");
                state.inventory.replace(entries);
            }
            None => {
                state.inventory.clear();
                state.alerts.error(LOAD_DIRECTORY_FAILED);
            }
        }
    }

    /// Ask the remote host to start a backup of the named directory, and
    /// project the reported outcome into an alert.
    pub async fn launch_backup(&self, name: &str) {
        let result = self
            .gateway
            .call(LAUNCH_BACKUP_METHOD, vec![Value::String(name.to_string())])
            .await;
        let mut state = self.state.lock().await;
        project_job_outcome(&mut state, &result, LAUNCH_BACKUP_FAILED);
    }

    /// Ask the remote host to stop every running backup process.
    pub async fn stop_all_processes(&self) {
        let result = self.gateway.call(STOP_ALL_METHOD, Vec::new()).await;
        let mut state = self.state.lock().await;
        project_job_outcome(&mut state, &result, STOP_PROCESSES_FAILED);
    }
}

/// Wire up a ready-to-use console and monitor over HTTP from one config.
pub fn bootstrap(config: ConsoleConfig) -> (Console<HttpGateway>, StatusMonitor<HttpGateway>) {
    let gateway = Arc::new(HttpGateway::new(config.endpoint));
    let state = AppState::shared();
    let history = match config.history_path {
        Some(path) => DirectoryHistoryStore::new(path),
        None => DirectoryHistoryStore::default(),
    };
    let console = Console::new(Arc::clone(&gateway), Arc::clone(&state), history);
    let monitor = StatusMonitor::new(gateway, state).with_period(config.poll_period);
    (console, monitor)
}

/// Entries from a usable `load_directory` response, or `None` when the call
/// failed or the payload carries no `ret.directories` array. Individual
/// malformed entries are skipped rather than sinking the batch.
fn parse_directories(result: &RemoteResult) -> Option<Vec<DirectoryEntry>> {
    let raw = result.ret()?.get("directories")?.as_array()?;
    let entries = raw
        .iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping malformed directory entry");
                None
            }
        })
        .collect();
    Some(entries)
}

/// Shared success/failure-to-alert projection for launch and stop.
///
/// `ret.ok == true` raises a success alert with the server message,
/// `ret.ok == false` an error alert with the same field; a malformed or
/// absent envelope falls back to `generic`. A transport failure surfaces the
/// failure body's `ret.message` when one is present.
fn project_job_outcome(state: &mut AppState, result: &RemoteResult, generic: &str) {
    match result {
        RemoteResult::Success(_) => {
            let ret = result.ret();
            let ok = ret.and_then(|r| r.get("ok")).and_then(Value::as_bool);
            let message = ret
                .and_then(|r| r.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string);
            match ok {
                Some(true) => state.alerts.success(message.unwrap_or_default()),
                Some(false) => state.alerts.error(message.unwrap_or_else(|| generic.to_string())),
                None => state.alerts.error(generic),
            }
        }
        RemoteResult::Failure(_) => match result.failure_message() {
            Some(message) => state.alerts.error(message),
            None => state.alerts.error(generic),
        },
    }
}
