//! Background job status polling and reconciliation.
//!
//! A start/stop-able loop that fetches `get_background_process_status` on a
//! fixed cadence and merges each report into the shared inventory by
//! directory name. The loop itself is the only state machine in this crate:
//! Idle (no ticker task) or Running (one owned ticker task, ever).

use crate::rpc::{RemoteResult, RpcGateway};
use crate::state::SharedState;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Cadence of the status poll.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(1000);

/// Summary shown when a poll fails outright.
pub const STATUS_UNAVAILABLE: &str = "Couldn't get status.";

/// Summary shown when a poll succeeds but carries no usable `ret.message`.
pub const STATUS_UNKNOWN: &str = "Status unavailable";

const GET_STATUS_METHOD: &str = "get_background_process_status";

/// One background process as reported by the server. Ephemeral: consumed
/// during the reconciliation pass, never retained.
#[derive(Debug, Deserialize)]
pub struct JobStatusReport {
    pub pid: i64,
    pub status: String,
    pub directory: String,
}

/// Recurring, cancellable fetch of background-job status.
///
/// `start` is a no-op while running: at most one ticker task exists per
/// monitor, no matter how many times it is called. Ticks fire on the fixed
/// cadence regardless of poll latency — each poll runs as its own task, so a
/// poll still outstanding when the next tick fires simply overlaps it.
pub struct StatusMonitor<G> {
    gateway: Arc<G>,
    state: SharedState,
    period: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl<G: RpcGateway + 'static> StatusMonitor<G> {
    pub fn new(gateway: Arc<G>, state: SharedState) -> Self {
        Self {
            gateway,
            state,
            period: DEFAULT_POLL_PERIOD,
            ticker: None,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Whether a polling loop is currently active.
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Idle → Running. Schedules the first poll one period out and
    /// re-schedules on the same cadence thereafter. No-op when already
    /// running.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("status monitor already running");
            return;
        }
        debug!(period_ms = self.period.as_millis() as u64, "starting status monitor");
        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        let period = self.period;
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first interval tick completes immediately; consume it so
            // the first poll lands a full period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let gateway = Arc::clone(&gateway);
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    poll_status(gateway.as_ref(), &state).await;
                });
            }
        }));
    }

    /// Running → Idle. Cancels the recurrence; no further ticks fire. Safe
    /// to call at any time, including while a poll is in flight. No-op when
    /// idle.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("stopping status monitor");
            ticker.abort();
        }
    }
}

impl<G> Drop for StatusMonitor<G> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

/// One poll: fetch status and reconcile it into the shared state.
///
/// On success the summary is replaced from `ret.message` and, when
/// `ret.proc_status` is present, a `"[pid] status"` line per report becomes
/// the extended status while matching inventory entries are marked
/// uploading; a report naming a directory no longer in the inventory is
/// skipped without aborting the rest of the batch. On failure only the
/// summary changes — stale flags and extended text deliberately persist, the
/// next tick is the retry.
pub(crate) async fn poll_status<G: RpcGateway>(gateway: &G, state: &SharedState) {
    match gateway.call(GET_STATUS_METHOD, Vec::new()).await {
        RemoteResult::Success(body) => {
            let ret = body.get("ret").filter(|v| !v.is_null());
            let summary = ret
                .and_then(|r| r.get("message"))
                .and_then(Value::as_str)
                .unwrap_or(STATUS_UNKNOWN)
                .to_string();
            let reports = ret
                .and_then(|r| r.get("proc_status"))
                .and_then(Value::as_array)
                .map(|raw| parse_reports(raw));

            let mut state = state.lock().await;
            state.extended_status = None;
            state.background_status = summary;
            if let Some(reports) = reports {
                let mut lines = String::new();
                for report in &reports {
                    lines.push_str(&format!("[{}] {}\n", report.pid, report.status));
                    state.inventory.mark_uploading(&report.directory);
                }
                state.extended_status = Some(lines);
            }
        }
        RemoteResult::Failure(_) => {
            let mut state = state.lock().await;
            state.background_status = STATUS_UNAVAILABLE.to_string();
        }
    }
}

fn parse_reports(raw: &[Value]) -> Vec<JobStatusReport> {
    raw.iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(error = %err, "skipping malformed process status report");
                None
            }
        })
        .collect()
}
