//! Test doubles shared by the integration suites.

// Each suite uses a different subset of this module.
#![allow(dead_code)]

use icevault::{RemoteResult, RpcGateway};
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

/// Gateway double that replays queued results in order and records every
/// call. Once the script runs out it keeps answering with a bodyless
/// failure. An optional delay makes polls stay in flight under paused time.
pub struct ScriptedGateway {
    results: Mutex<VecDeque<RemoteResult>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    delay: Duration,
}

impl ScriptedGateway {
    pub fn new(results: Vec<RemoteResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RpcGateway for ScriptedGateway {
    fn call(&self, method: &str, args: Vec<Value>) -> impl Future<Output = RemoteResult> + Send {
        self.calls.lock().unwrap().push((method.to_string(), args));
        let result = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RemoteResult::Failure(None));
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }
}
