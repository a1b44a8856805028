//! Generic remote-method dispatch over a single JSON POST endpoint.
//!
//! Every remote operation goes through the same channel: the method name and
//! its positional arguments are serialized as one POST body, and the
//! transport-level outcome is normalized into [`RemoteResult`]. The gateway
//! performs no retries, no timeouts beyond the client defaults, and no
//! validation of the method name — interpreting the `ret` envelope is the
//! caller's job.

use crate::error::GatewayError;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// One remote invocation, serialized with the wire field names the server
/// expects. Constructed per call, never retained.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteCall {
    #[serde(rename = "functionName")]
    pub function_name: String,
    #[serde(rename = "functionArgs")]
    pub function_args: Vec<Value>,
}

impl RemoteCall {
    pub fn new(method: &str, args: Vec<Value>) -> Self {
        Self {
            function_name: method.to_string(),
            function_args: args,
        }
    }
}

/// Outcome of a remote call, keyed off the transport-level status.
///
/// Success payloads conventionally carry a `{ "ret": ... }` envelope; an
/// absent or null `ret` means "no usable result", not an error. Failure
/// keeps the response body when one was readable, so callers can surface a
/// server-provided message.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResult {
    Success(Value),
    Failure(Option<Value>),
}

impl RemoteResult {
    /// The `ret` envelope of a successful response, if it is present and
    /// non-null.
    pub fn ret(&self) -> Option<&Value> {
        match self {
            RemoteResult::Success(body) => body.get("ret").filter(|v| !v.is_null()),
            RemoteResult::Failure(_) => None,
        }
    }

    /// The server-provided `ret.message` of a failure body, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            RemoteResult::Failure(Some(body)) => {
                body.get("ret").and_then(|r| r.get("message")).and_then(Value::as_str)
            }
            _ => None,
        }
    }
}

/// The single generic channel for invoking named remote operations.
///
/// `call` never returns an `Err` and never panics across the boundary —
/// every transport problem is folded into [`RemoteResult::Failure`].
/// Concurrent calls are independent; no ordering is guaranteed between them.
pub trait RpcGateway: Send + Sync {
    fn call(&self, method: &str, args: Vec<Value>) -> impl Future<Output = RemoteResult> + Send;
}

/// [`RpcGateway`] over HTTP: POSTs each [`RemoteCall`] to one fixed endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn dispatch(&self, call: &RemoteCall) -> Result<Value, GatewayError> {
        let response = self.client.post(&self.endpoint).json(call).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            // Keep the body when it parses; a server error page that is not
            // JSON degrades to a bodyless failure.
            let body = response.json::<Value>().await.ok();
            Err(GatewayError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

impl RpcGateway for HttpGateway {
    fn call(&self, method: &str, args: Vec<Value>) -> impl Future<Output = RemoteResult> + Send {
        let call = RemoteCall::new(method, args);
        async move {
            debug!(method = %call.function_name, "dispatching remote call");
            match self.dispatch(&call).await {
                Ok(body) => RemoteResult::Success(body),
                Err(GatewayError::Status { code, body }) => {
                    debug!(method = %call.function_name, code, "remote call failed");
                    RemoteResult::Failure(body)
                }
                Err(err) => {
                    debug!(method = %call.function_name, error = %err, "remote call failed");
                    RemoteResult::Failure(None)
                }
            }
        }
    }
}
