//! Transport-level error taxonomy for the RPC gateway.

use serde_json::Value;
use thiserror::Error;

/// What went wrong between issuing a request and getting a usable body back.
///
/// These never cross the gateway boundary: `HttpGateway` folds them into
/// `RemoteResult::Failure` so callers see a single result shape.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network-level failure, or a 2xx response whose body was not JSON.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status. The body is kept when
    /// it parsed as JSON so callers can surface a server-provided message.
    #[error("server returned HTTP {code}")]
    Status { code: u16, body: Option<Value> },
}
