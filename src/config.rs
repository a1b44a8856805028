//! Console configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::monitor::DEFAULT_POLL_PERIOD;

/// Endpoint of the reference server's generic call route.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/callMethod/";

/// Everything needed to wire up a console and its status monitor.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// URL of the single RPC POST endpoint.
    pub endpoint: String,
    /// Cadence of the background status poll.
    pub poll_period: Duration,
    /// Where directory history is persisted; `None` uses the platform data
    /// directory.
    pub history_path: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_period: DEFAULT_POLL_PERIOD,
            history_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_period, Duration::from_millis(1000));
        assert!(config.history_path.is_none());
    }
}
