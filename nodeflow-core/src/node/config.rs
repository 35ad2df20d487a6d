use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the execute phase of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Total execute attempts before falling back; zero is treated as one
    pub max_retries: usize,
    /// Pause between failed attempts, in milliseconds
    pub wait_ms: u64,
    /// Per-attempt limit in milliseconds; `None` waits indefinitely
    pub timeout_ms: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            wait_ms: 0,
            timeout_ms: None,
        }
    }
}

impl NodeConfig {
    pub fn attempts(&self) -> usize {
        self.max_retries.max(1)
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Builder for node configuration
#[derive(Debug, Default)]
pub struct NodeConfigBuilder {
    config: NodeConfig,
}

impl NodeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_retries(mut self, retries: usize) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn wait(mut self, millis: u64) -> Self {
        self.config.wait_ms = millis;
        self
    }

    pub fn timeout(mut self, millis: u64) -> Self {
        self.config.timeout_ms = Some(millis);
        self
    }

    pub fn build(self) -> NodeConfig {
        self.config
    }
}
