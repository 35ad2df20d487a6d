use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for a single node phase
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NodeError {
    #[error("Prep: {0}")]
    Prep(String),

    #[error("Execution: {0}")]
    Execution(String),

    #[error("Post: {0}")]
    Post(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Panic: {0}")]
    Panic(String),

    #[error("Context: {0}")]
    Context(String),

    #[error("Io: {0}")]
    Io(String),

    #[error("Other: {0}")]
    Other(String),
}

impl From<anyhow::Error> for NodeError {
    fn from(err: anyhow::Error) -> Self {
        NodeError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::Context(err.to_string())
    }
}

impl From<std::io::Error> for NodeError {
    fn from(err: std::io::Error) -> Self {
        NodeError::Io(err.to_string())
    }
}

/// Error type for flow construction
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("Other: {0}")]
    Other(String),
}

impl From<anyhow::Error> for GraphError {
    fn from(err: anyhow::Error) -> Self {
        GraphError::Other(err.to_string())
    }
}
