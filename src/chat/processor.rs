use async_trait::async_trait;
use thiserror::Error;

/// Error type for text processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing: {0}")]
    Processing(String),
}

/// The transform a chat node applies to each message
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextProcessor: Send + Sync {
    async fn process(&self, input: &str) -> Result<String, ProcessError>;
}

/// Stand-in for a model call that echoes the prompt back
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoProcessor;

#[async_trait]
impl TextProcessor for EchoProcessor {
    async fn process(&self, input: &str) -> Result<String, ProcessError> {
        if input.trim().is_empty() {
            return Err(ProcessError::InvalidInput("Prompt cannot be empty".into()));
        }
        Ok(format!("Processed your input: {input}"))
    }
}
