use super::{Console, TextProcessor};
use crate::{Action, Node, NodeError, NodeResult, SharedContext};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, warn};

/// Context flag that stays `true` while the user wants to keep chatting
pub const CONVERSATION_ACTIVE: &str = "conversation_active";
/// Context key holding the most recent processed response
pub const LAST_RESPONSE: &str = "last_response";

const MESSAGE_PROMPT: &str = "Enter your message: ";
const CONTINUE_PROMPT: &str = "Continue? (y/n): ";
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Prompts per visit before giving up on invalid input; `None` keeps asking
    pub max_input_attempts: Option<usize>,
    pub welcome: String,
    pub farewell: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_input_attempts: None,
            welcome: "\nWelcome to the nodeflow chat! Type 'exit' to end the conversation.\n"
                .to_string(),
            farewell: "\nGoodbye! Thanks for chatting.\n".to_string(),
        }
    }
}

#[derive(Action, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Continue,
    #[action(terminal)]
    End,
}

#[derive(Debug, PartialEq)]
enum UserInput {
    Message(String),
    Empty,
    Exit,
}

impl UserInput {
    fn classify(line: Option<String>) -> Self {
        let Some(line) = line else {
            return UserInput::Exit;
        };
        let message = line.trim();
        if message.eq_ignore_ascii_case(EXIT_COMMAND) {
            UserInput::Exit
        } else if message.is_empty() {
            UserInput::Empty
        } else {
            UserInput::Message(message.to_string())
        }
    }
}

/// One turn of a console conversation: read a message, process it, show the
/// response and ask whether to go on.
pub struct ChatNode {
    console: Arc<dyn Console>,
    processor: Arc<dyn TextProcessor>,
    config: ChatConfig,
}

impl ChatNode {
    pub fn new(
        console: Arc<dyn Console>,
        processor: Arc<dyn TextProcessor>,
        config: ChatConfig,
    ) -> Self {
        Self {
            console,
            processor,
            config,
        }
    }

    fn out_of_attempts(&self, attempts: usize) -> bool {
        matches!(self.config.max_input_attempts, Some(max) if attempts >= max)
    }

    fn finish(&self, ctx: &mut SharedContext) -> ChatAction {
        ctx.insert(CONVERSATION_ACTIVE, false);
        self.console.show(&self.config.farewell);
        ChatAction::End
    }
}

fn is_active(ctx: &SharedContext) -> bool {
    ctx.flag(CONVERSATION_ACTIVE).unwrap_or(false)
}

#[async_trait]
impl Node for ChatNode {
    type Prep = String;
    type Exec = String;
    type Action = ChatAction;

    fn name(&self) -> &str {
        "chat"
    }

    async fn prep(&self, ctx: &mut SharedContext) -> NodeResult<Option<String>> {
        if !ctx.contains_key(CONVERSATION_ACTIVE) {
            ctx.insert(CONVERSATION_ACTIVE, true);
            self.console.show(&self.config.welcome);
        }
        if !is_active(ctx) {
            return Ok(None);
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            let line = match self.console.read_line(MESSAGE_PROMPT).await {
                Ok(line) => line,
                Err(err) => {
                    // A broken input stream will not recover, so the conversation ends here.
                    warn!(error = %err, "failed to read message");
                    self.console.show(&format!("\nError getting input: {err}\n"));
                    ctx.insert(CONVERSATION_ACTIVE, false);
                    return Ok(None);
                }
            };

            match UserInput::classify(line) {
                UserInput::Message(message) => return Ok(Some(message)),
                UserInput::Exit => {
                    ctx.insert(CONVERSATION_ACTIVE, false);
                    return Ok(None);
                }
                UserInput::Empty => {
                    self.console.show("\nPlease enter a valid message.\n");
                    if self.out_of_attempts(attempts) {
                        debug!(attempts, "no valid message this turn");
                        return Ok(None);
                    }
                }
            }
        }
    }

    async fn exec(&self, input: &String) -> NodeResult<String> {
        self.processor
            .process(input)
            .await
            .map_err(|err| NodeError::Execution(err.to_string()))
    }

    fn exec_fallback(&self, _input: &String, err: NodeError) -> Option<String> {
        let reason = match err {
            NodeError::Execution(reason) => reason,
            other => other.to_string(),
        };
        self.console
            .show(&format!("\nError processing input: {reason}\n"));
        Some(format!(
            "Sorry, there was an error processing your input: {reason}"
        ))
    }

    async fn post(
        &self,
        ctx: &mut SharedContext,
        _prep: Option<String>,
        exec: Option<String>,
    ) -> NodeResult<ChatAction> {
        if !is_active(ctx) {
            return Ok(self.finish(ctx));
        }

        let Some(response) = exec.filter(|response| !response.is_empty()) else {
            return Ok(ChatAction::Continue);
        };
        ctx.insert(LAST_RESPONSE, response.as_str());
        self.console.show(&format!("\nResponse: {response}\n"));

        let mut attempts = 0;
        loop {
            attempts += 1;
            let answer = match self.console.read_line(CONTINUE_PROMPT).await {
                Ok(answer) => answer,
                Err(err) => {
                    warn!(error = %err, "failed to read confirmation");
                    self.console
                        .show(&format!("\nError in post-processing: {err}\n"));
                    return Ok(self.finish(ctx));
                }
            };
            match answer.map(|answer| answer.trim().to_lowercase()).as_deref() {
                Some("y") => return Ok(ChatAction::Continue),
                Some("n") | None => return Ok(self.finish(ctx)),
                Some(_) => {
                    self.console.show("\nPlease enter 'y' or 'n'.\n");
                    if self.out_of_attempts(attempts) {
                        return Ok(self.finish(ctx));
                    }
                }
            }
        }
    }
}

impl Debug for ChatNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatNode")
            .field("console", &self.console)
            .field("config", &self.config)
            // Skip the processor since it can't implement Debug
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_input() {
        assert_eq!(
            UserInput::classify(Some("  hello \n".into())),
            UserInput::Message("hello".into())
        );
        assert_eq!(UserInput::classify(Some("EXIT\n".into())), UserInput::Exit);
        assert_eq!(UserInput::classify(Some("   \n".into())), UserInput::Empty);
        assert_eq!(UserInput::classify(None), UserInput::Exit);
    }

    #[test]
    fn test_chat_action_labels() {
        assert_eq!(ChatAction::Continue.label().as_str(), "continue");
        assert_eq!(ChatAction::End.label().as_str(), "end");
        assert_eq!(ChatAction::terminal(), ChatAction::End);
    }

    #[test]
    fn test_config_from_json() {
        let config: ChatConfig = serde_json::from_str(r#"{ "max_input_attempts": 2 }"#).unwrap();
        assert_eq!(config.max_input_attempts, Some(2));
        assert_eq!(config.farewell, ChatConfig::default().farewell);
    }
}
