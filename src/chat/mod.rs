//! Console chat built on a single looping node.
//!
//! ```text
//! chat --continue--> chat
//! chat --end-------> end
//! ```

mod console;
mod node;
mod processor;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use node::{ChatAction, ChatConfig, ChatNode, CONVERSATION_ACTIVE, LAST_RESPONSE};
pub use processor::{EchoProcessor, ProcessError, TextProcessor};

use crate::{Built, Flow, GraphResult, NoopNode};
use std::sync::Arc;

/// Wire a chat node that loops on `continue` and stops at an end node on `end`.
pub fn build_chat_flow(
    console: Arc<dyn Console>,
    processor: Arc<dyn TextProcessor>,
    config: ChatConfig,
) -> GraphResult<Flow<Built>> {
    let mut flow = Flow::new("chat");
    let chat = flow.add_node(ChatNode::new(console, processor, config));
    let end = flow.add_node(NoopNode::new("end"));
    flow.add_edge(chat, ChatAction::Continue, chat)
        .add_edge(chat, ChatAction::End, end)
        .set_start(chat);
    flow.build()
}
