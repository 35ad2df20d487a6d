use nodeflow::chat::{build_chat_flow, ChatConfig, EchoProcessor, StdConsole};
use nodeflow::SharedContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nodeflow=warn,nodeflow_core=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let flow = build_chat_flow(
        Arc::new(StdConsole::new()),
        Arc::new(EchoProcessor),
        ChatConfig::default(),
    )?;

    let mut shared = SharedContext::new();
    let outcome = flow.run(&mut shared).await;
    tracing::info!(
        steps = outcome.steps,
        last_node = outcome.last_node.as_deref().unwrap_or("none"),
        "chat finished"
    );

    Ok(())
}
