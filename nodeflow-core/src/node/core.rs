use crate::node::{NodeConfig, SharedContext};
use crate::types::{Action, NodeError, NodeResult};
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

/// Core trait for flow nodes
///
/// A node runs in three phases. `prep` reads the shared context and yields the
/// input for `exec`, or `None` to skip it. `exec` transforms that input without
/// touching the context. `post` writes results back and picks the outcome that
/// selects the next node.
///
/// Errors returned by any phase never leave the node: see [`run_lifecycle`].
#[async_trait]
pub trait Node: Send + Sync + Debug {
    type Prep: Send + Sync;
    type Exec: Send;
    type Action: Action;

    /// Get the name of this node
    fn name(&self) -> &str;

    /// Read the context and produce the execute input.
    async fn prep(&self, ctx: &mut SharedContext) -> NodeResult<Option<Self::Prep>>;

    /// Transform the prepared input. Only called when `prep` produced a value.
    async fn exec(&self, input: &Self::Prep) -> NodeResult<Self::Exec>;

    /// Result to use once every execute attempt has failed.
    fn exec_fallback(&self, _input: &Self::Prep, _err: NodeError) -> Option<Self::Exec> {
        None
    }

    /// Write results into the context and choose the outcome.
    async fn post(
        &self,
        ctx: &mut SharedContext,
        prep: Option<Self::Prep>,
        exec: Option<Self::Exec>,
    ) -> NodeResult<Self::Action>;

    /// Run all three phases with the default [`NodeConfig`].
    async fn run(&self, ctx: &mut SharedContext) -> Self::Action {
        run_lifecycle(self, ctx, &NodeConfig::default()).await
    }
}

/// Lifecycle phase of a single node invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preparing,
    Executing,
    Finalizing,
    Done,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            Phase::Preparing => "preparing",
            Phase::Executing => "executing",
            Phase::Finalizing => "finalizing",
            Phase::Done => "done",
        };
        f.write_str(phase)
    }
}

/// Drive one invocation of `node` through prepare, execute and finalize.
///
/// Every phase is isolated. A failed or panicking `prep` counts as "no input",
/// a failed `exec` goes through `exec_fallback`, and a failed `post` yields
/// [`Action::terminal`].
pub async fn run_lifecycle<N>(node: &N, ctx: &mut SharedContext, config: &NodeConfig) -> N::Action
where
    N: Node + ?Sized,
{
    let mut phase = Phase::Preparing;
    let prep = match guarded(node.prep(ctx)).await {
        Ok(prep) => prep,
        Err(err) => {
            warn!(node = node.name(), %phase, error = %err, "phase failed, continuing without input");
            None
        }
    };

    phase = Phase::Executing;
    let exec = match &prep {
        Some(input) => execute(node, input, config).await,
        None => {
            debug!(node = node.name(), %phase, "no input prepared, skipping");
            None
        }
    };

    phase = Phase::Finalizing;
    let action = match guarded(node.post(ctx, prep, exec)).await {
        Ok(action) => action,
        Err(err) => {
            let action = N::Action::terminal();
            warn!(node = node.name(), %phase, error = %err, ?action, "phase failed, taking terminal outcome");
            action
        }
    };

    phase = Phase::Done;
    debug!(node = node.name(), %phase, label = %action.label());
    action
}

async fn execute<N>(node: &N, input: &N::Prep, config: &NodeConfig) -> Option<N::Exec>
where
    N: Node + ?Sized,
{
    let max_attempts = config.attempts();
    let mut attempts = 0;
    loop {
        attempts += 1;
        let result = match config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, guarded(node.exec(input))).await {
                Ok(result) => result,
                Err(_) => Err(NodeError::Timeout(format!(
                    "{} did not finish within {}ms",
                    node.name(),
                    limit.as_millis()
                ))),
            },
            None => guarded(node.exec(input)).await,
        };

        match result {
            Ok(exec) => break Some(exec),
            Err(err) if attempts < max_attempts => {
                debug!(node = node.name(), attempts, error = %err, "execute failed, retrying");
                let wait = config.wait();
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
            }
            Err(err) => {
                warn!(node = node.name(), attempts, error = %err, "execute failed, using fallback");
                break node.exec_fallback(input, err);
            }
        }
    }
}

/// Await a phase, turning a panic into [`NodeError::Panic`].
async fn guarded<T, F>(phase: F) -> NodeResult<T>
where
    F: Future<Output = NodeResult<T>>,
{
    match AssertUnwindSafe(phase).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(NodeError::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
