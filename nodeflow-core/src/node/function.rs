use crate::node::{Node, SharedContext};
use crate::types::{Action, NodeResult};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result};

/// A node whose outcome is decided by a function over the shared context
///
/// Prepare always succeeds and execute is a no-op, so the function runs as the
/// finalize phase on every visit.
pub struct FunctionNode<A, F> {
    name: String,
    f: F,
    _phantom: std::marker::PhantomData<fn() -> A>,
}

impl<A, F> FunctionNode<A, F>
where
    A: Action,
    F: Fn(&mut SharedContext) -> NodeResult<A> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<A, F> Node for FunctionNode<A, F>
where
    A: Action,
    F: Fn(&mut SharedContext) -> NodeResult<A> + Send + Sync,
{
    type Prep = ();
    type Exec = ();
    type Action = A;

    fn name(&self) -> &str {
        &self.name
    }

    async fn prep(&self, _ctx: &mut SharedContext) -> NodeResult<Option<()>> {
        Ok(Some(()))
    }

    async fn exec(&self, _input: &()) -> NodeResult<()> {
        Ok(())
    }

    async fn post(
        &self,
        ctx: &mut SharedContext,
        _prep: Option<()>,
        _exec: Option<()>,
    ) -> NodeResult<A> {
        (self.f)(ctx)
    }
}

// Instead of #[derive(Debug)]
impl<A, F> Debug for FunctionNode<A, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("FunctionNode")
            .field("name", &self.name)
            // Skip the function field since it can't implement Debug
            .finish()
    }
}

/// A node that does nothing and takes the default edge
#[derive(Debug, Clone)]
pub struct NoopNode {
    name: String,
}

impl NoopNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Node for NoopNode {
    type Prep = ();
    type Exec = ();
    type Action = ();

    fn name(&self) -> &str {
        &self.name
    }

    async fn prep(&self, _ctx: &mut SharedContext) -> NodeResult<Option<()>> {
        Ok(None)
    }

    async fn exec(&self, _input: &()) -> NodeResult<()> {
        Ok(())
    }

    async fn post(&self, _ctx: &mut SharedContext, _prep: Option<()>, _exec: Option<()>) -> NodeResult<()> {
        Ok(())
    }
}
