//! nodeflow is a minimal node-based workflow executor.
//!
//! A [`Flow`] is a graph of [`Node`]s. Every visit runs the node's prepare,
//! execute and finalize phases against one [`SharedContext`]; the outcome of
//! the finalize phase picks the next node, and the walk ends when that outcome
//! has no registered successor.

#![allow(unused_extern_crates)]
extern crate self as nodeflow_core;

pub mod graph;
pub mod node;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types
    pub use crate::graph::{Built, Edge, Flow, FlowOutcome, NodeId, NotBuilt};
    pub use crate::node::{
        run_lifecycle, FunctionNode, Node, NodeConfig, NodeConfigBuilder, NoopNode, Phase,
        SharedContext,
    };
    pub use crate::types::{Action, GraphError, GraphResult, Label, NodeError, NodeResult};
}

// Re-export main types
pub use prelude::*;
