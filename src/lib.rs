//! nodeflow is a minimal node-based workflow executor.
//!
//! The executor lives in `nodeflow-core` and is re-exported here together with
//! the `Action` derive. The [`chat`] module builds a console conversation on
//! top of it.

pub mod chat;

pub use nodeflow_core::*;
pub use nodeflow_macros::Action;
