mod action;
mod error;
mod result;
mod tests;

pub use action::{Action, Label};
pub use error::{GraphError, NodeError};
pub use result::{GraphResult, NodeResult};
