mod core;
mod edges;
mod marker;
mod tests;

pub use self::core::{Flow, FlowOutcome};
pub use edges::{Edge, NodeId};
pub use marker::{Built, NotBuilt};
