mod config;
mod context;
mod core;
mod function;

pub use config::{NodeConfig, NodeConfigBuilder};
pub use context::SharedContext;
pub use self::core::{run_lifecycle, Node, Phase};
pub use function::{FunctionNode, NoopNode};
