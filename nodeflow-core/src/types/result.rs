use crate::types::{GraphError, NodeError};
use std::result::Result;

pub type NodeResult<T> = Result<T, NodeError>;

pub type GraphResult<T> = Result<T, GraphError>;
