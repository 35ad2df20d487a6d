/// Marker types for flow construction states
#[derive(Debug)]
pub struct NotBuilt;

#[derive(Debug)]
pub struct Built;
