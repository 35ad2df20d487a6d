use async_trait::async_trait;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info_span, Instrument};

use super::edges::Successors;
use super::*;
use crate::node::*;
use crate::types::*;

static NEXT_FLOW_ID: AtomicU64 = AtomicU64::new(0);

/// Type-erased node as stored in a flow's arena
#[async_trait]
trait Step: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Run one full visit and report the label of its outcome.
    async fn step(&self, ctx: &mut SharedContext, config: &NodeConfig) -> Label;
}

#[derive(Debug)]
struct NodeStep<N>(N);

#[async_trait]
impl<N> Step for NodeStep<N>
where
    N: Node,
{
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn step(&self, ctx: &mut SharedContext, config: &NodeConfig) -> Label {
        run_lifecycle(&self.0, ctx, config).await.label()
    }
}

#[derive(Debug)]
struct Slot {
    step: Box<dyn Step>,
    successors: Successors,
    config: NodeConfig,
}

/// Summary of one walk through a flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Number of node visits
    pub steps: usize,
    /// The node whose outcome had no successor
    pub last_node: Option<String>,
    /// The label that ended the walk
    pub last_label: Option<Label>,
}

impl FlowOutcome {
    /// The final label, or the default label when nothing ran.
    pub fn label(&self) -> Label {
        self.last_label.clone().unwrap_or_default()
    }
}

/// A graph of nodes connected by outcome labels
///
/// Nodes live in an arena and are addressed by [`NodeId`] handles. Running the
/// flow visits the start node, looks up the label it returned among that node's
/// successors and continues there, until a label has no successor.
#[derive(Debug)]
pub struct Flow<BuildState = NotBuilt> {
    flow_name: String,
    flow_id: u64,
    slots: Vec<Slot>,
    start: Option<usize>,
    errors: Vec<GraphError>,
    _build_state: PhantomData<BuildState>,
}

impl Flow<NotBuilt> {
    /// Create a new flow
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            flow_name: name.into(),
            flow_id: NEXT_FLOW_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            start: None,
            errors: Vec::new(),
            _build_state: PhantomData,
        }
    }

    /// Add a node to the flow
    pub fn add_node<N>(&mut self, node: N) -> NodeId<N::Action>
    where
        N: Node + 'static,
    {
        self.push(Box::new(NodeStep(node)))
    }

    /// Embed a built flow as a single node. Its outcome is the label that
    /// ended its own walk.
    pub fn add_flow(&mut self, flow: Flow<Built>) -> NodeId<Label> {
        self.push(Box::new(flow))
    }

    /// Route `action` returned by `from` to `to`. Registering the same action
    /// again replaces the earlier target.
    pub fn add_edge<A, B>(&mut self, from: NodeId<A>, action: A, to: NodeId<B>) -> &mut Self
    where
        A: Action,
    {
        self.connect(from.flow, from.index, action.label(), to.flow, to.index)
    }

    /// Route the default label returned by `from` to `to`.
    pub fn add_default_edge<A, B>(&mut self, from: NodeId<A>, to: NodeId<B>) -> &mut Self {
        self.connect(from.flow, from.index, Label::DEFAULT, to.flow, to.index)
    }

    /// Route a raw label, for nodes whose outcomes are built at runtime.
    pub fn add_label_edge<A, B>(
        &mut self,
        from: NodeId<A>,
        label: impl Into<Label>,
        to: NodeId<B>,
    ) -> &mut Self {
        self.connect(from.flow, from.index, label.into(), to.flow, to.index)
    }

    /// Set the node the flow starts from
    pub fn set_start<A>(&mut self, start: NodeId<A>) -> &mut Self {
        if self.owns(start.flow, start.index) {
            self.start = Some(start.index);
        } else {
            self.reject("start", start.index);
        }
        self
    }

    /// Configure the execute phase of a node
    pub fn configure_node<A>(&mut self, id: NodeId<A>, config: NodeConfig) -> &mut Self {
        if self.owns(id.flow, id.index) {
            self.slots[id.index].config = config;
        } else {
            self.reject("configured", id.index);
        }
        self
    }

    /// Build the flow, making it ready for execution.
    ///
    /// Topology is not validated: cycles, unreachable nodes, labels without a
    /// successor and a missing start node are all allowed. Only handles that
    /// belong to another flow are rejected.
    pub fn build(self) -> GraphResult<Flow<Built>> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        Ok(Flow {
            flow_name: self.flow_name,
            flow_id: self.flow_id,
            slots: self.slots,
            start: self.start,
            errors: Vec::new(),
            _build_state: PhantomData,
        })
    }

    fn push<A>(&mut self, step: Box<dyn Step>) -> NodeId<A> {
        let index = self.slots.len();
        self.slots.push(Slot {
            step,
            successors: Successors::default(),
            config: NodeConfig::default(),
        });
        NodeId::new(self.flow_id, index)
    }

    fn connect(
        &mut self,
        from_flow: u64,
        from: usize,
        label: Label,
        to_flow: u64,
        to: usize,
    ) -> &mut Self {
        if !self.owns(from_flow, from) {
            self.reject("edge source", from);
            return self;
        }
        if !self.owns(to_flow, to) {
            self.reject("edge target", to);
            return self;
        }

        let slot = &mut self.slots[from];
        if let Some(replaced) = slot.successors.insert(label.clone(), to) {
            debug!(node = slot.step.name(), %label, replaced, "successor replaced");
        }
        self
    }

    fn owns(&self, flow: u64, index: usize) -> bool {
        flow == self.flow_id && index < self.slots.len()
    }

    fn reject(&mut self, role: &str, index: usize) {
        self.errors.push(GraphError::NodeNotFound(format!(
            "{} #{} does not belong to flow {}",
            role, index, self.flow_name
        )));
    }
}

impl Flow<Built> {
    pub fn name(&self) -> &str {
        &self.flow_name
    }

    /// Name of the start node, if one was set
    pub fn start(&self) -> Option<&str> {
        self.start
            .and_then(|index| self.slots.get(index))
            .map(|slot| slot.step.name())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every registered transition, grouped by source node in insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.slots.iter().flat_map(move |slot| {
            slot.successors.iter().filter_map(move |(label, to)| {
                self.slots.get(to).map(|target| Edge {
                    from: slot.step.name(),
                    label,
                    to: target.step.name(),
                })
            })
        })
    }

    /// Walk the flow from its start node until an outcome has no successor.
    ///
    /// Never fails: node errors are contained inside each node's lifecycle.
    pub async fn run(&self, ctx: &mut SharedContext) -> FlowOutcome {
        let span = info_span!("flow", flow = %self.flow_name, trace_id = %ctx.trace_id());
        self.walk(ctx).instrument(span).await
    }

    async fn walk(&self, ctx: &mut SharedContext) -> FlowOutcome {
        let mut outcome = FlowOutcome::default();
        let mut current = self.start;

        while let Some(index) = current {
            let Some(slot) = self.slots.get(index) else {
                break;
            };

            let label = slot.step.step(ctx, &slot.config).await;
            outcome.steps += 1;
            current = slot.successors.get(&label);

            match current.and_then(|next| self.slots.get(next)) {
                Some(next) => {
                    debug!(from = slot.step.name(), %label, to = next.step.name(), "transition")
                }
                None => {
                    debug!(node = slot.step.name(), %label, steps = outcome.steps, "no successor, flow finished")
                }
            }

            outcome.last_node = Some(slot.step.name().to_string());
            outcome.last_label = Some(label);
        }

        outcome
    }
}

#[async_trait]
impl Step for Flow<Built> {
    fn name(&self) -> &str {
        &self.flow_name
    }

    async fn step(&self, ctx: &mut SharedContext, _config: &NodeConfig) -> Label {
        self.run(ctx).await.label()
    }
}
