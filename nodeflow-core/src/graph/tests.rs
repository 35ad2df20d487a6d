#[cfg(test)]
mod tests {
    use crate::*;
    use nodeflow_macros::Action;

    #[derive(Action, Debug, Clone, Copy, PartialEq)]
    enum Route {
        Left,
        Right,
        #[action(terminal)]
        Halt,
    }

    fn router(route: Route) -> FunctionNode<Route, impl Fn(&mut SharedContext) -> NodeResult<Route> + Send + Sync> {
        FunctionNode::new("router", move |ctx: &mut SharedContext| {
            ctx.insert("routed", true);
            Ok(route)
        })
    }

    fn marker(name: &'static str) -> FunctionNode<(), impl Fn(&mut SharedContext) -> NodeResult<()> + Send + Sync> {
        FunctionNode::new(name, move |ctx: &mut SharedContext| {
            ctx.insert("visited", name);
            Ok(())
        })
    }

    #[tokio::test]
    async fn test_action_selects_successor() {
        let built = {
            let mut flow = Flow::new("routing");
            let router = flow.add_node(router(Route::Right));
            let left = flow.add_node(marker("left"));
            let right = flow.add_node(marker("right"));
            flow.add_edge(router, Route::Left, left)
                .add_edge(router, Route::Right, right)
                .set_start(router);
            flow.build().unwrap()
        };

        let mut ctx = SharedContext::new();
        let outcome = built.run(&mut ctx).await;

        assert_eq!(outcome.steps, 2);
        assert_eq!(outcome.last_node.as_deref(), Some("right"));
        assert_eq!(outcome.label(), Label::DEFAULT);
        assert_eq!(ctx.get_as::<String>("visited").unwrap().as_deref(), Some("right"));
    }

    #[tokio::test]
    async fn test_reregistering_label_overwrites() {
        let built = {
            let mut flow = Flow::new("overwrite");
            let router = flow.add_node(router(Route::Left));
            let first = flow.add_node(marker("first"));
            let second = flow.add_node(marker("second"));
            flow.add_edge(router, Route::Left, first)
                .add_edge(router, Route::Left, second)
                .set_start(router);
            flow.build().unwrap()
        };

        let mut ctx = SharedContext::new();
        built.run(&mut ctx).await;

        assert_eq!(ctx.get_as::<String>("visited").unwrap().as_deref(), Some("second"));
        assert_eq!(built.edges().count(), 1);
    }

    #[tokio::test]
    async fn test_default_edge() {
        let built = {
            let mut flow = Flow::new("default");
            let first = flow.add_node(marker("first"));
            let second = flow.add_node(marker("second"));
            flow.add_default_edge(first, second).set_start(first);
            flow.build().unwrap()
        };

        let mut ctx = SharedContext::new();
        let outcome = built.run(&mut ctx).await;

        assert_eq!(outcome.steps, 2);
        assert_eq!(outcome.last_node.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_no_start_runs_nothing() {
        let built = {
            let mut flow = Flow::new("idle");
            flow.add_node(marker("never"));
            flow.build().unwrap()
        };

        let mut ctx = SharedContext::new();
        let outcome = built.run(&mut ctx).await;

        assert_eq!(outcome, FlowOutcome::default());
        assert!(ctx.is_empty());
        assert_eq!(built.start(), None);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut other = Flow::new("other");
        let foreign = other.add_node(marker("foreign"));

        let mut flow = Flow::new("main");
        let local = flow.add_node(marker("local"));
        flow.add_default_edge(local, foreign).set_start(local);

        match flow.build() {
            Err(GraphError::NodeNotFound(msg)) => assert!(msg.contains("edge target")),
            other => panic!("expected NodeNotFound, got {:?}", other.map(|f| f.len())),
        }
    }

    #[test]
    fn test_foreign_start_rejected() {
        let mut other = Flow::new("other");
        let foreign = other.add_node(marker("foreign"));

        let mut flow = Flow::new("main");
        flow.add_node(marker("local"));
        flow.set_start(foreign);

        assert!(matches!(flow.build(), Err(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn test_edges_listing() {
        let built = {
            let mut flow = Flow::new("listing");
            let router = flow.add_node(router(Route::Left));
            let left = flow.add_node(marker("left"));
            flow.add_edge(router, Route::Left, left)
                .add_label_edge(router, "custom", left)
                .add_edge(router, Route::Halt, router)
                .set_start(router);
            flow.build().unwrap()
        };

        let edges: Vec<_> = built
            .edges()
            .map(|edge| (edge.from, edge.label.as_str(), edge.to))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("router", "custom", "left"),
                ("router", "halt", "router"),
                ("router", "left", "left"),
            ]
        );
        assert_eq!(built.start(), Some("router"));
        assert_eq!(built.len(), 2);
        assert_eq!(built.name(), "listing");
    }

    #[test]
    fn test_node_id_copy_and_eq() {
        let mut flow = Flow::new("ids");
        let a = flow.add_node(marker("a"));
        let b = flow.add_node(marker("b"));
        let a_copy = a;
        assert_eq!(a, a_copy);
        assert_ne!(a.index(), b.index());
        assert_eq!(format!("{:?}", b), "NodeId(1)");
    }
}
