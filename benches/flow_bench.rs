use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nodeflow::prelude::*;
use nodeflow::Action;

#[derive(Action, Debug, Clone, Copy, PartialEq)]
enum Tick {
    Next,
    #[action(terminal)]
    Stop,
}

fn looping_flow(limit: u64) -> Flow<Built> {
    let mut flow = Flow::new("bench");
    let tick = flow.add_node(FunctionNode::new("tick", move |ctx: &mut SharedContext| {
        let count = ctx.get_as::<u64>("count")?.unwrap_or(0) + 1;
        ctx.insert("count", count);
        Ok(if count < limit { Tick::Next } else { Tick::Stop })
    }));
    flow.add_edge(tick, Tick::Next, tick).set_start(tick);
    flow.build().expect("bench flow builds")
}

fn flow_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let flow = looping_flow(1_000);

    c.bench_function("self_loop_1000_steps", |b| {
        b.iter(|| {
            let mut ctx = SharedContext::new();
            black_box(runtime.block_on(flow.run(&mut ctx)))
        })
    });
}

criterion_group!(benches, flow_benchmark);
criterion_main!(benches);
