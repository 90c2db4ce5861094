#![allow(dead_code)]

#[allow(unused_imports)]
pub use navgraph_test_utils::builders;
#[allow(unused_imports)]
pub use navgraph_test_utils::init_tracing;

use navgraph::graph::NodeId;
use navgraph::transition::{Optimization, Transition, TransitionKind, describe};

/// `(from_id, to_id)` of every transition, in order.
pub fn hops(steps: &[Transition]) -> Vec<(String, String)> {
    steps
        .iter()
        .map(|t| (t.from_id.clone(), t.to_id.clone()))
        .collect()
}

pub fn hop(from: &str, to: &str) -> (String, String) {
    (from.to_string(), to.to_string())
}

/// Hand-made transition without actions, for cleanup and analysis tests.
pub fn step(from: &str, to: &str, kind: TransitionKind) -> Transition {
    Transition {
        step: 0,
        from_id: NodeId::from(from),
        to_id: NodeId::from(to),
        from_label: from.to_string(),
        to_label: to.to_string(),
        description: describe(from, to),
        actions: Vec::new(),
        retry_actions: Vec::new(),
        final_wait_time_ms: 0,
        kind,
        optimization: None,
    }
}

pub fn val(from: &str, to: &str) -> Transition {
    step(from, to, TransitionKind::EdgeValidation)
}

pub fn nav(from: &str, to: &str) -> Transition {
    step(from, to, TransitionKind::Navigation)
}

pub fn paired(from: &str, to: &str) -> Transition {
    let mut t = val(from, to);
    t.optimization = Some(Optimization::BidirectionalImmediate);
    t
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
