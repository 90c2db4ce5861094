// src/planner/cleanup.rs

//! Post-processing of a raw walk.
//!
//! Each pass only ever removes `navigation` transitions. The result is
//! re-walked before it is accepted; if continuity is broken the caller keeps
//! the raw sequence instead.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, error};

use crate::graph::NodeId;
use crate::transition::{Transition, renumber};

/// Unordered node pair, smallest id first.
pub type NodePair = (NodeId, NodeId);

fn unordered(a: &str, b: &str) -> NodePair {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Drop navigation hops that do not move.
pub fn drop_self_navigation(steps: Vec<Transition>) -> Vec<Transition> {
    steps
        .into_iter()
        .filter(|t| !(t.is_navigation() && t.from_id == t.to_id))
        .collect()
}

/// Cancel navigation hops that undo the navigation hop right before them.
///
/// Both hops go: keeping either one would leave the walk on the wrong node.
pub fn cancel_reversed_navigation(steps: Vec<Transition>) -> Vec<Transition> {
    let mut out: Vec<Transition> = Vec::with_capacity(steps.len());
    for t in steps {
        if t.is_navigation() {
            if let Some(prev) = out.last() {
                if prev.is_navigation() && t.reverses(prev) {
                    debug!(from = %t.from_id, to = %t.to_id, "cancel back-and-forth navigation");
                    out.pop();
                    continue;
                }
            }
        }
        out.push(t);
    }
    out
}

/// Bidirectional pairs validated anywhere in `steps`, mapped to the index of
/// the transition that completes the pair.
pub fn bidirectional_pairs(steps: &[Transition]) -> BTreeMap<NodePair, usize> {
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut pairs = BTreeMap::new();

    for (i, t) in steps.iter().enumerate().filter(|(_, t)| t.is_validation()) {
        if t.from_id != t.to_id && seen.contains(&(t.to_id.as_str(), t.from_id.as_str())) {
            pairs.entry(unordered(&t.from_id, &t.to_id)).or_insert(i);
        }
        seen.insert((t.from_id.as_str(), t.to_id.as_str()));
    }
    pairs
}

/// Drop trailing navigation hops into an endpoint of an already completed
/// bidirectional pair.
///
/// A hop is trailing when no validation follows it, so it leads nowhere the
/// plan still needs to go.
pub fn drop_redundant_pair_navigation(steps: Vec<Transition>) -> Vec<Transition> {
    let pairs = bidirectional_pairs(&steps);
    let last_validation = steps.iter().rposition(|t| t.is_validation());

    steps
        .into_iter()
        .enumerate()
        .filter(|(i, t)| {
            if !t.is_navigation() || last_validation.is_some_and(|lv| *i < lv) {
                return true;
            }
            let into_done_pair = pairs.iter().any(|((a, b), done)| {
                *done < *i && (t.to_id == *a || t.to_id == *b)
            });
            if into_done_pair {
                debug!(from = %t.from_id, to = %t.to_id, "drop navigation into validated pair");
            }
            !into_done_pair
        })
        .map(|(_, t)| t)
        .collect()
}

/// Check that every transition starts where the previous one ended.
pub fn check_continuity(start_id: &str, steps: &[Transition]) -> Result<(), String> {
    let mut position = start_id;
    for (i, t) in steps.iter().enumerate() {
        if t.from_id != position {
            return Err(format!(
                "transition {} starts at '{}' but the walk is at '{}'",
                i + 1,
                t.from_id,
                position
            ));
        }
        position = t.to_id.as_str();
    }
    Ok(())
}

/// Result of [`post_process`].
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub steps: Vec<Transition>,
    /// Set when the cleaned sequence was rejected in favour of the raw one.
    pub fallback_reason: Option<String>,
}

/// Run all cleanup passes over a raw walk and renumber the survivors.
pub fn post_process(start_id: &str, raw: &[Transition]) -> Cleaned {
    let steps = drop_self_navigation(raw.to_vec());
    let steps = cancel_reversed_navigation(steps);
    let mut steps = drop_redundant_pair_navigation(steps);

    match check_continuity(start_id, &steps) {
        Ok(()) => {
            debug!(
                raw = raw.len(),
                kept = steps.len(),
                "post-processing complete"
            );
            renumber(&mut steps);
            Cleaned {
                steps,
                fallback_reason: None,
            }
        }
        Err(detail) => {
            error!(%detail, "post-processing broke continuity; keeping raw sequence");
            let mut steps = raw.to_vec();
            renumber(&mut steps);
            Cleaned {
                steps,
                fallback_reason: Some(detail),
            }
        }
    }
}
