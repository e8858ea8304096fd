//! Emission order over composite types.
//!
//! Kahn's algorithm with a deterministic cycle fallback: once the ready queue
//! drains, every type not yet emitted is appended in discovery order. Members
//! of a cycle may therefore reference types emitted after them.

use petgraph::Direction;
use std::collections::VecDeque;
use tracing::debug;

use super::dependency::DependencyGraph;

/// Order every composite type so dependencies come first where possible.
///
/// Each node appears exactly once. Self-loops do not count towards in-degree:
/// a type referencing itself constrains nothing about its position.
pub fn topological_order(deps: &DependencyGraph) -> Vec<String> {
    let count = deps.node_count();
    let mut in_degree = vec![0usize; count];
    for idx in deps.node_indices() {
        for dependent in deps.sorted_neighbors(idx, Direction::Outgoing) {
            if dependent != idx {
                in_degree[dependent.index()] += 1;
            }
        }
    }

    let mut queue: VecDeque<_> = deps
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();
    let mut emitted = vec![false; count];
    let mut order = Vec::with_capacity(count);

    while let Some(idx) = queue.pop_front() {
        emitted[idx.index()] = true;
        order.push(deps.name_of(idx).to_string());

        for dependent in deps.sorted_neighbors(idx, Direction::Outgoing) {
            if dependent == idx {
                continue;
            }
            let degree = &mut in_degree[dependent.index()];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() < count {
        let remaining: Vec<_> = deps
            .node_indices()
            .filter(|idx| !emitted[idx.index()])
            .collect();
        debug!(cyclic = remaining.len(), "dependency cycle, appending remaining types");
        order.extend(remaining.into_iter().map(|idx| deps.name_of(idx).to_string()));
    }

    order
}
