//! Reachability classification.
//!
//! A class is *linked* when some directed path leads from it to a reactive
//! API class, and *isolated* otherwise. Only path existence matters, so one
//! backwards breadth-first walk from all reactive classes at once answers the
//! question for every vertex.

use crate::context::{InspectionContext, Reach};
use crate::graph::DependencyGraph;
use log::debug;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Tag every non-reactive vertex as isolated or linked
pub fn classify_reachability(
    graph: &DependencyGraph,
    context: &InspectionContext,
) -> BTreeMap<String, Reach> {
    let mut reaches_reactive: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = context
        .reactive_classes()
        .filter(|name| graph.contains(name))
        .collect();
    let mut seen: HashSet<&str> = queue.iter().copied().collect();

    while let Some(current) = queue.pop_front() {
        for referrer in graph.referrers(current) {
            reaches_reactive.insert(referrer);
            if seen.insert(referrer) {
                queue.push_back(referrer);
            }
        }
    }

    let mut reach = BTreeMap::new();
    for vertex in graph.vertices() {
        if context.is_reactive(vertex) {
            continue;
        }
        let tag = if reaches_reactive.contains(vertex) {
            Reach::Linked
        } else {
            Reach::Isolated
        };
        reach.insert(vertex.to_string(), tag);
    }

    let linked = reach.values().filter(|r| **r == Reach::Linked).count();
    debug!(
        "Reachability: {} linked, {} isolated",
        linked,
        reach.len() - linked
    );
    reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BaseKind;
    use crate::graph::EdgeLabel;

    fn context_with_reactive(reactive: &[&str], others: &[&str]) -> InspectionContext {
        let mut context = InspectionContext::new();
        for name in reactive {
            context.record_visit(name, BaseKind::Other);
            context.mark_reactive(name);
        }
        for name in others {
            context.record_visit(name, BaseKind::Other);
        }
        context
    }

    #[test]
    fn test_isolated_without_path() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.Svc", "a.Options", EdgeLabel::Param("run".to_string()));
        graph.add_vertex("a.Loner");
        let context = context_with_reactive(&["a.Svc"], &["a.Options", "a.Loner"]);

        let reach = classify_reachability(&graph, &context);

        // Svc -> Options does not give Options a path *to* Svc.
        assert_eq!(reach.get("a.Options"), Some(&Reach::Isolated));
        assert_eq!(reach.get("a.Loner"), Some(&Reach::Isolated));
        assert!(!reach.contains_key("a.Svc"));
    }

    #[test]
    fn test_transitive_path_is_linked() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.Settings", "a.Pool", EdgeLabel::Field);
        graph.add_edge("a.Pool", "a.Svc", EdgeLabel::Return("svc".to_string()));
        let context = context_with_reactive(&["a.Svc"], &["a.Settings", "a.Pool"]);

        let reach = classify_reachability(&graph, &context);

        assert_eq!(reach.get("a.Pool"), Some(&Reach::Linked));
        assert_eq!(reach.get("a.Settings"), Some(&Reach::Linked));
    }

    #[test]
    fn test_adding_edge_flips_to_linked() {
        let mut graph = DependencyGraph::new();
        graph.add_vertex("a.Svc");
        graph.add_vertex("a.Leaf");
        let context = context_with_reactive(&["a.Svc"], &["a.Leaf"]);

        let before = classify_reachability(&graph, &context);
        assert_eq!(before.get("a.Leaf"), Some(&Reach::Isolated));

        graph.add_edge("a.Leaf", "a.Svc", EdgeLabel::Field);
        let after = classify_reachability(&graph, &context);
        assert_eq!(after.get("a.Leaf"), Some(&Reach::Linked));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.A", "a.B", EdgeLabel::Field);
        graph.add_edge("a.B", "a.A", EdgeLabel::Field);
        graph.add_edge("a.B", "a.Svc", EdgeLabel::Field);
        graph.add_edge("a.Svc", "a.A", EdgeLabel::Field);
        let context = context_with_reactive(&["a.Svc"], &["a.A", "a.B"]);

        let reach = classify_reachability(&graph, &context);
        assert_eq!(reach.get("a.A"), Some(&Reach::Linked));
        assert_eq!(reach.get("a.B"), Some(&Reach::Linked));
    }
}
