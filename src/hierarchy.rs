//! Hierarchy propagation engine
//!
//! Depth-first, cycle-safe traversal of the call graph that rewrites each
//! function's complexity to the worst of its own and its resolved callees'.
//! A visiting set breaks cycles at the second visit, so mutually recursive
//! functions resolve to whatever value they hold when the cycle closes
//! instead of looping forever. Time and space are propagated independently
//! under the same worst-of rule.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::analysis::MethodAnalysis;
use crate::graph::CallGraph;
use crate::notation::ComplexityClass;

const CALL_NOTE: &str = "includes function calls";

/// Rewrite draft analyses in place using the call graph.
///
/// Functions are processed in their source order, which keeps re-analysis
/// of identical input deterministic. When several functions share a name,
/// the last definition is the one the name resolves to.
pub fn propagate(methods: &mut [MethodAnalysis], graph: &CallGraph) {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, method) in methods.iter().enumerate() {
        index.insert(method.name.clone(), i);
    }

    let names: Vec<String> = methods.iter().map(|m| m.name.clone()).collect();
    let mut visiting: HashSet<String> = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();

    for name in &names {
        visit(name, methods, graph, &index, &mut visiting, &mut visited);
    }
}

fn visit(
    name: &str,
    methods: &mut [MethodAnalysis],
    graph: &CallGraph,
    index: &HashMap<String, usize>,
    visiting: &mut HashSet<String>,
    visited: &mut HashSet<String>,
) -> (ComplexityClass, ComplexityClass) {
    let Some(&idx) = index.get(name) else {
        // Unresolvable callee, already filtered by the graph builder.
        return (ComplexityClass::Constant, ComplexityClass::Constant);
    };

    // Cycle break: an in-progress node answers with its current value.
    if visited.contains(name) || visiting.contains(name) {
        let method = &methods[idx];
        return (method.complexity.class, method.space_complexity.class);
    }
    visiting.insert(name.to_string());

    let callees: Vec<String> = graph.get(name).cloned().unwrap_or_default();
    let mut worst_time = methods[idx].complexity.class;
    let mut worst_space = methods[idx].space_complexity.class;

    for callee in &callees {
        if !index.contains_key(callee.as_str()) {
            continue;
        }
        let (time, space) = visit(callee, methods, graph, index, visiting, visited);
        worst_time = worst_time.max(time);
        worst_space = worst_space.max(space);
    }

    let method = &mut methods[idx];
    let mut rewritten = false;
    if worst_time > method.complexity.class {
        debug!(
            function = %name,
            from = %method.complexity.class,
            to = %worst_time,
            "time complexity raised from callees"
        );
        method.complexity.raise_to(worst_time);
        rewritten = true;
    }
    if worst_space > method.space_complexity.class {
        method.space_complexity.raise_to(worst_space);
        rewritten = true;
    }
    if rewritten && !method.explanation.contains(CALL_NOTE) {
        if !method.explanation.is_empty() {
            method.explanation.push_str("; ");
        }
        method.explanation.push_str(CALL_NOTE);
    }

    visiting.remove(name);
    visited.insert(name.to_string());
    (methods[idx].complexity.class, methods[idx].space_complexity.class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{ComplexityResult, SpaceComplexityResult};

    fn method(name: &str, time: ComplexityClass, confidence: i32) -> MethodAnalysis {
        MethodAnalysis {
            name: name.to_string(),
            line_start: 1,
            line_end: 1,
            complexity: ComplexityResult::new(time, confidence),
            space_complexity: SpaceComplexityResult::new(ComplexityClass::Constant, 70),
            explanation: String::new(),
        }
    }

    fn graph_of(edges: &[(&str, &[&str])]) -> CallGraph {
        edges
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_caller_inherits_worse_callee() {
        let mut methods = vec![
            method("caller", ComplexityClass::Constant, 90),
            method("callee", ComplexityClass::Quadratic, 80),
        ];
        let graph = graph_of(&[("caller", &["callee"]), ("callee", &[])]);
        propagate(&mut methods, &graph);

        assert_eq!(methods[0].complexity.class, ComplexityClass::Quadratic);
        assert_eq!(methods[0].complexity.confidence, 80);
        assert!(methods[0].explanation.contains("includes function calls"));
        // The callee itself is untouched.
        assert_eq!(methods[1].complexity.class, ComplexityClass::Quadratic);
        assert_eq!(methods[1].complexity.confidence, 80);
        assert!(methods[1].explanation.is_empty());
    }

    #[test]
    fn test_better_callee_does_not_lower_caller() {
        let mut methods = vec![
            method("caller", ComplexityClass::Cubic, 80),
            method("callee", ComplexityClass::Linear, 80),
        ];
        let graph = graph_of(&[("caller", &["callee"]), ("callee", &[])]);
        propagate(&mut methods, &graph);
        assert_eq!(methods[0].complexity.class, ComplexityClass::Cubic);
        assert_eq!(methods[0].complexity.confidence, 80);
    }

    #[test]
    fn test_transitive_propagation() {
        let mut methods = vec![
            method("a", ComplexityClass::Constant, 90),
            method("b", ComplexityClass::Constant, 90),
            method("c", ComplexityClass::Exponential, 85),
        ];
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        propagate(&mut methods, &graph);
        assert_eq!(methods[0].complexity.class, ComplexityClass::Exponential);
        assert_eq!(methods[1].complexity.class, ComplexityClass::Exponential);
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        let mut methods = vec![
            method("ping", ComplexityClass::Linear, 80),
            method("pong", ComplexityClass::Quadratic, 80),
        ];
        let graph = graph_of(&[("ping", &["pong"]), ("pong", &["ping"])]);
        propagate(&mut methods, &graph);

        // Every cycle member still has a result and the worse class spread.
        assert_eq!(methods[0].complexity.class, ComplexityClass::Quadratic);
        assert_eq!(methods[1].complexity.class, ComplexityClass::Quadratic);
    }

    #[test]
    fn test_unknown_callee_ignored() {
        let mut methods = vec![method("f", ComplexityClass::Linear, 80)];
        let graph = graph_of(&[("f", &["ghost"])]);
        propagate(&mut methods, &graph);
        assert_eq!(methods[0].complexity.class, ComplexityClass::Linear);
    }

    #[test]
    fn test_space_propagates_independently() {
        let mut methods = vec![
            method("caller", ComplexityClass::Cubic, 80),
            method("callee", ComplexityClass::Constant, 80),
        ];
        methods[1].space_complexity = SpaceComplexityResult::new(ComplexityClass::Quadratic, 80);
        let graph = graph_of(&[("caller", &["callee"]), ("callee", &[])]);
        propagate(&mut methods, &graph);

        // Time untouched (callee is better), space raised.
        assert_eq!(methods[0].complexity.class, ComplexityClass::Cubic);
        assert_eq!(methods[0].space_complexity.class, ComplexityClass::Quadratic);
    }

    #[test]
    fn test_confidence_never_increases() {
        let mut methods = vec![
            method("caller", ComplexityClass::Constant, 95),
            method("callee", ComplexityClass::Factorial, 85),
        ];
        let graph = graph_of(&[("caller", &["callee"]), ("callee", &[])]);
        let before = methods[0].complexity.confidence;
        propagate(&mut methods, &graph);
        assert!(methods[0].complexity.confidence <= before);
        assert!(methods[0].complexity.confidence >= 70);
    }
}
