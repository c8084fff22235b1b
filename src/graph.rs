//! Intra-file call/nesting graph builder
//!
//! Scans each function body for call expressions, drops built-ins and
//! self-calls (recursion is the structural analyzer's business), and keeps
//! only callees defined in the same file. Lexical nesting is merged in as
//! extra edges: a function containing another is treated as calling it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::segment::FunctionUnit;

/// Map from function name to the intra-file functions it calls or contains.
/// Callee lists are insertion-ordered and deduplicated.
pub type CallGraph = HashMap<String, Vec<String>>;

/// A call expression: identifier followed by `(`, not in attribute position
static CALL_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^.\w])([A-Za-z_]\w*)\s*\(").unwrap());

/// Python built-ins and common container methods that never become edges
static BUILTINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "print", "len", "range", "sum", "sorted", "list", "tuple", "set", "dict", "str", "int",
        "float", "bool", "enumerate", "zip", "map", "filter", "min", "max", "abs", "reversed",
        "isinstance", "type", "open", "input", "round", "append", "extend", "insert", "add",
        "remove", "pop", "sort", "reverse", "join", "split", "count", "index", "get", "keys",
        "values", "items",
    ]
    .into_iter()
    .collect()
});

/// Build the call/nesting graph over all segmented units.
///
/// When two units share a name, the later definition's entry wins, matching
/// the propagation engine's last-wins name resolution.
pub fn build_call_graph(units: &[FunctionUnit]) -> CallGraph {
    let known: HashSet<&str> = units.iter().map(|u| u.name.as_str()).collect();
    let mut graph = CallGraph::new();

    for (idx, unit) in units.iter().enumerate() {
        let mut callees: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for line in unit.code_lines() {
            for caps in CALL_EXPR.captures_iter(line) {
                let callee = &caps[1];
                if callee == unit.name || BUILTINS.contains(callee) || !known.contains(callee) {
                    continue;
                }
                if seen.insert(callee.to_string()) {
                    callees.push(callee.to_string());
                }
            }
        }

        // Lexically nested definitions count as callees of their parent.
        for child in units.iter().skip(idx + 1) {
            if child.parent == Some(idx)
                && child.name != unit.name
                && seen.insert(child.name.clone())
            {
                callees.push(child.name.clone());
            }
        }

        graph.insert(unit.name.clone(), callees);
    }

    graph
}
