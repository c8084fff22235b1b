//! Space-complexity analyzer
//!
//! Single pass over a function body tracking which variables were created
//! as empty collections and whether the current line sits inside a loop
//! (via the same indentation-stack heuristic the loop counter uses).
//! Allocations raise the running maximum class; growth of a previously
//! empty collection inside a loop and recursion-stack usage both raise it
//! to linear. In-place mutation only boosts confidence.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::detectors::structure::{is_loop_line, recursion_info};
use crate::notation::{clamp_confidence, ComplexityClass, SpaceComplexityResult};

static EMPTY_COLLECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(\w+)\s*=\s*(\[\]|\{\}|list\(\)|dict\(\)|set\(\)|"{2}|'{2})\s*(?:#.*)?$"#)
        .unwrap()
});
static MATRIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"=\s*\[\s*\[|\[.+\bfor\b.+\bin\b.+\bfor\b.+\bin\b").unwrap()
});
static LIST_ALLOC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"=\s*(?:\[[^\]]|list\s*\(\s*\w)").unwrap());
static DICT_ALLOC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"=\s*(?:\{[^}]|dict\s*\(\s*\w)").unwrap());
static SET_ALLOC: Lazy<Regex> = Lazy::new(|| Regex::new(r"=\s*set\s*\(\s*\w").unwrap());
static STRING_BUILD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\+=\s*(?:r|f|b|u)?['"]|['"]\s*\.\s*join\s*\("#).unwrap()
});
static GROW_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s*\.\s*(?:append|extend|insert|add)\s*\(").unwrap());
static INPLACE_OP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s*(?:sort|reverse|pop)\s*\(").unwrap());

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Classify the auxiliary space a function body allocates.
pub fn analyze_space(name: &str, lines: &[&str]) -> SpaceComplexityResult {
    let mut class = ComplexityClass::Constant;
    let mut labels: Vec<&'static str> = Vec::new();
    let mut empty_collections: HashSet<String> = HashSet::new();
    let mut loop_stack: Vec<usize> = Vec::new();
    let mut inplace_seen = false;

    for line in lines {
        let indent = indent_width(line);
        while let Some(&top) = loop_stack.last() {
            if top >= indent {
                loop_stack.pop();
            } else {
                break;
            }
        }
        let inside_loop = !loop_stack.is_empty();
        if is_loop_line(line) {
            loop_stack.push(indent);
        }

        if let Some(caps) = EMPTY_COLLECTION.captures(line) {
            empty_collections.insert(caps[1].to_string());
            continue;
        }

        if MATRIX.is_match(line) {
            class = class.max(ComplexityClass::Quadratic);
            labels.push("matrix");
            continue;
        }
        if LIST_ALLOC.is_match(line) {
            class = class.max(ComplexityClass::Linear);
            labels.push("list");
        }
        if DICT_ALLOC.is_match(line) {
            class = class.max(ComplexityClass::Linear);
            labels.push("dictionary");
        }
        if SET_ALLOC.is_match(line) {
            class = class.max(ComplexityClass::Linear);
            labels.push("set");
        }
        if STRING_BUILD.is_match(line) {
            class = class.max(ComplexityClass::Linear);
            labels.push("string building");
        }

        if let Some(caps) = GROW_CALL.captures(line) {
            if inside_loop && empty_collections.contains(&caps[1]) {
                class = class.max(ComplexityClass::Linear);
                labels.push("dynamic list growth");
            }
        }

        if INPLACE_OP.is_match(line) {
            inplace_seen = true;
        }
    }

    if recursion_info(name, lines).is_recursive() {
        class = class.max(ComplexityClass::Linear);
        labels.push("recursion stack");
    }

    let mut confidence: i32 = 70;
    if !labels.is_empty() {
        confidence += 10;
    }
    if inplace_seen {
        confidence += 5;
    }

    let mut result = SpaceComplexityResult::new(class, clamp_confidence(confidence) as i32);
    result.data_structures = labels.into_iter().map(String::from).collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_allocations_is_constant() {
        let lines = vec!["total = 0", "total += n", "return total"];
        let result = analyze_space("f", &lines);
        assert_eq!(result.class, ComplexityClass::Constant);
        assert!(result.data_structures.is_empty());
    }

    #[test]
    fn test_dynamic_growth_in_loop() {
        let lines = vec![
            "out = []",
            "for x in arr:",
            "    out.append(x * 2)",
            "return out",
        ];
        let result = analyze_space("f", &lines);
        assert_eq!(result.class, ComplexityClass::Linear);
        assert!(result.data_structures.contains("dynamic list growth"));
    }

    #[test]
    fn test_append_outside_loop_is_not_growth() {
        let lines = vec!["out = []", "out.append(1)", "return out"];
        let result = analyze_space("f", &lines);
        assert_eq!(result.class, ComplexityClass::Constant);
    }

    #[test]
    fn test_matrix_allocation_is_quadratic() {
        let lines = vec!["grid = [[0] * n for _ in range(n)]", "return grid"];
        let result = analyze_space("f", &lines);
        assert_eq!(result.class, ComplexityClass::Quadratic);
        assert!(result.data_structures.contains("matrix"));
    }

    #[test]
    fn test_recursion_stack() {
        let lines = vec!["if n == 0:", "    return 1", "return f(n - 1) * n"];
        let result = analyze_space("f", &lines);
        assert_eq!(result.class, ComplexityClass::Linear);
        assert!(result.data_structures.contains("recursion stack"));
    }

    #[test]
    fn test_dict_literal_allocation() {
        let lines = vec!["index = {k: v for k, v in pairs}", "return index"];
        let result = analyze_space("f", &lines);
        assert_eq!(result.class, ComplexityClass::Linear);
        assert!(result.data_structures.contains("dictionary"));
    }

    #[test]
    fn test_labels_deduplicated() {
        let lines = vec![
            "a = [1, 2]",
            "b = [3, 4]",
            "c = [5, 6]",
        ];
        let result = analyze_space("f", &lines);
        assert_eq!(result.data_structures.len(), 1);
        assert!(result.data_structures.contains("list"));
    }

    #[test]
    fn test_inplace_mutation_boosts_confidence() {
        let with = analyze_space("f", &vec!["items.sort()", "return items"]);
        let without = analyze_space("f", &vec!["return items"]);
        assert_eq!(with.class, without.class);
        assert!(with.confidence > without.confidence);
    }
}
