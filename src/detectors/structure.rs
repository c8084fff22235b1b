//! Structural loop and recursion analyzers
//!
//! These run on every function as counters feeding the pattern detectors,
//! and double as the classification fallback when no named pattern fires.
//! Loop nesting is measured with an indentation stack; recursion is
//! measured by counting same-line self-calls.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::notation::{clamp_confidence, ComplexityClass, ComplexityResult};

static FOR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:async\s+)?for\s+.+\s+in\s+.+:\s*(?:#.*)?$").unwrap());
static WHILE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*while\s+.+:\s*(?:#.*)?$").unwrap());

/// Inner loops over collections like these never grow with the input, so
/// the quadratic/cubic detectors skip them when counting depth.
static CONSTANT_ITERABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bin\s+(?:\[[^\]]*\]|\([^)]*\)|keywords|operators|symbols|constants|delimiters)\s*:",
    )
    .unwrap()
});

/// A guarded base case: an `if` over a comparison, typically ending
/// recursion. Only a secondary confidence signal.
static BASE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*if\s+.*(?:==|!=|<=|>=|<|>|\bis\b|\bnot\b)").unwrap());

/// True if the line introduces a `for` or `while` loop
pub fn is_loop_line(line: &str) -> bool {
    FOR_LINE.is_match(line) || WHILE_LINE.is_match(line)
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Maximum structural loop-nesting depth over the body lines.
///
/// Each loop line pushes its indentation; any line at indentation at or
/// below a stored entry pops it first. With `guard_constant_inner`, an
/// inner loop over a literal or constant-named collection does not count
/// toward depth (the quadratic false-positive guard).
pub fn loop_depth(lines: &[&str], guard_constant_inner: bool) -> usize {
    let mut stack: Vec<usize> = Vec::new();
    let mut max_depth = 0;

    for line in lines {
        let indent = indent_width(line);
        while let Some(&top) = stack.last() {
            if top >= indent {
                stack.pop();
            } else {
                break;
            }
        }
        if is_loop_line(line) {
            if guard_constant_inner && !stack.is_empty() && CONSTANT_ITERABLE.is_match(line) {
                continue;
            }
            stack.push(indent);
            max_depth = max_depth.max(stack.len());
        }
    }

    max_depth
}

/// How a function calls itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecursionShape {
    /// No self-calls
    #[default]
    None,
    /// At most one self-call per line
    Linear,
    /// Two self-calls on one line (e.g. `fib(n-1) + fib(n-2)`)
    Binary,
    /// Three or more self-calls on one line
    Multiple,
}

/// Recursion facts gathered from a function body
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionInfo {
    /// Maximum number of self-calls found on a single line
    pub max_calls_per_line: usize,
    /// Total self-call sites across the body
    pub total_calls: usize,
    /// Whether a guarded base case (`if` with a comparison) was seen
    pub has_base_case: bool,
}

impl RecursionInfo {
    pub fn shape(&self) -> RecursionShape {
        match self.max_calls_per_line {
            0 => RecursionShape::None,
            1 => RecursionShape::Linear,
            2 => RecursionShape::Binary,
            _ => RecursionShape::Multiple,
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.total_calls > 0
    }
}

/// Count self-calls per line, excluding attribute/method forms
/// (`obj.name(...)` is not a self-call).
pub fn recursion_info(name: &str, lines: &[&str]) -> RecursionInfo {
    let pattern = match Regex::new(&format!(r"(?:^|[^.\w])({})\s*\(", regex::escape(name))) {
        Ok(re) => re,
        Err(_) => return RecursionInfo::default(),
    };

    let mut info = RecursionInfo::default();
    for line in lines {
        let count = pattern.captures_iter(line).count();
        info.total_calls += count;
        info.max_calls_per_line = info.max_calls_per_line.max(count);
        if BASE_CASE.is_match(line) {
            info.has_base_case = true;
        }
    }
    info
}

fn recursion_class(shape: RecursionShape) -> ComplexityClass {
    match shape {
        RecursionShape::None => ComplexityClass::Constant,
        RecursionShape::Linear => ComplexityClass::Linear,
        RecursionShape::Binary => ComplexityClass::Exponential,
        RecursionShape::Multiple => ComplexityClass::ExponentialK,
    }
}

/// Fallback classification when no named pattern detector fires: the worse
/// of the loop-depth estimate and the recursion-shape estimate, with a
/// confidence derived from body size and signal strength.
pub fn structural_fallback(name: &str, lines: &[&str]) -> (ComplexityResult, String) {
    let depth = loop_depth(lines, false);
    let recursion = recursion_info(name, lines);

    let loop_class = ComplexityClass::from_loop_depth(depth);
    let rec_class = recursion_class(recursion.shape());
    let class = loop_class.max(rec_class);

    let mut confidence: i32 = 65;
    if depth > 0 || recursion.is_recursive() {
        confidence += 5;
    }
    if recursion.is_recursive() && recursion.has_base_case {
        confidence += 5;
    }
    if lines.len() > 40 {
        confidence -= 10;
    }

    let explanation = match (depth, recursion.shape()) {
        (0, RecursionShape::None) => "no loops or recursion detected".to_string(),
        (d, RecursionShape::None) if d > 3 => {
            format!("{} nested loops detected (reported as cubic)", d)
        }
        (d, RecursionShape::None) => format!("loop nesting depth {}", d),
        (0, shape) => format!("{} recursion detected", shape_label(shape)),
        (d, shape) => format!(
            "loop nesting depth {} combined with {} recursion",
            d,
            shape_label(shape)
        ),
    };

    (
        ComplexityResult::new(class, clamp_confidence(confidence) as i32),
        explanation,
    )
}

fn shape_label(shape: RecursionShape) -> &'static str {
    match shape {
        RecursionShape::None => "no",
        RecursionShape::Linear => "linear",
        RecursionShape::Binary => "binary",
        RecursionShape::Multiple => "multi-branch",
    }
}
