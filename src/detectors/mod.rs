//! Named complexity detectors and the dispatch table
//!
//! Detectors are organized as a data-driven, strictly ordered table of
//! predicate/class pairs rather than a conditional cascade: more specific
//! signals (sorting, halving, permutation generation) pre-empt generic
//! structural counting, and the worst applicable classification wins by
//! construction of the order. New detectors slot into the table without
//! touching control flow.
//!
//! - `patterns`: the pure predicates over a function body
//! - `structure`: loop-depth and recursion counters, plus the fallback
//!   classification used when nothing in the table matches
//! - `space`: the independent space-complexity analyzer

pub mod patterns;
pub mod space;
pub mod structure;

use tracing::debug;

use crate::notation::ComplexityResult;
use crate::segment::FunctionUnit;
use structure::{loop_depth, recursion_info, structural_fallback, RecursionInfo};

/// Precomputed per-function facts shared by every predicate
#[derive(Debug)]
pub struct DetectorContext<'a> {
    /// Name of the function under analysis
    pub name: &'a str,
    /// Filtered (non-blank, non-comment) body lines
    pub lines: &'a [&'a str],
    /// Whole-file text, for import-based signals
    pub file_text: &'a str,
    /// Self-call counts and base-case flag
    pub recursion: RecursionInfo,
    /// Loop nesting depth with the constant-size inner-loop guard applied
    pub guarded_depth: usize,
    /// Loop nesting depth without the guard
    pub raw_depth: usize,
}

impl<'a> DetectorContext<'a> {
    pub fn new(name: &'a str, lines: &'a [&'a str], file_text: &'a str) -> Self {
        Self {
            name,
            lines,
            file_text,
            recursion: recursion_info(name, lines),
            guarded_depth: loop_depth(lines, true),
            raw_depth: loop_depth(lines, false),
        }
    }
}

/// One entry in the ordered detector table
struct Detector {
    label: &'static str,
    class: crate::notation::ComplexityClass,
    confidence: u8,
    reason: &'static str,
    applies: fn(&DetectorContext) -> bool,
}

use crate::notation::ComplexityClass as C;

/// The detector cascade, highest precedence first.
///
/// Sorting outranks exponential so a two-call divide-and-conquer sorter is
/// not misread as 2^n; factorial outranks the k-ary shape because a
/// permutation generator also iterates its own recursive result.
const DETECTORS: &[Detector] = &[
    Detector {
        label: "sorting",
        class: C::Linearithmic,
        confidence: 90,
        reason: "sorting or divide-and-conquer pattern",
        applies: patterns::is_sorting_or_divide_conquer,
    },
    Detector {
        label: "logarithmic",
        class: C::Logarithmic,
        confidence: 85,
        reason: "halving or binary-search pattern",
        applies: patterns::is_logarithmic,
    },
    Detector {
        label: "factorial",
        class: C::Factorial,
        confidence: 85,
        reason: "permutation-generation pattern",
        applies: patterns::is_factorial,
    },
    Detector {
        label: "exponential-k",
        class: C::ExponentialK,
        confidence: 70,
        reason: "k-ary recursive branching over a collection",
        applies: patterns::is_exponential_k,
    },
    Detector {
        label: "exponential",
        class: C::Exponential,
        confidence: 90,
        reason: "multiple recursive calls per invocation",
        applies: patterns::is_exponential,
    },
    Detector {
        label: "cubic",
        class: C::Cubic,
        confidence: 80,
        reason: "three nested loops",
        applies: patterns::is_cubic,
    },
    Detector {
        label: "quadratic",
        class: C::Quadratic,
        confidence: 80,
        reason: "two nested loops",
        applies: patterns::is_quadratic,
    },
    Detector {
        label: "linear",
        class: C::Linear,
        confidence: 75,
        reason: "single loop or linear built-in operation",
        applies: patterns::is_linear,
    },
    Detector {
        label: "constant",
        class: C::Constant,
        confidence: 95,
        reason: "only simple statements",
        applies: patterns::is_constant,
    },
];

/// Classify the time complexity of one function body.
///
/// Walks the detector table in precedence order; if nothing fires, falls
/// back to the structural loop/recursion estimate. Returns the result plus
/// a short explanation of what was matched.
pub fn classify_time(unit: &FunctionUnit, file_text: &str) -> (ComplexityResult, String) {
    let lines = unit.code_lines();
    let ctx = DetectorContext::new(&unit.name, &lines, file_text);

    for detector in DETECTORS {
        if (detector.applies)(&ctx) {
            debug!(
                function = %unit.name,
                detector = detector.label,
                class = %detector.class,
                "detector matched"
            );
            return (
                ComplexityResult::new(detector.class, detector.confidence as i32),
                detector.reason.to_string(),
            );
        }
    }

    let (result, explanation) = structural_fallback(ctx.name, ctx.lines);
    debug!(function = %unit.name, class = %result.class, "structural fallback");
    (result, explanation)
}

#[cfg(test)]
pub(crate) fn context_for_tests<'a>(
    name: &'a str,
    lines: &'a [&'a str],
    file_text: &'a str,
) -> DetectorContext<'a> {
    DetectorContext::new(name, lines, file_text)
}
