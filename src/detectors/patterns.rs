//! Time-complexity pattern predicates
//!
//! Each predicate is a pure function over a function's filtered body lines
//! (plus the whole-file text for import-based signals). They are wired into
//! the ordered detector table in [`super`]; precedence between them lives
//! there, not here.

use once_cell::sync::Lazy;
use regex::Regex;

use super::DetectorContext;
use crate::detectors::structure::{is_loop_line, RecursionShape};

static SORT_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bsorted\s*\(|\.sort\s*\(").unwrap());
static HALVING_MID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*2\b|\bmid(?:dle)?\b").unwrap());
static HALVING_UPDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+\s*(?://=\s*2\b|>>=\s*1\b|=\s*\w+\s*//\s*2\b|=\s*\w+\s*>>\s*1\b)").unwrap()
});
static HEAP_OR_BISECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bheapq\s*\.\s*(?:heappush|heappop|heapify)\s*\(|\bbisect\b").unwrap()
});
static BOUNDS_LOW_HIGH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:low|lo|left|start)\b.*\b(?:high|hi|right|end)\b").unwrap());
static MID_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmid(?:dle)?\b").unwrap());
static PERMUTATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpermutations\s*\(|itertools\s*\.\s*permutations").unwrap());
static RANGE_LEN_LOOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*for\s+.+\s+in\s+range\s*\(\s*len\s*\(").unwrap());
static POW_TWO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b2\s*\*\*\s*\w|\b1\s*<<\s*\w").unwrap());
static POW_K: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[3-9]|\d{2,})\s*\*\*\s*\w").unwrap());
static LINEAR_BUILTIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:sum|max|min|reversed)\s*\(|\.count\s*\(|\.index\s*\(|\.join\s*\(").unwrap()
});
static MEMBERSHIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+in\s+\w").unwrap());
static SIMPLE_STMT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?:return\b|pass\b|break\b|continue\b|raise\b|del\b|global\b|nonlocal\b|if\b|elif\b|else\s*:|print\s*\(|(?:r|f|b|u)?['"]|[\w.\[\]'"]+\s*(?:[-+*/%]?=)[^=])"#,
    )
    .unwrap()
});

/// Sorting or divide-and-conquer: a call to `sorted`/`.sort`, or a pair of
/// recursive calls splitting the input around a midpoint.
pub fn is_sorting_or_divide_conquer(ctx: &DetectorContext) -> bool {
    if ctx.lines.iter().any(|l| SORT_CALL.is_match(l)) {
        return true;
    }
    ctx.recursion.total_calls >= 2 && ctx.lines.iter().any(|l| HALVING_MID.is_match(l))
}

/// Explicit halving idioms: a halving update inside a `while`, binary search
/// bounds, or heap/bisect library calls.
pub fn is_logarithmic(ctx: &DetectorContext) -> bool {
    if ctx.lines.iter().any(|l| HEAP_OR_BISECT.is_match(l)) {
        return true;
    }
    let has_while = ctx.lines.iter().any(|l| l.trim_start().starts_with("while "));
    if has_while && ctx.lines.iter().any(|l| HALVING_UPDATE.is_match(l)) {
        return true;
    }
    // Binary search shape: while over low/high bounds plus a midpoint.
    has_while
        && ctx.lines.iter().any(|l| BOUNDS_LOW_HIGH.is_match(l))
        && ctx.lines.iter().any(|l| MID_NAME.is_match(l))
}

/// Factorial/permutation generation: use of `itertools.permutations`, or a
/// recursive call inside a `for i in range(len(...))` loop whose results are
/// combined by concatenation.
pub fn is_factorial(ctx: &DetectorContext) -> bool {
    if ctx.lines.iter().any(|l| PERMUTATIONS.is_match(l)) && PERMUTATIONS.is_match(ctx.file_text) {
        return true;
    }
    ctx.recursion.is_recursive()
        && ctx.lines.iter().any(|l| RANGE_LEN_LOOP.is_match(l))
        && ctx.lines.iter().any(|l| l.contains('+'))
}

/// k-ary exponential recursion: the function iterates over its own
/// recursive result while also looping over an arbitrary-size collection,
/// or branches into more than two self-calls at once, or uses an explicit
/// k^n power.
pub fn is_exponential_k(ctx: &DetectorContext) -> bool {
    if ctx.recursion.shape() == RecursionShape::Multiple {
        return true;
    }
    if ctx.lines.iter().any(|l| POW_K.is_match(l)) {
        return true;
    }
    let iterates_own_result = iterates_recursive_result(ctx);
    let loop_count = ctx.lines.iter().filter(|l| is_loop_line(l)).count();
    iterates_own_result && loop_count >= 2
}

fn iterates_recursive_result(ctx: &DetectorContext) -> bool {
    let pattern = format!(
        r"^\s*for\s+.+\s+in\s+{}\s*\(",
        regex::escape(ctx.name)
    );
    match Regex::new(&pattern) {
        Ok(re) => ctx.lines.iter().any(|l| re.is_match(l)),
        Err(_) => false,
    }
}

/// Binary/multi-branch exponential recursion (`fib(n-1) + fib(n-2)`), or an
/// explicit 2^n idiom.
pub fn is_exponential(ctx: &DetectorContext) -> bool {
    ctx.recursion.total_calls >= 2 || ctx.lines.iter().any(|l| POW_TWO.is_match(l))
}

/// Three structurally nested loops (constant-size inner loops excluded)
pub fn is_cubic(ctx: &DetectorContext) -> bool {
    ctx.guarded_depth >= 3
}

/// Two structurally nested loops (constant-size inner loops excluded)
pub fn is_quadratic(ctx: &DetectorContext) -> bool {
    ctx.guarded_depth == 2
}

/// Any single loop, or a known O(n) built-in operation (sum/max/min/
/// reversed/count/membership test)
pub fn is_linear(ctx: &DetectorContext) -> bool {
    if ctx.raw_depth >= 1 {
        return true;
    }
    ctx.lines.iter().any(|l| {
        LINEAR_BUILTIN.is_match(l) || (!is_loop_line(l) && MEMBERSHIP.is_match(l))
    })
}

/// A small body of nothing but assignments, returns, conditionals and the
/// like, with no loops and no recursion
pub fn is_constant(ctx: &DetectorContext) -> bool {
    ctx.raw_depth == 0
        && !ctx.recursion.is_recursive()
        && ctx.lines.len() <= 10
        && ctx.lines.iter().all(|l| SIMPLE_STMT.is_match(l))
}
