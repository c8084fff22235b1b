//! Function segmenter
//!
//! Splits raw source text into function units using an indentation scan:
//! a `def` line opens a unit at its indentation level, and the unit closes
//! when a non-blank, non-comment line at the same or shallower indentation
//! appears (or a new definition starts, or the file ends). Blank lines and
//! comments never terminate a unit, so trailing whitespace inside a body is
//! harmless. Definitions found strictly inside another unit's body are
//! recorded as lexical children so the graph builder can treat the outer
//! function as a caller of the inner one.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a function definition line and captures (indent, name).
///
/// The trailing colon is deliberately not required: a truncated or
/// malformed definition still opens a best-effort unit.
static DEF_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());

/// One segmented function: its name, 1-based line span, and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionUnit {
    /// Function name as written in the definition
    pub name: String,
    /// 1-based line of the `def` statement
    pub line_start: usize,
    /// 1-based last line of the body (inclusive)
    pub line_end: usize,
    /// Indentation width of the `def` line, in leading whitespace chars
    pub indent: usize,
    /// Index of the lexically enclosing unit, if any
    pub parent: Option<usize>,
    /// Raw body lines belonging directly to this unit (definition line and
    /// nested child bodies excluded)
    pub body: Vec<String>,
}

impl FunctionUnit {
    /// Body lines with blanks and comment-only lines filtered out.
    ///
    /// This is the view every detector operates on.
    pub fn code_lines(&self) -> Vec<&str> {
        self.body
            .iter()
            .map(|l| l.as_str())
            .filter(|l| {
                let t = l.trim();
                !t.is_empty() && !t.starts_with('#')
            })
            .collect()
    }
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_blank_or_comment(line: &str) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with('#')
}

/// Segment source text into an ordered list of function units.
///
/// Never fails: source with no definitions yields an empty list, and an
/// unterminated definition is closed at end-of-file with whatever body was
/// collected.
pub fn segment(source: &str) -> Vec<FunctionUnit> {
    let mut units: Vec<FunctionUnit> = Vec::new();
    // Indices into `units` for definitions whose bodies are still open,
    // innermost last.
    let mut open: Vec<usize> = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;

        if is_blank_or_comment(line) {
            continue;
        }

        let indent = indent_width(line);

        if let Some(caps) = DEF_LINE.captures(line) {
            let def_indent = caps.get(1).map(|m| m.as_str().len()).unwrap_or(0);
            let name = caps[2].to_string();

            // A definition at indentation <= an open unit's closes that unit.
            while let Some(&top) = open.last() {
                if units[top].indent >= def_indent {
                    open.pop();
                } else {
                    break;
                }
            }

            let parent = open.last().copied();
            // The definition line is body text of every enclosing unit's span.
            for &i in &open {
                units[i].line_end = line_no;
            }

            units.push(FunctionUnit {
                name,
                line_start: line_no,
                line_end: line_no,
                indent: def_indent,
                parent,
                body: Vec::new(),
            });
            open.push(units.len() - 1);
            continue;
        }

        // Ordinary code line: closes every open unit it dedents past.
        while let Some(&top) = open.last() {
            if indent <= units[top].indent {
                open.pop();
            } else {
                break;
            }
        }

        if let Some(&top) = open.last() {
            // Only the innermost unit owns the line; enclosing spans extend.
            for &i in &open {
                units[i].line_end = line_no;
            }
            units[top].body.push(line.to_string());
        }
    }

    units
}
