//! Text report rendering
//!
//! Formats an [`AnalysisResult`] as a human-readable terminal report:
//! overview, per-function complexity table, and call hierarchy.

use crate::analysis::AnalysisResult;

/// Format the full analysis as a text report
pub fn format_report(result: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str("╔══════════════════════════════════════════════════════════════════╗\n");
    output.push_str("║                  BIG-O COMPLEXITY ANALYSIS REPORT                ║\n");
    output.push_str("╚══════════════════════════════════════════════════════════════════╝\n\n");

    // Overview
    output.push_str("── OVERVIEW ─────────────────────────────────────────────────────────\n");
    output.push_str(&format!("  Functions:       {:>6}\n", result.methods.len()));
    if let Some(worst) = result.worst_class() {
        output.push_str(&format!("  Worst class:     {:>6}\n", worst.notation()));
    }
    output.push_str(&format!(
        "  Avg confidence:  {:>5.1}%\n",
        result.average_confidence()
    ));
    output.push('\n');

    // Per-function table
    output.push_str("── FUNCTIONS ────────────────────────────────────────────────────────\n");
    output.push_str("  Function                 Lines      Time        Space       Conf  Rating\n");
    output.push_str("  ───────────────────────────────────────────────────────────────────\n");

    for m in &result.methods {
        let name = truncate_name(&m.name, 22);
        output.push_str(&format!(
            "  {:<22} {:>4}-{:<4}  {:<10}  {:<10}  {:>3}%  {}\n",
            name,
            m.line_start,
            m.line_end,
            m.complexity.class.notation(),
            m.space_complexity.class.notation(),
            m.complexity.confidence,
            m.complexity.class.rating()
        ));
    }
    output.push('\n');

    // Explanations
    output.push_str("── DETAILS ──────────────────────────────────────────────────────────\n");
    for m in &result.methods {
        output.push_str(&format!("  {}: {}\n", m.name, m.explanation));
        if !m.space_complexity.data_structures.is_empty() {
            let labels: Vec<&str> = m
                .space_complexity
                .data_structures
                .iter()
                .map(|s| s.as_str())
                .collect();
            output.push_str(&format!("    space: {}\n", labels.join(", ")));
        }
    }
    output.push('\n');

    output.push_str(&format_hierarchy(result));
    output.push_str("══════════════════════════════════════════════════════════════════════\n");

    output
}

/// Shorten a function name to fit the table column.
///
/// Counts chars, not bytes: identifiers are allowed to contain multibyte
/// characters and slicing at a byte index would panic mid-character.
fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Format just the call hierarchy section
pub fn format_hierarchy(result: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str("── CALL HIERARCHY ───────────────────────────────────────────────────\n");

    // Keyed by the method list to keep output order stable.
    let mut any = false;
    for m in &result.methods {
        if let Some(callees) = result.hierarchy.get(&m.name) {
            if !callees.is_empty() {
                output.push_str(&format!("  {} → {}\n", m.name, callees.join(", ")));
                any = true;
            }
        }
    }
    if !any {
        output.push_str("  (no intra-file calls)\n");
    }
    output.push('\n');

    output
}
