//! Analysis orchestration
//!
//! The engine's single entry point: segment the source, classify each
//! function independently, build the call graph, then run hierarchy
//! propagation. `analyze` never fails; the worst outcome for pathological
//! input is an empty or low-confidence result set.

use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::detectors::{classify_time, space::analyze_space};
use crate::graph::{build_call_graph, CallGraph};
use crate::hierarchy::propagate;
use crate::notation::{ComplexityClass, ComplexityResult, SpaceComplexityResult};
use crate::segment::{segment, FunctionUnit};

/// Final analysis for one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAnalysis {
    /// Function name as written in the definition
    pub name: String,
    /// 1-based line of the `def` statement
    pub line_start: usize,
    /// 1-based last line of the body (inclusive)
    pub line_end: usize,
    /// Estimated time complexity
    pub complexity: ComplexityResult,
    /// Estimated auxiliary space complexity
    pub space_complexity: SpaceComplexityResult,
    /// What drove the classification
    pub explanation: String,
}

/// The engine's sole output: per-function analyses plus the call graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    pub methods: Vec<MethodAnalysis>,
    pub hierarchy: CallGraph,
}

impl AnalysisResult {
    /// Look up a function by name. With shadowed names the last
    /// definition wins, matching propagation's name resolution.
    pub fn method(&self, name: &str) -> Option<&MethodAnalysis> {
        self.methods.iter().rev().find(|m| m.name == name)
    }

    /// Worst time-complexity class across all functions
    pub fn worst_class(&self) -> Option<ComplexityClass> {
        self.methods.iter().map(|m| m.complexity.class).max()
    }

    /// Mean confidence of the time classifications, for report output
    pub fn average_confidence(&self) -> f64 {
        if self.methods.is_empty() {
            return 0.0;
        }
        let total: u32 = self
            .methods
            .iter()
            .map(|m| m.complexity.confidence as u32)
            .sum();
        total as f64 / self.methods.len() as f64
    }
}

/// Analyze one source file's text.
///
/// Fully synchronous and side-effect free: no I/O, no shared state across
/// invocations beyond the static pattern tables.
pub fn analyze(source: &str) -> AnalysisResult {
    let units = segment(source);
    debug!(functions = units.len(), "segmentation complete");

    let mut methods: Vec<MethodAnalysis> = units
        .iter()
        .map(|unit| analyze_function(unit, source))
        .collect();

    let hierarchy = build_call_graph(&units);
    propagate(&mut methods, &hierarchy);

    AnalysisResult { methods, hierarchy }
}

/// Classify a single function, downgrading any internal fault to a
/// low-confidence constant placeholder so one bad function never discards
/// the rest of the file.
fn analyze_function(unit: &FunctionUnit, source: &str) -> MethodAnalysis {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let (complexity, explanation) = classify_time(unit, source);
        let lines = unit.code_lines();
        let space_complexity = analyze_space(&unit.name, &lines);
        (complexity, space_complexity, explanation)
    }));

    match outcome {
        Ok((complexity, space_complexity, explanation)) => MethodAnalysis {
            name: unit.name.clone(),
            line_start: unit.line_start,
            line_end: unit.line_end,
            complexity,
            space_complexity,
            explanation,
        },
        Err(_) => {
            warn!(function = %unit.name, "per-function analysis fault, downgrading");
            MethodAnalysis {
                name: unit.name.clone(),
                line_start: unit.line_start,
                line_end: unit.line_end,
                complexity: ComplexityResult::new(ComplexityClass::Constant, 10),
                space_complexity: SpaceComplexityResult::new(ComplexityClass::Constant, 10),
                explanation: "analysis fault; defaulted to constant".to_string(),
            }
        }
    }
}
