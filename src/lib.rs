//! bigo-engine: heuristic Big-O complexity analyzer
//!
//! This library estimates, for each function in a Python source file, its
//! asymptotic time and space complexity using static heuristics: named
//! pattern detectors (sorting, halving, permutation generation, exponential
//! recursion), structural loop/recursion counters, and a call-graph
//! propagation pass that lets a caller inherit the worst complexity among
//! the functions it calls.
//!
//! The analysis is deterministic, single-threaded, and never fails: bad
//! input degrades to an empty or low-confidence result, not an error.
//!
//! # Example
//!
//! ```
//! use bigo_engine::{analyze, ComplexityClass};
//!
//! let source = r#"
//! def total(arr):
//!     acc = 0
//!     for x in arr:
//!         acc += x
//!     return acc
//! "#;
//!
//! let result = analyze(source);
//! let method = result.method("total").unwrap();
//! assert_eq!(method.complexity.class, ComplexityClass::Linear);
//! ```

pub mod analysis;
pub mod cli;
pub mod detectors;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod notation;
pub mod report;
pub mod segment;

// Re-export commonly used types
pub use analysis::{analyze, AnalysisResult, MethodAnalysis};
pub use cli::{Cli, OutputFormat};
pub use error::{BigOError, Result};
pub use graph::CallGraph;
pub use notation::{ComplexityClass, ComplexityResult, SpaceComplexityResult};
pub use segment::{segment, FunctionUnit};
