//! Complexity notation model
//!
//! Defines the closed, totally ordered set of asymptotic complexity classes
//! used throughout the engine, plus the result types that carry a class
//! together with a human-readable description and a confidence score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Lowest confidence the engine ever reports
pub const MIN_CONFIDENCE: u8 = 10;

/// Highest confidence the engine ever reports
pub const MAX_CONFIDENCE: u8 = 100;

/// Confidence floor applied when hierarchy propagation decays a result
pub const PROPAGATION_FLOOR: u8 = 70;

/// Confidence lost on each propagation rewrite
pub const PROPAGATION_DECAY: u8 = 10;

/// Asymptotic complexity classes, ordered from best to worst.
///
/// The derived `Ord` follows declaration order, so `max` over any set of
/// classes yields the worst case. `ExponentialK` (k^n for arbitrary k)
/// ranks strictly between `Exponential` (2^n) and `Factorial`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ComplexityClass {
    #[default]
    #[serde(rename = "O(1)")]
    Constant,
    #[serde(rename = "O(log n)")]
    Logarithmic,
    #[serde(rename = "O(n)")]
    Linear,
    #[serde(rename = "O(n log n)")]
    Linearithmic,
    #[serde(rename = "O(n^2)")]
    Quadratic,
    #[serde(rename = "O(n^3)")]
    Cubic,
    #[serde(rename = "O(2^n)")]
    Exponential,
    #[serde(rename = "O(k^n)")]
    ExponentialK,
    #[serde(rename = "O(n!)")]
    Factorial,
}

impl ComplexityClass {
    /// All classes in ascending (best to worst) order
    pub const ALL: [ComplexityClass; 9] = [
        Self::Constant,
        Self::Logarithmic,
        Self::Linear,
        Self::Linearithmic,
        Self::Quadratic,
        Self::Cubic,
        Self::Exponential,
        Self::ExponentialK,
        Self::Factorial,
    ];

    /// Canonical Big-O notation string
    pub fn notation(&self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n^2)",
            Self::Cubic => "O(n^3)",
            Self::Exponential => "O(2^n)",
            Self::ExponentialK => "O(k^n)",
            Self::Factorial => "O(n!)",
        }
    }

    /// Canonical description of the growth category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Constant => "constant time - independent of input size",
            Self::Logarithmic => "logarithmic time - halves the problem each step",
            Self::Linear => "linear time - proportional to input size",
            Self::Linearithmic => "linearithmic time - typical of efficient sorting",
            Self::Quadratic => "quadratic time - nested iteration over the input",
            Self::Cubic => "cubic time - triply nested iteration",
            Self::Exponential => "exponential time - doubles with each input element",
            Self::ExponentialK => "exponential time with branching factor k",
            Self::Factorial => "factorial time - grows with permutation count",
        }
    }

    /// Canonical description of the growth category, worded for auxiliary
    /// space rather than running time
    pub fn space_description(&self) -> &'static str {
        match self {
            Self::Constant => "constant auxiliary space",
            Self::Logarithmic => "logarithmic auxiliary space",
            Self::Linear => "linear auxiliary space - allocations grow with input",
            Self::Linearithmic => "linearithmic auxiliary space",
            Self::Quadratic => "quadratic auxiliary space - matrix-shaped allocation",
            Self::Cubic => "cubic auxiliary space",
            Self::Exponential | Self::ExponentialK => "exponential auxiliary space",
            Self::Factorial => "factorial auxiliary space - stores permutations",
        }
    }

    /// Human-readable severity rating for report output
    ///
    /// Thresholds mirror how reviewers usually triage hot functions:
    /// - O(1)/O(log n): excellent
    /// - O(n)/O(n log n): good
    /// - O(n^2): fair
    /// - O(n^3): poor
    /// - anything exponential or worse: severe
    pub fn rating(&self) -> &'static str {
        match self {
            Self::Constant | Self::Logarithmic => "excellent",
            Self::Linear | Self::Linearithmic => "good",
            Self::Quadratic => "fair",
            Self::Cubic => "poor",
            Self::Exponential | Self::ExponentialK | Self::Factorial => "severe",
        }
    }

    /// Color hint for terminal output
    pub fn rating_color(&self) -> &'static str {
        match self {
            Self::Constant | Self::Logarithmic => "green",
            Self::Linear | Self::Linearithmic => "green",
            Self::Quadratic => "yellow",
            Self::Cubic => "orange",
            _ => "red",
        }
    }

    /// Map a structural loop-nesting depth to a class.
    ///
    /// Depths past three have no dedicated variant; they clamp to `Cubic`
    /// and the caller reports the measured depth in its explanation.
    pub fn from_loop_depth(depth: usize) -> Self {
        match depth {
            0 => Self::Constant,
            1 => Self::Linear,
            2 => Self::Quadratic,
            _ => Self::Cubic,
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// Clamp a raw confidence value into the engine's reporting range
pub fn clamp_confidence(value: i32) -> u8 {
    value.clamp(MIN_CONFIDENCE as i32, MAX_CONFIDENCE as i32) as u8
}

/// A classified time complexity with confidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityResult {
    /// Estimated asymptotic class
    pub class: ComplexityClass,
    /// Human-readable description of the class
    pub description: String,
    /// Heuristic confidence in percent, always within [10, 100]
    pub confidence: u8,
}

impl ComplexityResult {
    pub fn new(class: ComplexityClass, confidence: i32) -> Self {
        Self {
            class,
            description: class.description().to_string(),
            confidence: clamp_confidence(confidence),
        }
    }

    /// Rewrite this result to a worse class during hierarchy propagation.
    ///
    /// Confidence decays by [`PROPAGATION_DECAY`] but never drops below
    /// [`PROPAGATION_FLOOR`]; values that already started below the floor
    /// are left untouched.
    pub fn raise_to(&mut self, class: ComplexityClass) {
        debug_assert!(class > self.class);
        self.class = class;
        self.description = class.description().to_string();
        if self.confidence > PROPAGATION_FLOOR {
            self.confidence = (self.confidence - PROPAGATION_DECAY).max(PROPAGATION_FLOOR);
        }
    }
}

impl Default for ComplexityResult {
    fn default() -> Self {
        Self::new(ComplexityClass::Constant, 70)
    }
}

/// A classified space complexity with the data structures that drove it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceComplexityResult {
    /// Estimated asymptotic class of auxiliary space
    pub class: ComplexityClass,
    /// Human-readable description of the class
    pub description: String,
    /// Heuristic confidence in percent, always within [10, 100]
    pub confidence: u8,
    /// Deduplicated labels of detected allocations ("list", "matrix",
    /// "recursion stack", "dynamic list growth", ...)
    pub data_structures: BTreeSet<String>,
}

impl SpaceComplexityResult {
    pub fn new(class: ComplexityClass, confidence: i32) -> Self {
        Self {
            class,
            description: class.space_description().to_string(),
            confidence: clamp_confidence(confidence),
            data_structures: BTreeSet::new(),
        }
    }

    /// Same rewrite rule as [`ComplexityResult::raise_to`]
    pub fn raise_to(&mut self, class: ComplexityClass) {
        debug_assert!(class > self.class);
        self.class = class;
        self.description = class.space_description().to_string();
        if self.confidence > PROPAGATION_FLOOR {
            self.confidence = (self.confidence - PROPAGATION_DECAY).max(PROPAGATION_FLOOR);
        }
    }
}
