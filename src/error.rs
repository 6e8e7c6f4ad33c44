//! Error types surfaced by the scoring pipeline.

use thiserror::Error;

use crate::transform::Transform;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that can occur while computing indirect influences and dependences.
///
/// None of these are recovered from internally, they are always handed back to the caller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The graph's structure makes the transform undefined (e.g. parallel edges).
    #[error("structural error: {reason}")]
    Structural { reason: String },

    /// A numerical primitive the pipeline relies on isn't available.
    #[error("missing dependency: no {capability} backend is available")]
    MissingDependency { capability: &'static str },

    /// The scale parameter makes the transform formula undefined.
    #[error("degenerate parameter: {transform} is undefined for k = {k}")]
    DegenerateParameter { transform: Transform, k: f64 },

    /// The input can't be normalised into a distribution.
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// A transform name that doesn't match any known variant.
    #[error("unknown transform: {0:?} (expected \"heat-kernel\" or \"pwp\")")]
    UnknownTransform(String),
}
