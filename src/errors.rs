//! Error types produced while configuring or analysing a safety net.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single constraint violated by a [`NetConfig`](crate::NetConfig).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum ConfigViolation {
    /// Returned when the elastic modulus is zero, negative or not a number.
    #[error("Elastic modulus must be positive")]
    NonPositiveElasticModulus,
    /// Returned when the yield strength is zero, negative or not a number.
    #[error("Yield strength must be positive")]
    NonPositiveYieldStrength,
    /// Returned when the span between supports is zero, negative or not a number.
    #[error("Net span must be positive")]
    NonPositiveSpan,
    /// Returned when the net has no load-bearing strands.
    #[error("Number of strands must be positive")]
    NoStrands,
    /// Returned when the falling mass is zero, negative or not a number.
    #[error("Impact mass must be positive")]
    NonPositiveMass,
    /// Returned when the fall height is negative or not a number.
    #[error("Fall height cannot be negative")]
    NegativeFallHeight,
}

/// Every violation found while validating a configuration.
///
/// The list is never empty when it appears inside an [`AnalysisError`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ConfigViolation>);

impl ValidationErrors {
    /// Wrap a list of violations.
    #[must_use]
    pub fn new(violations: Vec<ConfigViolation>) -> Self {
        Self(violations)
    }

    /// Borrow the collected violations in the order they were checked.
    #[must_use]
    pub fn violations(&self) -> &[ConfigViolation] {
        &self.0
    }

    /// Human readable message for each violation.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Return `true` when nothing was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if `violation` is among the collected violations.
    #[must_use]
    pub fn contains(&self, violation: ConfigViolation) -> bool {
        self.0.contains(&violation)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Configuration errors: ")?;
        for (idx, violation) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Error returned when an analysis cannot be carried out.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the configuration fails validation. All violations are reported.
    #[error(transparent)]
    InvalidConfiguration(ValidationErrors),
    /// Returned when the stiffness model receives input that would divide by zero.
    ///
    /// Validation rejects most of these up front, so seeing this usually means a caller
    /// bypassed [`NetConfig::validate`](crate::NetConfig::validate).
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),
}

/// Reason the primary root-finder gave up and the linear estimate was used instead.
#[derive(Clone, Copy, Debug, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverFailure {
    /// Returned when the iteration budget ran out before the step size settled.
    #[error("energy balance did not converge after {iterations} iterations")]
    NonConvergence {
        /// Number of iterations performed.
        iterations: usize,
    },
    /// Returned when an iterate became infinite or NaN.
    #[error("energy balance produced a non-finite iterate")]
    NonFinite,
    /// Returned when the net force (the derivative of the balance) vanished.
    #[error("net force vanished at deflection {deflection} m")]
    ZeroSlope {
        /// Deflection at which the slope vanished, in metres.
        deflection: f64,
    },
}

/// Error returned when loading a configuration document or preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the document is not a valid configuration.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when a preset key is not part of the catalog.
    #[error("unknown preset '{name}'; available: {}", .available.join(", "))]
    UnknownPreset {
        /// Key that was requested.
        name: String,
        /// Keys that would have been accepted.
        available: Vec<&'static str>,
    },
}
