//! Energy-balance solve for the peak deflection of the net.
//!
//! The deflection is the non-negative root of
//!
//! ```text
//! ½k1·δ² + ⅓k2·δ³ + ¼k3·δ⁴ − m·g·h = 0
//! ```
//!
//! found with Newton–Raphson, whose derivative is the force law itself. When the iteration
//! breaks down the net is treated as linear-elastic instead; see [`linear_fallback`].

use serde::Serialize;

use crate::errors::SolverFailure;
use crate::stiffness::{StiffnessCoefficients, SEED_DEFLECTION_RATIO};

/// Iteration budget for the Newton–Raphson solve.
pub const MAX_ITERATIONS: usize = 100;

/// Relative step size below which the solve is considered converged.
pub const TOLERANCE: f64 = 1.0e-12;

/// Outcome of the energy-balance solve, recording which path produced the deflection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum DeflectionSolution {
    /// The nonlinear balance was solved numerically.
    Converged {
        /// Peak deflection in metres, never negative.
        deflection: f64,
        /// Newton iterations used.
        iterations: usize,
    },
    /// The numeric solve failed and the linear estimate was used.
    Fallback {
        /// Peak deflection in metres from [`linear_fallback`].
        deflection: f64,
        /// Why the numeric solve was abandoned.
        cause: SolverFailure,
    },
}

impl DeflectionSolution {
    /// Peak deflection in metres.
    #[must_use]
    pub fn deflection(&self) -> f64 {
        match *self {
            Self::Converged { deflection, .. } | Self::Fallback { deflection, .. } => deflection,
        }
    }

    /// Return `true` when the linear estimate was used.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Solve the energy balance for a net of the given span absorbing `energy` joules.
///
/// The solve starts from one tenth of the span. It never fails: on breakdown the
/// result of [`linear_fallback`] is returned and a warning is logged.
///
/// # Examples
/// ```
/// use netsafe::{solve_deflection, StiffnessCoefficients};
///
/// let linear = StiffnessCoefficients::new(2.0e4, 0.0, 0.0);
/// let solution = solve_deflection(&linear, 100.0, 4.0);
/// assert!((solution.deflection() - 0.1).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn solve_deflection(
    stiffness: &StiffnessCoefficients,
    energy: f64,
    span: f64,
) -> DeflectionSolution {
    let initial = SEED_DEFLECTION_RATIO * span;
    match newton_raphson(stiffness, energy, initial, MAX_ITERATIONS) {
        Ok((root, iterations)) => DeflectionSolution::Converged {
            deflection: root.max(0.0),
            iterations,
        },
        Err(cause) => {
            let deflection = linear_fallback(stiffness, energy, span);
            log::warn!("{cause}; using linear estimate of {deflection:.6} m");
            DeflectionSolution::Fallback { deflection, cause }
        }
    }
}

/// Linear-elastic estimate `min(E / k1, L / 2)`, ignoring `k2` and `k3`.
///
/// The estimate is capped at half the span and never negative. A zero `k1` yields the cap.
#[must_use]
pub fn linear_fallback(stiffness: &StiffnessCoefficients, energy: f64, span: f64) -> f64 {
    let estimate = energy / stiffness.k1;
    let capped = if estimate.is_nan() {
        0.5 * span
    } else {
        estimate.min(0.5 * span)
    };
    capped.max(0.0)
}

/// Newton–Raphson iteration on the energy balance from `initial`.
///
/// Zero energy returns the root at the origin directly, since the origin is a double root
/// and Newton only approaches it linearly.
pub(crate) fn newton_raphson(
    stiffness: &StiffnessCoefficients,
    energy: f64,
    initial: f64,
    max_iterations: usize,
) -> Result<(f64, usize), SolverFailure> {
    if energy == 0.0 {
        return Ok((0.0, 0));
    }
    let mut delta = initial;
    for iteration in 1..=max_iterations {
        let slope = stiffness.force(delta);
        if slope == 0.0 {
            return Err(SolverFailure::ZeroSlope { deflection: delta });
        }
        let step = (stiffness.strain_energy(delta) - energy) / slope;
        delta -= step;
        if !delta.is_finite() {
            return Err(SolverFailure::NonFinite);
        }
        log::trace!("iteration {iteration}: delta = {delta:e}, step = {step:e}");
        if step.abs() <= TOLERANCE * (1.0 + delta.abs()) {
            log::debug!("energy balance converged in {iteration} iterations");
            return Ok((delta, iteration));
        }
    }
    Err(SolverFailure::NonConvergence {
        iterations: max_iterations,
    })
}
