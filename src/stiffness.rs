//! Nonlinear load–deflection model of the net.
//!
//! The net is treated as `n` identical strands sharing the load. A representative strand
//! angle θ is estimated once from a seed deflection of one tenth of the span and the axial
//! stiffness `nEA/L` is split into linear, quadratic and cubic terms:
//!
//! ```text
//! F(δ) = k1·δ + k2·δ² + k3·δ³
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{GeometryParameters, MaterialProperties};
use crate::errors::AnalysisError;

/// Seed deflection as a fraction of the span, shared by the angle estimate and the solver.
pub const SEED_DEFLECTION_RATIO: f64 = 0.1;

/// Coefficients of the cubic force law.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StiffnessCoefficients {
    /// Linear stiffness in N/m.
    pub k1: f64,
    /// Quadratic stiffness in N/m².
    pub k2: f64,
    /// Cubic stiffness in N/m³.
    pub k3: f64,
}

impl StiffnessCoefficients {
    /// Create coefficients directly.
    #[must_use]
    pub const fn new(k1: f64, k2: f64, k3: f64) -> Self {
        Self { k1, k2, k3 }
    }

    /// Derive the coefficients for a material and net layout.
    ///
    /// The angle estimate is not refined against the solved deflection.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DegenerateInput`] when the span, strand count, elastic
    /// modulus or strand area is not strictly positive.
    ///
    /// # Examples
    /// ```
    /// use netsafe::{GeometryParameters, MaterialPreset, StiffnessCoefficients};
    ///
    /// let nylon = MaterialPreset::Nylon.properties();
    /// let geometry = GeometryParameters::new(4.0, 50);
    /// let k = StiffnessCoefficients::derive(&nylon, &geometry).unwrap();
    /// assert!(k.k1 > k.k2 && k.k2 > k.k3);
    /// ```
    pub fn derive(
        material: &MaterialProperties,
        geometry: &GeometryParameters,
    ) -> Result<Self, AnalysisError> {
        let span = geometry.net_span;
        if !(span.is_finite() && span > 0.0) {
            return Err(AnalysisError::DegenerateInput("net span must be positive"));
        }
        if geometry.num_strands == 0 {
            return Err(AnalysisError::DegenerateInput("net has no strands"));
        }
        if !(material.elastic_modulus.is_finite() && material.elastic_modulus > 0.0) {
            return Err(AnalysisError::DegenerateInput(
                "elastic modulus must be positive",
            ));
        }
        if !(material.cross_section_area.is_finite() && material.cross_section_area > 0.0) {
            return Err(AnalysisError::DegenerateInput(
                "strand cross-section area must be positive",
            ));
        }

        let theta = estimated_angle(span);
        let (sin, cos) = theta.sin_cos();
        let cos2 = cos * cos;
        let axial = f64::from(geometry.num_strands)
            * material.elastic_modulus
            * material.cross_section_area;

        let coefficients = Self {
            k1: axial / span * cos2,
            k2: axial / span.powi(2) * sin * cos2,
            k3: axial / span.powi(3) * sin * sin * cos2,
        };
        log::debug!(
            "stiffness for span {span} m, {} strands: theta = {theta:.4} rad, {coefficients:?}",
            geometry.num_strands
        );
        Ok(coefficients)
    }

    /// Restoring force in newtons at deflection `delta`.
    #[must_use]
    pub fn force(&self, delta: f64) -> f64 {
        delta * (self.k1 + delta * (self.k2 + delta * self.k3))
    }

    /// Strain energy stored at deflection `delta`, the integral of [`force`](Self::force).
    #[must_use]
    pub fn strain_energy(&self, delta: f64) -> f64 {
        delta * delta * (0.5 * self.k1 + delta * (self.k2 / 3.0 + 0.25 * self.k3 * delta))
    }
}

/// Representative strand angle in radians for a span, from the seed deflection.
#[must_use]
pub fn estimated_angle(span: f64) -> f64 {
    (SEED_DEFLECTION_RATIO * span / (span / 2.0)).atan()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::presets::MaterialPreset;

    #[test]
    fn coefficients_match_closed_form() {
        let material = MaterialPreset::Nylon.properties();
        let geometry = GeometryParameters::new(4.0, 50);
        let k = StiffnessCoefficients::derive(&material, &geometry).expect("valid input");

        let axial = 50.0 * 3.5e9 * 2.0e-6;
        let theta = (0.4_f64 / 2.0).atan();
        let cos2 = theta.cos().powi(2);
        assert_relative_eq!(k.k1, axial / 4.0 * cos2, max_relative = 1.0e-12);
        assert_relative_eq!(
            k.k2,
            axial / 16.0 * theta.sin() * cos2,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            k.k3,
            axial / 64.0 * theta.sin().powi(2) * cos2,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn angle_does_not_depend_on_span() {
        assert_relative_eq!(estimated_angle(1.0), estimated_angle(25.0));
        assert_relative_eq!(estimated_angle(3.0), 0.2_f64.atan());
    }

    #[test]
    fn force_is_derivative_of_energy() {
        let k = StiffnessCoefficients::new(8.0e4, 4.0e3, 2.0e2);
        let delta = 0.3;
        let h = 1.0e-6;
        let numeric = (k.strain_energy(delta + h) - k.strain_energy(delta - h)) / (2.0 * h);
        assert_relative_eq!(k.force(delta), numeric, max_relative = 1.0e-6);
        assert_relative_eq!(k.force(0.0), 0.0);
        assert_relative_eq!(k.strain_energy(0.0), 0.0);
    }

    #[test]
    fn degenerate_inputs_are_refused() {
        let material = MaterialPreset::Nylon.properties();
        let zero_span = GeometryParameters::new(0.0, 50);
        assert!(matches!(
            StiffnessCoefficients::derive(&material, &zero_span),
            Err(AnalysisError::DegenerateInput(_))
        ));

        let no_strands = GeometryParameters::new(4.0, 0);
        assert!(matches!(
            StiffnessCoefficients::derive(&material, &no_strands),
            Err(AnalysisError::DegenerateInput(_))
        ));

        let mut no_area = material;
        no_area.cross_section_area = 0.0;
        assert!(matches!(
            StiffnessCoefficients::derive(&no_area, &GeometryParameters::default()),
            Err(AnalysisError::DegenerateInput(_))
        ));
    }
}
