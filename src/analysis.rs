//! Single-impact analysis of a configured net.

use serde::Serialize;

use crate::config::{MaterialProperties, NetConfig};
use crate::errors::{AnalysisError, ValidationErrors};
use crate::solver::{solve_deflection, DeflectionSolution};
use crate::stiffness::StiffnessCoefficients;

/// Peak response of the net to the impact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StructuralResponse {
    /// Peak deflection in metres.
    pub max_deflection: f64,
    /// Peak strand stress in pascals.
    pub max_stress: f64,
    /// Yield strength over peak stress. Infinite when the net carries no stress,
    /// which serializes as `null`.
    pub safety_factor: f64,
    /// Peak strand strain.
    pub strain: f64,
}

impl StructuralResponse {
    /// Derive strain, stress and safety factor from a solved deflection.
    ///
    /// Stress follows Hooke's law on the chord strain and is independent of the cubic
    /// force law used for the deflection.
    #[must_use]
    pub fn from_deflection(deflection: f64, material: &MaterialProperties, span: f64) -> Self {
        let strain = chord_strain(span, deflection);
        let max_stress = material.elastic_modulus * strain;
        Self {
            max_deflection: deflection,
            max_stress,
            safety_factor: safety_factor(material.yield_strength, max_stress),
            strain,
        }
    }
}

/// Limits the response is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DesignLimits {
    /// Largest allowed deflection in metres.
    pub max_deflection_limit: f64,
    /// Smallest acceptable factor of safety.
    pub min_safety_factor: f64,
    /// Largest admissible strain.
    pub max_strain_limit: f64,
}

impl DesignLimits {
    /// Limits implied by a configuration.
    #[must_use]
    pub fn from_config(config: &NetConfig) -> Self {
        Self {
            max_deflection_limit: config.geometry.deflection_limit(),
            min_safety_factor: config.geometry.safety_factor_min,
            max_strain_limit: config.material.strain_limit,
        }
    }

    /// Compare a response against these limits.
    #[must_use]
    pub fn check(&self, response: &StructuralResponse) -> DesignChecks {
        DesignChecks::new(
            response.max_deflection <= self.max_deflection_limit,
            response.safety_factor >= self.min_safety_factor,
            response.strain <= self.max_strain_limit,
        )
    }
}

/// Pass/fail outcome of each design criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DesignChecks {
    /// Deflection within the allowed fraction of the span.
    pub deflection_ok: bool,
    /// Safety factor at or above the required minimum.
    pub stress_ok: bool,
    /// Strain within the material limit.
    pub strain_ok: bool,
    /// All of the above.
    pub overall_safe: bool,
}

impl DesignChecks {
    /// Combine the individual checks.
    #[must_use]
    pub const fn new(deflection_ok: bool, stress_ok: bool, strain_ok: bool) -> Self {
        Self {
            deflection_ok,
            stress_ok,
            strain_ok,
            overall_safe: deflection_ok && stress_ok && strain_ok,
        }
    }
}

/// Everything produced by one call to [`analyze`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Label of the analysed scenario.
    pub scenario_name: String,
    /// Configuration that produced the result.
    pub input_parameters: NetConfig,
    /// Peak response.
    pub structural_response: StructuralResponse,
    /// Limits applied by the design checks.
    pub design_limits: DesignLimits,
    /// Outcome of the design checks.
    pub design_checks: DesignChecks,
    /// Stiffness used for the solve.
    pub stiffness_coefficients: StiffnessCoefficients,
    /// How the deflection was obtained.
    pub solver: DeflectionSolution,
}

impl AnalysisResult {
    /// Return `true` when every design check passed.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.design_checks.overall_safe
    }
}

/// Validate `config` and analyse the impact it describes.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfiguration`] carrying every violated constraint when
/// validation fails, and [`AnalysisError::DegenerateInput`] when the stiffness model receives
/// a zero strand area.
///
/// # Examples
/// ```
/// use netsafe::{analyze, ScenarioPreset};
///
/// let result = analyze(&ScenarioPreset::LightWorker.config()).unwrap();
/// assert_eq!(result.scenario_name, "Light Worker");
/// assert!(result.structural_response.max_deflection > 0.0);
/// ```
pub fn analyze(config: &NetConfig) -> Result<AnalysisResult, AnalysisError> {
    let violations = config.validate();
    if !violations.is_empty() {
        return Err(AnalysisError::InvalidConfiguration(ValidationErrors::new(
            violations,
        )));
    }

    let material = &config.material;
    let span = config.geometry.net_span;

    let stiffness = StiffnessCoefficients::derive(material, &config.geometry)?;
    let solution = solve_deflection(&stiffness, config.impact.energy(), span);
    let structural_response =
        StructuralResponse::from_deflection(solution.deflection(), material, span);
    let design_limits = DesignLimits::from_config(config);
    let design_checks = design_limits.check(&structural_response);

    log::info!(
        "{}: deflection {:.4} m, safety factor {:.2}, safe = {}",
        config.scenario_name,
        structural_response.max_deflection,
        structural_response.safety_factor,
        design_checks.overall_safe
    );

    Ok(AnalysisResult {
        scenario_name: config.scenario_name.clone(),
        input_parameters: config.clone(),
        structural_response,
        design_limits,
        design_checks,
        stiffness_coefficients: stiffness,
        solver: solution,
    })
}

/// Strand strain when the midpoint of a straight span deflects by `deflection`.
///
/// Evaluated as `δ² / (L·(√(L² + δ²) + L))`, which equals `(√(L² + δ²) − L) / L` but keeps
/// its precision for deflections many orders of magnitude below the span.
///
/// # Examples
/// ```
/// use netsafe::chord_strain;
///
/// assert_eq!(chord_strain(4.0, 0.0), 0.0);
/// assert!(chord_strain(4.0, 1.0e-9) > 0.0);
/// ```
#[must_use]
pub fn chord_strain(span: f64, deflection: f64) -> f64 {
    deflection * deflection / (span * (span.hypot(deflection) + span))
}

/// Yield strength over stress, infinite when there is no stress.
#[must_use]
pub fn safety_factor(yield_strength: f64, stress: f64) -> f64 {
    if stress > 0.0 {
        yield_strength / stress
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::ImpactScenario;
    use crate::errors::ConfigViolation;

    #[test]
    fn overall_safe_is_conjunction_of_checks() {
        for bits in 0..8_u8 {
            let deflection_ok = bits & 1 != 0;
            let stress_ok = bits & 2 != 0;
            let strain_ok = bits & 4 != 0;
            let checks = DesignChecks::new(deflection_ok, stress_ok, strain_ok);
            assert_eq!(checks.overall_safe, bits == 7);
        }
    }

    #[test]
    fn chord_strain_is_zero_without_deflection() {
        assert_eq!(chord_strain(4.0, 0.0), 0.0);
        assert_relative_eq!(chord_strain(3.0, 4.0), 2.0 / 3.0);
    }

    #[test]
    fn chord_strain_keeps_precision_for_small_deflections() {
        let span = 4.0;
        for deflection in [1.0e-9, 1.0e-7, 5.0e-7, 1.0e-4] {
            assert_relative_eq!(
                chord_strain(span, deflection),
                deflection * deflection / (2.0 * span * span),
                max_relative = 1.0e-6
            );
        }
    }

    #[test]
    fn tiny_drop_still_stresses_the_net() {
        let mut config = NetConfig::default();
        config.impact = ImpactScenario::new(1.0e-3, 1.0e-9);
        let result = analyze(&config).expect("analysis runs");
        let response = result.structural_response;
        let span = config.geometry.net_span;
        assert!(response.max_deflection > 0.0);
        assert!(response.strain > 0.0);
        assert!(response.max_stress > 0.0);
        assert!(response.safety_factor.is_finite());
        assert_relative_eq!(
            response.strain,
            response.max_deflection.powi(2) / (2.0 * span * span),
            max_relative = 1.0e-6
        );
    }

    fn limits() -> DesignLimits {
        DesignLimits {
            max_deflection_limit: 0.6,
            min_safety_factor: 2.0,
            max_strain_limit: 0.1,
        }
    }

    fn response(max_deflection: f64, safety_factor: f64, strain: f64) -> StructuralResponse {
        StructuralResponse {
            max_deflection,
            max_stress: 1.0e6,
            safety_factor,
            strain,
        }
    }

    #[test]
    fn limits_are_inclusive() {
        let checks = limits().check(&response(0.6, 2.0, 0.1));
        assert_eq!(checks, DesignChecks::new(true, true, true));
        assert!(checks.overall_safe);
    }

    #[test]
    fn each_limit_fails_just_past_its_bound() {
        let limits = limits();
        assert_eq!(
            limits.check(&response(0.6 + 1.0e-9, 2.0, 0.1)),
            DesignChecks::new(false, true, true)
        );
        assert_eq!(
            limits.check(&response(0.6, 2.0 - 1.0e-9, 0.1)),
            DesignChecks::new(true, false, true)
        );
        assert_eq!(
            limits.check(&response(0.6, 2.0, 0.1 + 1.0e-9)),
            DesignChecks::new(true, true, false)
        );
        assert!(!limits.check(&response(0.7, 1.0, 0.2)).overall_safe);
    }

    #[test]
    fn tight_strain_limit_fails_analysis() {
        let mut config = NetConfig::default();
        config.material = MaterialProperties::default().with_strain_limit(1.0e-3);
        let result = analyze(&config).expect("analysis runs");
        let checks = result.design_checks;
        assert!(result.structural_response.strain > 1.0e-3);
        assert!(checks.deflection_ok);
        assert!(checks.stress_ok);
        assert!(!checks.strain_ok);
        assert!(!result.is_safe());
    }

    #[test]
    fn demanding_safety_factor_fails_analysis() {
        let mut config = NetConfig::default();
        config.geometry = config.geometry.with_safety_factor_min(50.0);
        let result = analyze(&config).expect("analysis runs");
        let checks = result.design_checks;
        assert!(result.structural_response.safety_factor < 50.0);
        assert!(checks.deflection_ok);
        assert!(!checks.stress_ok);
        assert!(checks.strain_ok);
        assert!(!result.is_safe());
    }

    #[test]
    fn safety_factor_is_infinite_only_without_stress() {
        assert_eq!(safety_factor(8.0e7, 0.0), f64::INFINITY);
        assert_relative_eq!(safety_factor(8.0e7, 4.0e7), 2.0);
        assert!(safety_factor(8.0e7, 1.0e-3).is_finite());
    }

    #[test]
    fn default_configuration_is_analysed() {
        let result = analyze(&NetConfig::default()).expect("analysis runs");
        let response = result.structural_response;
        assert!(response.max_deflection > 0.0);
        assert!(response.max_deflection < 2.0);
        assert!(response.safety_factor.is_finite() && response.safety_factor > 0.0);
        assert!(!result.solver.is_fallback());
        assert_relative_eq!(result.design_limits.max_deflection_limit, 0.6);
    }

    #[test]
    fn zero_fall_height_is_maximally_safe() {
        let mut config = NetConfig::default();
        config.impact = ImpactScenario::new(100.0, 0.0);
        let result = analyze(&config).expect("analysis runs");
        let response = result.structural_response;
        assert_eq!(response.max_deflection, 0.0);
        assert_eq!(response.strain, 0.0);
        assert_eq!(response.max_stress, 0.0);
        assert_eq!(response.safety_factor, f64::INFINITY);
        assert!(result.is_safe());
    }

    #[test]
    fn invalid_configuration_blocks_analysis() {
        let mut config = NetConfig::default();
        config.geometry.net_span = 0.0;
        config.impact.mass = 0.0;
        match analyze(&config) {
            Err(AnalysisError::InvalidConfiguration(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains(ConfigViolation::NonPositiveSpan));
                assert!(errors.contains(ConfigViolation::NonPositiveMass));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn zero_area_is_a_degenerate_input() {
        let mut config = NetConfig::default();
        config.material.cross_section_area = 0.0;
        assert!(matches!(
            analyze(&config),
            Err(AnalysisError::DegenerateInput(_))
        ));
    }

    #[test]
    fn result_serializes_with_stable_names() {
        let result = analyze(&NetConfig::default()).expect("analysis runs");
        let document = serde_json::to_value(&result).expect("serializes");
        for key in [
            "scenario_name",
            "input_parameters",
            "structural_response",
            "design_limits",
            "design_checks",
            "stiffness_coefficients",
            "solver",
        ] {
            assert!(document.get(key).is_some(), "{key} present");
        }
        assert_eq!(document["solver"]["path"], "converged");
        assert!(document["design_checks"]["overall_safe"].is_boolean());
    }
}
