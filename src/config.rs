//! Configuration records describing the net, the impact and the analysis method.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigViolation};
use crate::presets::MaterialPreset;

/// Gravitational acceleration used throughout the crate in m/s².
pub const GRAVITY: f64 = 9.81;

/// Mechanical properties of the strand material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Display name of the material.
    pub name: String,
    /// Elastic (Young's) modulus in pascals.
    pub elastic_modulus: f64,
    /// Yield strength in pascals.
    pub yield_strength: f64,
    /// Density in kg/m³.
    pub density: f64,
    /// Cross-sectional area of a single strand in square metres.
    pub cross_section_area: f64,
    /// Largest admissible strain.
    #[serde(default = "default_strain_limit")]
    pub strain_limit: f64,
}

impl MaterialProperties {
    /// Create a material with the default strain limit of 0.1.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        elastic_modulus: f64,
        yield_strength: f64,
        density: f64,
        cross_section_area: f64,
    ) -> Self {
        Self {
            name: name.into(),
            elastic_modulus,
            yield_strength,
            density,
            cross_section_area,
            strain_limit: default_strain_limit(),
        }
    }

    /// Replace the strain limit.
    #[must_use]
    pub fn with_strain_limit(mut self, strain_limit: f64) -> Self {
        self.strain_limit = strain_limit;
        self
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        MaterialPreset::Nylon.properties()
    }
}

/// Layout of the net between its two supports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryParameters {
    /// Span between supports in metres.
    pub net_span: f64,
    /// Number of load-bearing strands.
    pub num_strands: u32,
    /// Installation angle in degrees. Carried through but not used by the stiffness model.
    #[serde(default)]
    pub installation_angle: f64,
    /// Minimum acceptable factor of safety.
    #[serde(default = "default_safety_factor_min")]
    pub safety_factor_min: f64,
    /// Largest allowed deflection as a fraction of the span.
    #[serde(default = "default_max_deflection_ratio")]
    pub max_deflection_ratio: f64,
}

impl GeometryParameters {
    /// Create a geometry with default angle and design limits.
    #[must_use]
    pub fn new(net_span: f64, num_strands: u32) -> Self {
        Self {
            net_span,
            num_strands,
            installation_angle: 0.0,
            safety_factor_min: default_safety_factor_min(),
            max_deflection_ratio: default_max_deflection_ratio(),
        }
    }

    /// Replace the minimum acceptable factor of safety.
    #[must_use]
    pub fn with_safety_factor_min(mut self, safety_factor_min: f64) -> Self {
        self.safety_factor_min = safety_factor_min;
        self
    }

    /// Replace the allowed deflection ratio.
    #[must_use]
    pub fn with_max_deflection_ratio(mut self, max_deflection_ratio: f64) -> Self {
        self.max_deflection_ratio = max_deflection_ratio;
        self
    }

    /// Deflection limit in metres.
    #[must_use]
    pub fn deflection_limit(&self) -> f64 {
        self.max_deflection_ratio * self.net_span
    }
}

impl Default for GeometryParameters {
    fn default() -> Self {
        Self::new(4.0, 50)
    }
}

/// The falling body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ImpactDocument")]
pub struct ImpactScenario {
    /// Falling mass in kilograms.
    pub mass: f64,
    /// Free-fall height in metres.
    pub fall_height: f64,
    /// Velocity at impact in m/s.
    pub impact_velocity: f64,
}

impl ImpactScenario {
    /// Create a scenario whose impact velocity follows from free fall through `fall_height`.
    ///
    /// # Examples
    /// ```
    /// use netsafe::ImpactScenario;
    ///
    /// let impact = ImpactScenario::new(80.0, 2.0);
    /// assert!((impact.impact_velocity - 6.264).abs() < 1.0e-3);
    /// ```
    #[must_use]
    pub fn new(mass: f64, fall_height: f64) -> Self {
        Self {
            mass,
            fall_height,
            impact_velocity: free_fall_velocity(fall_height),
        }
    }

    /// Override the impact velocity. The energy balance still uses `m·g·h`.
    #[must_use]
    pub fn with_impact_velocity(mut self, impact_velocity: f64) -> Self {
        self.impact_velocity = impact_velocity;
        self
    }

    /// Potential energy released by the fall in joules.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.mass * GRAVITY * self.fall_height
    }
}

impl Default for ImpactScenario {
    fn default() -> Self {
        Self::new(100.0, 3.0)
    }
}

/// Serialized form of [`ImpactScenario`] where the velocity may be omitted.
#[derive(Deserialize)]
struct ImpactDocument {
    /// Falling mass in kilograms.
    mass: f64,
    /// Free-fall height in metres.
    fall_height: f64,
    /// Explicit impact velocity in m/s, derived from the height when absent.
    #[serde(default)]
    impact_velocity: Option<f64>,
}

impl From<ImpactDocument> for ImpactScenario {
    fn from(document: ImpactDocument) -> Self {
        let scenario = Self::new(document.mass, document.fall_height);
        match document.impact_velocity {
            Some(velocity) => scenario.with_impact_velocity(velocity),
            None => scenario,
        }
    }
}

/// Analysis method. Every mode is currently solved as a single fall impact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Static load.
    Static,
    /// Dynamic load.
    Dynamic,
    /// Single fall impact.
    #[default]
    Impact,
}

impl AnalysisMode {
    /// Lowercase key used in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Impact => "impact",
        }
    }
}

/// Solver tuning knobs. They are recorded with the configuration but do not alter the solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Analysis method.
    #[serde(default)]
    pub analysis_type: AnalysisMode,
    /// Iteration budget for future solvers.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Convergence tolerance for future solvers.
    #[serde(default = "default_convergence_tolerance")]
    pub convergence_tolerance: f64,
    /// Whether damping should be modelled.
    #[serde(default)]
    pub include_damping: bool,
    /// Damping ratio.
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            analysis_type: AnalysisMode::Impact,
            max_iterations: default_max_iterations(),
            convergence_tolerance: default_convergence_tolerance(),
            include_damping: false,
            damping_ratio: default_damping_ratio(),
        }
    }
}

/// Complete description of one safety-net analysis.
///
/// Missing sections in a document fall back to the matching section of
/// [`NetConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Label carried through to the results.
    pub scenario_name: String,
    /// Strand material.
    pub material: MaterialProperties,
    /// Net layout.
    pub geometry: GeometryParameters,
    /// Falling body.
    pub impact: ImpactScenario,
    /// Analysis method.
    pub analysis: AnalysisSettings,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            scenario_name: "default".to_owned(),
            material: MaterialProperties::default(),
            geometry: GeometryParameters::default(),
            impact: ImpactScenario::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl NetConfig {
    /// Assemble a configuration from its parts using default analysis settings.
    #[must_use]
    pub fn new(
        scenario_name: impl Into<String>,
        material: MaterialProperties,
        geometry: GeometryParameters,
        impact: ImpactScenario,
    ) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            material,
            geometry,
            impact,
            analysis: AnalysisSettings::default(),
        }
    }

    /// Check every constraint and return all that are violated.
    ///
    /// An empty list means the configuration can be analysed.
    ///
    /// # Examples
    /// ```
    /// use netsafe::{ConfigViolation, NetConfig};
    ///
    /// let mut config = NetConfig::default();
    /// config.geometry.net_span = 0.0;
    /// config.impact.mass = 0.0;
    /// let violations = config.validate();
    /// assert!(violations.contains(&ConfigViolation::NonPositiveSpan));
    /// assert!(violations.contains(&ConfigViolation::NonPositiveMass));
    /// ```
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigViolation> {
        let checks = [
            (
                is_positive(self.material.elastic_modulus),
                ConfigViolation::NonPositiveElasticModulus,
            ),
            (
                is_positive(self.material.yield_strength),
                ConfigViolation::NonPositiveYieldStrength,
            ),
            (
                is_positive(self.geometry.net_span),
                ConfigViolation::NonPositiveSpan,
            ),
            (self.geometry.num_strands > 0, ConfigViolation::NoStrands),
            (
                is_positive(self.impact.mass),
                ConfigViolation::NonPositiveMass,
            ),
            (
                is_non_negative(self.impact.fall_height),
                ConfigViolation::NegativeFallHeight,
            ),
        ];
        checks
            .into_iter()
            .filter_map(|(ok, violation)| (!ok).then_some(violation))
            .collect()
    }

    /// Convert the configuration into a structured document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails, which only happens for
    /// non-string map keys and so is not expected here.
    pub fn to_document(&self) -> Result<serde_json::Value, ConfigError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Build a configuration from a structured document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when required fields are missing or have the wrong type.
    pub fn from_document(document: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(document)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Multi-line description of the configuration for console output.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut output = String::new();
        let title = format!("Safety Net Configuration: {}", self.scenario_name);
        writeln!(&mut output, "{title}").expect("writing to string cannot fail");
        writeln!(&mut output, "{}", "=".repeat(title.chars().count()))
            .expect("writing to string cannot fail");
        writeln!(&mut output, "Material: {}", self.material.name)
            .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  - Elastic Modulus: {:.2e} Pa",
            self.material.elastic_modulus
        )
        .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  - Yield Strength: {:.2e} Pa",
            self.material.yield_strength
        )
        .expect("writing to string cannot fail");
        writeln!(&mut output, "  - Density: {} kg/m³", self.material.density)
            .expect("writing to string cannot fail");
        writeln!(&mut output).expect("writing to string cannot fail");
        writeln!(&mut output, "Geometry:").expect("writing to string cannot fail");
        writeln!(&mut output, "  - Net Span: {} m", self.geometry.net_span)
            .expect("writing to string cannot fail");
        writeln!(&mut output, "  - Strands: {}", self.geometry.num_strands)
            .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  - Safety Factor Min: {}",
            self.geometry.safety_factor_min
        )
        .expect("writing to string cannot fail");
        writeln!(&mut output).expect("writing to string cannot fail");
        writeln!(&mut output, "Impact:").expect("writing to string cannot fail");
        writeln!(&mut output, "  - Mass: {} kg", self.impact.mass)
            .expect("writing to string cannot fail");
        writeln!(&mut output, "  - Fall Height: {} m", self.impact.fall_height)
            .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  - Impact Velocity: {:.2} m/s",
            self.impact.impact_velocity
        )
        .expect("writing to string cannot fail");
        writeln!(&mut output).expect("writing to string cannot fail");
        write!(
            &mut output,
            "Analysis: {}",
            self.analysis.analysis_type.as_str()
        )
        .expect("writing to string cannot fail");
        output
    }
}

/// Velocity reached after free fall from `fall_height`.
#[must_use]
pub fn free_fall_velocity(fall_height: f64) -> f64 {
    (2.0 * GRAVITY * fall_height).sqrt()
}

/// NaN fails this check.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// NaN fails this check.
fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Default strain limit.
fn default_strain_limit() -> f64 {
    0.1
}

/// Default minimum safety factor.
fn default_safety_factor_min() -> f64 {
    2.0
}

/// Default deflection limit as a fraction of the span.
fn default_max_deflection_ratio() -> f64 {
    0.15
}

/// Default iteration budget.
fn default_max_iterations() -> u32 {
    100
}

/// Default convergence tolerance.
fn default_convergence_tolerance() -> f64 {
    1.0e-6
}

/// Default damping ratio.
fn default_damping_ratio() -> f64 {
    0.05
}
