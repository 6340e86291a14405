#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod analysis;
mod config;
mod errors;
mod presets;
mod projection;
mod solver;
mod stiffness;

pub use analysis::{
    analyze, chord_strain, safety_factor, AnalysisResult, DesignChecks, DesignLimits,
    StructuralResponse,
};
pub use config::{
    free_fall_velocity, AnalysisMode, AnalysisSettings, GeometryParameters, ImpactScenario,
    MaterialProperties, NetConfig, GRAVITY,
};
pub use errors::{AnalysisError, ConfigError, ConfigViolation, SolverFailure, ValidationErrors};
pub use presets::{MaterialPreset, ScenarioPreset};
pub use projection::{
    deflection_history, force_deflection_curve, safety_factor_bar, stress_sample, CurvePoint,
    DeflectionHistory, ForceDeflectionCurve, HistogramBin, ReportData, ResultProjection,
    SafetyFactorBar, StressSample, HISTOGRAM_BINS,
};
pub use solver::{linear_fallback, solve_deflection, DeflectionSolution, MAX_ITERATIONS, TOLERANCE};
pub use stiffness::{estimated_angle, StiffnessCoefficients, SEED_DEFLECTION_RATIO};
