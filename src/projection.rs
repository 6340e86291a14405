//! Plot-ready series derived from an [`AnalysisResult`].
//!
//! Every function here reads the result without re-running the solve, so the series can be
//! rebuilt at any time. Rendering is left to the consumer.

use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::config::NetConfig;

/// Number of samples in the force–deflection and deflection–time series.
pub const SERIES_POINTS: usize = 100;

/// Largest deflection in the force–deflection sweep, as a fraction of the span.
pub const SWEEP_SPAN_RATIO: f64 = 0.3;

/// Length of the deflection–time window in seconds.
pub const RESPONSE_WINDOW: f64 = 2.0;

/// Standard deviation of the stress scatter relative to the peak stress.
pub const STRESS_SCATTER: f64 = 0.1;

/// Upper clip of the stress scatter relative to the yield strength.
pub const STRESS_CLIP_RATIO: f64 = 1.2;

/// Bin count used for the stress histogram in reports.
pub const HISTOGRAM_BINS: usize = 20;

/// A single (deflection, force) pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Deflection in metres.
    pub deflection: f64,
    /// Force in newtons.
    pub force: f64,
}

/// The cubic force law swept from zero to 30 % of the span.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForceDeflectionCurve {
    /// Deflection samples in metres.
    pub deflection: Vec<f64>,
    /// Force at each deflection sample in newtons.
    pub force: Vec<f64>,
    /// The solved peak deflection and the force it takes.
    pub solved: CurvePoint,
}

/// Sweep the force law used by the analysis.
#[must_use]
pub fn force_deflection_curve(result: &AnalysisResult) -> ForceDeflectionCurve {
    let stiffness = result.stiffness_coefficients;
    let span = result.input_parameters.geometry.net_span;
    let deflection = Array1::linspace(0.0, SWEEP_SPAN_RATIO * span, SERIES_POINTS);
    let force = deflection.mapv(|delta| stiffness.force(delta));
    let max_deflection = result.structural_response.max_deflection;
    ForceDeflectionCurve {
        deflection: deflection.to_vec(),
        force: force.to_vec(),
        solved: CurvePoint {
            deflection: max_deflection,
            force: stiffness.force(max_deflection),
        },
    }
}

/// Calculated safety factor against the required minimum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SafetyFactorBar {
    /// Calculated safety factor; `null` in JSON when infinite.
    pub safety_factor: f64,
    /// Required minimum drawn as a threshold line.
    pub minimum_required: f64,
    /// Whether the bar clears the threshold.
    pub passes: bool,
}

/// Bar/threshold pair for the safety factor chart.
#[must_use]
pub fn safety_factor_bar(result: &AnalysisResult) -> SafetyFactorBar {
    SafetyFactorBar {
        safety_factor: result.structural_response.safety_factor,
        minimum_required: result.design_limits.min_safety_factor,
        passes: result.design_checks.stress_ok,
    }
}

/// Illustrative scatter of strand stresses around the peak stress.
///
/// The values are random draws, not a per-strand computation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StressSample {
    /// One stress per strand in pascals.
    pub stresses: Vec<f64>,
    /// Yield strength in pascals, drawn as a reference line.
    pub yield_strength: f64,
}

impl StressSample {
    /// Stresses converted to megapascals.
    #[must_use]
    pub fn stresses_mpa(&self) -> Vec<f64> {
        self.stresses.iter().map(|stress| stress / 1.0e6).collect()
    }

    /// Count the stresses in `bins` equal-width bins spanning the sample.
    ///
    /// A sample with no spread collapses into a single bin.
    #[must_use]
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        if bins == 0 || self.stresses.is_empty() {
            return Vec::new();
        }
        let min = self.stresses.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .stresses
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / bins as f64;
        if width <= 0.0 {
            return vec![HistogramBin {
                lower: min,
                upper: max,
                count: self.stresses.len(),
            }];
        }

        let mut counts = vec![0_usize; bins];
        for stress in &self.stresses {
            let idx = (((stress - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .map(|(idx, count)| HistogramBin {
                lower: min + width * idx as f64,
                upper: min + width * (idx + 1) as f64,
                count,
            })
            .collect()
    }
}

/// One histogram bar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Lower edge in pascals.
    pub lower: f64,
    /// Upper edge in pascals.
    pub upper: f64,
    /// Number of strands in the bin.
    pub count: usize,
}

/// Draw one stress per strand from a normal distribution centred on the peak stress.
///
/// The spread is 10 % of the peak stress and draws are clipped to `[0, 1.2·σy]`.
/// Pass a seeded generator for reproducible output.
pub fn stress_sample<R: Rng + ?Sized>(result: &AnalysisResult, rng: &mut R) -> StressSample {
    let mean = result.structural_response.max_stress;
    let yield_strength = result.input_parameters.material.yield_strength;
    let count = result.input_parameters.geometry.num_strands as usize;
    let upper = STRESS_CLIP_RATIO * yield_strength;

    let stresses = match Normal::new(mean, STRESS_SCATTER * mean) {
        Ok(normal) => (0..count)
            .map(|_| num::clamp(normal.sample(&mut *rng), 0.0, upper))
            .collect(),
        Err(_) => vec![num::clamp(mean, 0.0, upper); count],
    };
    StressSample {
        stresses,
        yield_strength,
    }
}

/// Deflection of the impact point over time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeflectionHistory {
    /// Time samples in seconds.
    pub time: Vec<f64>,
    /// Deflection at each time sample in metres.
    pub deflection: Vec<f64>,
}

/// Illustrative decaying response `δ(t) = δmax·(1 − e^(−5t))·e^(−0.5t)` over two seconds.
///
/// The curve does not use the configured damping ratio.
#[must_use]
pub fn deflection_history(result: &AnalysisResult) -> DeflectionHistory {
    let max_deflection = result.structural_response.max_deflection;
    let time = Array1::linspace(0.0, RESPONSE_WINDOW, SERIES_POINTS);
    let deflection =
        time.mapv(|t| max_deflection * (1.0 - (-5.0 * t).exp()) * (-0.5 * t).exp());
    DeflectionHistory {
        time: time.to_vec(),
        deflection: deflection.to_vec(),
    }
}

/// All plot series for one result under stable names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultProjection {
    /// Force–deflection sweep with the solved point.
    pub force_deflection: ForceDeflectionCurve,
    /// Safety factor bar and threshold.
    pub safety_factor: SafetyFactorBar,
    /// Per-strand stress scatter.
    pub stress_distribution: StressSample,
    /// Deflection–time response.
    pub deflection_time: DeflectionHistory,
}

impl ResultProjection {
    /// Build every series, drawing the stress scatter from `rng`.
    pub fn new<R: Rng + ?Sized>(result: &AnalysisResult, rng: &mut R) -> Self {
        Self {
            force_deflection: force_deflection_curve(result),
            safety_factor: safety_factor_bar(result),
            stress_distribution: stress_sample(result, rng),
            deflection_time: deflection_history(result),
        }
    }

    /// Build every series with a reproducible stress scatter.
    ///
    /// # Examples
    /// ```
    /// use netsafe::{analyze, NetConfig, ResultProjection};
    ///
    /// let result = analyze(&NetConfig::default()).unwrap();
    /// let first = ResultProjection::seeded(&result, 7);
    /// let second = ResultProjection::seeded(&result, 7);
    /// assert_eq!(first, second);
    /// ```
    #[must_use]
    pub fn seeded(result: &AnalysisResult, seed: u64) -> Self {
        Self::new(result, &mut ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Everything a report renderer needs for one analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportData {
    /// Label of the analysed scenario.
    pub scenario_name: String,
    /// Configuration that was analysed.
    pub configuration: NetConfig,
    /// Analysis outcome.
    pub results: AnalysisResult,
    /// Plot series.
    pub plots: ResultProjection,
}

impl ReportData {
    /// Bundle a result with its plot series.
    #[must_use]
    pub fn new(result: AnalysisResult, plots: ResultProjection) -> Self {
        Self {
            scenario_name: result.scenario_name.clone(),
            configuration: result.input_parameters.clone(),
            results: result,
            plots,
        }
    }
}
