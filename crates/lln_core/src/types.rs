//! Data model for simulation runs.
//!
//! [`TrialResult`] is the single entity of the pipeline. The remaining types
//! are validated inputs ([`Probability`], [`SampleSizes`]) and small
//! configuration enums shared by the simulator and the presenter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimulationError;

/// Sample sizes used by every run.
pub const STANDARD_SAMPLE_SIZES: [u64; 4] = [10, 50, 100, 1000];

/// The optional very large sample size.
pub const LARGE_SAMPLE_SIZE: u64 = 10_000_000;

/// Probability of success for a single Bernoulli trial, in [0, 1].
///
/// # Examples
///
/// ```rust
/// use lln_core::Probability;
///
/// let p = Probability::new(0.25).unwrap();
/// assert_eq!(p.value(), 0.25);
/// assert!(Probability::new(1.01).is_err());
/// assert!(Probability::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Creates a probability, rejecting NaN and values outside [0, 1].
    pub fn new(value: f64) -> Result<Self, SimulationError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SimulationError::InvalidProbability(value))
        }
    }

    /// Returns the raw value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Largest possible absolute deviation of a frequency from this probability.
    #[inline]
    pub fn max_deviation(self) -> f64 {
        self.0.max(1.0 - self.0)
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self(0.5)
    }
}

impl TryFrom<f64> for Probability {
    type Error = SimulationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Ordered, non-empty list of positive sample sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct SampleSizes(Vec<u64>);

impl SampleSizes {
    /// The standard set {10, 50, 100, 1000}.
    pub fn standard() -> Self {
        Self(STANDARD_SAMPLE_SIZES.to_vec())
    }

    /// The standard set, extended with 10,000,000 when `include_large` is set.
    pub fn with_large(include_large: bool) -> Self {
        let mut sizes = STANDARD_SAMPLE_SIZES.to_vec();
        if include_large {
            sizes.push(LARGE_SAMPLE_SIZE);
        }
        Self(sizes)
    }

    /// Validates a caller-supplied list. Order is preserved.
    pub fn custom(sizes: Vec<u64>) -> Result<Self, SimulationError> {
        if sizes.is_empty() {
            return Err(SimulationError::EmptySampleSizes);
        }
        if let Some(&zero) = sizes.iter().find(|&&n| n == 0) {
            return Err(SimulationError::InvalidSampleSize(zero));
        }
        Ok(Self(sizes))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest configured sample size.
    pub fn max(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Whether the large sample size is part of the set.
    pub fn includes_large(&self) -> bool {
        self.0.contains(&LARGE_SAMPLE_SIZE)
    }
}

impl Default for SampleSizes {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<u64>> for SampleSizes {
    type Error = SimulationError;

    fn try_from(sizes: Vec<u64>) -> Result<Self, Self::Error> {
        Self::custom(sizes)
    }
}

impl From<SampleSizes> for Vec<u64> {
    fn from(sizes: SampleSizes) -> Self {
        sizes.0
    }
}

/// How the run's random source is seeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeedPolicy {
    /// Deterministic: identical inputs reproduce identical draws.
    Fixed(u64),
    /// Seeded from process entropy; the drawn seed is still reported.
    #[default]
    Entropy,
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "fixed({})", seed),
            Self::Entropy => write!(f, "entropy"),
        }
    }
}

/// X-axis scale for charts keyed by `n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-10 logarithmic: equal spacing for equal multiplicative steps in `n`.
    Log10,
}

impl AxisScale {
    /// Maps a sample size onto the axis.
    #[inline]
    pub fn project(self, n: u64) -> f64 {
        match self {
            Self::Linear => n as f64,
            Self::Log10 => (n as f64).log10(),
        }
    }

    /// Axis title shown under charts.
    pub fn axis_title(self) -> &'static str {
        match self {
            Self::Linear => "n",
            Self::Log10 => "n (log scale, base 10)",
        }
    }
}

/// Outcome of simulating one sample size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialResult {
    /// Number of Bernoulli trials.
    pub n: u64,
    /// Success probability used for the draw.
    pub p: f64,
    /// Observed successes, in [0, n].
    pub successes: u64,
    /// successes / n
    pub frequency: f64,
    /// |frequency - p|
    pub absolute_deviation: f64,
}

impl TrialResult {
    /// Builds a result from a drawn success count, computing derived fields.
    ///
    /// `n` must be positive; [`SampleSizes`] guarantees this for the simulator.
    pub fn from_successes(n: u64, p: Probability, successes: u64) -> Self {
        debug_assert!(n > 0, "sample size must be positive");
        debug_assert!(successes <= n, "successes cannot exceed n");

        let frequency = successes as f64 / n as f64;
        Self {
            n,
            p: p.value(),
            successes,
            frequency,
            absolute_deviation: (frequency - p.value()).abs(),
        }
    }
}

/// Everything one simulation run produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRun {
    /// Seed the generator was initialised with (drawn from entropy if unseeded).
    pub seed: u64,
    /// Whether the seed was supplied by the caller.
    pub seeded: bool,
    /// Success probability.
    pub p: f64,
    /// One result per sample size, in input order.
    pub results: Vec<TrialResult>,
}

impl SimulationRun {
    /// Mean absolute deviation across all sample sizes.
    pub fn mean_deviation(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.results.iter().map(|r| r.absolute_deviation).sum::<f64>() / self.results.len() as f64
    }

    /// Successes in input order.
    pub fn successes(&self) -> Vec<u64> {
        self.results.iter().map(|r| r.successes).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_probability_bounds() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(1.0).is_ok());
        assert_eq!(
            Probability::new(-0.01),
            Err(SimulationError::InvalidProbability(-0.01))
        );
        assert!(Probability::new(f64::NAN).is_err());
        assert!(Probability::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_probability_max_deviation() {
        assert_relative_eq!(Probability::new(0.2).unwrap().max_deviation(), 0.8);
        assert_relative_eq!(Probability::new(0.5).unwrap().max_deviation(), 0.5);
        assert_relative_eq!(Probability::new(1.0).unwrap().max_deviation(), 1.0);
    }

    #[test]
    fn test_probability_serde_validates() {
        let p: Probability = serde_json::from_str("0.3").unwrap();
        assert_eq!(p.value(), 0.3);
        assert!(serde_json::from_str::<Probability>("1.3").is_err());
        assert_eq!(serde_json::to_string(&p).unwrap(), "0.3");
    }

    #[test]
    fn test_sample_sizes_standard_and_large() {
        assert_eq!(SampleSizes::standard().as_slice(), &[10, 50, 100, 1000]);
        assert_eq!(SampleSizes::with_large(false), SampleSizes::standard());

        let large = SampleSizes::with_large(true);
        assert_eq!(large.as_slice(), &[10, 50, 100, 1000, 10_000_000]);
        assert!(large.includes_large());
        assert_eq!(large.max(), LARGE_SAMPLE_SIZE);
    }

    #[test]
    fn test_sample_sizes_custom_validation() {
        assert_eq!(
            SampleSizes::custom(vec![]),
            Err(SimulationError::EmptySampleSizes)
        );
        assert_eq!(
            SampleSizes::custom(vec![10, 0, 5]),
            Err(SimulationError::InvalidSampleSize(0))
        );
        // Order is the caller's
        let sizes = SampleSizes::custom(vec![500, 5]).unwrap();
        assert_eq!(sizes.as_slice(), &[500, 5]);
        assert!(serde_json::from_str::<SampleSizes>("[1, 0]").is_err());
    }

    #[test]
    fn test_trial_result_from_successes() {
        let p = Probability::new(0.5).unwrap();
        let result = TrialResult::from_successes(10, p, 7);

        assert_eq!(result.frequency, 0.7);
        assert_relative_eq!(result.absolute_deviation, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_trial_result_serialises_camel_case() {
        let p = Probability::new(0.5).unwrap();
        let json = serde_json::to_string(&TrialResult::from_successes(10, p, 5)).unwrap();
        assert!(json.contains("\"absoluteDeviation\""));
        assert!(json.contains("\"successes\":5"));
    }

    #[test]
    fn test_axis_scale_projection() {
        assert_eq!(AxisScale::Linear.project(1000), 1000.0);
        assert_relative_eq!(AxisScale::Log10.project(1000), 3.0, epsilon = 1e-12);
        assert_relative_eq!(AxisScale::Log10.project(10_000_000), 7.0, epsilon = 1e-12);
        assert_eq!(AxisScale::Log10.axis_title(), "n (log scale, base 10)");
    }

    #[test]
    fn test_seed_policy_display() {
        assert_eq!(SeedPolicy::Fixed(42).to_string(), "fixed(42)");
        assert_eq!(SeedPolicy::Entropy.to_string(), "entropy");
    }

    #[test]
    fn test_simulation_run_mean_deviation() {
        let p = Probability::new(0.5).unwrap();
        let run = SimulationRun {
            seed: 1,
            seeded: true,
            p: 0.5,
            results: vec![
                TrialResult::from_successes(10, p, 7),
                TrialResult::from_successes(10, p, 5),
            ],
        };
        assert_relative_eq!(run.mean_deviation(), 0.1, epsilon = 1e-12);
        assert_eq!(run.successes(), vec![7, 5]);
    }
}
