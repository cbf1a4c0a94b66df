//! Run configuration.
//!
//! A run is parameterised by a probability, a list of sample sizes, a seed
//! policy and chart options. The two dashboard styles are [`Preset`]s of the
//! same pipeline: `Classic` (fixed seed, linear axis) and `LogScale`
//! (entropy seed, log10 axis, reference line at `p`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimulationError;
use crate::types::{AxisScale, Probability, SampleSizes, SeedPolicy};

/// Seed used by the classic preset when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Default success probability (slider start position).
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Slider step for the probability control.
pub const PROBABILITY_STEP: f64 = 0.01;

/// How results are charted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Scale of the `n` axis.
    pub x_scale: AxisScale,
    /// Overlay a horizontal line at `y = p` on the frequency chart.
    pub reference_line: bool,
    /// Render the deviation chart alongside the frequency chart.
    pub show_deviation_chart: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Preset::Classic.chart_options()
    }
}

/// Named combination of seed policy and chart styling.
///
/// Serialises as `classic` / `logScale`; deserialisation goes through
/// [`FromStr`], so every spelling the command lines accept works in JSON and
/// TOML as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum Preset {
    /// Reproducible runs (seed 42) on a linear axis.
    #[default]
    Classic,
    /// Fresh randomness every run on a log10 axis with a reference line.
    LogScale,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Classic, Preset::LogScale];

    /// Seed policy applied when the caller does not provide a seed.
    pub fn seed_policy(self) -> SeedPolicy {
        match self {
            Self::Classic => SeedPolicy::Fixed(DEFAULT_SEED),
            Self::LogScale => SeedPolicy::Entropy,
        }
    }

    pub fn chart_options(self) -> ChartOptions {
        match self {
            Self::Classic => ChartOptions {
                x_scale: AxisScale::Linear,
                reference_line: false,
                show_deviation_chart: true,
            },
            Self::LogScale => ChartOptions {
                x_scale: AxisScale::Log10,
                reference_line: true,
                show_deviation_chart: true,
            },
        }
    }

    /// Dashboard title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Classic => "Law of Large Numbers – Bernoulli Simulation",
            Self::LogScale => "Law of Large Numbers – Bernoulli Simulation (log-scale)",
        }
    }

    /// Explanatory caption shown under the charts.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Classic => {
                "The theoretical value is p. As n increases, the empirical frequency \
                 tends to get closer to p, illustrating the law of large numbers."
            }
            Self::LogScale => {
                "As n grows multiplicatively (×10), the empirical frequency typically \
                 approaches p, and the absolute deviation tends to decrease. The log-scale \
                 x-axis makes these orders of magnitude visually comparable."
            }
        }
    }

    /// The other preset.
    pub fn toggle(self) -> Self {
        match self {
            Self::Classic => Self::LogScale,
            Self::LogScale => Self::Classic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::LogScale => "logScale",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "classic" | "linear" => Ok(Self::Classic),
            "logscale" | "log" => Ok(Self::LogScale),
            _ => Err(format!(
                "Invalid preset: {}. Must be one of: classic, log-scale",
                s
            )),
        }
    }
}

impl TryFrom<String> for Preset {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated parameters of one simulation run.
///
/// Use [`RunConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use lln_core::config::{Preset, RunConfig};
/// use lln_core::{AxisScale, SeedPolicy};
///
/// let config = RunConfig::builder()
///     .preset(Preset::LogScale)
///     .probability(0.3)
///     .include_large_n(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed_policy(), SeedPolicy::Entropy);
/// assert_eq!(config.chart_options().x_scale, AxisScale::Log10);
/// assert_eq!(config.sample_sizes().len(), 5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    probability: Probability,
    sample_sizes: SampleSizes,
    seed_policy: SeedPolicy,
    chart_options: ChartOptions,
    preset: Preset,
}

impl RunConfig {
    #[inline]
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    #[inline]
    pub fn probability(&self) -> Probability {
        self.probability
    }

    #[inline]
    pub fn sample_sizes(&self) -> &SampleSizes {
        &self.sample_sizes
    }

    #[inline]
    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    #[inline]
    pub fn chart_options(&self) -> ChartOptions {
        self.chart_options
    }

    /// Preset the configuration was derived from.
    #[inline]
    pub fn preset(&self) -> Preset {
        self.preset
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            probability: Probability::default(),
            sample_sizes: SampleSizes::standard(),
            seed_policy: Preset::Classic.seed_policy(),
            chart_options: Preset::Classic.chart_options(),
            preset: Preset::Classic,
        }
    }
}

/// Builder for [`RunConfig`].
///
/// Unset fields fall back to the chosen preset (classic by default): an
/// explicit seed or chart options override what the preset would pick.
#[derive(Clone, Debug, Default)]
pub struct RunConfigBuilder {
    probability: Option<f64>,
    sample_sizes: Option<Vec<u64>>,
    include_large_n: bool,
    seed_policy: Option<SeedPolicy>,
    chart_options: Option<ChartOptions>,
    preset: Preset,
}

impl RunConfigBuilder {
    /// Sets the success probability, validated in [`build`](Self::build).
    #[inline]
    pub fn probability(mut self, p: f64) -> Self {
        self.probability = Some(p);
        self
    }

    /// Fixes the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed_policy = Some(SeedPolicy::Fixed(seed));
        self
    }

    /// Fixes the seed if one is given, otherwise keeps the preset's policy.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.seed_policy = Some(SeedPolicy::Fixed(seed));
        }
        self
    }

    #[inline]
    pub fn seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = Some(policy);
        self
    }

    /// Appends n = 10,000,000 to the standard sample sizes.
    ///
    /// Ignored when explicit sample sizes are set.
    #[inline]
    pub fn include_large_n(mut self, include: bool) -> Self {
        self.include_large_n = include;
        self
    }

    /// Replaces the standard sample sizes.
    #[inline]
    pub fn sample_sizes(mut self, sizes: Vec<u64>) -> Self {
        self.sample_sizes = Some(sizes);
        self
    }

    #[inline]
    pub fn chart_options(mut self, options: ChartOptions) -> Self {
        self.chart_options = Some(options);
        self
    }

    #[inline]
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::InvalidProbability`] if `p` is NaN or outside [0, 1]
    /// - [`SimulationError::EmptySampleSizes`] / [`SimulationError::InvalidSampleSize`]
    ///   for an empty or non-positive custom sample size list
    pub fn build(self) -> Result<RunConfig, SimulationError> {
        let probability = Probability::new(self.probability.unwrap_or(DEFAULT_PROBABILITY))?;
        let sample_sizes = match self.sample_sizes {
            Some(sizes) => SampleSizes::custom(sizes)?,
            None => SampleSizes::with_large(self.include_large_n),
        };

        Ok(RunConfig {
            probability,
            sample_sizes,
            seed_policy: self
                .seed_policy
                .unwrap_or_else(|| self.preset.seed_policy()),
            chart_options: self
                .chart_options
                .unwrap_or_else(|| self.preset.chart_options()),
            preset: self.preset,
        })
    }
}
