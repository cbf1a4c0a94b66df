//! Trial Simulator.
//!
//! For each sample size `n`, in order, draws one Binomial(n, p) success count
//! from a single shared generator and derives the empirical frequency and its
//! absolute deviation from `p`.

use tracing::{debug, info};

use crate::config::RunConfig;
use crate::error::SimulationError;
use crate::rng::TrialRng;
use crate::types::{Probability, SampleSizes, SimulationRun, TrialResult};

/// Simulates one Binomial draw per sample size, consuming randomness from `rng`.
///
/// Results are returned in the order of `sample_sizes`.
///
/// # Examples
///
/// ```rust
/// use lln_core::{simulate, Probability, SampleSizes, TrialRng};
///
/// let mut rng = TrialRng::from_seed(42);
/// let p = Probability::new(0.5).unwrap();
/// let results = simulate(p, &SampleSizes::standard(), &mut rng).unwrap();
///
/// assert_eq!(results.len(), 4);
/// assert_eq!(results[0].n, 10);
/// assert!(results[0].successes <= 10);
/// ```
pub fn simulate(
    p: Probability,
    sample_sizes: &SampleSizes,
    rng: &mut TrialRng,
) -> Result<Vec<TrialResult>, SimulationError> {
    sample_sizes
        .as_slice()
        .iter()
        .map(|&n| {
            let successes = rng.gen_binomial(n, p)?;
            let result = TrialResult::from_successes(n, p, successes);
            debug!(
                n,
                successes,
                frequency = result.frequency,
                deviation = result.absolute_deviation,
                "Bernoulli trials drawn"
            );
            Ok(result)
        })
        .collect()
}

/// Runs a full simulation for `config`, building the generator from its seed policy.
pub fn run(config: &RunConfig) -> Result<SimulationRun, SimulationError> {
    let mut rng = TrialRng::from_policy(config.seed_policy());
    let p = config.probability();

    info!(
        seed = rng.seed(),
        seeded = rng.is_seeded(),
        p = p.value(),
        sample_sizes = config.sample_sizes().len(),
        "Running Bernoulli simulation"
    );

    let results = simulate(p, config.sample_sizes(), &mut rng)?;

    Ok(SimulationRun {
        seed: rng.seed(),
        seeded: rng.is_seeded(),
        p: p.value(),
        results,
    })
}
