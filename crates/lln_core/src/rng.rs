//! Pseudo-random number generator wrapper for trial simulations.
//!
//! [`TrialRng`] wraps `rand::rngs::StdRng` and remembers the seed it was
//! initialised with. Entropy-seeded generators draw their 64-bit seed from
//! the thread RNG first, so every run can be replayed from its reported seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution};

use crate::error::SimulationError;
use crate::types::{Probability, SeedPolicy};

/// Random source shared by all draws of one run.
///
/// # Examples
///
/// ```rust
/// use lln_core::{Probability, TrialRng};
///
/// let mut rng1 = TrialRng::from_seed(12345);
/// let mut rng2 = TrialRng::from_seed(12345);
///
/// let p = Probability::new(0.5).unwrap();
/// assert_eq!(
///     rng1.gen_binomial(100, p).unwrap(),
///     rng2.gen_binomial(100, p).unwrap()
/// );
/// ```
pub struct TrialRng {
    inner: StdRng,
    seed: u64,
    seeded: bool,
}

impl TrialRng {
    /// Creates a deterministic generator from the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
            seeded: true,
        }
    }

    /// Creates a generator seeded from process entropy.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
            seeded: false,
        }
    }

    /// Creates a generator according to `policy`.
    pub fn from_policy(policy: SeedPolicy) -> Self {
        match policy {
            SeedPolicy::Fixed(seed) => Self::from_seed(seed),
            SeedPolicy::Entropy => Self::from_entropy(),
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the seed was supplied by the caller rather than drawn from entropy.
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Draws the number of successes in `n` independent Bernoulli(`p`) trials.
    ///
    /// `p = 0` always yields 0 and `p = 1` always yields `n`.
    pub fn gen_binomial(&mut self, n: u64, p: Probability) -> Result<u64, SimulationError> {
        let binomial = Binomial::new(n, p.value())?;
        Ok(binomial.sample(&mut self.inner))
    }
}

impl std::fmt::Debug for TrialRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialRng")
            .field("seed", &self.seed)
            .field("seeded", &self.seeded)
            .finish_non_exhaustive()
    }
}
