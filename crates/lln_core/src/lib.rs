//! # Law of Large Numbers Core
//!
//! Bernoulli trial simulation and result presentation.
//!
//! A run draws one Binomial(n, p) count per configured sample size, derives
//! the empirical frequency and its absolute deviation from `p`, and hands the
//! ordered results to a presenter that produces a table and line-chart data.
//!
//! ## Module Structure
//!
//! - [`error`]: Typed errors for invalid probabilities and sample sizes
//! - [`rng`]: Seeded PRNG wrapper with entropy fallback
//! - [`config`]: Run configuration, presets, and the validated builder
//! - [`simulator`]: The Trial Simulator
//! - [`presenter`]: Table formatting and chart data (ratatui points, Chart.js JSON)
//!
//! ## Usage Example
//!
//! ```rust
//! use lln_core::config::{Preset, RunConfig};
//! use lln_core::presenter::ResultTable;
//! use lln_core::simulator;
//!
//! let config = RunConfig::builder()
//!     .probability(0.5)
//!     .seed(42)
//!     .build()
//!     .expect("valid configuration");
//!
//! let run = simulator::run(&config).expect("simulation succeeds");
//! assert_eq!(run.results.len(), 4);
//!
//! let table = ResultTable::from_results(&run.results);
//! assert_eq!(table.columns, ["n", "result", "|result - p|"]);
//! ```

pub mod config;
pub mod error;
pub mod presenter;
pub mod rng;
pub mod simulator;
pub mod types;

pub use config::{ChartOptions, Preset, RunConfig, RunConfigBuilder};
pub use error::SimulationError;
pub use rng::TrialRng;
pub use simulator::{run, simulate};
pub use types::{AxisScale, Probability, SampleSizes, SeedPolicy, SimulationRun, TrialResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
