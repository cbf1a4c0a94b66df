//! Dashboard state and key handling.
//!
//! Kept apart from the terminal so key bindings and run triggering can be
//! exercised without a TTY.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lln_core::config::{DEFAULT_SEED, PROBABILITY_STEP};
use lln_core::presenter::{build_charts, ChartSpec, ResultTable, SeriesKind};
use lln_core::{
    AxisScale, ChartOptions, Preset, Probability, RunConfig, SeedPolicy, SimulationError,
    SimulationRun,
};

/// Slider steps moved by a coarse adjustment.
const COARSE_STEPS: i64 = 10;

/// Available screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Results table
    Table,
    /// Empirical frequency vs. n
    Frequency,
    /// Absolute deviation vs. n
    Deviation,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Table, Screen::Frequency, Screen::Deviation];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Table => "Results",
            Self::Frequency => "Frequency",
            Self::Deviation => "Deviation",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Table => Self::Frequency,
            Self::Frequency => Self::Deviation,
            Self::Deviation => Self::Table,
        }
    }
}

/// Presentation of the most recent run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub run: SimulationRun,
    pub preset: Preset,
    pub table: ResultTable,
    pub charts: Vec<ChartSpec>,
}

impl RunOutput {
    fn from_run(run: SimulationRun, config: &RunConfig) -> Self {
        let table = ResultTable::from_results(&run.results);
        let charts = build_charts(&run.results, run.p, &config.chart_options());
        Self {
            run,
            preset: config.preset(),
            table,
            charts,
        }
    }

    /// Chart whose primary series has the given kind.
    pub fn chart(&self, kind: SeriesKind) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.series(kind).is_some())
    }
}

/// Parameter collector plus the last run's output.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub probability: Probability,
    pub seed: u64,
    pub seed_fixed: bool,
    pub include_large_n: bool,
    pub preset: Preset,
    pub chart_options: ChartOptions,
    pub screen: Screen,
    pub output: Option<RunOutput>,
    pub status: String,
    pub should_quit: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Preset::Classic)
    }
}

impl DashboardState {
    /// Fresh state with the preset's seed policy and chart options.
    pub fn new(preset: Preset) -> Self {
        let mut state = Self {
            probability: Probability::default(),
            seed: DEFAULT_SEED,
            seed_fixed: true,
            include_large_n: false,
            preset,
            chart_options: preset.chart_options(),
            screen: Screen::Table,
            output: None,
            status: "Press Enter to run the simulation".to_string(),
            should_quit: false,
        };
        state.apply_preset(preset);
        state
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        if self.seed_fixed {
            SeedPolicy::Fixed(self.seed)
        } else {
            SeedPolicy::Entropy
        }
    }

    /// Run configuration for the current controls.
    pub fn run_config(&self) -> Result<RunConfig, SimulationError> {
        RunConfig::builder()
            .probability(self.probability.value())
            .seed_policy(self.seed_policy())
            .include_large_n(self.include_large_n)
            .chart_options(self.chart_options)
            .preset(self.preset)
            .build()
    }

    /// Runs the simulation and stores its presentation.
    pub fn run_simulation(&mut self) {
        let outcome = self
            .run_config()
            .and_then(|config| lln_core::run(&config).map(|run| (run, config)));

        match outcome {
            Ok((run, config)) => {
                self.status = if run.seeded {
                    format!("Ran with seed {}", run.seed)
                } else {
                    format!("Unseeded run (replay with seed {})", run.seed)
                };
                self.output = Some(RunOutput::from_run(run, &config));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Simulation failed");
                self.status = format!("Error: {}", e);
            }
        }
    }

    /// Moves the probability by whole slider steps, clamped to [0, 1].
    pub fn adjust_probability(&mut self, steps: i64) {
        let max_steps = (1.0 / PROBABILITY_STEP).round() as i64;
        let current = (self.probability.value() / PROBABILITY_STEP).round() as i64;
        let next = (current + steps).clamp(0, max_steps);
        if let Ok(p) = Probability::new(next as f64 / max_steps as f64) {
            self.probability = p;
        }
    }

    /// Switches between a fixed seed and fresh entropy.
    ///
    /// Pinning the seed after an unseeded run keeps that run's seed so it
    /// can be replayed.
    pub fn toggle_seed_policy(&mut self) {
        if !self.seed_fixed {
            if let Some(output) = self.output.as_ref().filter(|o| !o.run.seeded) {
                self.seed = output.run.seed;
            }
        }
        self.seed_fixed = !self.seed_fixed;
    }

    pub fn toggle_log_axis(&mut self) {
        self.chart_options.x_scale = match self.chart_options.x_scale {
            AxisScale::Linear => AxisScale::Log10,
            AxisScale::Log10 => AxisScale::Linear,
        };
    }

    /// Switches preset, resetting seed policy and chart options to its defaults.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.chart_options = preset.chart_options();
        match preset.seed_policy() {
            SeedPolicy::Fixed(seed) => {
                self.seed = seed;
                self.seed_fixed = true;
            }
            SeedPolicy::Entropy => self.seed_fixed = false,
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
        let step = if coarse { COARSE_STEPS } else { 1 };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.adjust_probability(-step),
            KeyCode::Right => self.adjust_probability(step),
            KeyCode::PageDown => self.adjust_probability(-COARSE_STEPS),
            KeyCode::PageUp => self.adjust_probability(COARSE_STEPS),
            KeyCode::Char('l') => self.include_large_n = !self.include_large_n,
            KeyCode::Char('s') => self.toggle_seed_policy(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.seed = self.seed.wrapping_add(1),
            KeyCode::Char('-') => self.seed = self.seed.wrapping_sub(1),
            KeyCode::Char('x') => self.toggle_log_axis(),
            KeyCode::Char('g') => self.chart_options.reference_line = !self.chart_options.reference_line,
            KeyCode::Char('p') => self.apply_preset(self.preset.toggle()),
            KeyCode::Enter | KeyCode::Char('r') => self.run_simulation(),
            KeyCode::Char('1') => self.screen = Screen::Table,
            KeyCode::Char('2') => self.screen = Screen::Frequency,
            KeyCode::Char('3') => self.screen = Screen::Deviation,
            KeyCode::Tab => self.screen = self.screen.next(),
            _ => {}
        }
    }
}
