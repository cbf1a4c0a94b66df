//! Law of Large Numbers TUI entry point

use anyhow::Result;
use clap::Parser;
use lln_core::{Preset, Probability};
use lln_tui::prelude::*;
use std::path::{Path, PathBuf};

/// Law of Large Numbers - Bernoulli simulation in the terminal
#[derive(Parser, Debug)]
#[command(name = "lln-tui")]
#[command(version, about, long_about = None)]
struct Args {
    /// Success probability in [0, 1]
    #[arg(long, value_name = "P")]
    p: Option<f64>,

    /// Fixed seed (implies reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Include n = 10,000,000
    #[arg(long)]
    large: bool,

    /// Starting preset (classic, log-scale)
    #[arg(long, default_value_t = Preset::Classic)]
    preset: Preset,

    /// Run once, print the results table and exit
    #[arg(long)]
    print: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn initial_state(&self) -> Result<DashboardState> {
        let mut state = DashboardState::new(self.preset);
        if let Some(p) = self.p {
            state.probability = Probability::new(p)?;
        }
        if let Some(seed) = self.seed {
            state.seed = seed;
            state.seed_fixed = true;
        }
        state.include_large_n = self.large;
        Ok(state)
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_file_tracing(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_file_tracing(path)?;
    }

    let mut state = args.initial_state()?;

    if args.print {
        state.run_simulation();
        let output = state
            .output
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("{}", state.status))?;
        println!("{}", state.preset.title());
        println!("p = {} | {}", state.probability, state.status);
        println!();
        print!("{}", output.table.to_text());
        return Ok(());
    }

    let mut app = TuiApp::new(state)?;
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lln_core::SeedPolicy;

    #[test]
    fn test_flags_seed_initial_state() {
        let args = Args::try_parse_from([
            "lln-tui", "--p", "0.3", "--seed", "7", "--large", "--preset", "log-scale",
        ])
        .unwrap();
        let state = args.initial_state().unwrap();

        assert_eq!(state.preset, Preset::LogScale);
        assert_eq!(state.probability.value(), 0.3);
        assert_eq!(state.seed_policy(), SeedPolicy::Fixed(7));
        assert!(state.include_large_n);
    }

    #[test]
    fn test_defaults_follow_preset() {
        let args = Args::try_parse_from(["lln-tui", "--preset", "logScale"]).unwrap();
        let state = args.initial_state().unwrap();
        assert_eq!(state.seed_policy(), SeedPolicy::Entropy);

        let args = Args::try_parse_from(["lln-tui"]).unwrap();
        assert_eq!(args.initial_state().unwrap().seed_policy(), SeedPolicy::Fixed(42));
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        let args = Args::try_parse_from(["lln-tui", "--p", "1.5"]).unwrap();
        assert!(args.initial_state().is_err());
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        assert!(Args::try_parse_from(["lln-tui", "--preset", "spiral"]).is_err());
    }
}
