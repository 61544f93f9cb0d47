//! Configuration management for hard-rod simulations
//!
//! This module handles configuration structures, defaults, and the
//! conversion into engine and sweep parameters.

mod args;

pub use args::Args;

use crate::error::Result;
use crate::gcmc::SimulationParams;
use crate::recorder::default_sample_interval;
use crate::sweep::{activity_grid, SweepSpec};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub lattice: LatticeConfig,
    pub rod_length: Option<usize>,
    pub activity: Option<f64>,
    pub steps: Option<u64>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub output: OutputConfig,
    pub sweep: Option<SweepConfig>,
}

/// Lattice geometry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatticeConfig {
    pub rows: usize,
    pub columns: usize,
}

/// Where and how often a single chain writes its results
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub sample_interval: Option<u64>,
    pub table: Option<String>,
    pub vertical_dump: Option<String>,
    pub horizontal_dump: Option<String>,
}

impl OutputConfig {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self, steps: u64) -> Self {
        if self.sample_interval.is_none() {
            self.sample_interval = Some(default_sample_interval(steps));
        }
        if self.table.is_none() {
            self.table = Some("dataplot.dat".to_string());
        }
        if self.vertical_dump.is_none() {
            self.vertical_dump = Some("2dplotv.txt".to_string());
        }
        if self.horizontal_dump.is_none() {
            self.horizontal_dump = Some("2dploth.txt".to_string());
        }
        self
    }
}

/// Activity sweep parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    pub activity_start: Option<f64>,
    pub activity_end: Option<f64>,
    pub points: Option<usize>,
    /// Production steps per chain
    pub steps: Option<u64>,
    pub equilibration_steps: Option<u64>,
    pub sample_interval: Option<u64>,
    pub table: Option<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            activity_start: Some(0.1),
            activity_end: Some(10.0),
            points: Some(50),
            steps: None,
            equilibration_steps: None,
            sample_interval: None,
            table: Some("dataNvsZ.dat".to_string()),
        }
    }
}

impl SweepConfig {
    /// Apply default values to any missing parameters.
    ///
    /// Chain lengths fall back to the single-chain step count, with a
    /// tenth of it spent on equilibration.
    pub fn with_defaults(mut self, steps: u64) -> Self {
        let defaults = Self::default();
        if self.activity_start.is_none() {
            self.activity_start = defaults.activity_start;
        }
        if self.activity_end.is_none() {
            self.activity_end = defaults.activity_end;
        }
        if self.points.is_none() {
            self.points = defaults.points;
        }
        if self.steps.is_none() {
            self.steps = Some(steps);
        }
        if self.equilibration_steps.is_none() {
            self.equilibration_steps = Some(self.steps.unwrap_or(steps) / 10);
        }
        if self.sample_interval.is_none() {
            self.sample_interval = Some(default_sample_interval(self.steps.unwrap_or(steps)));
        }
        if self.table.is_none() {
            self.table = defaults.table;
        }
        self
    }
}

impl Config {
    pub const DEFAULT_ROD_LENGTH: usize = 1;
    pub const DEFAULT_ACTIVITY: f64 = 1.0;
    pub const DEFAULT_STEPS: u64 = 1_000_000;

    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yml::Error> {
        serde_yml::from_str::<Config>(content)
    }

    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        if self.rod_length.is_none() {
            self.rod_length = Some(Self::DEFAULT_ROD_LENGTH);
        }
        if self.activity.is_none() {
            self.activity = Some(Self::DEFAULT_ACTIVITY);
        }
        if self.steps.is_none() {
            self.steps = Some(Self::DEFAULT_STEPS);
        }
        let steps = self.steps();
        self.output = self.output.with_defaults(steps);
        if let Some(sweep) = self.sweep.take() {
            self.sweep = Some(sweep.with_defaults(steps));
        }
        self
    }

    /// Override configuration values with command-line arguments.
    ///
    /// Call on the configuration as parsed, before [`Config::with_defaults`]:
    /// fields still `None` here are derived afterwards from the final step
    /// count, while values given in the file are kept.
    pub fn apply_args(mut self, args: &Args) -> Self {
        if args.activity.is_some() {
            self.activity = args.activity;
        }
        if args.steps.is_some() {
            self.steps = args.steps;
        }
        if args.rod_length.is_some() {
            self.rod_length = args.rod_length;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if args.sweep && self.sweep.is_none() {
            self.sweep = Some(SweepConfig::default());
        }
        self.with_defaults()
    }

    pub fn rod_length(&self) -> usize {
        self.rod_length.unwrap_or(Self::DEFAULT_ROD_LENGTH)
    }

    pub fn activity(&self) -> f64 {
        self.activity.unwrap_or(Self::DEFAULT_ACTIVITY)
    }

    pub fn steps(&self) -> u64 {
        self.steps.unwrap_or(Self::DEFAULT_STEPS)
    }

    pub fn sample_interval(&self) -> u64 {
        self.output
            .sample_interval
            .unwrap_or_else(|| default_sample_interval(self.steps()))
    }

    /// Validated parameters of the single chain
    pub fn simulation_params(&self) -> Result<SimulationParams> {
        let params = SimulationParams::new(
            self.steps(),
            self.rod_length(),
            self.lattice.columns,
            self.lattice.rows,
            self.activity(),
        );
        params.validate()?;
        Ok(params)
    }

    /// Sweep description, if a sweep section is present
    pub fn sweep_spec(&self) -> Option<SweepSpec> {
        let sweep = self.sweep.clone()?.with_defaults(self.steps());
        let steps = sweep.steps.unwrap_or(self.steps());
        Some(SweepSpec {
            activities: activity_grid(
                sweep.activity_start.unwrap_or(0.1),
                sweep.activity_end.unwrap_or(10.0),
                sweep.points.unwrap_or(50),
            ),
            rod_length: self.rod_length(),
            rows: self.lattice.rows,
            columns: self.lattice.columns,
            equilibration_steps: sweep.equilibration_steps.unwrap_or(steps / 10),
            production_steps: steps,
            sample_interval: sweep
                .sample_interval
                .unwrap_or_else(|| default_sample_interval(steps)),
            seed: self.seed,
        })
    }

    pub fn sweep_table(&self) -> String {
        self.sweep
            .as_ref()
            .and_then(|s| s.table.clone())
            .unwrap_or_else(|| "dataNvsZ.dat".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GcmcError;
    use clap::Parser;

    const MINIMAL: &str = "lattice:\n  rows: 20\n  columns: 30\n";

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_yaml_str(MINIMAL).unwrap().with_defaults();
        assert_eq!(config.rod_length(), 1);
        assert_eq!(config.activity(), 1.0);
        assert_eq!(config.steps(), 1_000_000);
        assert_eq!(config.sample_interval(), 100);
        assert_eq!(config.output.table.as_deref(), Some("dataplot.dat"));
        assert!(config.sweep_spec().is_none());

        let params = config.simulation_params().unwrap();
        assert_eq!(params.rows, 20);
        assert_eq!(params.columns, 30);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
lattice:
  rows: 64
  columns: 64
rod_length: 8
activity: 2.5
steps: 50000
seed: 17
output:
  sample_interval: 10
  table: series.dat
sweep:
  activity_start: 0.5
  activity_end: 1.5
  points: 3
  steps: 2000
"#;
        let config = Config::from_yaml_str(yaml).unwrap().with_defaults();
        assert_eq!(config.sample_interval(), 10);
        assert_eq!(config.output.vertical_dump.as_deref(), Some("2dplotv.txt"));

        let spec = config.sweep_spec().unwrap();
        assert_eq!(spec.activities, vec![0.5, 1.0, 1.5]);
        assert_eq!(spec.rod_length, 8);
        assert_eq!(spec.production_steps, 2000);
        assert_eq!(spec.equilibration_steps, 200);
        assert_eq!(spec.sample_interval, 1);
        assert_eq!(spec.seed, Some(17));
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "hardrods",
            "--activity",
            "0.25",
            "--steps",
            "200000",
            "--rod-length",
            "4",
            "--sweep",
        ]);
        let config = Config::from_yaml_str(MINIMAL).unwrap().apply_args(&args);
        assert_eq!(config.activity(), 0.25);
        assert_eq!(config.steps(), 200_000);
        assert_eq!(config.rod_length(), 4);
        assert_eq!(config.sample_interval(), 20);
        assert_eq!(config.sweep_spec().unwrap().activities.len(), 50);
    }

    #[test]
    fn test_steps_override_keeps_explicit_intervals() {
        let yaml = r#"
lattice:
  rows: 10
  columns: 10
output:
  sample_interval: 7
sweep:
  equilibration_steps: 500
  sample_interval: 3
"#;
        let args = Args::parse_from(["hardrods", "--steps", "200000"]);
        let config = Config::from_yaml_str(yaml).unwrap().apply_args(&args);

        assert_eq!(config.steps(), 200_000);
        assert_eq!(config.sample_interval(), 7);

        let spec = config.sweep_spec().unwrap();
        assert_eq!(spec.production_steps, 200_000);
        assert_eq!(spec.equilibration_steps, 500);
        assert_eq!(spec.sample_interval, 3);
    }

    #[test]
    fn test_steps_override_derives_missing_sweep_fields() {
        let yaml = "lattice:\n  rows: 10\n  columns: 10\nsteps: 1000\nsweep:\n  points: 2\n";
        let args = Args::parse_from(["hardrods", "--steps", "300000"]);
        let config = Config::from_yaml_str(yaml).unwrap().apply_args(&args);

        let spec = config.sweep_spec().unwrap();
        assert_eq!(spec.production_steps, 300_000);
        assert_eq!(spec.equilibration_steps, 30_000);
        assert_eq!(spec.sample_interval, 30);
    }

    #[test]
    fn test_invalid_lattice_is_configuration_error() {
        let config = Config::from_yaml_str("lattice:\n  rows: 4\n  columns: 4\nrod_length: 5\n")
            .unwrap()
            .with_defaults();
        assert!(matches!(
            config.simulation_params(),
            Err(GcmcError::Configuration(_))
        ));
    }
}
