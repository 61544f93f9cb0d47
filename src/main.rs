//! Hard-rod GCMC command-line interface
//!
//! Runs a single chain, or an activity sweep, from a YAML configuration.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use hardrods::config::{Args, Config};
use hardrods::io::{setup_output, write_file};
use hardrods::recorder::write_rod_dump;
use hardrods::sweep::write_sweep_table;
use hardrods::{parallel_activity_sweep, GcmcEngine, Recorder};
use std::fs;
use tracing::info;

struct Application {
    args: Args,
    config: Config,
}

impl Application {
    fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Configuration loaded:\n{:?}", self.config);

        if self.config.sweep.is_some() {
            self.run_sweep()
        } else {
            self.run_single_chain()
        }
    }

    fn run_single_chain(&self) -> Result<()> {
        let params = self
            .config
            .simulation_params()
            .wrap_err("Invalid simulation parameters")?;
        let mut engine = match self.config.seed {
            Some(seed) => GcmcEngine::with_seed(params, seed)?,
            None => GcmcEngine::new(params)?,
        };

        let mut recorder = Recorder::new(self.config.sample_interval(), params.step_budget);
        info!(
            "Running {} steps on a {}x{} lattice with L={} and z={}",
            params.step_budget, params.rows, params.columns, params.rod_length, params.activity
        );
        engine.run_observed(|step, engine| recorder.observe(step, engine));
        engine.log_summary();

        let output = &self.config.output;
        if let Some(path) = &output.table {
            write_file(path, |w| recorder.write_table(w))?;
        }
        if let Some(path) = &output.vertical_dump {
            write_file(path, |w| write_rod_dump(&engine.live_vertical_rods(), w))?;
        }
        if let Some(path) = &output.horizontal_dump {
            write_file(path, |w| write_rod_dump(&engine.live_horizontal_rods(), w))?;
        }
        Ok(())
    }

    fn run_sweep(&self) -> Result<()> {
        let spec = match self.config.sweep_spec() {
            Some(spec) => spec,
            None => return Ok(()),
        };
        let results = parallel_activity_sweep(&spec).wrap_err("Activity sweep failed")?;
        write_file(self.config.sweep_table(), |w| write_sweep_table(&results, w))?;
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = Config::from_yaml_str(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .apply_args(args);

    Ok(config)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    Application::from_cli()?.run()
}
