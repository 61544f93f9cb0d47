//! Command-line argument parsing for hard-rod simulations

use clap::Parser;

/// Grand canonical Monte Carlo of hard rods on a periodic square lattice
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override log output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override activity z
    #[arg(long)]
    pub activity: Option<f64>,

    /// Override number of Monte Carlo steps
    #[arg(long)]
    pub steps: Option<u64>,

    /// Override rod length
    #[arg(long)]
    pub rod_length: Option<usize>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run the activity sweep section instead of a single chain
    #[arg(long)]
    pub sweep: bool,
}
