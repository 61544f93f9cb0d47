//! Input/Output operations for hard-rod simulations
//!
//! This module handles logging setup and writing recorder output to files.

mod output;

pub use output::{setup_output, write_file};
