//! Periodic sampling of a running chain and text output of the samples.
//!
//! The engine itself never touches files; the recorder reads its query
//! surface and writes through any [`std::io::Write`].

use crate::gcmc::GcmcEngine;
use crate::rod::Rod;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::{info, warn};

/// Placeholder written for undefined statistics
pub const MISSING: &str = "NA";

/// Default sampling cadence: about 10 000 records per run
pub fn default_sample_interval(steps: u64) -> u64 {
    (steps / 10_000).max(1)
}

/// One row of the time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub step: u64,
    /// `None` while the lattice is empty
    pub order_parameter: Option<f64>,
    pub vertical: usize,
    pub horizontal: usize,
    pub density: f64,
    /// `None` before the first accepted move
    pub net_accept_fraction: Option<f64>,
}

impl SampleRecord {
    pub fn from_engine<R: Rng>(step: u64, engine: &GcmcEngine<R>) -> Self {
        Self {
            step,
            order_parameter: engine.order_parameter().ok(),
            vertical: engine.vertical_count(),
            horizontal: engine.horizontal_count(),
            density: engine.density(),
            net_accept_fraction: engine.net_accept_fraction().ok(),
        }
    }

    fn columns(&self) -> [String; 6] {
        [
            self.step.to_string(),
            format_optional(self.order_parameter),
            self.vertical.to_string(),
            self.horizontal.to_string(),
            format!("{:.8}", self.density),
            format_optional(self.net_accept_fraction),
        ]
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.8}", v),
        None => MISSING.to_string(),
    }
}

/// Collects a [`SampleRecord`] every `interval` steps
#[derive(Debug, Clone)]
pub struct Recorder {
    interval: u64,
    /// Step budget of the observed chain, for progress reporting
    total_steps: u64,
    records: Vec<SampleRecord>,
    /// Records whose order parameter was undefined
    undefined_order_parameter: usize,
    /// Records whose net accept fraction was undefined
    undefined_net_fraction: usize,
}

impl Recorder {
    /// A zero interval is treated as 1
    pub fn new(interval: u64, total_steps: u64) -> Self {
        Self {
            interval: interval.max(1),
            total_steps,
            records: Vec::new(),
            undefined_order_parameter: 0,
            undefined_net_fraction: 0,
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Record the engine state if `step` falls on the sampling cadence
    pub fn observe<R: Rng>(&mut self, step: u64, engine: &GcmcEngine<R>) {
        if step % self.interval != 0 {
            return;
        }

        let record = SampleRecord::from_engine(step, engine);
        self.note_undefined(&record);
        let progress = if self.total_steps > 0 {
            100.0 * step as f64 / self.total_steps as f64
        } else {
            100.0
        };
        info!(
            "Progress: {:.2}%  N: {}  vertical: {}  horizontal: {}  Q: {}  density: {:.6}",
            progress,
            record.vertical + record.horizontal,
            record.vertical,
            record.horizontal,
            format_optional(record.order_parameter),
            record.density
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Number of records written with an `NA` order parameter
    pub fn undefined_order_parameter_count(&self) -> usize {
        self.undefined_order_parameter
    }

    /// Number of records written with an `NA` net accept fraction
    pub fn undefined_net_fraction_count(&self) -> usize {
        self.undefined_net_fraction
    }

    /// Count undefined statistics, warning only when one turns undefined
    /// after the previous record had it defined (or on the first record).
    fn note_undefined(&mut self, record: &SampleRecord) {
        let previous = self.records.last();
        if record.order_parameter.is_none() {
            self.undefined_order_parameter += 1;
            if previous.map_or(true, |p| p.order_parameter.is_some()) {
                warn!(
                    "Order parameter undefined at step {}: lattice is empty, recording {}",
                    record.step, MISSING
                );
            }
        }
        if record.net_accept_fraction.is_none() {
            self.undefined_net_fraction += 1;
            if previous.map_or(true, |p| p.net_accept_fraction.is_some()) {
                warn!(
                    "Net accept fraction undefined at step {}: no accepted moves yet, recording {}",
                    record.step, MISSING
                );
            }
        }
    }

    /// Write the time series, one whitespace-delimited row per record:
    /// `step Q nv nh density net_accept_fraction`
    pub fn write_table<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in &self.records {
            writeln!(writer, "{}", record.columns().iter().join("    "))?;
        }
        Ok(())
    }
}

/// Write rod anchors as `x y`, one rod per line
pub fn write_rod_dump<W: Write>(rods: &[Rod], writer: &mut W) -> io::Result<()> {
    for rod in rods {
        writeln!(writer, "{}   {}", rod.x, rod.y)?;
    }
    Ok(())
}
