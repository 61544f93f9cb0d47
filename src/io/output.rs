//! Output files and logging utilities

use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, fmt::MakeWriter,
    layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Log timestamps as wall time elapsed since logging started, e.g. `[  93.4s]`
#[derive(Debug, Clone, Copy)]
struct RunClock {
    start: Instant,
}

impl RunClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

fn write_elapsed(w: &mut Writer<'_>, elapsed: Duration) -> fmt::Result {
    write!(w, "[{:>7.1}s]", elapsed.as_secs_f64())
}

impl FormatTime for RunClock {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write_elapsed(w, self.start.elapsed())
    }
}

fn init_layer<W>(writer: W, ansi: bool)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = layer()
        .with_writer(writer)
        .with_timer(RunClock::new())
        .with_ansi(ansi);
    Registry::default().with(fmt_layer).init();
}

/// Setup log output to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                init_layer(log, false);
                info!("Log output written to: {}", path);
            }
            Err(e) => eprintln!("Could not create log file {}: {}", path, e),
        },
        None => init_layer(std::io::stdout, true),
    }
}

/// Create `path` and hand a buffered writer to `write`
pub fn write_file<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let path = path.as_ref();
    let file =
        File::create(path).wrap_err_with(|| format!("Unable to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).wrap_err_with(|| format!("Unable to write {}", path.display()))?;
    writer
        .flush()
        .wrap_err_with(|| format!("Unable to flush {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
