pub mod analysis;
pub mod config;
pub mod error;
pub mod gcmc;
pub mod io;
pub mod lattice;
pub mod recorder;
pub mod registry;
pub mod rod;
pub mod sweep;

pub use error::GcmcError;
pub use gcmc::{GcmcEngine, MoveCounters, MoveKind, MoveResult, SimulationParams, StepOutcome};
pub use lattice::Lattice;
pub use recorder::{Recorder, SampleRecord};
pub use registry::RodRegistry;
pub use rod::{Orientation, Rod};
pub use sweep::{parallel_activity_sweep, SweepResult, SweepSpec};
