pub mod engine;
pub mod statistics;

pub use engine::{
    deletion_probability, insertion_probability, GcmcEngine, MoveKind, MoveResult,
    SimulationParams, StepOutcome,
};
pub use statistics::MoveCounters;
