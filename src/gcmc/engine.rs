use super::statistics::MoveCounters;
use crate::error::{GcmcError, Result};
use crate::lattice::Lattice;
use crate::registry::RodRegistry;
use crate::rod::{Orientation, Rod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Construction parameters of one Markov chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of steps executed by [`GcmcEngine::run`]
    pub step_budget: u64,
    /// Rod length L, shared by every rod
    pub rod_length: usize,
    /// Lattice columns C
    pub columns: usize,
    /// Lattice rows R
    pub rows: usize,
    /// Activity z = exp(beta * mu)
    pub activity: f64,
}

impl SimulationParams {
    pub fn new(
        step_budget: u64,
        rod_length: usize,
        columns: usize,
        rows: usize,
        activity: f64,
    ) -> Self {
        Self {
            step_budget,
            rod_length,
            columns,
            rows,
            activity,
        }
    }

    /// Check the parameters describe a chain that can run
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GcmcError::Configuration(format!(
                "lattice dimensions must be positive, got {} rows x {} columns",
                self.rows, self.columns
            )));
        }
        if self.rod_length == 0 {
            return Err(GcmcError::Configuration(
                "rod length must be positive".to_string(),
            ));
        }
        if self.rod_length > self.rows || self.rod_length > self.columns {
            return Err(GcmcError::Configuration(format!(
                "rod length {} exceeds lattice dimensions {} x {}",
                self.rod_length, self.rows, self.columns
            )));
        }
        if !self.activity.is_finite() || self.activity < 0.0 {
            return Err(GcmcError::Configuration(format!(
                "activity must be a finite non-negative number, got {}",
                self.activity
            )));
        }
        Ok(())
    }

    /// Number of lattice cells, `R * C`
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }
}

/// Insertion acceptance `min(1, z R C / ((N + 1) L))`
pub fn insertion_probability(activity: f64, area: usize, n_rods: usize, rod_length: usize) -> f64 {
    (activity * area as f64 / ((n_rods + 1) as f64 * rod_length as f64)).min(1.0)
}

/// Deletion acceptance `min(1, N L / (z R C))`.
///
/// At zero activity the ratio diverges, so every deletion is accepted.
pub fn deletion_probability(activity: f64, area: usize, n_rods: usize, rod_length: usize) -> f64 {
    if activity == 0.0 {
        return 1.0;
    }
    (n_rods as f64 * rod_length as f64 / (activity * area as f64)).min(1.0)
}

/// Which move a step attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Add,
    Delete,
}

/// What happened to an attempted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// The lattice and registry were updated
    Accepted,
    /// The move was possible but lost the acceptance draw
    Rejected,
    /// Addition target span was not entirely free
    Blocked,
    /// Deletion on an empty lattice
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepOutcome {
    pub kind: MoveKind,
    pub result: MoveResult,
}

/// Grand canonical Monte Carlo engine for hard rods on a toroidal lattice.
///
/// One engine is one Markov chain: it owns the lattice, the rod registry,
/// the cumulative counters and the random generator. Every random draw of
/// the chain comes from `rng`, so a seeded engine replays exactly.
///
/// Each step flips a fair coin between an addition and a deletion attempt:
/// - Addition: random anchor cell and orientation; if all L cells are free,
///   accept with `min(1, z R C / ((N + 1) L))`.
/// - Deletion: random live rod; accept with `min(1, N L / (z R C))`.
#[derive(Debug, Clone)]
pub struct GcmcEngine<R: Rng = StdRng> {
    params: SimulationParams,
    lattice: Lattice,
    registry: RodRegistry,
    counters: MoveCounters,
    /// Steps executed so far
    step: u64,
    rng: R,
}

impl GcmcEngine<StdRng> {
    /// Create an engine whose generator is seeded from OS entropy
    pub fn new(params: SimulationParams) -> Result<Self> {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Create an engine with a reproducible generator
    pub fn with_seed(params: SimulationParams, seed: u64) -> Result<Self> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GcmcEngine<R> {
    /// Create an engine driven by the given generator.
    ///
    /// The lattice starts empty. Fails with [`GcmcError::Configuration`]
    /// if the parameters are invalid.
    pub fn with_rng(params: SimulationParams, rng: R) -> Result<Self> {
        params.validate()?;
        debug!(
            "Creating GCMC engine: {}x{} lattice, L={}, z={}, budget={}",
            params.rows, params.columns, params.rod_length, params.activity, params.step_budget
        );

        Ok(Self {
            params,
            lattice: Lattice::new(params.rows, params.columns),
            registry: RodRegistry::new(),
            counters: MoveCounters::new(),
            step: 0,
            rng,
        })
    }

    fn n_rods(&self) -> usize {
        self.registry.len()
    }

    fn current_insertion_probability(&self) -> f64 {
        insertion_probability(
            self.params.activity,
            self.params.area(),
            self.n_rods(),
            self.params.rod_length,
        )
    }

    fn current_deletion_probability(&self) -> f64 {
        deletion_probability(
            self.params.activity,
            self.params.area(),
            self.n_rods(),
            self.params.rod_length,
        )
    }

    /// Attempt to insert a rod at a random anchor and orientation
    pub fn attempt_addition(&mut self) -> MoveResult {
        let acceptance = self.current_insertion_probability();
        self.add_with(acceptance)
    }

    /// Attempt to remove a uniformly chosen live rod
    pub fn attempt_deletion(&mut self) -> MoveResult {
        let acceptance = self.current_deletion_probability();
        self.delete_with(acceptance)
    }

    fn add_with(&mut self, acceptance: f64) -> MoveResult {
        self.counters.addition_attempts += 1;

        let x = self.rng.gen_range(0..self.params.columns);
        let y = self.rng.gen_range(0..self.params.rows);
        let orientation = Orientation::random(&mut self.rng);

        if self.lattice.is_occupied(x, y) {
            return MoveResult::Blocked;
        }

        let rod = Rod::new(x, y, orientation, self.params.rod_length);
        if !self.lattice.span_is_free(&rod) {
            return MoveResult::Blocked;
        }

        if self.rng.gen::<f64>() < acceptance {
            self.lattice.fill(&rod);
            self.registry.add(rod);
            self.counters.record_addition(orientation);
            MoveResult::Accepted
        } else {
            MoveResult::Rejected
        }
    }

    fn delete_with(&mut self, acceptance: f64) -> MoveResult {
        self.counters.deletion_attempts += 1;

        let n = self.n_rods();
        if n == 0 {
            return MoveResult::Skipped;
        }

        let index = self.rng.gen_range(0..n);
        if self.rng.gen::<f64>() < acceptance {
            let rod = self.registry.remove_at(index);
            self.lattice.clear(&rod);
            self.counters.record_deletion(rod.orientation);
            MoveResult::Accepted
        } else {
            MoveResult::Rejected
        }
    }

    /// Perform one Monte Carlo step: a fair coin picks addition or deletion
    pub fn monte_carlo_step(&mut self) -> StepOutcome {
        // Both probabilities come from N before the move is chosen
        let p_add = self.current_insertion_probability();
        let p_delete = self.current_deletion_probability();

        let outcome = if self.rng.gen_bool(0.5) {
            StepOutcome {
                kind: MoveKind::Add,
                result: self.add_with(p_add),
            }
        } else {
            StepOutcome {
                kind: MoveKind::Delete,
                result: self.delete_with(p_delete),
            }
        };

        self.step += 1;
        outcome
    }

    /// Perform `n_steps` more steps, regardless of the step budget
    pub fn run_steps(&mut self, n_steps: u64) {
        for _ in 0..n_steps {
            self.monte_carlo_step();
        }
    }

    /// Run until the step budget is exhausted
    pub fn run(&mut self) {
        while self.step < self.params.step_budget {
            self.monte_carlo_step();
        }
    }

    /// Run until the step budget is exhausted, calling `observer` with the
    /// step number and the engine after every step
    pub fn run_observed<F>(&mut self, mut observer: F)
    where
        F: FnMut(u64, &Self),
    {
        while self.step < self.params.step_budget {
            self.monte_carlo_step();
            observer(self.step, self);
        }
    }

    /// Covered fraction of the lattice, `L (av + ah - dv - dh) / (R C)`
    pub fn density(&self) -> f64 {
        (self.params.rod_length as u64 * self.counters.net_accepted()) as f64
            / self.params.area() as f64
    }

    /// Nematic order parameter `Q = (nv - nh) / (nv + nh)`.
    ///
    /// Returns [`GcmcError::UndefinedStatistic`] on an empty lattice.
    pub fn order_parameter(&self) -> Result<f64> {
        let nv = self.registry.vertical_count() as f64;
        let nh = self.registry.horizontal_count() as f64;
        if self.registry.is_empty() {
            return Err(GcmcError::UndefinedStatistic(
                "order parameter of an empty lattice",
            ));
        }
        Ok((nv - nh) / (nv + nh))
    }

    /// Unclamped insertion ratio `z R C / ((N + 1) L)` for monitoring
    pub fn addition_acceptance_rate(&self) -> f64 {
        self.params.activity * self.params.area() as f64
            / ((self.counters.net_accepted() + 1) as f64 * self.params.rod_length as f64)
    }

    /// Unclamped deletion ratio `N L / (z R C)` for monitoring.
    ///
    /// At zero activity this is `0.0` on an empty lattice and infinite
    /// otherwise.
    pub fn deletion_acceptance_rate(&self) -> f64 {
        let numerator = self.counters.net_accepted() as f64 * self.params.rod_length as f64;
        if self.params.activity == 0.0 {
            return if numerator == 0.0 { 0.0 } else { f64::INFINITY };
        }
        numerator / (self.params.activity * self.params.area() as f64)
    }

    /// `(av + ah - dv - dh) / (av + ah + dv + dh)`.
    ///
    /// Returns [`GcmcError::UndefinedStatistic`] before the first accepted move.
    pub fn net_accept_fraction(&self) -> Result<f64> {
        let total = self.counters.total_accepted();
        if total == 0 {
            return Err(GcmcError::UndefinedStatistic(
                "net accept fraction before any accepted move",
            ));
        }
        Ok(self.counters.net_accepted() as f64 / total as f64)
    }

    pub fn vertical_count(&self) -> usize {
        self.registry.vertical_count()
    }

    pub fn horizontal_count(&self) -> usize {
        self.registry.horizontal_count()
    }

    /// Copy of the live vertical rods
    pub fn live_vertical_rods(&self) -> Vec<Rod> {
        self.registry.vertical().to_vec()
    }

    /// Copy of the live horizontal rods
    pub fn live_horizontal_rods(&self) -> Vec<Rod> {
        self.registry.horizontal().to_vec()
    }

    /// Change the activity for subsequent steps.
    ///
    /// Lattice, registry and move counters are left untouched, so the chain
    /// continues from its current configuration; use this for quench runs
    /// where z jumps mid-chain.
    pub fn set_activity(&mut self, activity: f64) -> Result<()> {
        let params = SimulationParams {
            activity,
            ..self.params
        };
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn registry(&self) -> &RodRegistry {
        &self.registry
    }

    pub fn counters(&self) -> &MoveCounters {
        &self.counters
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn activity(&self) -> f64 {
        self.params.activity
    }

    pub fn rod_length(&self) -> usize {
        self.params.rod_length
    }

    /// Check lattice and registry agree: replaying the registry gives the
    /// same bitmap without overlaps, and the counters match the live rods
    pub fn is_consistent(&self) -> bool {
        let replay = match Lattice::from_rods(
            self.params.rows,
            self.params.columns,
            self.registry.iter(),
        ) {
            Ok(lattice) => lattice,
            Err(_) => return false,
        };

        replay == self.lattice
            && self.lattice.occupied_count() == self.params.rod_length * self.n_rods()
            && self.counters.net_accepted() == self.n_rods() as u64
    }

    /// Log the current state of the chain
    pub fn log_summary(&self) {
        info!("=== Hard-rod GCMC state after {} steps ===", self.step);
        info!("Activity z: {:.6}", self.params.activity);
        info!(
            "Rods: {} vertical, {} horizontal",
            self.vertical_count(),
            self.horizontal_count()
        );
        info!("Density: {:.6}", self.density());
        match self.order_parameter() {
            Ok(q) => info!("Order parameter Q: {:.6}", q),
            Err(e) => info!("Order parameter Q: {}", e),
        }
        self.counters.log_summary();
    }
}
