use crate::rod::Orientation;
use tracing::info;

/// Cumulative move counters for one chain.
///
/// All counters only ever increase. The net number of accepted additions
/// always equals the number of live rods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveCounters {
    /// Number of addition moves attempted
    pub addition_attempts: u64,
    /// Number of deletion moves attempted (including skips on an empty lattice)
    pub deletion_attempts: u64,
    /// Accepted additions of vertical rods (av)
    pub vertical_added: u64,
    /// Accepted additions of horizontal rods (ah)
    pub horizontal_added: u64,
    /// Accepted deletions of vertical rods (dv)
    pub vertical_deleted: u64,
    /// Accepted deletions of horizontal rods (dh)
    pub horizontal_deleted: u64,
}

impl MoveCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_addition(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::Vertical => self.vertical_added += 1,
            Orientation::Horizontal => self.horizontal_added += 1,
        }
    }

    pub(crate) fn record_deletion(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::Vertical => self.vertical_deleted += 1,
            Orientation::Horizontal => self.horizontal_deleted += 1,
        }
    }

    /// Accepted additions of both orientations, `av + ah`
    pub fn accepted_additions(&self) -> u64 {
        self.vertical_added + self.horizontal_added
    }

    /// Accepted deletions of both orientations, `dv + dh`
    pub fn accepted_deletions(&self) -> u64 {
        self.vertical_deleted + self.horizontal_deleted
    }

    /// `av + ah - dv - dh`
    pub fn net_accepted(&self) -> u64 {
        self.accepted_additions() - self.accepted_deletions()
    }

    /// `av + ah + dv + dh`
    pub fn total_accepted(&self) -> u64 {
        self.accepted_additions() + self.accepted_deletions()
    }

    /// Observed fraction of addition attempts that were accepted
    pub fn addition_success_rate(&self) -> f64 {
        if self.addition_attempts == 0 {
            0.0
        } else {
            self.accepted_additions() as f64 / self.addition_attempts as f64
        }
    }

    /// Observed fraction of deletion attempts that were accepted
    pub fn deletion_success_rate(&self) -> f64 {
        if self.deletion_attempts == 0 {
            0.0
        } else {
            self.accepted_deletions() as f64 / self.deletion_attempts as f64
        }
    }

    /// Log a summary of the counters
    pub fn log_summary(&self) {
        info!("=== GCMC move statistics ===");
        info!(
            "Additions: {} / {} ({:.2}% accepted; {} vertical, {} horizontal)",
            self.accepted_additions(),
            self.addition_attempts,
            100.0 * self.addition_success_rate(),
            self.vertical_added,
            self.horizontal_added
        );
        info!(
            "Deletions: {} / {} ({:.2}% accepted; {} vertical, {} horizontal)",
            self.accepted_deletions(),
            self.deletion_attempts,
            100.0 * self.deletion_success_rate(),
            self.vertical_deleted,
            self.horizontal_deleted
        );
    }
}
