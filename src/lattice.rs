use crate::error::{GcmcError, Result};
use crate::rod::Rod;

/// Toroidal grid of occupancy bits.
///
/// Cells are addressed as `(x, y)` with `x` the column and `y` the row.
/// Both coordinates are reduced modulo the lattice dimensions, so every
/// `usize` input is a valid address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    rows: usize,
    columns: usize,
    /// Occupancy per cell, indexed `[y][x]`
    cells: Vec<Vec<bool>>,
}

impl Lattice {
    /// Create an empty `rows x columns` lattice.
    ///
    /// Both dimensions must be positive; a zero dimension leaves no cell to
    /// address. [`SimulationParams::validate`](crate::gcmc::SimulationParams::validate)
    /// and [`Lattice::from_rods`] reject it before reaching here.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![false; columns]; rows],
        }
    }

    /// Replay rod placements onto a fresh empty lattice.
    ///
    /// Fails with [`GcmcError::Configuration`] for a zero dimension and with
    /// [`GcmcError::Overlap`] at the first cell covered twice.
    pub fn from_rods<'a, I>(rows: usize, columns: usize, rods: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Rod>,
    {
        if rows == 0 || columns == 0 {
            return Err(GcmcError::Configuration(format!(
                "lattice dimensions must be positive, got {} rows x {} columns",
                rows, columns
            )));
        }
        let mut lattice = Self::new(rows, columns);
        for rod in rods {
            for (x, y) in rod.cells(rows, columns) {
                if lattice.is_occupied(x, y) {
                    return Err(GcmcError::Overlap { x, y });
                }
                lattice.set_occupied(x, y, true);
            }
        }
        Ok(lattice)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cells, `R * C`
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells[y % self.rows][x % self.columns]
    }

    pub fn set_occupied(&mut self, x: usize, y: usize, occupied: bool) {
        self.cells[y % self.rows][x % self.columns] = occupied;
    }

    /// Whether every cell of the rod's span is empty
    pub fn span_is_free(&self, rod: &Rod) -> bool {
        rod.cells(self.rows, self.columns)
            .all(|(x, y)| !self.is_occupied(x, y))
    }

    /// Mark the rod's span occupied
    pub fn fill(&mut self, rod: &Rod) {
        for (x, y) in rod.cells(self.rows, self.columns) {
            self.set_occupied(x, y, true);
        }
    }

    /// Mark the rod's span empty
    pub fn clear(&mut self, rod: &Rod) {
        for (x, y) in rod.cells(self.rows, self.columns) {
            self.set_occupied(x, y, false);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&occupied| occupied)
            .count()
    }

    /// Borrow the occupancy bitmap, row by row
    pub fn occupancy(&self) -> &Vec<Vec<bool>> {
        &self.cells
    }
}
