use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direction along which a rod extends from its anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Extends along increasing row index (y)
    Vertical,
    /// Extends along increasing column index (x)
    Horizontal,
}

impl Orientation {
    /// Pick an orientation with a fair coin
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// A hard rod placed on the lattice.
///
/// Rods are never mutated once created. The anchor is the first cell of
/// the span; the remaining `length - 1` cells follow along the orientation
/// with periodic wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rod {
    /// Column of the anchor cell
    pub x: usize,
    /// Row of the anchor cell
    pub y: usize,
    pub orientation: Orientation,
    pub length: usize,
}

impl Rod {
    pub fn new(x: usize, y: usize, orientation: Orientation, length: usize) -> Self {
        Self {
            x,
            y,
            orientation,
            length,
        }
    }

    /// Cells covered by this rod on a `rows x columns` torus, anchor first
    pub fn cells(&self, rows: usize, columns: usize) -> impl Iterator<Item = (usize, usize)> {
        let (x, y, orientation) = (self.x, self.y, self.orientation);
        (0..self.length).map(move |k| match orientation {
            Orientation::Vertical => (x % columns, (y + k) % rows),
            Orientation::Horizontal => ((x + k) % columns, y % rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_vertical_span_wraps_rows() {
        let rod = Rod::new(2, 3, Orientation::Vertical, 3);
        let cells: Vec<_> = rod.cells(4, 5).collect();
        assert_eq!(cells, vec![(2, 3), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_horizontal_span_wraps_columns() {
        let rod = Rod::new(4, 1, Orientation::Horizontal, 2);
        let cells: Vec<_> = rod.cells(3, 5).collect();
        assert_eq!(cells, vec![(4, 1), (0, 1)]);
    }

    #[test]
    fn test_random_orientation_hits_both() {
        let mut rng = StdRng::seed_from_u64(7);
        let vertical = (0..1000)
            .filter(|_| Orientation::random(&mut rng) == Orientation::Vertical)
            .count();
        assert!(vertical > 400 && vertical < 600);
    }
}
