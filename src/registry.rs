use crate::rod::{Orientation, Rod};

/// Where a combined index points after resolving the vertical offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Vertical(usize),
    Horizontal(usize),
}

/// Live rods, kept in one list per orientation.
///
/// The two lists share a combined index space: `0..nv` addresses the
/// vertical list and `nv..nv + nh` addresses the horizontal list shifted
/// by `nv`. Uniform deletion across both populations relies on this.
#[derive(Debug, Clone, Default)]
pub struct RodRegistry {
    vertical: Vec<Rod>,
    horizontal: Vec<Rod>,
}

impl RodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a combined index onto a list and a local index.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    fn resolve(&self, index: usize) -> Slot {
        let nv = self.vertical.len();
        assert!(
            index < self.len(),
            "rod index {} out of range for {} live rods",
            index,
            self.len()
        );
        if index < nv {
            Slot::Vertical(index)
        } else {
            Slot::Horizontal(index - nv)
        }
    }

    /// Append a rod to the list matching its orientation
    pub fn add(&mut self, rod: Rod) {
        match rod.orientation {
            Orientation::Vertical => self.vertical.push(rod),
            Orientation::Horizontal => self.horizontal.push(rod),
        }
    }

    /// Erase the rod at a combined index and return it
    pub fn remove_at(&mut self, index: usize) -> Rod {
        match self.resolve(index) {
            Slot::Vertical(i) => self.vertical.remove(i),
            Slot::Horizontal(i) => self.horizontal.remove(i),
        }
    }

    /// Rod at a combined index
    pub fn at(&self, index: usize) -> &Rod {
        match self.resolve(index) {
            Slot::Vertical(i) => &self.vertical[i],
            Slot::Horizontal(i) => &self.horizontal[i],
        }
    }

    /// Total number of live rods, `nv + nh`
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vertical_count(&self) -> usize {
        self.vertical.len()
    }

    pub fn horizontal_count(&self) -> usize {
        self.horizontal.len()
    }

    pub fn vertical(&self) -> &[Rod] {
        &self.vertical
    }

    pub fn horizontal(&self) -> &[Rod] {
        &self.horizontal
    }

    /// All rods in combined index order
    pub fn iter(&self) -> impl Iterator<Item = &Rod> {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> RodRegistry {
        let mut registry = RodRegistry::new();
        registry.add(Rod::new(0, 0, Orientation::Vertical, 2));
        registry.add(Rod::new(1, 0, Orientation::Horizontal, 2));
        registry.add(Rod::new(2, 0, Orientation::Vertical, 2));
        registry.add(Rod::new(3, 0, Orientation::Horizontal, 2));
        registry
    }

    #[test]
    fn test_add_routes_by_orientation() {
        let registry = sample_registry();
        assert_eq!(registry.vertical_count(), 2);
        assert_eq!(registry.horizontal_count(), 2);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_combined_addressing_boundary() {
        let registry = sample_registry();
        // Last vertical, then first horizontal at index nv
        assert_eq!(registry.at(1).x, 2);
        assert_eq!(registry.at(1).orientation, Orientation::Vertical);
        assert_eq!(registry.at(2).x, 1);
        assert_eq!(registry.at(2).orientation, Orientation::Horizontal);
        assert_eq!(registry.at(3).x, 3);
    }

    #[test]
    fn test_remove_at_horizontal_offset() {
        let mut registry = sample_registry();
        let removed = registry.remove_at(3);
        assert_eq!(removed, Rod::new(3, 0, Orientation::Horizontal, 2));
        assert_eq!(registry.vertical_count(), 2);
        assert_eq!(registry.horizontal_count(), 1);

        let removed = registry.remove_at(0);
        assert_eq!(removed.x, 0);
        assert_eq!(registry.vertical_count(), 1);
        // Index 1 now points at the only horizontal rod
        assert_eq!(registry.at(1).x, 1);
    }

    #[test]
    fn test_iter_follows_combined_order() {
        let registry = sample_registry();
        let xs: Vec<usize> = registry.iter().map(|rod| rod.x).collect();
        assert_eq!(xs, vec![0, 2, 1, 3]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        let registry = sample_registry();
        registry.at(4);
    }
}
