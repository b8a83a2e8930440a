use nalgebra::Point3;

/// An ordered, append-only set of atomic positions with a fixed capacity.
///
/// Positions are stored in acceptance order. The set grows one validated atom at a
/// time and is considered frozen once it holds exactly `capacity` positions; only a
/// full set can be serialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomSet {
    positions: Vec<Point3<f64>>,
    capacity: usize,
}

impl AtomSet {
    /// Creates an empty set that will hold exactly `capacity` atoms once full.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The target atom count.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a full set from already placed positions.
    ///
    /// # Arguments
    ///
    /// * `positions` - The positions in insertion order; the capacity becomes their count.
    pub fn from_positions(positions: Vec<Point3<f64>>) -> Self {
        let capacity = positions.len();
        Self {
            positions,
            capacity,
        }
    }

    /// Appends a position.
    ///
    /// # Arguments
    ///
    /// * `position` - The accepted position.
    ///
    /// # Return
    ///
    /// Returns `false` and leaves the set untouched if it is already full.
    pub fn push(&mut self, position: Point3<f64>) -> bool {
        if self.is_full() {
            return false;
        }
        self.positions.push(position);
        true
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.positions.len() == self.capacity
    }

    /// Fraction of the capacity filled so far, in `[0, 1]`.
    pub fn fill_fraction(&self) -> f64 {
        if self.capacity == 0 {
            1.0
        } else {
            self.positions.len() as f64 / self.capacity as f64
        }
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<&Point3<f64>> {
        self.positions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.positions.iter()
    }
}
