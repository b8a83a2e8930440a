use crate::core::models::domain::SimulationDomain;
use nalgebra::{Point3, Vector3};

const EMPTY: usize = usize::MAX;
/// Keeps cells strictly wider than the cutoff despite rounding in `period / n`.
const CELL_WIDTH_SLACK: f64 = 1.0 + 1e-9;
const MIN_CELL_BUDGET: usize = 64;
const CELLS_PER_ATOM: usize = 8;

/// A periodic cell list over one period of the domain.
///
/// Each axis spans exactly one minimum-image period starting at the domain's
/// periodic origin, split into `n` cells no narrower than the cutoff. Two points
/// whose wrapped separation is below the cutoff therefore sit in the same or
/// cyclically adjacent cells. Atoms are chained per cell through `next`, with the
/// cell array holding each chain's head.
#[derive(Debug, Clone)]
pub(crate) struct CellList {
    origin: Point3<f64>,
    dims: [usize; 3],
    cell_width: Vector3<f64>,
    heads: Vec<usize>,
    next: Vec<usize>,
}

impl CellList {
    pub(crate) fn new(domain: &SimulationDomain, cutoff: f64, capacity: usize) -> Self {
        let periods = domain.periods();
        let min_width = cutoff.max(f64::MIN_POSITIVE) * CELL_WIDTH_SLACK;
        let mut dims = [0usize; 3];
        for axis in 0..3 {
            dims[axis] = ((periods[axis] / min_width).floor() as usize).max(1);
        }

        let budget = (capacity * CELLS_PER_ATOM).max(MIN_CELL_BUDGET);
        while dims.iter().product::<usize>() > budget {
            for d in dims.iter_mut() {
                *d = (*d / 2).max(1);
            }
        }

        let cell_width = Vector3::new(
            periods.x / dims[0] as f64,
            periods.y / dims[1] as f64,
            periods.z / dims[2] as f64,
        );

        Self {
            origin: domain.periodic_origin(),
            dims,
            cell_width,
            heads: vec![EMPTY; dims.iter().product()],
            next: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn dims(&self) -> [usize; 3] {
        self.dims
    }

    fn axis_cell(&self, axis: usize, value: f64) -> usize {
        let t = ((value - self.origin[axis]) / self.cell_width[axis]).floor();
        if t.is_nan() || t < 0.0 {
            0
        } else {
            (t as usize).min(self.dims[axis] - 1)
        }
    }

    fn cell_coord(&self, p: &Point3<f64>) -> [usize; 3] {
        [
            self.axis_cell(0, p.x),
            self.axis_cell(1, p.y),
            self.axis_cell(2, p.z),
        ]
    }

    fn flat_index(&self, c: [usize; 3]) -> usize {
        (c[0] * self.dims[1] + c[1]) * self.dims[2] + c[2]
    }

    /// Distinct cyclic neighbors of cell `c` along an axis with `n` cells.
    fn axis_neighbors(c: usize, n: usize) -> ([usize; 3], usize) {
        match n {
            1 => ([0, 0, 0], 1),
            2 => ([0, 1, 0], 2),
            _ => ([(c + n - 1) % n, c, (c + 1) % n], 3),
        }
    }

    /// Registers atom `index` at `position`. Indices must be inserted in order 0, 1, 2, ...
    pub(crate) fn insert(&mut self, index: usize, position: &Point3<f64>) {
        debug_assert_eq!(index, self.next.len());
        let cell = self.flat_index(self.cell_coord(position));
        self.next.push(self.heads[cell]);
        self.heads[cell] = index;
    }

    /// Calls `visit` for every atom in the 27 cells around `position` until it returns `true`.
    ///
    /// # Return
    ///
    /// `true` if any visit returned `true`.
    pub(crate) fn any_neighbor<F>(&self, position: &Point3<f64>, mut visit: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        let [cx, cy, cz] = self.cell_coord(position);
        let (xs, nx) = Self::axis_neighbors(cx, self.dims[0]);
        let (ys, ny) = Self::axis_neighbors(cy, self.dims[1]);
        let (zs, nz) = Self::axis_neighbors(cz, self.dims[2]);

        for &x in &xs[..nx] {
            for &y in &ys[..ny] {
                for &z in &zs[..nz] {
                    let mut idx = self.heads[self.flat_index([x, y, z])];
                    while idx != EMPTY {
                        if visit(idx) {
                            return true;
                        }
                        idx = self.next[idx];
                    }
                }
            }
        }
        false
    }
}
