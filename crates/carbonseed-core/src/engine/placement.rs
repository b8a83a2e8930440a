use super::cancel::CancellationToken;
use super::cell_list::CellList;
use super::config::{DEFAULT_MAX_CONSECUTIVE_REJECTIONS, NeighborSearch, PlacementConfig};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::state::{Placement, PlacementStats, PlacementStatus};
use crate::core::membership;
use crate::core::models::atoms::AtomSet;
use crate::core::models::domain::SimulationDomain;
use crate::core::pbc;
use nalgebra::Point3;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

const STREAK_LOG_INTERVAL: u64 = 100_000;

/// Answers "is this candidate too close to an accepted atom?".
trait ClashIndex {
    fn has_clash(&self, candidate: &Point3<f64>, accepted: &[Point3<f64>]) -> bool;
    fn record(&mut self, index: usize, position: &Point3<f64>);
}

struct LinearScan<'a> {
    domain: &'a SimulationDomain,
    cutoff: f64,
}

impl ClashIndex for LinearScan<'_> {
    fn has_clash(&self, candidate: &Point3<f64>, accepted: &[Point3<f64>]) -> bool {
        accepted
            .iter()
            .any(|p| pbc::is_too_close(self.domain, candidate, p, self.cutoff))
    }

    fn record(&mut self, _index: usize, _position: &Point3<f64>) {}
}

struct CellListIndex<'a> {
    domain: &'a SimulationDomain,
    cutoff: f64,
    cells: CellList,
}

impl ClashIndex for CellListIndex<'_> {
    fn has_clash(&self, candidate: &Point3<f64>, accepted: &[Point3<f64>]) -> bool {
        self.cells.any_neighbor(candidate, |idx| {
            pbc::is_too_close(self.domain, candidate, &accepted[idx], self.cutoff)
        })
    }

    fn record(&mut self, index: usize, position: &Point3<f64>) {
        self.cells.insert(index, position);
    }
}

/// Sequential rejection sampler producing mutually separated positions inside a domain.
///
/// Atoms are placed one at a time. Each candidate is drawn in the bounding cell,
/// resampled into the shape, and compared against every accepted atom under the
/// minimum-image convention; a single violation discards the candidate and a fresh one
/// is drawn. Consecutive rejections are capped so infeasible domains fail instead of
/// spinning.
pub struct PlacementEngine<'a> {
    domain: &'a SimulationDomain,
    num_atoms: usize,
    cutoff: f64,
    max_consecutive_rejections: u64,
    neighbor_search: NeighborSearch,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(domain: &'a SimulationDomain, num_atoms: usize, cutoff: f64) -> Self {
        Self {
            domain,
            num_atoms,
            cutoff,
            max_consecutive_rejections: DEFAULT_MAX_CONSECUTIVE_REJECTIONS,
            neighbor_search: NeighborSearch::default(),
            cancel: None,
        }
    }

    pub fn from_config(domain: &'a SimulationDomain, config: &PlacementConfig) -> Self {
        Self::new(domain, config.num_atoms, config.cutoff)
            .with_rejection_ceiling(config.sampling.max_consecutive_rejections)
            .with_neighbor_search(config.sampling.neighbor_search)
    }

    pub fn with_rejection_ceiling(mut self, ceiling: u64) -> Self {
        self.max_consecutive_rejections = ceiling.max(1);
        self
    }

    pub fn with_neighbor_search(mut self, search: NeighborSearch) -> Self {
        self.neighbor_search = search;
        self
    }

    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Places `num_atoms` atoms.
    ///
    /// # Return
    ///
    /// A complete [`Placement`], or a partial one with [`PlacementStatus::Cancelled`] if the
    /// cancellation token was set. Cancellation is only observed between acceptances.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementInfeasible`] once `max_consecutive_rejections` candidates in a
    /// row have been rejected.
    #[instrument(skip_all, name = "placement_engine", fields(domain = %self.domain.kind(), num_atoms = self.num_atoms))]
    pub fn place(
        &self,
        rng: &mut impl Rng,
        reporter: &ProgressReporter,
    ) -> Result<Placement, EngineError> {
        match self.neighbor_search {
            NeighborSearch::LinearScan => {
                let index = LinearScan {
                    domain: self.domain,
                    cutoff: self.cutoff,
                };
                self.run(index, rng, reporter)
            }
            NeighborSearch::CellList => {
                let cells = CellList::new(self.domain, self.cutoff, self.num_atoms);
                debug!(dims = ?cells.dims(), "Built cell list for neighbor search.");
                let index = CellListIndex {
                    domain: self.domain,
                    cutoff: self.cutoff,
                    cells,
                };
                self.run(index, rng, reporter)
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancellationToken::is_cancelled)
    }

    fn run<I: ClashIndex>(
        &self,
        mut index: I,
        rng: &mut impl Rng,
        reporter: &ProgressReporter,
    ) -> Result<Placement, EngineError> {
        let mut atoms = AtomSet::with_capacity(self.num_atoms);
        let mut stats = PlacementStats::default();

        reporter.report(Progress::TaskStart {
            total_steps: self.num_atoms as u64,
        });

        while !atoms.is_full() {
            if self.is_cancelled() {
                info!(
                    placed = atoms.len(),
                    total = self.num_atoms,
                    "Placement cancelled."
                );
                return Ok(Placement {
                    atoms,
                    status: PlacementStatus::Cancelled,
                    stats,
                });
            }

            let mut streak = 0u64;
            let position = loop {
                let candidate = membership::draw_candidate(self.domain, rng);
                stats.candidates += 1;
                if !index.has_clash(&candidate, atoms.positions()) {
                    break candidate;
                }

                streak += 1;
                stats.rejections += 1;
                if streak >= self.max_consecutive_rejections {
                    warn!(
                        placed = atoms.len(),
                        total = self.num_atoms,
                        rejections = streak,
                        "Rejection ceiling reached; the domain is too full for the cutoff."
                    );
                    return Err(EngineError::PlacementInfeasible {
                        placed: atoms.len(),
                        total: self.num_atoms,
                        rejections: streak,
                    });
                }
                if streak % STREAK_LOG_INTERVAL == 0 {
                    debug!(
                        placed = atoms.len(),
                        streak, "Still searching for a free position."
                    );
                }
            };

            stats.longest_streak = stats.longest_streak.max(streak);
            index.record(atoms.len(), &position);
            atoms.push(position);
            reporter.report(Progress::AtomPlaced {
                placed: atoms.len(),
                total: self.num_atoms,
            });
        }

        reporter.report(Progress::TaskFinish);
        debug!(
            candidates = stats.candidates,
            rejections = stats.rejections,
            longest_streak = stats.longest_streak,
            "Placement finished."
        );
        Ok(Placement {
            atoms,
            status: PlacementStatus::Complete,
            stats,
        })
    }
}
