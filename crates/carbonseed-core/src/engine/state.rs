use crate::core::models::atoms::AtomSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStatus {
    Complete,
    Cancelled,
}

/// Counters collected while placing atoms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
    /// Candidates that reached the pairwise test (after the membership resample).
    pub candidates: u64,
    /// Candidates discarded because they came too close to an accepted atom.
    pub rejections: u64,
    /// Longest run of consecutive rejections before an acceptance.
    pub longest_streak: u64,
}

impl PlacementStats {
    pub fn acceptance_rate(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            (self.candidates - self.rejections) as f64 / self.candidates as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct Placement {
    pub atoms: AtomSet,
    pub status: PlacementStatus,
    pub stats: PlacementStats,
}

impl Placement {
    pub fn is_complete(&self) -> bool {
        self.status == PlacementStatus::Complete && self.atoms.is_full()
    }
}
