use crate::core::io::naming::StructureLabel;
use crate::core::io::poscar::{PoscarFile, PoscarMetadata};
use crate::core::io::traits::CoordinateFile;
use crate::core::models::atoms::AtomSet;
use crate::core::models::domain::SimulationDomain;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::PlacementConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::PlacementEngine;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{PlacementStats, PlacementStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{info, instrument};

/// A fully placed structure together with everything needed to reproduce and write it.
#[derive(Debug, Clone)]
pub struct GeneratedStructure {
    pub config: PlacementConfig,
    pub domain: SimulationDomain,
    pub atoms: AtomSet,
    pub stats: PlacementStats,
    /// The seed actually used, whether configured or drawn from entropy.
    pub seed: u64,
    pub label: StructureLabel,
}

impl GeneratedStructure {
    pub fn title(&self) -> String {
        self.label.title()
    }

    pub fn file_name(&self) -> String {
        self.label.file_name()
    }

    /// Effective mass density of the placed atoms over the shape volume, in g/cm³.
    pub fn density(&self) -> f64 {
        self.domain.density(self.atoms.len())
    }

    fn metadata(&self) -> PoscarMetadata {
        PoscarMetadata::new(self.title())
    }

    pub fn to_poscar_string(&self) -> Result<String, EngineError> {
        Ok(PoscarFile::write_to_string(
            &self.domain,
            &self.atoms,
            &self.metadata(),
        )?)
    }

    pub fn write_poscar_to_path(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        PoscarFile::write_to_path(&self.domain, &self.atoms, &self.metadata(), path)?;
        Ok(())
    }
}

/// Runs a complete generation.
///
/// # Arguments
///
/// * `config` - The run parameters. They are re-validated before use.
/// * `reporter` - Receives phase and per-atom progress events.
/// * `cancel` - Optional stop flag, observed between accepted atoms.
///
/// # Errors
///
/// Returns [`EngineError::Configuration`] or [`EngineError::Geometry`] for bad parameters,
/// [`EngineError::PlacementInfeasible`] when the rejection ceiling is hit, and
/// [`EngineError::Cancelled`] when the token was set before the last atom was placed.
#[instrument(skip_all, name = "generate_workflow")]
pub fn run(
    config: &PlacementConfig,
    reporter: &ProgressReporter,
    cancel: Option<&CancellationToken>,
) -> Result<GeneratedStructure, EngineError> {
    // === Phase 1: Validate and size the domain ===
    reporter.report(Progress::PhaseStart {
        name: "Deriving Domain",
    });
    config.validate()?;
    let domain = config.derive_domain()?;
    info!(
        domain = %domain,
        num_atoms = config.num_atoms,
        cutoff = config.cutoff,
        "Domain derived."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Place atoms ===
    let seed = config
        .sampling
        .seed
        .unwrap_or_else(|| rand::thread_rng().r#gen());
    info!(seed, "Seeding random number generator.");
    let mut rng = StdRng::seed_from_u64(seed);

    reporter.report(Progress::PhaseStart {
        name: "Placing Atoms",
    });
    let mut engine = PlacementEngine::from_config(&domain, config);
    if let Some(token) = cancel {
        engine = engine.with_cancellation(token);
    }
    let placement = engine.place(&mut rng, reporter)?;
    reporter.report(Progress::PhaseFinish);

    if placement.status == PlacementStatus::Cancelled {
        return Err(EngineError::Cancelled {
            placed: placement.atoms.len(),
            total: config.num_atoms,
        });
    }

    let structure = GeneratedStructure {
        config: config.clone(),
        domain,
        atoms: placement.atoms,
        stats: placement.stats,
        seed,
        label: config.label(),
    };
    info!(
        density = structure.density(),
        acceptance_rate = structure.stats.acceptance_rate(),
        "Generation complete."
    );
    Ok(structure)
}
