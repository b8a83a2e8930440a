use crate::cli::GenerateArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use carbonseed::core::models::domain::SimulationDomain;
use carbonseed::engine::cancel::CancellationToken;
use carbonseed::engine::config::{DomainParams, NeighborSearch};
use carbonseed::engine::progress::ProgressReporter;
use carbonseed::engine::state::PlacementStats;
use carbonseed::workflows::generate::{self, GeneratedStructure};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reproducibility record written next to the structure.
///
/// The seed is stored as a string because TOML integers are signed 64-bit.
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct RunManifest<'a> {
    generator: &'static str,
    version: &'static str,
    output: String,
    title: String,
    seed: String,
    num_atoms: usize,
    cutoff: f64,
    effective_density: f64,
    max_consecutive_rejections: u64,
    neighbor_search: NeighborSearch,
    parameters: &'a DomainParams,
    domain: &'a SimulationDomain,
    stats: &'a PlacementStats,
}

impl<'a> RunManifest<'a> {
    fn new(structure: &'a GeneratedStructure, output: &Path) -> Self {
        Self {
            generator: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            output: output.display().to_string(),
            title: structure.title(),
            seed: structure.seed.to_string(),
            num_atoms: structure.atoms.len(),
            cutoff: structure.config.cutoff,
            effective_density: structure.density(),
            max_consecutive_rejections: structure.config.sampling.max_consecutive_rejections,
            neighbor_search: structure.config.sampling.neighbor_search,
            parameters: &structure.config.domain,
            domain: &structure.domain,
            stats: &structure.stats,
        }
    }
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app_config = build_config(&args)?;
    let core_config = app_config.core_config.clone();

    let token = CancellationToken::new();
    let signal_token = token.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current atom.");
            signal_token.cancel();
        }
    });

    let progress_handler = CliProgressHandler::new();
    let callback = progress_handler.get_callback();

    println!(
        "Placing {} atoms in a {} domain...",
        core_config.num_atoms,
        core_config.domain.kind()
    );
    info!("Invoking the core generation workflow...");

    let result = tokio::task::spawn_blocking(move || {
        let reporter = ProgressReporter::with_callback(callback);
        generate::run(&core_config, &reporter, Some(&token))
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("Generation task failed: {}", e)))?;
    signal_task.abort();

    let structure = result?;
    let output_path = resolve_output_path(app_config.output_path.as_deref(), &structure);
    info!("Writing structure to {:?}", &output_path);
    structure.write_poscar_to_path(&output_path)?;

    println!(
        "✓ {} written to: {} (seed {}, effective density {:.3} g/cm³)",
        structure.title(),
        output_path.display(),
        structure.seed,
        structure.density()
    );
    info!(
        candidates = structure.stats.candidates,
        rejections = structure.stats.rejections,
        longest_streak = structure.stats.longest_streak,
        "Placement statistics."
    );

    if let Some(manifest_path) = &app_config.manifest_path {
        write_manifest(&structure, &output_path, manifest_path)?;
        println!("  Manifest written to: {}", manifest_path.display());
    }

    Ok(())
}

/// Uses the conventional file name when no path is given or the path is a directory.
fn resolve_output_path(requested: Option<&Path>, structure: &GeneratedStructure) -> PathBuf {
    match requested {
        Some(path) if path.is_dir() => path.join(structure.file_name()),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(structure.file_name()),
    }
}

fn write_manifest(structure: &GeneratedStructure, output: &Path, path: &Path) -> Result<()> {
    let manifest = RunManifest::new(structure, output);
    let content = toml::to_string_pretty(&manifest).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    std::fs::write(path, content)?;
    Ok(())
}
