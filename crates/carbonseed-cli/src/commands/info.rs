use crate::cli::InfoArgs;
use crate::config::build_preview_config;
use crate::error::Result;
use carbonseed::core::geometry;
use carbonseed::core::models::domain::SimulationDomain;
use carbonseed::engine::config::{DomainParams, PlacementConfig};
use carbonseed::engine::error::EngineError;
use std::fmt::Write;
use tracing::info;

pub async fn run(args: InfoArgs) -> Result<()> {
    let config = build_preview_config(&args)?;
    let domain = config.derive_domain().map_err(EngineError::from)?;
    info!(domain = %domain, "Derived domain for preview.");
    print!("{}", render_summary(&config, &domain)?);
    Ok(())
}

/// Human-readable geometry preview, one `key: value` pair per line.
fn render_summary(config: &PlacementConfig, domain: &SimulationDomain) -> Result<String> {
    let mut out = String::new();
    let lattice = domain.lattice_lengths();
    let label = config.label();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Structure:          {}", label.title());
    let _ = writeln!(out, "Output file name:   {}", label.file_name());
    let _ = writeln!(out, "Domain:             {}", domain);
    let _ = writeln!(out, "Atoms:              {}", config.num_atoms);
    let _ = writeln!(out, "Cutoff:             {:.3} Å", config.cutoff);
    let _ = writeln!(
        out,
        "Lattice:            {:.6} × {:.6} × {:.6} Å",
        lattice.x, lattice.y, lattice.z
    );
    let _ = writeln!(
        out,
        "Effective density:  {:.4} g/cm³",
        domain.density(config.num_atoms)
    );

    if let DomainParams::Cylinder { aspect_ratio, .. } = config.domain {
        let range = geometry::cylinder_radius_range(config.num_atoms, aspect_ratio)
            .map_err(EngineError::from)?;
        let _ = writeln!(
            out,
            "Radius range:       {:.3} to {:.3} Å (default {:.3} Å)",
            range.min, range.max, range.default
        );
    }
    Ok(out)
}
