use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::{DomainArg, GenerateArgs, GeometryArgs, InfoArgs};
use crate::error::{CliError, Result};
use carbonseed::core::models::domain::DomainKind;
use carbonseed::engine::config::{NeighborSearch, PlacementConfig, PlacementConfigBuilder};
use clap::ValueEnum;
use std::str::FromStr;

/// Sampling knobs that only the `generate` command exposes as flags.
#[derive(Default)]
struct SamplingOverrides {
    seed: Option<u64>,
    max_rejections: Option<u64>,
    linear_scan: bool,
}

pub fn build_config(args: &GenerateArgs) -> Result<AppConfig> {
    let file_config = load_file_config(&args.geometry)?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let output_file = file_config.output.take().unwrap_or_default();
    let overrides = SamplingOverrides {
        seed: args.seed,
        max_rejections: args.max_rejections,
        linear_scan: args.linear_scan,
    };
    let core_config = resolve_placement(&args.geometry, args.cutoff, file_config, overrides)?;

    Ok(AppConfig {
        output_path: args.output.clone().or(output_file.path),
        manifest_path: args.manifest.clone().or(output_file.manifest),
        core_config,
    })
}

/// Resolves the configuration the `info` command previews; sampling settings are
/// irrelevant there and keep their defaults.
pub fn build_preview_config(args: &InfoArgs) -> Result<PlacementConfig> {
    let file_config = load_file_config(&args.geometry)?;
    resolve_placement(
        &args.geometry,
        None,
        file_config,
        SamplingOverrides::default(),
    )
}

fn load_file_config(geometry: &GeometryArgs) -> Result<FileConfig> {
    match &geometry.config {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn resolve_placement(
    geometry: &GeometryArgs,
    cutoff: Option<f64>,
    mut file_config: FileConfig,
    overrides: SamplingOverrides,
) -> Result<PlacementConfig> {
    let defaults = DefaultsConfig::default();
    let structure_file = file_config.structure.take().unwrap_or_default();
    let domain_file = file_config.domain.take().unwrap_or_default();
    let sampling_file = file_config.sampling.take().unwrap_or_default();

    let kind = geometry
        .domain
        .map(DomainKind::from)
        .or(domain_file.kind)
        .unwrap_or(defaults.domain_kind);
    let num_atoms = geometry
        .num_atoms
        .or(structure_file.num_atoms)
        .unwrap_or(defaults.num_atoms);
    let cutoff = cutoff
        .or(structure_file.cutoff)
        .unwrap_or(defaults.cutoff);
    let density = geometry
        .density
        .or(domain_file.density)
        .unwrap_or(defaults.density_for(kind));
    let vacuum = geometry
        .vacuum
        .or(domain_file.vacuum)
        .unwrap_or(defaults.vacuum);

    let neighbor_search = if overrides.linear_scan {
        NeighborSearch::LinearScan
    } else {
        sampling_file
            .neighbor_search
            .unwrap_or(defaults.neighbor_search)
    };
    let max_consecutive_rejections = overrides
        .max_rejections
        .or(sampling_file.max_consecutive_rejections)
        .unwrap_or(defaults.max_consecutive_rejections);

    let mut builder = PlacementConfigBuilder::new()
        .num_atoms(num_atoms)
        .cutoff(cutoff)
        .domain_kind(kind)
        .max_consecutive_rejections(max_consecutive_rejections)
        .neighbor_search(neighbor_search);
    if let Some(seed) = overrides.seed.or(sampling_file.seed) {
        builder = builder.seed(seed);
    }

    builder = match kind {
        DomainKind::Cuboid => builder.density(density),
        DomainKind::Sphere => builder.density(density).vacuum(vacuum),
        DomainKind::Cylinder => {
            let aspect_ratio = geometry
                .aspect_ratio
                .or(domain_file.aspect_ratio)
                .unwrap_or(defaults.aspect_ratio);
            let builder = builder.aspect_ratio(aspect_ratio).vacuum(vacuum);
            match geometry.radius.or(domain_file.radius) {
                Some(radius) => builder.radius(radius),
                None => builder.cylinder_density(density),
            }
        }
    };

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "structure.num-atoms" => {
                config
                    .structure
                    .get_or_insert_with(Default::default)
                    .num_atoms = Some(parse_value(key, value_str)?);
            }
            "structure.cutoff" => {
                config.structure.get_or_insert_with(Default::default).cutoff =
                    Some(parse_value(key, value_str)?);
            }
            "domain.kind" => {
                let arg = <DomainArg as ValueEnum>::from_str(value_str, true).map_err(|_| {
                    CliError::Config(format!("Invalid value for {}: {}", key, value_str))
                })?;
                config.domain.get_or_insert_with(Default::default).kind = Some(arg.into());
            }
            "domain.density" => {
                config.domain.get_or_insert_with(Default::default).density =
                    Some(parse_value(key, value_str)?);
            }
            "domain.aspect-ratio" => {
                config
                    .domain
                    .get_or_insert_with(Default::default)
                    .aspect_ratio = Some(parse_value(key, value_str)?);
            }
            "domain.radius" => {
                config.domain.get_or_insert_with(Default::default).radius =
                    Some(parse_value(key, value_str)?);
            }
            "domain.vacuum" => {
                config.domain.get_or_insert_with(Default::default).vacuum =
                    Some(parse_value(key, value_str)?);
            }
            "sampling.seed" => {
                config.sampling.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str)?);
            }
            "sampling.max-consecutive-rejections" => {
                config
                    .sampling
                    .get_or_insert_with(Default::default)
                    .max_consecutive_rejections = Some(parse_value(key, value_str)?);
            }
            "sampling.neighbor-search" => {
                let search = match value_str {
                    "cell-list" => NeighborSearch::CellList,
                    "linear-scan" => NeighborSearch::LinearScan,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: {} (expected 'cell-list' or 'linear-scan')",
                            key, value_str
                        )));
                    }
                };
                config
                    .sampling
                    .get_or_insert_with(Default::default)
                    .neighbor_search = Some(search);
            }
            "output.path" => {
                config.output.get_or_insert_with(Default::default).path = Some(value_str.into());
            }
            "output.manifest" => {
                config.output.get_or_insert_with(Default::default).manifest =
                    Some(value_str.into());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use carbonseed::core::geometry;
    use carbonseed::engine::config::DomainParams;
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn generate_args(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["carbonseed", "generate"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            _ => panic!("Expected 'generate' subcommand"),
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("carbonseed.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_produce_cuboid_config() {
        let app = build_config(&generate_args(&[])).expect("build ok");
        let cfg = app.core_config;
        let defaults = DefaultsConfig::default();

        assert_eq!(cfg.num_atoms, defaults.num_atoms);
        assert_eq!(cfg.cutoff, defaults.cutoff);
        assert_eq!(cfg.domain, DomainParams::Cuboid { density: 2.44 });
        assert_eq!(cfg.sampling.seed, None);
        assert_eq!(
            cfg.sampling.max_consecutive_rejections,
            defaults.max_consecutive_rejections
        );
        assert_eq!(cfg.sampling.neighbor_search, NeighborSearch::CellList);
        assert!(app.output_path.is_none());
        assert!(app.manifest_path.is_none());
    }

    #[test]
    fn sphere_uses_its_own_default_density() {
        let app = build_config(&generate_args(&["--domain", "sphere"])).unwrap();
        assert_eq!(
            app.core_config.domain,
            DomainParams::Sphere {
                density: 2.26,
                vacuum: 6.0
            }
        );
    }

    #[test]
    fn cylinder_radius_defaults_to_density_derived_value() {
        let app = build_config(&generate_args(&["--domain", "cylinder", "-n", "200"])).unwrap();
        let expected = geometry::cylinder_radius_range(200, 1.3).unwrap().default;
        match app.core_config.domain {
            DomainParams::Cylinder {
                aspect_ratio,
                radius,
                vacuum,
            } => {
                assert_eq!(aspect_ratio, 1.3);
                assert!((radius - expected).abs() < 1e-12);
                assert_eq!(vacuum, 6.0);
            }
            other => panic!("Expected cylinder parameters, got {:?}", other),
        }
    }

    #[test]
    fn file_values_are_read_and_merged() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [structure]
            num-atoms = 500
            cutoff = 1.3

            [domain]
            kind = "sphere"
            density = 2.0
            vacuum = 4.5

            [sampling]
            seed = 99
            max-consecutive-rejections = 5000
            neighbor-search = "linear-scan"

            [output]
            path = "out/POSCAR"
            manifest = "out/run.toml"
            "#,
        );
        let args = generate_args(&["-c", path.to_str().unwrap()]);
        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.num_atoms, 500);
        assert_eq!(cfg.cutoff, 1.3);
        assert_eq!(
            cfg.domain,
            DomainParams::Sphere {
                density: 2.0,
                vacuum: 4.5
            }
        );
        assert_eq!(cfg.sampling.seed, Some(99));
        assert_eq!(cfg.sampling.max_consecutive_rejections, 5000);
        assert_eq!(cfg.sampling.neighbor_search, NeighborSearch::LinearScan);
        assert_eq!(app.output_path, Some(PathBuf::from("out/POSCAR")));
        assert_eq!(app.manifest_path, Some(PathBuf::from("out/run.toml")));
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [structure]
            num-atoms = 500
            [domain]
            kind = "sphere"
            density = 2.0
            [sampling]
            seed = 99
            "#,
        );
        let args = generate_args(&[
            "-c",
            path.to_str().unwrap(),
            "--domain",
            "cuboid",
            "-n",
            "80",
            "--density",
            "3.1",
            "--seed",
            "1",
            "--linear-scan",
        ]);
        let cfg = build_config(&args).unwrap().core_config;

        assert_eq!(cfg.num_atoms, 80);
        assert_eq!(cfg.domain, DomainParams::Cuboid { density: 3.1 });
        assert_eq!(cfg.sampling.seed, Some(1));
        assert_eq!(cfg.sampling.neighbor_search, NeighborSearch::LinearScan);
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [structure]
            cutoff = 1.0
            "#,
        );
        let args = generate_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "structure.cutoff=1.4",
            "-S",
            "domain.kind=cylinder",
            "-S",
            "domain.aspect-ratio=2.5",
            "-S",
            "domain.vacuum=3.5",
            "-S",
            "sampling.neighbor-search=linear-scan",
            "-S",
            "output.path=tube",
        ]);
        let app = build_config(&args).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.cutoff, 1.4);
        assert!(matches!(
            cfg.domain,
            DomainParams::Cylinder {
                aspect_ratio,
                vacuum,
                ..
            } if aspect_ratio == 2.5 && vacuum == 3.5
        ));
        assert_eq!(cfg.sampling.neighbor_search, NeighborSearch::LinearScan);
        assert_eq!(app.output_path, Some(PathBuf::from("tube")));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let args = generate_args(&["-S", "structure.cutoff"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let args = generate_args(&["-S", "structure.colour=red"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let args = generate_args(&["-S", "structure.num-atoms=many"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [structure]
            atoms = 500
            "#,
        );
        let args = generate_args(&["-c", path.to_str().unwrap()]);
        assert!(matches!(
            build_config(&args),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn out_of_range_values_surface_as_config_errors() {
        let args = generate_args(&["-n", "10"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let args = generate_args(&["--domain", "sphere", "--vacuum", "9.0"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn preview_config_ignores_sampling_flags() {
        let args = match Cli::parse_from(["carbonseed", "info", "--domain", "sphere", "-n", "300"])
            .command
        {
            Commands::Info(args) => args,
            _ => panic!("Expected 'info' subcommand"),
        };
        let cfg = build_preview_config(&args).unwrap();
        assert_eq!(cfg.num_atoms, 300);
        assert_eq!(cfg.sampling.seed, None);
    }
}
