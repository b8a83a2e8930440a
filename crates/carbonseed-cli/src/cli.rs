use carbonseed::core::models::domain::DomainKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Materials Theory Group contributors",
    version,
    about = "carbonseed CLI - Generates random, non-overlapping carbon starting structures in periodic cuboid, cylinder and sphere domains.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place atoms in a domain and write the structure as a POSCAR file.
    Generate(GenerateArgs),
    /// Show the derived domain dimensions without placing any atoms.
    Info(InfoArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainArg {
    /// Periodic cube (amorphous graphite).
    Cuboid,
    /// Periodic tube (multi-walled nanotube).
    Cylinder,
    /// Sphere in a vacuum-padded cube (multi-shell fullerene).
    Sphere,
}

impl From<DomainArg> for DomainKind {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Cuboid => DomainKind::Cuboid,
            DomainArg::Cylinder => DomainKind::Cylinder,
            DomainArg::Sphere => DomainKind::Sphere,
        }
    }
}

/// Domain and size parameters shared by `generate` and `info`.
#[derive(Args, Debug, Clone, Default)]
pub struct GeometryArgs {
    /// Domain shape. Falls back to the config file, then to `cuboid`.
    #[arg(short, long, value_enum)]
    pub domain: Option<DomainArg>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of carbon atoms to place (at least 60).
    #[arg(short, long, value_name = "INT")]
    pub num_atoms: Option<usize>,

    /// Mass density in g/cm³. For the cylinder this is the target density the
    /// radius is derived from when no radius is given.
    #[arg(long, value_name = "FLOAT")]
    pub density: Option<f64>,

    /// Cylinder height over diameter.
    #[arg(long, value_name = "FLOAT")]
    pub aspect_ratio: Option<f64>,

    /// Cylinder radius in Å, overriding any density.
    #[arg(long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Vacuum padding in Å around the cylinder or sphere.
    #[arg(long, value_name = "FLOAT")]
    pub vacuum: Option<f64>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Output file or directory. Defaults to the conventional POSCAR name in the
    /// current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Minimum permitted distance between two atoms in Å.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Seed for the random number generator. A random seed is drawn and reported if omitted.
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// Consecutive rejected candidates after which the run is declared infeasible.
    #[arg(long, value_name = "U64")]
    pub max_rejections: Option<u64>,

    /// Compare candidates against every placed atom instead of using a cell list.
    #[arg(long)]
    pub linear_scan: bool,

    /// Write a TOML manifest with the seed, derived domain and placement statistics.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S structure.num-atoms=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InfoArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,
}
