use crate::error::{CliError, Result};
use carbonseed::core::models::domain::DomainKind;
use carbonseed::engine::config::NeighborSearch;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileStructureConfig {
    pub num_atoms: Option<usize>,
    pub cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDomainConfig {
    pub kind: Option<DomainKind>,
    pub density: Option<f64>,
    pub aspect_ratio: Option<f64>,
    pub radius: Option<f64>,
    pub vacuum: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSamplingConfig {
    pub seed: Option<u64>,
    pub max_consecutive_rejections: Option<u64>,
    pub neighbor_search: Option<NeighborSearch>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub path: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub structure: Option<FileStructureConfig>,
    pub domain: Option<FileDomainConfig>,
    pub sampling: Option<FileSamplingConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
