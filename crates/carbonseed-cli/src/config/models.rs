use carbonseed::engine::config::PlacementConfig;
use std::path::PathBuf;

pub struct AppConfig {
    /// File or directory to write to; `None` means the conventional name in the
    /// current directory.
    pub output_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub core_config: PlacementConfig,
}
