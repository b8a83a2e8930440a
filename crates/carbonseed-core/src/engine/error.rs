use super::config::ConfigError;
use crate::core::geometry::GeometryError;
use crate::core::io::poscar::PoscarError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Domain geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error(
        "Placement infeasible: {rejections} consecutive candidates rejected with {placed} of {total} atoms placed"
    )]
    PlacementInfeasible {
        placed: usize,
        total: usize,
        rejections: u64,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] PoscarError),

    #[error("Placement cancelled with {placed} of {total} atoms placed")]
    Cancelled { placed: usize, total: usize },
}
