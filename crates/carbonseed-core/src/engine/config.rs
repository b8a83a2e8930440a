use crate::core::geometry::{
    self, CYLINDER_DENSITY_MAX, CYLINDER_DENSITY_MIN, GeometryError, RadiusRange,
};
use crate::core::io::naming::{SizeLabel, StructureLabel};
use crate::core::models::domain::{DomainKind, SimulationDomain};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const MIN_ATOMS: usize = 60;
pub const CUTOFF_RANGE: RangeInclusive<f64> = 1.0..=1.4;
pub const CUBOID_DENSITY_RANGE: RangeInclusive<f64> = 2.0..=4.0;
pub const SPHERE_DENSITY_RANGE: RangeInclusive<f64> = 1.4..=2.8;
pub const CYLINDER_DENSITY_RANGE: RangeInclusive<f64> = CYLINDER_DENSITY_MIN..=CYLINDER_DENSITY_MAX;
pub const ASPECT_RATIO_RANGE: RangeInclusive<f64> = 1.0..=5.5;
pub const VACUUM_RANGE: RangeInclusive<f64> = 3.0..=8.0;
pub const DEFAULT_MAX_CONSECUTIVE_REJECTIONS: u64 = 1_000_000;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Atom count {value} is below the minimum of {min}")]
    TooFewAtoms { value: usize, min: usize },

    #[error("Parameter '{parameter}' = {value} is outside the permitted range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("The consecutive-rejection ceiling must be at least 1")]
    InvalidRejectionCeiling,

    #[error("Cannot derive parameter bounds: {0}")]
    Geometry(#[from] GeometryError),
}

fn check_range(
    parameter: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Strategy used to find previously accepted atoms near a candidate.
///
/// Both strategies apply the same minimum-image metric and cutoff, so for a given
/// random stream they accept and reject exactly the same candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborSearch {
    #[default]
    CellList,
    LinearScan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingConfig {
    pub seed: Option<u64>,
    pub max_consecutive_rejections: u64,
    pub neighbor_search: NeighborSearch,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_consecutive_rejections: DEFAULT_MAX_CONSECUTIVE_REJECTIONS,
            neighbor_search: NeighborSearch::default(),
        }
    }
}

/// Domain-specific physical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DomainParams {
    Cuboid {
        density: f64,
    },
    Cylinder {
        aspect_ratio: f64,
        radius: f64,
        vacuum: f64,
    },
    Sphere {
        density: f64,
        vacuum: f64,
    },
}

impl DomainParams {
    pub fn kind(&self) -> DomainKind {
        match self {
            DomainParams::Cuboid { .. } => DomainKind::Cuboid,
            DomainParams::Cylinder { .. } => DomainKind::Cylinder,
            DomainParams::Sphere { .. } => DomainKind::Sphere,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementConfig {
    pub num_atoms: usize,
    pub cutoff: f64,
    pub domain: DomainParams,
    pub sampling: SamplingConfig,
}

impl PlacementConfig {
    /// Checks every parameter against its permitted range.
    ///
    /// The cylinder radius is bounded by the radii corresponding to
    /// [`CYLINDER_DENSITY_RANGE`] for this atom count and aspect ratio.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_atoms < MIN_ATOMS {
            return Err(ConfigError::TooFewAtoms {
                value: self.num_atoms,
                min: MIN_ATOMS,
            });
        }
        check_range("cutoff", self.cutoff, &CUTOFF_RANGE)?;
        if self.sampling.max_consecutive_rejections == 0 {
            return Err(ConfigError::InvalidRejectionCeiling);
        }

        match self.domain {
            DomainParams::Cuboid { density } => {
                check_range("density", density, &CUBOID_DENSITY_RANGE)?;
            }
            DomainParams::Cylinder {
                aspect_ratio,
                radius,
                vacuum,
            } => {
                check_range("aspect_ratio", aspect_ratio, &ASPECT_RATIO_RANGE)?;
                let range = self.radius_range(aspect_ratio)?;
                check_range("radius", radius, &(range.min..=range.max))?;
                check_range("vacuum", vacuum, &VACUUM_RANGE)?;
            }
            DomainParams::Sphere { density, vacuum } => {
                check_range("density", density, &SPHERE_DENSITY_RANGE)?;
                check_range("vacuum", vacuum, &VACUUM_RANGE)?;
            }
        }
        Ok(())
    }

    fn radius_range(&self, aspect_ratio: f64) -> Result<RadiusRange, ConfigError> {
        Ok(geometry::cylinder_radius_range(self.num_atoms, aspect_ratio)?)
    }

    /// Derives the simulation domain. Call [`validate`](Self::validate) first.
    pub fn derive_domain(&self) -> Result<SimulationDomain, GeometryError> {
        match self.domain {
            DomainParams::Cuboid { density } => geometry::cuboid_domain(self.num_atoms, density),
            DomainParams::Cylinder {
                aspect_ratio,
                radius,
                vacuum,
            } => geometry::cylinder_domain(radius, aspect_ratio, vacuum),
            DomainParams::Sphere { density, vacuum } => {
                geometry::sphere_domain(self.num_atoms, density, vacuum)
            }
        }
    }

    pub fn label(&self) -> StructureLabel {
        let size = match self.domain {
            DomainParams::Cuboid { density } | DomainParams::Sphere { density, .. } => {
                SizeLabel::Density(density)
            }
            DomainParams::Cylinder {
                aspect_ratio,
                radius,
                ..
            } => SizeLabel::Tube {
                radius,
                aspect_ratio,
            },
        };
        StructureLabel::new(self.num_atoms, size)
    }
}

#[derive(Default)]
pub struct PlacementConfigBuilder {
    num_atoms: Option<usize>,
    cutoff: Option<f64>,
    domain_kind: Option<DomainKind>,
    density: Option<f64>,
    aspect_ratio: Option<f64>,
    radius: Option<f64>,
    cylinder_density: Option<f64>,
    vacuum: Option<f64>,
    seed: Option<u64>,
    max_consecutive_rejections: Option<u64>,
    neighbor_search: Option<NeighborSearch>,
}

impl PlacementConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_atoms(mut self, n: usize) -> Self {
        self.num_atoms = Some(n);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn domain_kind(mut self, kind: DomainKind) -> Self {
        self.domain_kind = Some(kind);
        self
    }
    /// Mass density of the cuboid or sphere.
    pub fn density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }
    pub fn aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }
    /// Explicit tube radius; takes precedence over [`cylinder_density`](Self::cylinder_density).
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    /// Target tube density from which the radius is derived.
    pub fn cylinder_density(mut self, density: f64) -> Self {
        self.cylinder_density = Some(density);
        self
    }
    pub fn vacuum(mut self, vacuum: f64) -> Self {
        self.vacuum = Some(vacuum);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn max_consecutive_rejections(mut self, ceiling: u64) -> Self {
        self.max_consecutive_rejections = Some(ceiling);
        self
    }
    pub fn neighbor_search(mut self, search: NeighborSearch) -> Self {
        self.neighbor_search = Some(search);
        self
    }

    pub fn build(self) -> Result<PlacementConfig, ConfigError> {
        let num_atoms = self
            .num_atoms
            .ok_or(ConfigError::MissingParameter("num_atoms"))?;
        let cutoff = self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?;
        let kind = self
            .domain_kind
            .ok_or(ConfigError::MissingParameter("domain_kind"))?;

        let domain = match kind {
            DomainKind::Cuboid => DomainParams::Cuboid {
                density: self.density.ok_or(ConfigError::MissingParameter("density"))?,
            },
            DomainKind::Cylinder => {
                let aspect_ratio = self
                    .aspect_ratio
                    .ok_or(ConfigError::MissingParameter("aspect_ratio"))?;
                let radius = match (self.radius, self.cylinder_density) {
                    (Some(radius), _) => radius,
                    (None, Some(density)) => {
                        check_range("aspect_ratio", aspect_ratio, &ASPECT_RATIO_RANGE)?;
                        check_range("cylinder_density", density, &CYLINDER_DENSITY_RANGE)?;
                        geometry::cylinder_radius_for_density(num_atoms, density, aspect_ratio)?
                    }
                    (None, None) => return Err(ConfigError::MissingParameter("radius")),
                };
                DomainParams::Cylinder {
                    aspect_ratio,
                    radius,
                    vacuum: self.vacuum.ok_or(ConfigError::MissingParameter("vacuum"))?,
                }
            }
            DomainKind::Sphere => DomainParams::Sphere {
                density: self.density.ok_or(ConfigError::MissingParameter("density"))?,
                vacuum: self.vacuum.ok_or(ConfigError::MissingParameter("vacuum"))?,
            },
        };

        let config = PlacementConfig {
            num_atoms,
            cutoff,
            domain,
            sampling: SamplingConfig {
                seed: self.seed,
                max_consecutive_rejections: self
                    .max_consecutive_rejections
                    .unwrap_or(DEFAULT_MAX_CONSECUTIVE_REJECTIONS),
                neighbor_search: self.neighbor_search.unwrap_or_default(),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuboid_builder() -> PlacementConfigBuilder {
        PlacementConfigBuilder::new()
            .num_atoms(60)
            .cutoff(1.2)
            .domain_kind(DomainKind::Cuboid)
            .density(2.44)
    }

    #[test]
    fn builder_produces_cuboid_config_with_sampling_defaults() {
        let config = cuboid_builder().build().unwrap();
        assert_eq!(config.domain, DomainParams::Cuboid { density: 2.44 });
        assert_eq!(config.sampling, SamplingConfig::default());
        assert_eq!(
            config.sampling.max_consecutive_rejections,
            DEFAULT_MAX_CONSECUTIVE_REJECTIONS
        );
        assert_eq!(config.sampling.neighbor_search, NeighborSearch::CellList);
    }

    #[test]
    fn missing_density_is_reported() {
        let result = PlacementConfigBuilder::new()
            .num_atoms(60)
            .cutoff(1.2)
            .domain_kind(DomainKind::Sphere)
            .vacuum(6.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("density")));
    }

    #[test]
    fn too_few_atoms_is_rejected() {
        let result = cuboid_builder().num_atoms(59).build();
        assert_eq!(result, Err(ConfigError::TooFewAtoms { value: 59, min: 60 }));
    }

    #[test]
    fn cutoff_outside_range_is_rejected() {
        let result = cuboid_builder().cutoff(1.5).build();
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange {
                parameter: "cutoff",
                ..
            })
        ));
    }

    #[test]
    fn nan_cutoff_is_rejected() {
        assert!(cuboid_builder().cutoff(f64::NAN).build().is_err());
    }

    #[test]
    fn density_ranges_differ_between_cuboid_and_sphere() {
        assert!(cuboid_builder().density(1.5).build().is_err());
        let sphere = PlacementConfigBuilder::new()
            .num_atoms(60)
            .cutoff(1.2)
            .domain_kind(DomainKind::Sphere)
            .density(1.5)
            .vacuum(6.0)
            .build();
        assert!(sphere.is_ok());
    }

    #[test]
    fn vacuum_outside_range_is_rejected() {
        let result = PlacementConfigBuilder::new()
            .num_atoms(60)
            .cutoff(1.2)
            .domain_kind(DomainKind::Sphere)
            .density(2.26)
            .vacuum(9.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange {
                parameter: "vacuum",
                ..
            })
        ));
    }

    #[test]
    fn cylinder_radius_derived_from_density() {
        let config = PlacementConfigBuilder::new()
            .num_atoms(200)
            .cutoff(1.2)
            .domain_kind(DomainKind::Cylinder)
            .aspect_ratio(1.3)
            .cylinder_density(1.7)
            .vacuum(6.0)
            .build()
            .unwrap();
        let range = geometry::cylinder_radius_range(200, 1.3).unwrap();
        match config.domain {
            DomainParams::Cylinder { radius, .. } => {
                assert!((radius - range.default).abs() < 1e-12)
            }
            other => panic!("Expected cylinder parameters, got {:?}", other),
        }
    }

    #[test]
    fn cylinder_radius_outside_density_bounds_is_rejected() {
        let range = geometry::cylinder_radius_range(200, 1.3).unwrap();
        let result = PlacementConfigBuilder::new()
            .num_atoms(200)
            .cutoff(1.2)
            .domain_kind(DomainKind::Cylinder)
            .aspect_ratio(1.3)
            .radius(range.max + 0.5)
            .vacuum(6.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange {
                parameter: "radius",
                ..
            })
        ));
    }

    #[test]
    fn zero_rejection_ceiling_is_rejected() {
        let result = cuboid_builder().max_consecutive_rejections(0).build();
        assert_eq!(result, Err(ConfigError::InvalidRejectionCeiling));
    }

    #[test]
    fn label_uses_density_or_tube_dimensions() {
        let config = cuboid_builder().build().unwrap();
        assert_eq!(config.label().file_name(), "POSCAR_60atoms_2p44gcc");
    }

    #[test]
    fn derive_domain_matches_geometry_functions() {
        let config = cuboid_builder().build().unwrap();
        let expected = geometry::cuboid_side(60, 2.44).unwrap();
        assert_eq!(
            config.derive_domain().unwrap(),
            SimulationDomain::Cuboid { side: expected }
        );
    }
}
