use carbonseed::core::geometry::CYLINDER_DENSITY_DEFAULT;
use carbonseed::core::models::domain::DomainKind;
use carbonseed::engine::config::{DEFAULT_MAX_CONSECUTIVE_REJECTIONS, NeighborSearch};

pub struct DefaultsConfig {
    pub domain_kind: DomainKind,
    pub num_atoms: usize,
    pub cutoff: f64,
    pub cuboid_density: f64,
    pub sphere_density: f64,
    pub cylinder_density: f64,
    pub aspect_ratio: f64,
    pub vacuum: f64,
    pub max_consecutive_rejections: u64,
    pub neighbor_search: NeighborSearch,
}

impl DefaultsConfig {
    pub fn density_for(&self, kind: DomainKind) -> f64 {
        match kind {
            DomainKind::Cuboid => self.cuboid_density,
            DomainKind::Cylinder => self.cylinder_density,
            DomainKind::Sphere => self.sphere_density,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            domain_kind: DomainKind::Cuboid,
            num_atoms: 1000,
            cutoff: 1.2,
            cuboid_density: 2.44,
            sphere_density: 2.26,
            cylinder_density: CYLINDER_DENSITY_DEFAULT,
            aspect_ratio: 1.3,
            vacuum: 6.0,
            max_consecutive_rejections: DEFAULT_MAX_CONSECUTIVE_REJECTIONS,
            neighbor_search: NeighborSearch::CellList,
        }
    }
}
