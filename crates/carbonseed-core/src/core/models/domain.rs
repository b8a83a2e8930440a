use crate::core::geometry::density_for_volume;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// The three supported domain shapes, without their dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainKind {
    Cuboid,
    Cylinder,
    Sphere,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DomainKind::Cuboid => "cuboid",
            DomainKind::Cylinder => "cylinder",
            DomainKind::Sphere => "sphere",
        };
        f.write_str(name)
    }
}

/// A simulation domain with its derived continuous dimensions.
///
/// A domain is derived once from a validated configuration and is read-only
/// thereafter. Every variant exposes a cubic bounding cell `[0, bounding_side)³`
/// from which candidates are drawn, a membership predicate, the per-axis periods
/// used by the minimum-image convention and the cell written to the output file.
///
/// The three length scales of the curved domains intentionally disagree: the
/// membership test uses the radius, the minimum-image wrap uses the diameter and
/// the serialized cell uses the padded lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SimulationDomain {
    /// Fully periodic cube of edge `side`.
    Cuboid { side: f64 },
    /// Tube of `radius` along z, periodic along its `height`, with `vacuum`
    /// added to the serialized xy cell.
    Cylinder { radius: f64, height: f64, vacuum: f64 },
    /// Ball of `radius` centred in a cube of edge `padded_side`.
    Sphere { radius: f64, padded_side: f64 },
}

impl SimulationDomain {
    pub fn kind(&self) -> DomainKind {
        match self {
            SimulationDomain::Cuboid { .. } => DomainKind::Cuboid,
            SimulationDomain::Cylinder { .. } => DomainKind::Cylinder,
            SimulationDomain::Sphere { .. } => DomainKind::Sphere,
        }
    }

    /// Edge length of the cube candidates are sampled from.
    ///
    /// For the cylinder this is the height: the cross-section is sampled in a
    /// `height × height` square whose inscribed circle contains the tube.
    pub fn bounding_side(&self) -> f64 {
        match *self {
            SimulationDomain::Cuboid { side } => side,
            SimulationDomain::Cylinder { height, .. } => height,
            SimulationDomain::Sphere { padded_side, .. } => padded_side,
        }
    }

    /// Centre of the bounding cell, which is also the axis / centre of the shape.
    pub fn center(&self) -> Point3<f64> {
        let c = 0.5 * self.bounding_side();
        Point3::new(c, c, c)
    }

    /// Per-axis periods of the minimum-image convention.
    pub fn periods(&self) -> Vector3<f64> {
        match *self {
            SimulationDomain::Cuboid { side } => Vector3::new(side, side, side),
            SimulationDomain::Cylinder { radius, height, .. } => {
                Vector3::new(2.0 * radius, 2.0 * radius, height)
            }
            SimulationDomain::Sphere { radius, .. } => {
                let diameter = 2.0 * radius;
                Vector3::new(diameter, diameter, diameter)
            }
        }
    }

    /// Lower corner of the region accepted positions can occupy.
    ///
    /// Together with [`periods`](Self::periods) this spans one period per axis,
    /// which is what the cell-list neighbor index relies on.
    pub fn periodic_origin(&self) -> Point3<f64> {
        match *self {
            SimulationDomain::Cuboid { .. } => Point3::origin(),
            SimulationDomain::Cylinder { radius, height, .. } => {
                let low = 0.5 * height - radius;
                Point3::new(low, low, 0.0)
            }
            SimulationDomain::Sphere {
                radius,
                padded_side,
            } => {
                let low = 0.5 * padded_side - radius;
                Point3::new(low, low, low)
            }
        }
    }

    /// Diagonal of the serialized lattice (the cell is always orthorhombic).
    ///
    /// The cylinder's xy edge is `radius + vacuum`, not the sampled `height`.
    pub fn lattice_lengths(&self) -> Vector3<f64> {
        match *self {
            SimulationDomain::Cuboid { side } => Vector3::new(side, side, side),
            SimulationDomain::Cylinder {
                radius,
                height,
                vacuum,
            } => Vector3::new(radius + vacuum, radius + vacuum, height),
            SimulationDomain::Sphere { padded_side, .. } => {
                Vector3::new(padded_side, padded_side, padded_side)
            }
        }
    }

    /// The single scalar every coordinate axis is divided by to obtain fractional
    /// coordinates: the side, the height or the padded side.
    pub fn fractional_divisor(&self) -> f64 {
        self.bounding_side()
    }

    /// Volume of the shape itself in Å³ (no vacuum, no padding).
    pub fn shape_volume(&self) -> f64 {
        match *self {
            SimulationDomain::Cuboid { side } => side.powi(3),
            SimulationDomain::Cylinder { radius, height, .. } => PI * radius * radius * height,
            SimulationDomain::Sphere { radius, .. } => 4.0 / 3.0 * PI * radius.powi(3),
        }
    }

    /// Mass density in g/cm³ of `num_atoms` carbon atoms filling the shape.
    ///
    /// # Arguments
    ///
    /// * `num_atoms` - The number of atoms placed in the domain.
    ///
    /// # Return
    ///
    /// The density of the shape without vacuum; for the cylinder this is the
    /// effective density implied by the chosen radius.
    pub fn density(&self, num_atoms: usize) -> f64 {
        density_for_volume(num_atoms, self.shape_volume())
    }
}

impl fmt::Display for SimulationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SimulationDomain::Cuboid { side } => write!(f, "cuboid (side {:.3} Å)", side),
            SimulationDomain::Cylinder {
                radius,
                height,
                vacuum,
            } => write!(
                f,
                "cylinder (radius {:.3} Å, height {:.3} Å, vacuum {:.2} Å)",
                radius, height, vacuum
            ),
            SimulationDomain::Sphere {
                radius,
                padded_side,
            } => write!(
                f,
                "sphere (radius {:.3} Å, padded cell {:.3} Å)",
                radius, padded_side
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn cuboid_periods_and_lattice_equal_side() {
        let domain = SimulationDomain::Cuboid { side: 7.5 };
        assert_eq!(domain.periods(), Vector3::new(7.5, 7.5, 7.5));
        assert_eq!(domain.lattice_lengths(), Vector3::new(7.5, 7.5, 7.5));
        assert_eq!(domain.periodic_origin(), Point3::origin());
        assert_eq!(domain.fractional_divisor(), 7.5);
    }

    #[test]
    fn cylinder_wraps_xy_by_diameter_and_z_by_height() {
        let domain = SimulationDomain::Cylinder {
            radius: 4.0,
            height: 10.4,
            vacuum: 6.0,
        };
        assert_eq!(domain.periods(), Vector3::new(8.0, 8.0, 10.4));
        assert_eq!(domain.bounding_side(), 10.4);
        assert_eq!(domain.lattice_lengths(), Vector3::new(10.0, 10.0, 10.4));
        assert_eq!(domain.fractional_divisor(), 10.4);
        let origin = domain.periodic_origin();
        assert!((origin.x - 1.2).abs() < TOLERANCE);
        assert_eq!(origin.z, 0.0);
    }

    #[test]
    fn sphere_wraps_by_diameter_but_serializes_padded_cell() {
        let domain = SimulationDomain::Sphere {
            radius: 5.0,
            padded_side: 16.0,
        };
        assert_eq!(domain.periods(), Vector3::new(10.0, 10.0, 10.0));
        assert_eq!(domain.lattice_lengths(), Vector3::new(16.0, 16.0, 16.0));
        assert_eq!(domain.center(), Point3::new(8.0, 8.0, 8.0));
        assert_eq!(domain.periodic_origin(), Point3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn cylinder_density_comes_from_radius() {
        let dense = SimulationDomain::Cylinder {
            radius: 5.0,
            height: 13.0,
            vacuum: 6.0,
        };
        let loose = SimulationDomain::Cylinder {
            radius: 7.0,
            height: 18.2,
            vacuum: 6.0,
        };
        assert!(dense.density(200) > loose.density(200));
    }

    #[test]
    fn domain_kind_and_display_agree() {
        let domain = SimulationDomain::Cuboid { side: 2.0 };
        assert_eq!(domain.kind(), DomainKind::Cuboid);
        assert_eq!(domain.kind().to_string(), "cuboid");
        assert!(domain.to_string().starts_with("cuboid"));
    }
}
