use crate::core::models::domain::SimulationDomain;
use std::f64::consts::PI;
use thiserror::Error;

/// Atomic mass of carbon in atomic mass units.
pub const CARBON_MASS_AMU: f64 = 12.0107;
/// Grams per atomic mass unit.
pub const GRAMS_PER_AMU: f64 = 1.66054e-24;
/// Ångström per centimetre.
pub const ANGSTROM_PER_CM: f64 = 1e8;

/// Cylinder densities (g/cm³) bounding and defaulting the tube radius.
pub const CYLINDER_DENSITY_MIN: f64 = 0.15;
pub const CYLINDER_DENSITY_DEFAULT: f64 = 1.7;
pub const CYLINDER_DENSITY_MAX: f64 = 2.1;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Invalid geometry parameter '{parameter}': {value} (must be finite and positive)")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("Derived dimension '{dimension}' is not positive: {value}")]
    NonPositiveDimension { dimension: &'static str, value: f64 },
}

/// Admissible tube radii for a cylinder of a given atom count and aspect ratio.
///
/// `min` corresponds to the densest tube (2.1 g/cm³), `max` to the loosest
/// (0.15 g/cm³) and `default` to 1.7 g/cm³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRange {
    pub min: f64,
    pub default: f64,
    pub max: f64,
}

impl RadiusRange {
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    pub fn contains(&self, radius: f64) -> bool {
        (self.min..=self.max).contains(&radius)
    }
}

fn require_positive(parameter: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidParameter { parameter, value })
    }
}

fn require_dimension(dimension: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositiveDimension { dimension, value })
    }
}

/// Total mass in grams of `num_atoms` carbon atoms.
pub fn total_mass_grams(num_atoms: usize) -> f64 {
    num_atoms as f64 * CARBON_MASS_AMU * GRAMS_PER_AMU
}

/// Volume in cm³ occupied by `num_atoms` carbon atoms at `density` g/cm³.
pub fn volume_cm3(num_atoms: usize, density: f64) -> Result<f64, GeometryError> {
    require_positive("num_atoms", num_atoms as f64)?;
    let density = require_positive("density", density)?;
    require_dimension("volume", total_mass_grams(num_atoms) / density)
}

/// Side length of the cubic cell holding `num_atoms` at `density`.
pub fn cuboid_side(num_atoms: usize, density: f64) -> Result<f64, GeometryError> {
    let volume = volume_cm3(num_atoms, density)?;
    require_dimension("side", volume.cbrt() * ANGSTROM_PER_CM)
}

/// Radius of the sphere holding `num_atoms` at `density`.
pub fn sphere_radius(num_atoms: usize, density: f64) -> Result<f64, GeometryError> {
    let volume = volume_cm3(num_atoms, density)?;
    require_dimension("radius", (3.0 * volume / (4.0 * PI)).cbrt() * ANGSTROM_PER_CM)
}

/// Tube radius for which a cylinder of height `2 * radius * aspect_ratio` holds
/// `num_atoms` at `density`.
pub fn cylinder_radius_for_density(
    num_atoms: usize,
    density: f64,
    aspect_ratio: f64,
) -> Result<f64, GeometryError> {
    require_positive("num_atoms", num_atoms as f64)?;
    let density = require_positive("density", density)?;
    let aspect_ratio = require_positive("aspect_ratio", aspect_ratio)?;
    let radius_cm =
        (total_mass_grams(num_atoms) / (density * aspect_ratio * 2.0 * PI)).cbrt();
    require_dimension("radius", radius_cm * ANGSTROM_PER_CM)
}

pub fn cylinder_radius_range(
    num_atoms: usize,
    aspect_ratio: f64,
) -> Result<RadiusRange, GeometryError> {
    Ok(RadiusRange {
        min: cylinder_radius_for_density(num_atoms, CYLINDER_DENSITY_MAX, aspect_ratio)?,
        default: cylinder_radius_for_density(num_atoms, CYLINDER_DENSITY_DEFAULT, aspect_ratio)?,
        max: cylinder_radius_for_density(num_atoms, CYLINDER_DENSITY_MIN, aspect_ratio)?,
    })
}

pub fn cylinder_height(radius: f64, aspect_ratio: f64) -> Result<f64, GeometryError> {
    let radius = require_positive("radius", radius)?;
    let aspect_ratio = require_positive("aspect_ratio", aspect_ratio)?;
    require_dimension("height", 2.0 * radius * aspect_ratio)
}

/// Density in g/cm³ of `num_atoms` spread over `volume_a3` Å³.
pub fn density_for_volume(num_atoms: usize, volume_a3: f64) -> f64 {
    let volume_cm3 = volume_a3 / ANGSTROM_PER_CM.powi(3);
    total_mass_grams(num_atoms) / volume_cm3
}

pub fn cuboid_domain(num_atoms: usize, density: f64) -> Result<SimulationDomain, GeometryError> {
    Ok(SimulationDomain::Cuboid {
        side: cuboid_side(num_atoms, density)?,
    })
}

/// The effective density of the tube follows from the chosen radius; it is not
/// re-derived from any target density.
pub fn cylinder_domain(
    radius: f64,
    aspect_ratio: f64,
    vacuum: f64,
) -> Result<SimulationDomain, GeometryError> {
    let height = cylinder_height(radius, aspect_ratio)?;
    let vacuum = require_positive("vacuum", vacuum)?;
    Ok(SimulationDomain::Cylinder {
        radius,
        height,
        vacuum,
    })
}

/// The padded cell is a cube of side `2 * radius + vacuum`, distinct from the sphere.
pub fn sphere_domain(
    num_atoms: usize,
    density: f64,
    vacuum: f64,
) -> Result<SimulationDomain, GeometryError> {
    let radius = sphere_radius(num_atoms, density)?;
    let vacuum = require_positive("vacuum", vacuum)?;
    let padded_side = require_dimension("padded_side", 2.0 * radius + vacuum)?;
    Ok(SimulationDomain::Sphere {
        radius,
        padded_side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE * a.abs().max(1.0)
    }

    #[test]
    fn total_mass_scales_linearly_with_atom_count() {
        assert!(f64_approx_equal(
            total_mass_grams(1000),
            1000.0 * 12.0107 * 1.66054e-24
        ));
        assert!(f64_approx_equal(
            total_mass_grams(120),
            2.0 * total_mass_grams(60)
        ));
    }

    #[test]
    fn cuboid_side_matches_mass_over_density_cube_root() {
        let mass = 60.0 * 12.0107 * 1.66054e-24;
        let expected = (mass / 2.44f64).cbrt() * 1e8;
        let side = cuboid_side(60, 2.44).unwrap();
        assert!(f64_approx_equal(side, expected));
        assert!(side > 7.5 && side < 8.5);
    }

    #[test]
    fn cuboid_volume_recovers_requested_density() {
        let side = cuboid_side(1000, 3.1).unwrap();
        let density = density_for_volume(1000, side.powi(3));
        assert!((density - 3.1).abs() < 1e-9);
    }

    #[test]
    fn sphere_radius_recovers_requested_density() {
        let radius = sphere_radius(500, 2.26).unwrap();
        let volume = 4.0 / 3.0 * PI * radius.powi(3);
        assert!((density_for_volume(500, volume) - 2.26).abs() < 1e-9);
    }

    #[test]
    fn sphere_domain_pads_cell_by_vacuum() {
        let domain = sphere_domain(500, 2.26, 6.0).unwrap();
        match domain {
            SimulationDomain::Sphere {
                radius,
                padded_side,
            } => assert!(f64_approx_equal(padded_side, 2.0 * radius + 6.0)),
            other => panic!("Expected sphere domain, got {:?}", other),
        }
    }

    #[test]
    fn cylinder_radius_range_is_ordered_by_density() {
        let range = cylinder_radius_range(200, 1.3).unwrap();
        assert!(range.min < range.default);
        assert!(range.default < range.max);
        assert!(range.contains(range.midpoint()));
        assert!(!range.contains(range.max * 1.01));
    }

    #[test]
    fn cylinder_radius_for_density_recovers_density() {
        let radius = cylinder_radius_for_density(1000, 1.7, 2.0).unwrap();
        let height = cylinder_height(radius, 2.0).unwrap();
        let volume = PI * radius * radius * height;
        assert!((density_for_volume(1000, volume) - 1.7).abs() < 1e-9);
    }

    #[test]
    fn cylinder_height_is_twice_radius_times_aspect_ratio() {
        assert!(f64_approx_equal(cylinder_height(5.0, 1.3).unwrap(), 13.0));
    }

    #[test]
    fn non_positive_density_is_rejected() {
        assert_eq!(
            cuboid_side(60, 0.0),
            Err(GeometryError::InvalidParameter {
                parameter: "density",
                value: 0.0
            })
        );
        assert!(matches!(
            sphere_radius(60, f64::NAN),
            Err(GeometryError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn zero_atoms_is_rejected() {
        assert!(matches!(
            cuboid_side(0, 2.44),
            Err(GeometryError::InvalidParameter {
                parameter: "num_atoms",
                ..
            })
        ));
    }

    #[test]
    fn cylinder_domain_rejects_non_positive_radius() {
        assert!(matches!(
            cylinder_domain(-1.0, 1.3, 6.0),
            Err(GeometryError::InvalidParameter {
                parameter: "radius",
                ..
            })
        ));
    }
}
