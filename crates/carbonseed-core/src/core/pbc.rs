use crate::core::models::domain::SimulationDomain;
use nalgebra::{Point3, Vector3};

/// Wraps a single displacement component to its nearest periodic image.
#[inline]
pub fn wrap_component(d: f64, period: f64) -> f64 {
    if period > 0.0 {
        d - (d / period).round() * period
    } else {
        d
    }
}

/// Minimum-image displacement `a - b` under the domain's periodic convention.
///
/// Each axis is wrapped independently with the period from
/// [`SimulationDomain::periods`]: the side for the cuboid, the diameter in xy and the
/// height in z for the cylinder, the diameter on all axes for the sphere.
#[inline]
pub fn minimum_image(domain: &SimulationDomain, a: &Point3<f64>, b: &Point3<f64>) -> Vector3<f64> {
    let periods = domain.periods();
    let d = a - b;
    Vector3::new(
        wrap_component(d.x, periods.x),
        wrap_component(d.y, periods.y),
        wrap_component(d.z, periods.z),
    )
}

#[inline]
pub fn distance_squared(domain: &SimulationDomain, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    minimum_image(domain, a, b).norm_squared()
}

/// `true` when the minimum-image separation of `a` and `b` is below `cutoff`.
#[inline]
pub fn is_too_close(domain: &SimulationDomain, a: &Point3<f64>, b: &Point3<f64>, cutoff: f64) -> bool {
    distance_squared(domain, a, b) < cutoff * cutoff
}

/// Smallest minimum-image squared distance over all pairs, or `None` for fewer than
/// two positions.
pub fn min_pair_distance_squared(domain: &SimulationDomain, positions: &[Point3<f64>]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            let d2 = distance_squared(domain, a, b);
            best = Some(best.map_or(d2, |current| current.min(d2)));
        }
    }
    best
}
