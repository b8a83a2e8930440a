use crate::core::models::domain::SimulationDomain;
use nalgebra::Point3;
use rand::Rng;

/// Whether `p` lies inside the domain's permitted shape.
///
/// The cuboid has no constraint beyond periodicity. The cylinder constrains only the
/// cross-section around the cell's vertical centre line; the sphere constrains all
/// three axes around the padded cell's centre.
pub fn is_inside(domain: &SimulationDomain, p: &Point3<f64>) -> bool {
    let c = domain.center();
    match *domain {
        SimulationDomain::Cuboid { .. } => true,
        SimulationDomain::Cylinder { radius, .. } => {
            let dx = p.x - c.x;
            let dy = p.y - c.y;
            dx * dx + dy * dy <= radius * radius
        }
        SimulationDomain::Sphere { radius, .. } => (p - c).norm_squared() <= radius * radius,
    }
}

/// Draws a point uniformly in the domain's bounding cube `[0, side)³`.
pub fn draw_in_bounding_cell(domain: &SimulationDomain, rng: &mut impl Rng) -> Point3<f64> {
    let side = domain.bounding_side();
    Point3::new(
        side * rng.r#gen::<f64>(),
        side * rng.r#gen::<f64>(),
        side * rng.r#gen::<f64>(),
    )
}

/// Redraws the constrained coordinates of `p` until it lies inside the shape.
///
/// The cylinder redraws `x, y` in the bounding square and keeps `z`; the sphere
/// redraws all three coordinates in the padded cube. The loop is unbounded: each draw
/// succeeds with probability shape-volume / bounding-volume, which is always positive.
pub fn resample_inside(
    domain: &SimulationDomain,
    mut p: Point3<f64>,
    rng: &mut impl Rng,
) -> Point3<f64> {
    let side = domain.bounding_side();
    match domain {
        SimulationDomain::Cuboid { .. } => {}
        SimulationDomain::Cylinder { .. } => {
            while !is_inside(domain, &p) {
                p.x = side * rng.r#gen::<f64>();
                p.y = side * rng.r#gen::<f64>();
            }
        }
        SimulationDomain::Sphere { .. } => {
            while !is_inside(domain, &p) {
                p = draw_in_bounding_cell(domain, rng);
            }
        }
    }
    p
}

/// One fresh candidate: a bounding-cell draw followed by the correcting resample.
pub fn draw_candidate(domain: &SimulationDomain, rng: &mut impl Rng) -> Point3<f64> {
    let p = draw_in_bounding_cell(domain, rng);
    resample_inside(domain, p, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cylinder() -> SimulationDomain {
        SimulationDomain::Cylinder {
            radius: 4.0,
            height: 10.4,
            vacuum: 6.0,
        }
    }

    fn sphere() -> SimulationDomain {
        SimulationDomain::Sphere {
            radius: 5.0,
            padded_side: 16.0,
        }
    }

    #[test]
    fn cuboid_accepts_every_point() {
        let domain = SimulationDomain::Cuboid { side: 3.0 };
        assert!(is_inside(&domain, &Point3::new(-100.0, 50.0, 1e6)));
    }

    #[test]
    fn cylinder_membership_ignores_z() {
        let domain = cylinder();
        let c = domain.center();
        assert!(is_inside(&domain, &Point3::new(c.x + 3.9, c.y, 1e3)));
        assert!(!is_inside(&domain, &Point3::new(c.x + 3.0, c.y + 3.0, c.z)));
    }

    #[test]
    fn sphere_membership_is_inclusive_at_radius() {
        let domain = sphere();
        let c = domain.center();
        assert!(is_inside(&domain, &Point3::new(c.x + 5.0, c.y, c.z)));
        assert!(!is_inside(&domain, &Point3::new(c.x + 5.0, c.y + 0.1, c.z)));
    }

    #[test]
    fn bounding_cell_draws_stay_in_cell() {
        let domain = sphere();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = draw_in_bounding_cell(&domain, &mut rng);
            for v in p.iter() {
                assert!((0.0..16.0).contains(v));
            }
        }
    }

    #[test]
    fn cylinder_resample_keeps_z_and_lands_inside() {
        let domain = cylinder();
        let mut rng = StdRng::seed_from_u64(11);
        let outside = Point3::new(0.0, 0.0, 3.25);
        let p = resample_inside(&domain, outside, &mut rng);
        assert!(is_inside(&domain, &p));
        assert_eq!(p.z, 3.25);
    }

    #[test]
    fn candidates_always_satisfy_membership() {
        let mut rng = StdRng::seed_from_u64(3);
        for domain in [cylinder(), sphere()] {
            for _ in 0..500 {
                let p = draw_candidate(&domain, &mut rng);
                assert!(is_inside(&domain, &p));
            }
        }
    }

    #[test]
    fn inside_point_is_returned_unchanged() {
        let domain = sphere();
        let mut rng = StdRng::seed_from_u64(5);
        let c = domain.center();
        assert_eq!(resample_inside(&domain, c, &mut rng), c);
    }
}
