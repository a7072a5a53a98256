use nalgebra::{Point2, Point3, Vector2};

pub fn distance_3d(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Projects a point onto the XY plane.
pub fn flatten_z(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(p.x, p.y, 0.0)
}

pub fn flattened_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    distance_3d(&flatten_z(a), &flatten_z(b))
}

/// Estimates the locally refined in-plane position of a capsomer by adding the refinement
/// delta (`origin_local - origin_icos`) to its ideal XY position.
pub fn refined_xy(
    relative_xyz: &Point3<f64>,
    origin_icos: &Vector2<f64>,
    origin_local: &Vector2<f64>,
) -> Point2<f64> {
    relative_xyz.xy() + (origin_local - origin_icos)
}

pub fn planar_distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Rounds to the given number of decimal places, resolving ties to the even neighbor.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn distance_3d_of_a_3_4_5_triangle() {
        let a = Point3::origin();
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((distance_3d(&a, &b) - 5.0).abs() < EPS);
        assert!((flattened_distance(&a, &b) - 5.0).abs() < EPS);
    }

    #[test]
    fn flattened_distance_ignores_z_separation() {
        let a = Point3::new(0.0, 0.0, -7.0);
        let b = Point3::new(3.0, 4.0, 11.0);
        assert!((flattened_distance(&a, &b) - 5.0).abs() < EPS);
        assert!(distance_3d(&a, &b) > 5.0);
        assert_eq!(flatten_z(&b), Point3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn refined_xy_applies_local_minus_prior_offset() {
        let p = refined_xy(
            &Point3::new(100.0, -50.0, 3.0),
            &Vector2::new(2.0, 2.0),
            &Vector2::new(5.0, 1.0),
        );
        assert_eq!(p, Point2::new(103.0, -51.0));
        assert!((planar_distance(&p, &Point2::new(100.0, -47.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(300.006666, 2), 300.01);
        assert_eq!(round_to(-1.234, 2), -1.23);
        assert_eq!(round_to(1.05, 2), 1.05);
        assert_eq!(round_to(42.0, 2), 42.0);
    }

    #[test]
    fn round_to_resolves_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
