//! Sampling

use crate::base::{Float, TWO_PI};
use crate::geometry::{Point2f, Vector3f};

/// Returns a cosine-weighted direction on the hemisphere around +Z in the
/// local frame (z is up, xy is the tangent plane).
///
/// * `u` - 2-D uniform sample.
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let theta = TWO_PI * u.x;
    let z = u.y;
    let radius = (1.0 - z).sqrt();
    Vector3f::new(theta.cos() * radius, theta.sin() * radius, z.sqrt())
}

/// Returns a uniform sample on a triangle as scalars of its two edges
/// (inverse cumulative distribution technique).
///
/// * `u` - 2-D uniform sample.
pub fn uniform_sample_triangle(u: &Point2f) -> Point2f {
    let e1 = u.x.sqrt();
    Point2f::new(e1 * u.y, e1 * (1.0 - u.y))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3f;
    use crate::rng::RNG;

    fn sample_2d(rng: &mut RNG) -> Point2f {
        Point2f::new(rng.uniform_float() as Float, rng.uniform_float() as Float)
    }

    #[test]
    fn hemisphere_samples_are_unit_and_above_plane() {
        let mut rng = RNG::new(7);
        for _ in 0..10_000 {
            let v = cosine_sample_hemisphere(&sample_2d(&mut rng));
            assert!(v.z >= 0.0);
            assert!((v.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn hemisphere_mean_cosine_matches_distribution() {
        // E[cos theta] = 2/3 under the cosine-weighted density.
        let mut rng = RNG::new(13);
        let n = 200_000;
        let mean = (0..n)
            .map(|_| cosine_sample_hemisphere(&sample_2d(&mut rng)).z)
            .sum::<Float>()
            / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn triangle_samples_stay_inside() {
        let mut rng = RNG::new(3);
        for _ in 0..10_000 {
            let uv = uniform_sample_triangle(&sample_2d(&mut rng));
            assert!(uv.x >= 0.0 && uv.y >= 0.0);
            assert!(uv.x + uv.y <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn triangle_sample_mean_approaches_centroid() {
        let a = Point3f::new(1.0, 0.0, 0.0);
        let b = Point3f::new(3.0, 2.0, 0.0);
        let c = Point3f::new(1.0, 4.0, 2.0);
        let edge1 = b - a;
        let edge2 = c - a;

        let mut rng = RNG::new(101);
        let n = 200_000;
        let mut mean = Point3f::ZERO;
        for _ in 0..n {
            let uv = uniform_sample_triangle(&sample_2d(&mut rng));
            mean += (a + edge1 * uv.x + edge2 * uv.y) / n as Float;
        }

        let centroid = (a + b + c) / 3.0;
        assert!((mean - centroid).length() < 0.02);
    }
}
