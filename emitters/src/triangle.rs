//! Triangle emitter

use crate::{Le, LePdf};
use lumen_core::base::{Float, EPSILON_COS_THETA, INV_PI, INV_TWO_PI};
use lumen_core::colour::Colour;
use lumen_core::geometry::{Frame, Point2f, Point3f, Vector3f};
use lumen_core::rng::RNG;
use lumen_core::sampling::{cosine_sample_hemisphere, uniform_sample_triangle};

/// An emitting triangle with uniform area sampling and cosine-weighted
/// directions over its geometric normal.
pub struct TriangleEmitter {
    /// Anchor vertex `a`.
    position: Point3f,

    /// Edge `b - a`.
    edge1: Vector3f,

    /// Edge `c - a`.
    edge2: Vector3f,

    /// Unit normal following the winding.
    normal: Vector3f,

    /// Local basis around the normal.
    local_space: Frame,

    /// Emitted energy.
    energy: Colour,

    /// 1 / triangle area.
    pdf_area: Float,
}

impl TriangleEmitter {
    /// Creates a new `TriangleEmitter`.
    ///
    /// * `a`      - First vertex.
    /// * `b`      - Second vertex.
    /// * `c`      - Third vertex.
    /// * `energy` - Emitted energy.
    pub fn new(a: Point3f, b: Point3f, c: Point3f, energy: Colour) -> Self {
        let edge1 = b - a;
        let edge2 = c - a;
        let cross = edge1.cross(&edge2);
        let normal = cross.normalize();
        Self {
            position: a,
            edge1,
            edge2,
            normal,
            local_space: Frame::new(&normal),
            energy,
            pdf_area: 1.0 / (0.5 * cross.length()),
        }
    }

    /// Samples an emission ray: a uniform point on the triangle and a
    /// cosine-weighted direction above it.
    ///
    /// * `prng` - Random number source.
    pub fn sample_le(&self, prng: &mut RNG) -> Le {
        let u = Point2f::new(prng.uniform_float() as Float, prng.uniform_float() as Float);
        let uv = uniform_sample_triangle(&u);
        let point = self.position + self.edge1 * uv.x + self.edge2 * uv.y;

        let u = Point2f::new(prng.uniform_float() as Float, prng.uniform_float() as Float);
        let local = cosine_sample_hemisphere(&u);
        let direction = self.local_space.to_world(&local);

        Le {
            value: self.energy,
            point,
            direction,
            normal: self.normal,
            pdf_dir: local.z * INV_PI,
            pdf_pos: self.pdf_area,
            cos_theta: local.z,
        }
    }

    /// Returns the emitted radiance along `w`; zero from the back side.
    ///
    /// * `_point` - Point on the emitter (radiance is uniform).
    /// * `w`      - Unit direction away from the point.
    pub fn l(&self, _point: &Point3f, w: &Vector3f) -> Colour {
        if self.normal.dot(w) > 0.0 {
            self.energy
        } else {
            Colour::BLACK
        }
    }

    /// Evaluates the emission densities at a point; zero when the direction
    /// grazes or leaves through the back.
    ///
    /// * `_point` - Point on the emitter (the density is uniform).
    /// * `w`      - Unit direction away from the point.
    pub fn pdf_le(&self, _point: &Point3f, w: &Vector3f) -> LePdf {
        let cos_theta = self.normal.dot(w);
        if cos_theta < EPSILON_COS_THETA {
            return LePdf::default();
        }
        LePdf {
            pdf_dir: INV_TWO_PI,
            pdf_pos: self.pdf_area,
            cos_theta,
        }
    }

    /// Returns the cosine-weighted solid-angle density of emitting along `w`.
    ///
    /// * `_point` - Point on the emitter (the density is uniform).
    /// * `w`      - Unit direction away from the point.
    pub fn pdf_dir(&self, _point: &Point3f, w: &Vector3f) -> Float {
        let cos_theta = self.normal.dot(w);
        if cos_theta < EPSILON_COS_THETA {
            return 0.0;
        }
        cos_theta * INV_PI
    }

    /// Returns the uniform surface-area density.
    pub fn pdf_pos(&self, _point: &Point3f, _w: &Vector3f) -> Float {
        self.pdf_area
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_emitter() -> TriangleEmitter {
        TriangleEmitter::new(
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(2.0, 0.0, 0.0),
            Point3f::new(0.0, 2.0, 0.0),
            Colour::new(10.0, 10.0, 10.0),
        )
    }

    #[test]
    fn area_density_is_reciprocal_area() {
        let emitter = test_emitter();
        // Area of the right triangle with legs 2 is 2.
        assert!((emitter.pdf_pos(&Point3f::ZERO, &Vector3f::Z) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sampled_rays_start_on_the_triangle_and_leave_the_front() {
        let emitter = test_emitter();
        let mut prng = RNG::new(17);
        for _ in 0..1000 {
            let le = emitter.sample_le(&mut prng);
            // On the plane z = 0 and inside the legs.
            assert!(le.point.z.abs() < 1e-12);
            assert!(le.point.x >= 0.0 && le.point.y >= 0.0);
            assert!(le.point.x / 2.0 + le.point.y / 2.0 <= 1.0 + 1e-9);
            // Leaving the front side.
            assert!(le.direction.dot(&le.normal) >= 0.0);
            assert!((le.cos_theta - le.direction.dot(&le.normal)).abs() < 1e-9);
            assert!((le.pdf_dir - le.cos_theta * INV_PI).abs() < 1e-12);
            assert!((le.pdf_pos - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn radiance_is_one_sided() {
        let emitter = test_emitter();
        let p = Point3f::new(0.5, 0.5, 0.0);
        assert_eq!(emitter.l(&p, &Vector3f::Z), Colour::new(10.0, 10.0, 10.0));
        assert_eq!(emitter.l(&p, &-Vector3f::Z), Colour::BLACK);
    }

    #[test]
    fn pdf_le_rejects_grazing_directions() {
        let emitter = test_emitter();
        let p = Point3f::new(0.5, 0.5, 0.0);
        let grazing = Vector3f::X;
        let pdf = emitter.pdf_le(&p, &grazing);
        assert_eq!(pdf.pdf_dir, 0.0);
        assert_eq!(pdf.pdf_pos, 0.0);

        let pdf = emitter.pdf_le(&p, &Vector3f::Z);
        assert!((pdf.pdf_dir - INV_TWO_PI).abs() < 1e-12);
        assert!((pdf.pdf_pos - 0.5).abs() < 1e-12);
        assert!((pdf.cos_theta - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pdf_dir_is_cosine_weighted() {
        let emitter = test_emitter();
        let p = Point3f::new(0.5, 0.5, 0.0);
        let w = Vector3f::new(0.0, 0.6, 0.8);
        assert!((emitter.pdf_dir(&p, &w) - 0.8 * INV_PI).abs() < 1e-12);
        assert_eq!(emitter.pdf_dir(&p, &-Vector3f::Z), 0.0);
    }
}
