//! Triangles

use lumen_core::base::Float;
use lumen_core::geometry::{Frame, Point3f, Ray, Vector3f};
use lumen_core::interaction::Interaction;

/// A one-sided triangle, stored as an anchor vertex and the two edges leaving
/// it. The normal follows the winding (edge1 × edge2).
pub struct Triangle {
    /// Anchor vertex `a`.
    position: Point3f,

    /// Edge `b - a`.
    edge1: Vector3f,

    /// Edge `c - a`.
    edge2: Vector3f,

    /// Unit normal.
    normal: Vector3f,

    /// Shading frame aligned with the normal.
    frame: Frame,

    /// Index of the surface material in the scene.
    material_id: u32,
}

impl Triangle {
    /// Creates a triangle from its vertices.
    ///
    /// * `a`           - First vertex.
    /// * `b`           - Second vertex.
    /// * `c`           - Third vertex.
    /// * `material_id` - Index of the surface material in the scene.
    pub fn new(a: Point3f, b: Point3f, c: Point3f, material_id: u32) -> Self {
        let edge1 = b - a;
        let edge2 = c - a;
        let normal = edge1.cross(&edge2).normalize();
        Self {
            position: a,
            edge1,
            edge2,
            normal,
            frame: Frame::new(&normal),
            material_id,
        }
    }

    /// Möller-Trumbore intersection ("Fast, minimum storage ray/triangle
    /// intersection", 1997). Returns the hit distance; the distinct negative
    /// return values identify the rejection reason when debugging.
    ///
    /// * `ray` - The ray to test.
    pub fn intersect(&self, ray: &Ray) -> Float {
        let p = ray.direction.cross(&self.edge2);
        let d = self.edge1.dot(&p);

        // A determinant near zero means the ray lies in the triangle's plane.
        if d.abs() < 1e-6 {
            return -1.0;
        }

        let inv_d = 1.0 / d;
        let diff = ray.origin - self.position;

        let u = diff.dot(&p) * inv_d;
        if !(0.0..=1.0).contains(&u) {
            return -2.0;
        }

        let q = diff.cross(&self.edge1);
        let v = ray.direction.dot(&q) * inv_d;
        if v < 0.0 || u + v > 1.0 {
            return -3.0;
        }

        let t = q.dot(&self.edge2) * inv_d;
        if t < 1e-6 {
            return -4.0;
        }

        t
    }

    /// Fills in the interaction data for a confirmed hit.
    ///
    /// * `ray`      - The intersecting ray.
    /// * `distance` - Hit distance returned by `intersect`.
    pub fn post_intersect(&self, ray: &Ray, distance: Float) -> Interaction {
        Interaction {
            p: ray.origin + ray.direction * distance,
            wo: -ray.direction,
            ns: self.normal,
            n: self.normal,
            frame: self.frame,
            material_id: self.material_id,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            7,
        )
    }

    #[test]
    fn hits_through_the_interior() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point3f::new(0.25, 0.25, -2.0), Vector3f::Z);
        let t = triangle.intersect(&ray);
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn misses_outside_the_edges() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point3f::new(0.75, 0.75, -2.0), Vector3f::Z);
        assert!(triangle.intersect(&ray) < 0.0);
    }

    #[test]
    fn rejects_parallel_rays() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point3f::new(0.0, -1.0, 0.0), Vector3f::Y);
        assert!(triangle.intersect(&ray) < 0.0);
    }

    #[test]
    fn rejects_hits_behind_the_origin() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point3f::new(0.25, 0.25, 2.0), Vector3f::Z);
        assert!(triangle.intersect(&ray) < 0.0);
    }

    #[test]
    fn post_intersect_fills_surface_data() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point3f::new(0.25, 0.25, -2.0), Vector3f::Z);
        let t = triangle.intersect(&ray);
        let it = triangle.post_intersect(&ray, t);

        assert!((it.p - Point3f::new(0.25, 0.25, 0.0)).length() < 1e-9);
        assert_eq!(it.wo, -Vector3f::Z);
        assert_eq!(it.n, it.ns);
        assert_eq!(it.material_id, 7);
        assert!((it.frame.normal() - it.ns).length() < 1e-12);
    }

    #[test]
    fn normal_follows_winding() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point3f::new(0.25, 0.25, -2.0), Vector3f::Z);
        let it = triangle.post_intersect(&ray, triangle.intersect(&ray));
        assert!((it.n - Vector3f::Z).length() < 1e-12);
    }
}
