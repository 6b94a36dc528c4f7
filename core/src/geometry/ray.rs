//! Rays

use super::{Point3f, Vector3f};
use crate::base::EPSILON_RAY;

/// A ray with an origin and a unit direction.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ray {
    /// Origin.
    pub origin: Point3f,

    /// Unit direction.
    pub direction: Vector3f,
}

impl Ray {
    /// Creates a ray.
    ///
    /// * `origin`    - Origin.
    /// * `direction` - Unit direction.
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray whose origin is advanced along the direction by
    /// `EPSILON_RAY` to avoid self-intersection with the spawning surface.
    ///
    /// * `origin`    - Origin.
    /// * `direction` - Unit direction.
    pub fn spawn(origin: Point3f, direction: Vector3f) -> Self {
        Self {
            origin: origin + direction * EPSILON_RAY,
            direction,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_offsets_origin() {
        let ray = Ray::spawn(Point3f::ZERO, Vector3f::Z);
        assert_eq!(ray.origin, Vector3f::Z * EPSILON_RAY);
        assert_eq!(ray.direction, Vector3f::Z);
    }
}
