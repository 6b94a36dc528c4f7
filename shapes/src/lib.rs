//! Shapes

mod triangle;

// Re-export.
pub use triangle::*;

use lumen_core::base::Float;
use lumen_core::geometry::Ray;
use lumen_core::interaction::Interaction;

/// Scene geometry, dispatched over the closed set of shape variants.
pub enum Shape {
    /// A triangle.
    Triangle(Triangle),
}

impl Shape {
    /// Returns the positive distance along the ray at which the shape is
    /// intersected, or a negative value when it is missed.
    ///
    /// * `ray` - The ray to test.
    pub fn intersect(&self, ray: &Ray) -> Float {
        match self {
            Self::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    /// Fills in the interaction data for a confirmed hit. Should only be
    /// called for the winning intersection.
    ///
    /// * `ray`      - The intersecting ray.
    /// * `distance` - Hit distance returned by `intersect`.
    pub fn post_intersect(&self, ray: &Ray, distance: Float) -> Interaction {
        match self {
            Self::Triangle(triangle) => triangle.post_intersect(ray, distance),
        }
    }
}
