//! Surface interactions

use crate::geometry::{Frame, Point3f, Vector3f};

/// Data describing a point where a ray met a surface, filled in by the
/// geometry after an intersection test. All directions are unit vectors
/// pointing away from the point.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    /// Intersection location in world space.
    pub p: Point3f,

    /// Unit direction back toward the previous vertex.
    pub wo: Vector3f,

    /// Shading normal.
    pub ns: Vector3f,

    /// Geometric normal.
    pub n: Vector3f,

    /// Local basis aligned with the shading normal.
    pub frame: Frame,

    /// Index of the surface material in the scene.
    pub material_id: u32,
}
