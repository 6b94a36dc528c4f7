//! Orthonormal frames

use super::Vector3f;

/// A right-handed orthonormal basis constructed around a unit normal, used to
/// move directions between world space and the local shading space where the
/// normal is the z-axis.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    x_axis: Vector3f,
    y_axis: Vector3f,
    z_axis: Vector3f,
}

impl Default for Frame {
    /// Returns the world-axis-aligned frame.
    fn default() -> Self {
        Self {
            x_axis: Vector3f::X,
            y_axis: Vector3f::Y,
            z_axis: Vector3f::Z,
        }
    }
}

impl Frame {
    /// Creates a frame using the given vector as its normal (z-axis).
    ///
    /// The helper axis is world X unless the normal is nearly collinear with
    /// it, in which case world Y is used, so the cross products stay well
    /// conditioned.
    ///
    /// * `normal` - The normal.
    pub fn new(normal: &Vector3f) -> Self {
        let z_axis = normal.normalize();
        let helper = if z_axis.x.abs() > 0.995 {
            Vector3f::Y
        } else {
            Vector3f::X
        };
        let y_axis = z_axis.cross(&helper).normalize();
        // y and z are unit length and perpendicular, so x is unit by construction.
        let x_axis = y_axis.cross(&z_axis);
        Self { x_axis, y_axis, z_axis }
    }

    /// Transforms a vector from the local frame to world space.
    ///
    /// * `v` - The local-space vector.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.x_axis * v.x + self.y_axis * v.y + self.z_axis * v.z
    }

    /// Transforms a vector from world space into the local frame.
    ///
    /// * `v` - The world-space vector.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(self.x_axis.dot(v), self.y_axis.dot(v), self.z_axis.dot(v))
    }

    /// Tangent plane vector (x-axis).
    pub fn tangent(&self) -> Vector3f {
        self.x_axis
    }

    /// Tangent plane vector (y-axis).
    pub fn bitangent(&self) -> Vector3f {
        self.y_axis
    }

    /// Normal plane vector (z-axis).
    pub fn normal(&self) -> Vector3f {
        self.z_axis
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_vector() -> impl Strategy<Value = Vector3f> {
        (-1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64)
            .prop_map(|(x, y, z)| Vector3f::new(x, y, z))
            .prop_filter("non-degenerate", |v| v.length_squared() > 1e-4)
            .prop_map(|v| v.normalize())
    }

    proptest! {
        #[test]
        fn axes_are_unit_length(n in unit_vector()) {
            let frame = Frame::new(&n);
            prop_assert!((frame.tangent().length() - 1.0).abs() < 1e-9);
            prop_assert!((frame.bitangent().length() - 1.0).abs() < 1e-9);
            prop_assert!((frame.normal().length() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn axes_are_orthogonal(n in unit_vector()) {
            let frame = Frame::new(&n);
            prop_assert!(frame.tangent().dot(&frame.bitangent()).abs() < 1e-9);
            prop_assert!(frame.bitangent().dot(&frame.normal()).abs() < 1e-9);
            prop_assert!(frame.tangent().dot(&frame.normal()).abs() < 1e-9);
        }

        #[test]
        fn frame_is_right_handed(n in unit_vector()) {
            let frame = Frame::new(&n);
            let cross = frame.tangent().cross(&frame.bitangent());
            prop_assert!((cross - frame.normal()).length() < 1e-9);
        }

        #[test]
        fn round_trip(n in unit_vector(), v in (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64)) {
            let frame = Frame::new(&n);
            let v = Vector3f::new(v.0, v.1, v.2);
            let round = frame.to_local(&frame.to_world(&v));
            prop_assert!((round - v).length() < 1e-9);
        }
    }

    #[test]
    fn helper_axis_switches_near_world_x() {
        // A normal almost collinear with world X must not degenerate.
        let frame = Frame::new(&Vector3f::new(0.9999, 0.001, 0.001).normalize());
        assert!((frame.tangent().length() - 1.0).abs() < 1e-9);
        assert!((frame.bitangent().length() - 1.0).abs() < 1e-9);
    }
}
