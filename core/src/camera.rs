//! Pinhole camera
//!
//! In the real world the image plane sits behind the pinhole; placing it in
//! front at unit distance is easier to visualise and simplifies the density
//! evaluations, so the sensor plane lives one unit along the view direction
//! and the sensor vectors are rescaled accordingly.

use crate::base::{Float, EPSILON_RAY};
use crate::config::Config;
use crate::geometry::{Point2f, Point3f, Ray, Vector3f};
use crate::rng::RNG;

/// Sensor width of a full-frame 35mm film back, in mm.
const SENSOR_WIDTH: Float = 36.0;

/// Densities returned by `Camera::evaluate` for a point on the lens and a
/// direction leaving it.
#[derive(Copy, Clone, Debug, Default)]
pub struct CameraPdf {
    /// Density over solid angle of the sensor seeing the direction.
    pub pdf_dir: Float,

    /// Density over the lens area.
    pub pdf_pos: Float,

    /// Cosine between the direction and the view axis.
    pub cos_theta: Float,
}

/// A pinhole camera.
pub struct Camera {
    /// Lens position.
    position: Point3f,

    /// View direction.
    forward: Vector3f,

    /// Image plane basis vector pointing right.
    right: Vector3f,

    /// Image plane basis vector pointing up.
    up: Vector3f,

    /// Sensor area rescaled to unit focal distance.
    sensor_area: Float,

    /// A pinhole lens has no area; one means no effect on the densities.
    lens_area: Float,

    /// Ratio rescaling the sensor vectors to unit focal distance.
    scalar: Float,

    /// Width / height.
    aspect_ratio: Float,

    image_width: u16,
    image_height: u16,

    /// Conversion factors from pixel indices to sensor coordinates.
    dx: Float,
    dy: Float,
}

impl Camera {
    /// Creates a pinhole camera. Panics when the position and the look-at
    /// target coincide, since no view direction can be derived.
    ///
    /// * `position`     - Lens position.
    /// * `look_at`      - View target.
    /// * `focal_length` - Lens focal length in mm.
    /// * `config`       - Render configuration (for the image resolution).
    pub fn new(position: &Point3f, look_at: &Point3f, focal_length: Float, config: &Config) -> Self {
        let aspect_ratio = config.image_width as Float / config.image_height as Float;

        // Rescale the sensor so the image plane sits at distance one.
        let scalar = SENSOR_WIDTH / focal_length;
        let sensor_area = scalar * scalar / aspect_ratio;

        let delta = *look_at - *position;
        if delta.length() < EPSILON_RAY {
            panic!("Camera position and view target are too close together!");
        }
        let forward = delta.normalize();

        // If the view direction and world up (+Z) are collinear, or close to
        // it, fall back to the world X axis.
        let world_up = if forward.dot(&Vector3f::Z).abs() < 0.99 {
            Vector3f::Z
        } else {
            Vector3f::X
        };
        let right = forward.cross(&world_up).normalize();
        let up = -(right.cross(&forward)).normalize();

        info!("Camera at {:?} looking toward {:?}", position, look_at);

        Self {
            position: *position,
            forward,
            right,
            up,
            sensor_area,
            lens_area: 1.0,
            scalar,
            aspect_ratio,
            image_width: config.image_width,
            image_height: config.image_height,
            dx: 1.0 / (config.image_width as Float - 1.0),
            dy: 1.0 / (config.image_height as Float - 1.0),
        }
    }

    /// Generates a primary ray through a pixel, jittered by half a pixel on
    /// each axis.
    ///
    /// * `x`    - Pixel x-coordinate.
    /// * `y`    - Pixel y-coordinate.
    /// * `prng` - Random number source.
    pub fn generate_ray(&self, x: u16, y: u16, prng: &mut RNG) -> Ray {
        let rnd_x = prng.uniform_float() as Float - 0.5;
        let rnd_y = prng.uniform_float() as Float - 0.5;

        let dir = self.forward
            + self.right * (self.scalar * ((x as Float + rnd_x) * self.dx - 0.5))
            + self.up * (self.scalar / self.aspect_ratio * ((y as Float + rnd_y) * self.dy - 0.5));

        Ray::new(self.position, dir.normalize())
    }

    /// Evaluates the importance emitted by the camera for a point on the lens
    /// and a direction away from it (Veach 115). Zero when the direction is
    /// behind the lens or misses the sensor.
    ///
    /// * `_lens_point` - Point on the lens (a pinhole has exactly one).
    /// * `direction`   - Unit direction away from the lens.
    pub fn we(&self, _lens_point: &Point3f, direction: &Vector3f) -> Float {
        let cos_theta = self.forward.dot(direction);
        if cos_theta <= 0.0 {
            return 0.0;
        }

        let (x, y) = self.sensor_coordinates(direction, cos_theta);
        if x.abs() > 0.5 || y.abs() > 0.5 {
            return 0.0;
        }

        // The lens-to-sensor distance along the direction is 1 / cos_theta:
        //   pdf_dir = pdf_sensor_area * (1 / cos_theta)^2 / cos_theta
        //   We      = pdf_dir * pdf_lens_area / cos_theta
        1.0 / (self.sensor_area * self.lens_area * cos_theta * cos_theta * cos_theta * cos_theta)
    }

    /// Returns the sensor and lens densities for a point on the lens and a
    /// direction away from it; all zero when the point is off the lens or the
    /// direction misses the sensor.
    ///
    /// * `lens_point` - Point to verify against the lens.
    /// * `direction`  - Unit direction away from the lens.
    pub fn evaluate(&self, lens_point: &Point3f, direction: &Vector3f) -> CameraPdf {
        if (*lens_point - self.position).length() > EPSILON_RAY {
            return CameraPdf::default();
        }

        let cos_theta = self.forward.dot(direction);
        if cos_theta < 0.0 {
            return CameraPdf::default();
        }

        let (x, y) = self.sensor_coordinates(direction, cos_theta);
        if x.abs() > 0.5 || y.abs() > 0.5 {
            return CameraPdf::default();
        }

        CameraPdf {
            pdf_dir: 1.0 / (self.sensor_area * cos_theta * cos_theta * cos_theta),
            pdf_pos: 1.0 / self.lens_area,
            cos_theta,
        }
    }

    /// Samples a point on the lens; degenerate for a pinhole.
    ///
    /// * `_prng` - Random number source (unused, the lens is a point).
    pub fn sample_lens(&self, _prng: &mut RNG) -> Point3f {
        self.position
    }

    /// Returns the lens normal at a point, or zero when the point is not on
    /// the lens.
    ///
    /// * `lens_point` - Point to verify against the lens.
    pub fn lens_normal(&self, lens_point: &Point3f) -> Vector3f {
        if (*lens_point - self.position).length() > EPSILON_RAY {
            return Vector3f::ZERO;
        }
        self.forward
    }

    /// Projects a world point through the lens onto the sensor and returns
    /// the raster position, or `None` when the point is behind the camera or
    /// projects outside the image.
    ///
    /// * `world_point` - The point to project.
    /// * `_lens_point` - Point on the lens (a pinhole has exactly one).
    pub fn raster(&self, world_point: &Point3f, _lens_point: &Point3f) -> Option<Point2f> {
        let direction = (*world_point - self.position).normalize();
        let cos_theta = direction.dot(&self.forward);
        if cos_theta <= 0.0 {
            return None;
        }

        let (x, y) = self.sensor_coordinates(&direction, cos_theta);
        if x.abs() > 0.5 || y.abs() > 0.5 {
            return None;
        }

        Some(Point2f::new(
            (x + 0.5) * self.image_width as Float,
            (y + 0.5) * self.image_height as Float,
        ))
    }

    /// A pinhole lens cannot be hit by a ray; it can only be sampled.
    pub fn is_delta(&self) -> bool {
        true
    }

    /// Projects a direction onto the unit-distance sensor plane. On the
    /// sensor when both coordinates are within [-0.5, 0.5].
    fn sensor_coordinates(&self, direction: &Vector3f, cos_theta: Float) -> (Float, Float) {
        let x = direction.dot(&self.right) / (cos_theta * self.scalar);
        let y = direction.dot(&self.up) / (cos_theta * self.scalar / self.aspect_ratio);
        (x, y)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
