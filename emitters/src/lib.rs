//! Emitters

mod triangle;

// Re-export.
pub use triangle::*;

use lumen_core::base::Float;
use lumen_core::colour::Colour;
use lumen_core::geometry::{Point3f, Vector3f};
use lumen_core::rng::RNG;

/// Classification of emitter variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EmitterType {
    /// Emitting surface area.
    Area,

    /// Parallel light from a fixed direction.
    Directional,

    /// Light arriving from an infinitely distant surround.
    Environment,

    /// A point source.
    Point,

    /// A point source with a cone falloff.
    Spot,
}

/// Return value for `Emitter::sample_le()`: a sampled emission ray with its
/// densities.
#[derive(Copy, Clone, Debug)]
pub struct Le {
    /// Emitted energy.
    pub value: Colour,

    /// Point on the emitter.
    pub point: Point3f,

    /// Unit direction leaving the emitter.
    pub direction: Vector3f,

    /// Surface normal at the point; not all emitters have one (see
    /// `is_delta`).
    pub normal: Vector3f,

    /// The direction's density with respect to solid angle.
    pub pdf_dir: Float,

    /// The point's density with respect to surface area.
    pub pdf_pos: Float,

    /// Cosine between the direction and the emitter normal.
    pub cos_theta: Float,
}

/// Return value for `Emitter::pdf_le()`: the densities of an emission ray
/// evaluated at a point on the emitter.
#[derive(Copy, Clone, Debug, Default)]
pub struct LePdf {
    /// The direction's density with respect to solid angle.
    pub pdf_dir: Float,

    /// The point's density with respect to surface area.
    pub pdf_pos: Float,

    /// Cosine between the direction and the emitter normal.
    pub cos_theta: Float,
}

/// A light source, dispatched over the closed set of emitter variants.
pub enum Emitter {
    /// An emitting triangle.
    Triangle(TriangleEmitter),
}

impl Emitter {
    /// Samples a point on the emitter and a direction leaving it.
    ///
    /// * `prng` - Random number source.
    pub fn sample_le(&self, prng: &mut RNG) -> Le {
        match self {
            Self::Triangle(triangle) => triangle.sample_le(prng),
        }
    }

    /// Returns the radiance leaving `point` along `w`; zero from the back
    /// side.
    ///
    /// * `point` - Point on the emitter.
    /// * `w`     - Unit direction away from the point.
    pub fn l(&self, point: &Point3f, w: &Vector3f) -> Colour {
        match self {
            Self::Triangle(triangle) => triangle.l(point, w),
        }
    }

    /// Evaluates the emission densities for a point on the emitter and a
    /// direction away from it.
    ///
    /// * `point` - Point on the emitter.
    /// * `w`     - Unit direction away from the point.
    pub fn pdf_le(&self, point: &Point3f, w: &Vector3f) -> LePdf {
        match self {
            Self::Triangle(triangle) => triangle.pdf_le(point, w),
        }
    }

    /// Returns the solid-angle density of emitting along `w` from `point`.
    ///
    /// * `point` - Point on the emitter.
    /// * `w`     - Unit direction away from the point.
    pub fn pdf_dir(&self, point: &Point3f, w: &Vector3f) -> Float {
        match self {
            Self::Triangle(triangle) => triangle.pdf_dir(point, w),
        }
    }

    /// Returns the surface-area density of sampling `point`.
    ///
    /// * `point` - Point on the emitter.
    /// * `w`     - Unit direction away from the point.
    pub fn pdf_pos(&self, point: &Point3f, w: &Vector3f) -> Float {
        match self {
            Self::Triangle(triangle) => triangle.pdf_pos(point, w),
        }
    }

    /// Returns the emitter classification.
    pub fn emitter_type(&self) -> EmitterType {
        match self {
            Self::Triangle(_) => EmitterType::Area,
        }
    }

    /// True for emitters that cannot be intersected (point or directional
    /// sources).
    pub fn is_delta(&self) -> bool {
        match self {
            Self::Triangle(_) => false,
        }
    }
}
