//! Mirror BxDF

use crate::{BxdfEval, BxdfEvent, BxdfSample, TraceMode};
use lumen_core::base::{Float, EPSILON_COS_THETA};
use lumen_core::colour::Colour;
use lumen_core::geometry::Vector3f;
use lumen_core::interaction::Interaction;
use lumen_core::rng::RNG;

/// One-sided Dirac reflector. Not physically based.
pub struct Mirror {
    /// Reflectance applied to every bounce.
    reflectance: Colour,
}

impl Mirror {
    /// Creates a new `Mirror`.
    ///
    /// * `reflectance` - Reflectance applied to every bounce.
    pub fn new(reflectance: Colour) -> Self {
        Self { reflectance }
    }

    /// Reflects the incoming direction around the shading normal. The
    /// density is a delta, reported as one.
    ///
    /// * `it`    - The surface interaction.
    /// * `_mode` - Which subpath the walk is building.
    /// * `_prng` - Random number source (unused, the direction is fixed).
    pub fn sample(&self, it: &Interaction, _mode: TraceMode, _prng: &mut RNG) -> BxdfSample {
        let cos_theta = it.wo.dot(&it.ns);
        if cos_theta < EPSILON_COS_THETA {
            return BxdfSample::none();
        }

        let wi = -it.wo + it.ns * (2.0 * cos_theta);

        BxdfSample {
            f: self.reflectance,
            wi,
            event: BxdfEvent::Reflect,
            pdf: 1.0,
            cos_theta: wi.dot(&it.ns),
        }
    }

    /// A delta cannot be evaluated.
    pub fn evaluate(&self, _wo: &Vector3f, _wi: &Vector3f, _it: &Interaction, _mode: TraceMode) -> BxdfEval {
        BxdfEval::zero()
    }

    /// A delta cannot be evaluated.
    pub fn factor(&self, _wo: &Vector3f, _wi: &Vector3f, _it: &Interaction, _mode: TraceMode) -> Colour {
        Colour::BLACK
    }

    /// A delta has no continuous density.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f, _it: &Interaction) -> Float {
        0.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::geometry::Frame;

    #[test]
    fn reflects_around_the_shading_normal() {
        let mirror = Mirror::new(Colour::WHITE);
        let it = Interaction {
            wo: Vector3f::new(0.0, -0.6, 0.8),
            ns: Vector3f::Z,
            n: Vector3f::Z,
            frame: Frame::new(&Vector3f::Z),
            ..Interaction::default()
        };
        let mut prng = RNG::default();
        let s = mirror.sample(&it, TraceMode::Radiance, &mut prng);

        assert_eq!(s.event, BxdfEvent::Reflect);
        assert!((s.wi - Vector3f::new(0.0, 0.6, 0.8)).length() < 1e-9);
        assert_eq!(s.pdf, 1.0);
        assert!((s.cos_theta - 0.8).abs() < 1e-9);
    }

    #[test]
    fn back_face_does_not_reflect() {
        let mirror = Mirror::new(Colour::WHITE);
        let it = Interaction {
            wo: -Vector3f::Z,
            ns: Vector3f::Z,
            n: Vector3f::Z,
            ..Interaction::default()
        };
        let mut prng = RNG::default();
        let s = mirror.sample(&it, TraceMode::Radiance, &mut prng);
        assert_eq!(s.event, BxdfEvent::None);
    }

    #[test]
    fn delta_cannot_be_evaluated() {
        let mirror = Mirror::new(Colour::WHITE);
        let it = Interaction::default();
        let v = Vector3f::Z;
        assert!(mirror.evaluate(&v, &v, &it, TraceMode::Radiance).f.is_black());
        assert!(mirror.factor(&v, &v, &it, TraceMode::Radiance).is_black());
        assert_eq!(mirror.pdf(&v, &v, &it), 0.0);
    }
}
