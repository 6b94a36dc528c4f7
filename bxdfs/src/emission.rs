//! Emission BxDF

use crate::{BxdfEval, BxdfEvent, BxdfSample, TraceMode};
use lumen_core::base::{Float, EPSILON_COS_THETA};
use lumen_core::colour::Colour;
use lumen_core::geometry::Vector3f;
use lumen_core::interaction::Interaction;
use lumen_core::rng::RNG;

/// One-sided diffuse emitter, no reflection. The radiance itself is carried
/// by the matching scene emitter; this model only lets the camera walk
/// recognise that it struck a light.
pub struct Emission {
    /// Scene emitter id this surface belongs to.
    id: u32,
}

impl Emission {
    /// Creates a new `Emission`.
    ///
    /// * `id` - Scene emitter id this surface belongs to.
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// Reports an emission event on the front face, no scattering on the
    /// back.
    ///
    /// * `it`    - The surface interaction.
    /// * `_mode` - Which subpath the walk is building.
    /// * `_prng` - Random number source (unused, nothing is scattered).
    pub fn sample(&self, it: &Interaction, _mode: TraceMode, _prng: &mut RNG) -> BxdfSample {
        let cos_theta = it.wo.dot(&it.ns);
        if cos_theta < EPSILON_COS_THETA {
            return BxdfSample::none();
        }

        BxdfSample {
            f: Colour::BLACK,
            wi: Vector3f::ZERO,
            event: BxdfEvent::Emission,
            pdf: 0.0,
            cos_theta: 0.0,
        }
    }

    /// An emitter surface does not reflect.
    pub fn evaluate(&self, _wo: &Vector3f, _wi: &Vector3f, _it: &Interaction, _mode: TraceMode) -> BxdfEval {
        BxdfEval::zero()
    }

    /// An emitter surface does not reflect.
    pub fn factor(&self, _wo: &Vector3f, _wi: &Vector3f, _it: &Interaction, _mode: TraceMode) -> Colour {
        Colour::BLACK
    }

    /// An emitter surface does not reflect.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f, _it: &Interaction) -> Float {
        0.0
    }

    /// The scene emitter id this surface belongs to.
    pub fn emitter_id(&self) -> u32 {
        self.id
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_face_reports_emission() {
        let emission = Emission::new(3);
        let it = Interaction {
            wo: Vector3f::Z,
            ns: Vector3f::Z,
            n: Vector3f::Z,
            ..Interaction::default()
        };
        let mut prng = RNG::default();
        let s = emission.sample(&it, TraceMode::Radiance, &mut prng);
        assert_eq!(s.event, BxdfEvent::Emission);
        assert_eq!(emission.emitter_id(), 3);
    }

    #[test]
    fn back_face_reports_nothing() {
        let emission = Emission::new(3);
        let it = Interaction {
            wo: -Vector3f::Z,
            ns: Vector3f::Z,
            n: Vector3f::Z,
            ..Interaction::default()
        };
        let mut prng = RNG::default();
        let s = emission.sample(&it, TraceMode::Radiance, &mut prng);
        assert_eq!(s.event, BxdfEvent::None);
    }
}
