//! Lambert BxDF

use crate::{BxdfEval, BxdfEvent, BxdfSample, TraceMode};
use lumen_core::base::{Float, EPSILON_COS_THETA, INV_PI};
use lumen_core::colour::Colour;
use lumen_core::geometry::{Point2f, Vector3f};
use lumen_core::interaction::Interaction;
use lumen_core::rng::RNG;
use lumen_core::sampling::cosine_sample_hemisphere;

/// One-sided diffuse reflector.
pub struct Lambert {
    /// Diffuse reflectance.
    albedo: Colour,
}

impl Lambert {
    /// Creates a new `Lambert`.
    ///
    /// * `albedo` - Diffuse reflectance.
    pub fn new(albedo: Colour) -> Self {
        Self { albedo }
    }

    /// Samples a cosine-weighted direction in the shading frame.
    ///
    /// * `it`    - The surface interaction.
    /// * `_mode` - Which subpath the walk is building; a Lambert surface is
    ///             symmetric.
    /// * `prng`  - Random number source.
    pub fn sample(&self, it: &Interaction, _mode: TraceMode, prng: &mut RNG) -> BxdfSample {
        let cos_theta = it.wo.dot(&it.ns);
        if cos_theta < EPSILON_COS_THETA {
            return BxdfSample::none();
        }

        let u = Point2f::new(prng.uniform_float() as Float, prng.uniform_float() as Float);
        let local = cosine_sample_hemisphere(&u);
        let wi = it.frame.to_world(&local);

        BxdfSample {
            f: self.albedo * INV_PI,
            wi,
            event: BxdfEvent::Diffuse,
            pdf: local.z * INV_PI,
            cos_theta: local.z,
        }
    }

    /// Evaluates the reflector for a fixed pair of directions; black unless
    /// both sit above the shading plane.
    ///
    /// * `wo`    - Given direction, unit, away from the surface.
    /// * `wi`    - Evaluated direction, unit, away from the surface.
    /// * `it`    - The surface interaction.
    /// * `_mode` - Which subpath the walk is building.
    pub fn evaluate(&self, wo: &Vector3f, wi: &Vector3f, it: &Interaction, _mode: TraceMode) -> BxdfEval {
        let cos_theta = wi.dot(&it.frame.normal());
        let from_cos_theta = wo.dot(&it.frame.normal());
        if cos_theta < EPSILON_COS_THETA || from_cos_theta < EPSILON_COS_THETA {
            return BxdfEval::zero();
        }

        BxdfEval {
            f: self.albedo * INV_PI,
            pdf: cos_theta * INV_PI,
            cos_theta,
        }
    }

    /// Returns the reflector's value alone.
    ///
    /// * `wo`    - Given direction, unit, away from the surface.
    /// * `wi`    - Evaluated direction, unit, away from the surface.
    /// * `it`    - The surface interaction.
    /// * `_mode` - Which subpath the walk is building.
    pub fn factor(&self, wo: &Vector3f, wi: &Vector3f, it: &Interaction, _mode: TraceMode) -> Colour {
        let cos_theta = wi.dot(&it.frame.normal());
        let from_cos_theta = wo.dot(&it.frame.normal());
        if cos_theta < EPSILON_COS_THETA || from_cos_theta < EPSILON_COS_THETA {
            return Colour::BLACK;
        }
        self.albedo * INV_PI
    }

    /// Returns the cosine-weighted density of generating `wi`.
    ///
    /// * `wo` - Given direction, unit, away from the surface.
    /// * `wi` - Evaluated direction, unit, away from the surface.
    /// * `it` - The surface interaction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f, it: &Interaction) -> Float {
        let eval_cos_theta = wi.dot(&it.frame.normal());
        let from_cos_theta = wo.dot(&it.frame.normal());
        if eval_cos_theta < EPSILON_COS_THETA || from_cos_theta < EPSILON_COS_THETA {
            return 0.0;
        }
        eval_cos_theta * INV_PI
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::geometry::Frame;

    fn up_facing_interaction() -> Interaction {
        Interaction {
            wo: Vector3f::Z,
            ns: Vector3f::Z,
            n: Vector3f::Z,
            frame: Frame::new(&Vector3f::Z),
            ..Interaction::default()
        }
    }

    #[test]
    fn sample_rejects_grazing_incidence() {
        let lambert = Lambert::new(Colour::new(0.8, 0.8, 0.8));
        let mut it = up_facing_interaction();
        it.wo = Vector3f::X;
        let mut prng = RNG::new(5);
        let s = lambert.sample(&it, TraceMode::Radiance, &mut prng);
        assert_eq!(s.event, BxdfEvent::None);
        assert!(s.f.is_black());
        assert_eq!(s.pdf, 0.0);
    }

    #[test]
    fn sampled_directions_sit_above_the_surface() {
        let lambert = Lambert::new(Colour::new(0.8, 0.8, 0.8));
        let it = up_facing_interaction();
        let mut prng = RNG::new(5);
        for _ in 0..1000 {
            let s = lambert.sample(&it, TraceMode::Radiance, &mut prng);
            assert_eq!(s.event, BxdfEvent::Diffuse);
            assert!(s.wi.dot(&it.ns) >= 0.0);
            assert!((s.wi.length() - 1.0).abs() < 1e-9);
            assert!((s.cos_theta - s.wi.dot(&it.ns)).abs() < 1e-9);
        }
    }

    #[test]
    fn sampling_integrates_to_the_albedo() {
        // The estimator f * cos / pdf collapses to the albedo for every
        // cosine-weighted sample, so the hemisphere integral of f * cos
        // equals the albedo.
        let albedo = Colour::new(0.25, 0.5, 0.75);
        let lambert = Lambert::new(albedo);
        let it = up_facing_interaction();
        let mut prng = RNG::new(23);

        let n = 100_000;
        let mut sum = Colour::BLACK;
        for _ in 0..n {
            let s = lambert.sample(&it, TraceMode::Radiance, &mut prng);
            if s.pdf > 0.0 {
                sum += s.f * (s.cos_theta / s.pdf) / n as Float;
            }
        }

        assert!((sum.r - albedo.r).abs() < 0.01 * albedo.r);
        assert!((sum.g - albedo.g).abs() < 0.01 * albedo.g);
        assert!((sum.b - albedo.b).abs() < 0.01 * albedo.b);
    }

    #[test]
    fn evaluate_matches_density() {
        let lambert = Lambert::new(Colour::new(0.8, 0.8, 0.8));
        let it = up_facing_interaction();
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        let eval = lambert.evaluate(&Vector3f::Z, &wi, &it, TraceMode::Radiance);
        assert!((eval.pdf - 0.8 * INV_PI).abs() < 1e-9);
        assert!((eval.cos_theta - 0.8).abs() < 1e-9);
        assert_eq!(eval.pdf, lambert.pdf(&Vector3f::Z, &wi, &it));
    }

    #[test]
    fn evaluate_is_black_below_the_horizon() {
        let lambert = Lambert::new(Colour::new(0.8, 0.8, 0.8));
        let it = up_facing_interaction();
        let below = Vector3f::new(0.0, 0.6, -0.8);
        assert!(lambert.evaluate(&Vector3f::Z, &below, &it, TraceMode::Radiance).f.is_black());
        assert!(lambert.evaluate(&below, &Vector3f::Z, &it, TraceMode::Radiance).f.is_black());
        assert_eq!(lambert.pdf(&Vector3f::Z, &below, &it), 0.0);
    }
}
