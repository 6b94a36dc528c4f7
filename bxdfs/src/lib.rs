//! BxDFs
//!
//! Surface scattering models. The variant set is closed, so dispatch is a
//! small `match` instead of trait objects, which keeps the walk loops free of
//! indirect calls.

mod emission;
mod lambert;
mod mirror;

// Re-export.
pub use emission::*;
pub use lambert::*;
pub use mirror::*;

use lumen_core::base::{Float, EPSILON_BLACK};
use lumen_core::colour::Colour;
use lumen_core::geometry::Vector3f;
use lumen_core::interaction::Interaction;
use lumen_core::rng::RNG;

/// Identifies which subpath a walk is building (Veach 93). The concrete
/// models here are symmetric, but the tag drives the shading-normal
/// correction applied by the importance walk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TraceMode {
    /// Light subpath; `wo` points back toward the emitter.
    Importance,

    /// Camera subpath; `wo` points back toward the camera.
    Radiance,
}

/// Outcome category of sampling a BxDF.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BxdfEvent {
    /// No scattering; the walk terminates.
    None,

    /// Diffuse reflection.
    Diffuse,

    /// The surface emits; only the radiance walk acts on this.
    Emission,

    /// Dirac reflection.
    Reflect,

    /// Dirac transmission. No model in the tree produces it; the walks treat
    /// it as a terminator.
    Transmit,
}

/// Result of sampling a BxDF for an outgoing direction.
#[derive(Copy, Clone, Debug)]
pub struct BxdfSample {
    /// BxDF value for the sampled pair of directions.
    pub f: Colour,

    /// Sampled world-space direction, unit, away from the surface.
    pub wi: Vector3f,

    /// What kind of scattering event the sample is.
    pub event: BxdfEvent,

    /// Solid-angle density of generating `wi`.
    pub pdf: Float,

    /// Cosine between `wi` and the shading normal.
    pub cos_theta: Float,
}

impl BxdfSample {
    /// The no-scattering sample: black value, zero direction and densities.
    pub fn none() -> Self {
        Self {
            f: Colour::BLACK,
            wi: Vector3f::ZERO,
            event: BxdfEvent::None,
            pdf: 0.0,
            cos_theta: 0.0,
        }
    }
}

/// Result of evaluating a BxDF for a fixed pair of directions.
#[derive(Copy, Clone, Debug)]
pub struct BxdfEval {
    /// BxDF value.
    pub f: Colour,

    /// Solid-angle density of generating `wi` from `wo`.
    pub pdf: Float,

    /// Cosine between `wi` and the shading normal.
    pub cos_theta: Float,
}

impl BxdfEval {
    /// The zero evaluation, returned for invalid pairs and delta models.
    pub fn zero() -> Self {
        Self {
            f: Colour::BLACK,
            pdf: 0.0,
            cos_theta: 0.0,
        }
    }
}

/// A surface scattering model.
pub enum Bxdf {
    /// One-sided diffuse reflector.
    Lambert(Lambert),

    /// One-sided Dirac reflector.
    Mirror(Mirror),

    /// One-sided diffuse emitter.
    Emission(Emission),
}

impl Bxdf {
    /// Samples an outgoing direction for the walk to continue in. Returns the
    /// no-scattering sample when the incoming cosine against the shading
    /// normal is below `EPSILON_COS_THETA`.
    ///
    /// * `it`    - The surface interaction.
    /// * `mode`  - Which subpath the walk is building.
    /// * `prng`  - Random number source.
    pub fn sample(&self, it: &Interaction, mode: TraceMode, prng: &mut RNG) -> BxdfSample {
        match self {
            Self::Lambert(lambert) => lambert.sample(it, mode, prng),
            Self::Mirror(mirror) => mirror.sample(it, mode, prng),
            Self::Emission(emission) => emission.sample(it, mode, prng),
        }
    }

    /// Evaluates the model for a given pair of directions. Delta models
    /// return the zero evaluation, as a delta cannot be evaluated.
    ///
    /// * `wo`   - Given direction, unit, away from the surface.
    /// * `wi`   - Direction whose value and density are evaluated, unit,
    ///            away from the surface.
    /// * `it`   - The surface interaction.
    /// * `mode` - Which subpath the walk is building.
    pub fn evaluate(&self, wo: &Vector3f, wi: &Vector3f, it: &Interaction, mode: TraceMode) -> BxdfEval {
        match self {
            Self::Lambert(lambert) => lambert.evaluate(wo, wi, it, mode),
            Self::Mirror(mirror) => mirror.evaluate(wo, wi, it, mode),
            Self::Emission(emission) => emission.evaluate(wo, wi, it, mode),
        }
    }

    /// Returns the model's value alone for a pair of directions.
    ///
    /// * `wo`   - Given direction, unit, away from the surface.
    /// * `wi`   - Evaluated direction, unit, away from the surface.
    /// * `it`   - The surface interaction.
    /// * `mode` - Which subpath the walk is building.
    pub fn factor(&self, wo: &Vector3f, wi: &Vector3f, it: &Interaction, mode: TraceMode) -> Colour {
        match self {
            Self::Lambert(lambert) => lambert.factor(wo, wi, it, mode),
            Self::Mirror(mirror) => mirror.factor(wo, wi, it, mode),
            Self::Emission(emission) => emission.factor(wo, wi, it, mode),
        }
    }

    /// Returns the solid-angle density of generating `wi` from `wo`.
    ///
    /// * `wo` - Given direction, unit, away from the surface.
    /// * `wi` - Evaluated direction, unit, away from the surface.
    /// * `it` - The surface interaction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f, it: &Interaction) -> Float {
        match self {
            Self::Lambert(lambert) => lambert.pdf(wo, wi, it),
            Self::Mirror(mirror) => mirror.pdf(wo, wi, it),
            Self::Emission(emission) => emission.pdf(wo, wi, it),
        }
    }

    /// Returns the scene emitter id for emissive materials, `u32::MAX`
    /// otherwise.
    pub fn emitter_id(&self) -> u32 {
        match self {
            Self::Lambert(_) | Self::Mirror(_) => u32::MAX,
            Self::Emission(emission) => emission.emitter_id(),
        }
    }
}

/// Correction for the asymmetry shading normals introduce when tracing the
/// importance subpath (Veach 150). Radiance transport needs none.
///
/// * `wi`   - Direction the walk continues in, unit, away from the surface.
/// * `wo`   - Direction toward the previous vertex, unit, away from the
///            surface.
/// * `it`   - The surface interaction.
/// * `mode` - Which subpath the walk is building.
pub fn correct_shading_normal(wi: &Vector3f, wo: &Vector3f, it: &Interaction, mode: TraceMode) -> Float {
    if mode == TraceMode::Importance {
        let numerator = (wi.dot(&it.ns) * wo.dot(&it.n)).abs();
        let denominator = (wi.dot(&it.n) * wo.dot(&it.ns)).abs();
        if denominator < EPSILON_BLACK as Float {
            return 0.0;
        }
        return numerator / denominator;
    }
    1.0
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::geometry::Frame;

    #[test]
    fn correction_is_identity_for_radiance_transport() {
        let it = Interaction::default();
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        let wo = Vector3f::Z;
        assert_eq!(correct_shading_normal(&wi, &wo, &it, TraceMode::Radiance), 1.0);
    }

    #[test]
    fn correction_is_one_when_normals_agree() {
        let it = Interaction {
            ns: Vector3f::Z,
            n: Vector3f::Z,
            frame: Frame::new(&Vector3f::Z),
            ..Interaction::default()
        };
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let c = correct_shading_normal(&wi, &wo, &it, TraceMode::Importance);
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correction_compensates_diverging_normals() {
        let ns = Vector3f::new(0.0, 0.2, 1.0).normalize();
        let it = Interaction {
            ns,
            n: Vector3f::Z,
            frame: Frame::new(&ns),
            ..Interaction::default()
        };
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let expected = (wi.dot(&ns) * wo.dot(&Vector3f::Z)).abs()
            / (wi.dot(&Vector3f::Z) * wo.dot(&ns)).abs();
        let c = correct_shading_normal(&wi, &wo, &it, TraceMode::Importance);
        assert!((c - expected).abs() < 1e-12);
    }

    #[test]
    fn correction_underflow_returns_zero() {
        let it = Interaction {
            ns: Vector3f::Z,
            n: Vector3f::Z,
            ..Interaction::default()
        };
        // wo perpendicular to the normal collapses the denominator.
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        let wo = Vector3f::X;
        assert_eq!(correct_shading_normal(&wi, &wo, &it, TraceMode::Importance), 0.0);
    }
}
