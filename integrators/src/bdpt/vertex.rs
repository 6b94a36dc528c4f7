//! Path vertices

use lumen_bxdfs::Bxdf;
use lumen_core::base::Float;
use lumen_core::colour::Colour;
use lumen_core::geometry::{Point3f, Vector3f};
use lumen_core::interaction::Interaction;
use lumen_emitters::Emitter;

/// Storage for one element of a traced subpath. Vertices live for a single
/// pixel sample; the emitter and material they reference are shared,
/// immutable scene data.
///
/// The lifetime specifier:
/// * `'scene` - Shared reference to the scene owning emitters and materials.
pub struct Vertex<'scene> {
    /// Surface data at the vertex.
    pub it: Interaction,

    /// Monte-Carlo weight of the subpath up to this vertex, excluding this
    /// vertex's own BxDF factor.
    pub throughput: Colour,

    /// Projected solid-angle density of generating this vertex from its
    /// predecessor on the walk.
    pub pdf_fwd: Float,

    /// Projected solid-angle density of the reverse generation.
    pub pdf_rev: Float,

    /// Geometry term to the previous vertex on the walk. Only defined
    /// between non-Dirac vertices.
    pub g: Float,

    /// The vertex sits on a Dirac distribution (mirror bounce, pinhole
    /// lens); it can be sampled but never evaluated or connected to.
    pub delta: bool,

    /// The vertex lies on an emitter.
    pub is_emitter: bool,

    /// The vertex lies on a camera lens. Only a camera with an area lens can
    /// be struck; a pinhole never sets this.
    pub is_camera: bool,

    /// The emitter at this vertex, when there is one.
    pub emitter: Option<&'scene Emitter>,

    /// The surface material at this vertex, when there is one.
    pub material: Option<&'scene Bxdf>,

    /// Scene emitter id; `u32::MAX` when the vertex is not on an emitter.
    pub emitter_id: u32,
}

impl<'scene> Vertex<'scene> {
    /// Creates a new `Vertex`. The geometry term starts at one and the
    /// emitter, material and emitter id are filled in by the walk.
    ///
    /// * `it`         - Surface data at the vertex.
    /// * `throughput` - Subpath weight up to this vertex.
    /// * `pdf_fwd`    - Projected forward density.
    /// * `pdf_rev`    - Projected reverse density.
    /// * `delta`      - The vertex sits on a Dirac distribution.
    /// * `is_emitter` - The vertex lies on an emitter.
    pub fn new(
        it: Interaction,
        throughput: Colour,
        pdf_fwd: Float,
        pdf_rev: Float,
        delta: bool,
        is_emitter: bool,
    ) -> Self {
        Self {
            it,
            throughput,
            pdf_fwd,
            pdf_rev,
            g: 1.0,
            delta,
            is_emitter,
            is_camera: false,
            emitter: None,
            material: None,
            emitter_id: u32::MAX,
        }
    }

    /// The vertex position.
    pub fn p(&self) -> Point3f {
        self.it.p
    }

    /// The shading normal at the vertex.
    pub fn ns(&self) -> Vector3f {
        self.it.frame.normal()
    }
}
