//! Scene

use lumen_bxdfs::Bxdf;
use lumen_core::base::Float;
use lumen_core::geometry::Ray;
use lumen_core::interaction::Interaction;
use lumen_core::rng::RNG;
use lumen_emitters::Emitter;
use lumen_shapes::Shape;

/// Owns the geometry, materials and emitters of a render and answers
/// intersection, occlusion and lookup queries. Intersection is a linear scan
/// over the geometry.
pub struct Scene {
    geometry: Vec<Shape>,
    bxdfs: Vec<Bxdf>,
    emitters: Vec<Emitter>,
}

impl Scene {
    /// Creates a scene from its parts.
    ///
    /// * `geometry` - Visible geometry.
    /// * `bxdfs`    - Materials referenced by the geometry's material ids.
    /// * `emitters` - Emitters referenced by the emissive materials.
    pub fn new(geometry: Vec<Shape>, bxdfs: Vec<Bxdf>, emitters: Vec<Emitter>) -> Self {
        info!(
            "Scene with {} shapes, {} materials, {} emitters",
            geometry.len(),
            bxdfs.len(),
            emitters.len()
        );
        Self {
            geometry,
            bxdfs,
            emitters,
        }
    }

    /// Finds the closest object hit by the ray, returning the hit distance
    /// and the surface data at the hit.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &Ray) -> Option<(Float, Interaction)> {
        let mut closest: Option<(Float, &Shape)> = None;
        for shape in &self.geometry {
            let d = shape.intersect(ray);
            if d > 0.0 && closest.map_or(true, |(distance, _)| d < distance) {
                closest = Some((d, shape));
            }
        }
        closest.map(|(distance, shape)| (distance, shape.post_intersect(ray, distance)))
    }

    /// Returns true when any object lies on the ray within `(0, distance)`.
    ///
    /// * `ray`      - The ray to trace.
    /// * `distance` - Occlusion test distance.
    pub fn occluded(&self, ray: &Ray, distance: Float) -> bool {
        self.geometry.iter().any(|shape| {
            let d = shape.intersect(ray);
            d > 0.0 && d < distance
        })
    }

    /// Returns the material with the given id; out-of-range ids abort the
    /// render.
    ///
    /// * `id` - The material id.
    pub fn material(&self, id: u32) -> &Bxdf {
        self.bxdfs
            .get(id as usize)
            .unwrap_or_else(|| panic!("Material ID: {id}, is out of bounds!"))
    }

    /// Returns the emitter with the given id along with its selection
    /// probability; out-of-range ids abort the render.
    ///
    /// * `id` - The emitter id.
    pub fn emitter(&self, id: u32) -> (&Emitter, Float) {
        let emitter = self
            .emitters
            .get(id as usize)
            .unwrap_or_else(|| panic!("Emitter ID: {id}, is out of bounds!"));
        (emitter, self.emitter_select_probability(id))
    }

    /// Returns the probability of selecting the given emitter; all emitters
    /// are sampled equally.
    ///
    /// * `id` - The emitter id.
    pub fn emitter_select_probability(&self, id: u32) -> Float {
        if id as usize >= self.emitters.len() {
            panic!("Emitter ID: {id}, is out of bounds!");
        }
        1.0 / self.emitters.len() as Float
    }

    /// Returns a uniformly selected emitter id.
    ///
    /// * `prng` - Random number source.
    pub fn random_emitter(&self, prng: &mut RNG) -> u32 {
        prng.uniform_u32() % self.emitters.len() as u32
    }

    /// Returns true when the scene can be rendered.
    pub fn is_valid(&self) -> bool {
        !self.geometry.is_empty() && !self.emitters.is_empty() && !self.bxdfs.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::base::EPSILON_RAY;
    use lumen_core::geometry::{Point3f, Vector3f};

    #[test]
    fn empty_scene_is_invalid() {
        let scene = Scene::new(Vec::new(), Vec::new(), Vec::new());
        assert!(!scene.is_valid());
    }

    #[test]
    fn cornell_box_is_valid() {
        assert!(Scene::cornell_box(true, true).is_valid());
        assert!(Scene::cornell_box(false, false).is_valid());
    }

    #[test]
    fn intersect_returns_closest_hit() {
        let scene = Scene::cornell_box(true, true);
        // Straight down the open side toward the back wall at y = 559.2.
        let ray = Ray::new(Point3f::new(-278.0, -800.0, 273.0), Vector3f::Y);
        let (distance, it) = scene.intersect(&ray).expect("hits the box");
        assert!(distance > 0.0 && distance.is_finite());
        assert!(it.p.y <= 559.2 + 1e-6);
    }

    #[test]
    fn miss_returns_none() {
        let scene = Scene::cornell_box(true, true);
        let ray = Ray::new(Point3f::new(-278.0, -800.0, 273.0), -Vector3f::Y);
        assert!(scene.intersect(&ray).is_none());
    }

    #[test]
    fn occlusion_is_symmetric() {
        let scene = Scene::cornell_box(true, true);
        // Across the box interior, through the tall block.
        let pairs = [
            (Point3f::new(-100.0, 100.0, 100.0), Point3f::new(-450.0, 400.0, 100.0)),
            (Point3f::new(-50.0, 50.0, 50.0), Point3f::new(-50.0, 500.0, 500.0)),
            (Point3f::new(-278.0, -400.0, 273.0), Point3f::new(-278.0, 100.0, 273.0)),
        ];
        for (a, b) in pairs {
            let delta = b - a;
            let distance = delta.length() - 2.0 * EPSILON_RAY;
            let forward = scene.occluded(&Ray::spawn(a, delta.normalize()), distance);
            let backward = scene.occluded(&Ray::spawn(b, -delta.normalize()), distance);
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn emitter_selection_is_uniform() {
        let scene = Scene::cornell_box(true, true);
        assert_eq!(scene.emitter_select_probability(0), 0.5);

        let four = Scene::cornell_box(true, false);
        assert_eq!(four.emitter_select_probability(3), 0.25);

        let mut prng = RNG::new(99);
        for _ in 0..100 {
            assert!(scene.random_emitter(&mut prng) < 2);
            assert!(four.random_emitter(&mut prng) < 4);
        }
    }

    #[test]
    #[should_panic(expected = "Material ID: 42")]
    fn out_of_range_material_panics() {
        let scene = Scene::cornell_box(true, true);
        scene.material(42);
    }

    #[test]
    #[should_panic(expected = "Emitter ID: 9")]
    fn out_of_range_emitter_panics() {
        let scene = Scene::cornell_box(true, true);
        scene.emitter(9);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_select_probability_panics() {
        let scene = Scene::cornell_box(true, true);
        scene.emitter_select_probability(2);
    }
}
