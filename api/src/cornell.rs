//! Cornell box

use crate::Scene;
use lumen_bxdfs::{Bxdf, Emission, Lambert, Mirror};
use lumen_core::colour::Colour;
use lumen_core::geometry::Point3f;
use lumen_emitters::{Emitter, TriangleEmitter};
use lumen_shapes::{Shape, Triangle};

impl Scene {
    /// Builds the Cornell box (<https://www.graphics.cornell.edu/online/box/>).
    ///
    /// The order, and sign, of the published data is altered here, as world
    /// up is the +Z axis.
    ///
    /// * `diffuse_tall_block`   - Diffuse white tall block when true, a
    ///                            mirror otherwise.
    /// * `two_light_triangles`  - Two ceiling light triangles when true, four
    ///                            otherwise. Both cover the same quad with
    ///                            the same energy, which makes the pair a
    ///                            check that emitter selection and weighting
    ///                            agree between the configurations.
    pub fn cornell_box(diffuse_tall_block: bool, two_light_triangles: bool) -> Self {
        let mut geometry: Vec<Shape> = Vec::new();
        let mut bxdfs: Vec<Bxdf> = Vec::new();
        let mut emitters: Vec<Emitter> = Vec::new();

        let tall_block_material: u32 = if diffuse_tall_block { 0 } else { 3 };

        let energy = Colour::new(0.0, 0.929, 0.659) * 8.0f32
            + Colour::new(1.0, 0.447, 0.0) * 15.6f32
            + Colour::new(0.376, 0.0, 0.0) * 18.4f32;

        bxdfs.push(Bxdf::Lambert(Lambert::new(Colour::new(0.8, 0.8, 0.8)))); // White
        bxdfs.push(Bxdf::Lambert(Lambert::new(Colour::new(0.6, 0.01, 0.01)))); // Red
        bxdfs.push(Bxdf::Lambert(Lambert::new(Colour::new(0.01, 0.25, 0.01)))); // Green
        bxdfs.push(Bxdf::Mirror(Mirror::new(Colour::WHITE)));

        // Big box.
        let cbox = [
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 0.0, 548.8),
            Point3f::new(0.0, 559.2, 0.0),
            Point3f::new(0.0, 559.2, 548.8),
            Point3f::new(-552.8, 0.0, 0.0),
            Point3f::new(-556.0, 0.0, 548.8),
            Point3f::new(-549.6, 559.2, 0.0),
            Point3f::new(-556.0, 559.2, 548.8),
        ];
        // Back.
        geometry.push(Shape::Triangle(Triangle::new(cbox[2], cbox[3], cbox[7], 0)));
        geometry.push(Shape::Triangle(Triangle::new(cbox[2], cbox[7], cbox[6], 0)));
        // Top.
        geometry.push(Shape::Triangle(Triangle::new(cbox[1], cbox[5], cbox[7], 0)));
        geometry.push(Shape::Triangle(Triangle::new(cbox[1], cbox[7], cbox[3], 0)));
        // Bottom.
        geometry.push(Shape::Triangle(Triangle::new(cbox[0], cbox[2], cbox[6], 0)));
        geometry.push(Shape::Triangle(Triangle::new(cbox[0], cbox[6], cbox[4], 0)));
        // Left.
        geometry.push(Shape::Triangle(Triangle::new(cbox[4], cbox[6], cbox[7], 1)));
        geometry.push(Shape::Triangle(Triangle::new(cbox[4], cbox[7], cbox[5], 1)));
        // Right.
        geometry.push(Shape::Triangle(Triangle::new(cbox[0], cbox[1], cbox[3], 2)));
        geometry.push(Shape::Triangle(Triangle::new(cbox[0], cbox[3], cbox[2], 2)));

        // Short block.
        let sbox = [
            Point3f::new(-82.0, 225.0, 0.0),
            Point3f::new(-82.0, 225.0, 165.0),
            Point3f::new(-130.0, 65.0, 0.0),
            Point3f::new(-130.0, 65.0, 165.0),
            Point3f::new(-240.0, 272.0, 0.0),
            Point3f::new(-240.0, 272.0, 165.0),
            Point3f::new(-290.0, 114.0, 0.0),
            Point3f::new(-290.0, 114.0, 165.0),
        ];
        // Back.
        geometry.push(Shape::Triangle(Triangle::new(sbox[4], sbox[5], sbox[1], 0)));
        geometry.push(Shape::Triangle(Triangle::new(sbox[4], sbox[1], sbox[0], 0)));
        // Front.
        geometry.push(Shape::Triangle(Triangle::new(sbox[2], sbox[3], sbox[7], 0)));
        geometry.push(Shape::Triangle(Triangle::new(sbox[2], sbox[7], sbox[6], 0)));
        // Top.
        geometry.push(Shape::Triangle(Triangle::new(sbox[3], sbox[1], sbox[5], 0)));
        geometry.push(Shape::Triangle(Triangle::new(sbox[3], sbox[5], sbox[7], 0)));
        // Left.
        geometry.push(Shape::Triangle(Triangle::new(sbox[6], sbox[7], sbox[5], 0)));
        geometry.push(Shape::Triangle(Triangle::new(sbox[6], sbox[5], sbox[4], 0)));
        // Right.
        geometry.push(Shape::Triangle(Triangle::new(sbox[0], sbox[1], sbox[3], 0)));
        geometry.push(Shape::Triangle(Triangle::new(sbox[0], sbox[3], sbox[2], 0)));

        // Tall block.
        let tbox = [
            Point3f::new(-265.0, 296.0, 0.0),
            Point3f::new(-265.0, 296.0, 330.0),
            Point3f::new(-314.0, 456.0, 0.0),
            Point3f::new(-314.0, 456.0, 330.0),
            Point3f::new(-423.0, 247.0, 0.0),
            Point3f::new(-423.0, 247.0, 330.0),
            Point3f::new(-472.0, 406.0, 0.0),
            Point3f::new(-472.0, 406.0, 330.0),
        ];
        // Back.
        geometry.push(Shape::Triangle(Triangle::new(tbox[6], tbox[7], tbox[3], tall_block_material)));
        geometry.push(Shape::Triangle(Triangle::new(tbox[6], tbox[3], tbox[2], tall_block_material)));
        // Front.
        geometry.push(Shape::Triangle(Triangle::new(tbox[0], tbox[1], tbox[5], tall_block_material)));
        geometry.push(Shape::Triangle(Triangle::new(tbox[0], tbox[5], tbox[4], tall_block_material)));
        // Top.
        geometry.push(Shape::Triangle(Triangle::new(tbox[5], tbox[1], tbox[3], tall_block_material)));
        geometry.push(Shape::Triangle(Triangle::new(tbox[5], tbox[3], tbox[7], tall_block_material)));
        // Left.
        geometry.push(Shape::Triangle(Triangle::new(tbox[4], tbox[5], tbox[7], tall_block_material)));
        geometry.push(Shape::Triangle(Triangle::new(tbox[4], tbox[7], tbox[6], tall_block_material)));
        // Right.
        geometry.push(Shape::Triangle(Triangle::new(tbox[2], tbox[3], tbox[1], tall_block_material)));
        geometry.push(Shape::Triangle(Triangle::new(tbox[2], tbox[1], tbox[0], tall_block_material)));

        // Emissive materials carrying their emitter ids.
        bxdfs.push(Bxdf::Emission(Emission::new(0))); // 4
        bxdfs.push(Bxdf::Emission(Emission::new(1))); // 5
        bxdfs.push(Bxdf::Emission(Emission::new(2))); // 6
        bxdfs.push(Bxdf::Emission(Emission::new(3))); // 7

        // The ceiling quad, offset below the ceiling to avoid z-fighting.
        let light = [
            Point3f::new(-213.0, 227.0, 548.8 - 0.01),
            Point3f::new(-213.0, 332.0, 548.8 - 0.01),
            Point3f::new(-343.0, 227.0, 548.8 - 0.01),
            Point3f::new(-343.0, 332.0, 548.8 - 0.01),
            // Quad centre, used when the emitter is split into four.
            Point3f::new(
                (-213.0 + -213.0 + -343.0 + -343.0) * 0.25,
                (227.0 + 332.0 + 227.0 + 332.0) * 0.25,
                548.8 - 0.01,
            ),
        ];

        if two_light_triangles {
            // Visible emitter geometry.
            geometry.push(Shape::Triangle(Triangle::new(light[2], light[3], light[1], 4)));
            geometry.push(Shape::Triangle(Triangle::new(light[2], light[1], light[0], 5)));
            // Emitters.
            emitters.push(Emitter::Triangle(TriangleEmitter::new(light[2], light[3], light[1], energy)));
            emitters.push(Emitter::Triangle(TriangleEmitter::new(light[2], light[1], light[0], energy)));
        } else {
            // Visible emitter geometry.
            geometry.push(Shape::Triangle(Triangle::new(light[1], light[0], light[4], 4)));
            geometry.push(Shape::Triangle(Triangle::new(light[0], light[2], light[4], 5)));
            geometry.push(Shape::Triangle(Triangle::new(light[2], light[3], light[4], 6)));
            geometry.push(Shape::Triangle(Triangle::new(light[3], light[1], light[4], 7)));
            // Emitters.
            emitters.push(Emitter::Triangle(TriangleEmitter::new(light[1], light[0], light[4], energy)));
            emitters.push(Emitter::Triangle(TriangleEmitter::new(light[0], light[2], light[4], energy)));
            emitters.push(Emitter::Triangle(TriangleEmitter::new(light[2], light[3], light[4], energy)));
            emitters.push(Emitter::Triangle(TriangleEmitter::new(light[3], light[1], light[4], energy)));
        }

        Self::new(geometry, bxdfs, emitters)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::geometry::{Ray, Vector3f};
    use lumen_core::rng::RNG;

    #[test]
    fn both_light_configurations_cover_the_same_quad() {
        let two = Scene::cornell_box(true, true);
        let four = Scene::cornell_box(true, false);

        // Rays fired straight up under the quad, from above the blocks, must
        // strike emissive geometry in both configurations.
        let mut prng = RNG::new(31);
        for _ in 0..50 {
            let x = -340.0 + 124.0 * prng.uniform_float() as f64;
            let y = 230.0 + 99.0 * prng.uniform_float() as f64;
            let ray = Ray::new(Point3f::new(x, y, 400.0), Vector3f::Z);

            for scene in [&two, &four] {
                let (_, it) = scene.intersect(&ray).expect("hits the ceiling quad");
                let material = scene.material(it.material_id);
                assert_ne!(material.emitter_id(), u32::MAX);
            }
        }
    }

    #[test]
    fn tall_block_material_switches() {
        let diffuse = Scene::cornell_box(true, true);
        let mirrored = Scene::cornell_box(false, true);

        // A ray at the tall block's front face.
        let ray = Ray::new(Point3f::new(-300.0, -800.0, 200.0), Vector3f::Y);
        let (_, it) = diffuse.intersect(&ray).expect("hits the tall block");
        assert_eq!(it.material_id, 0);
        let (_, it) = mirrored.intersect(&ray).expect("hits the tall block");
        assert_eq!(it.material_id, 3);
    }
}
