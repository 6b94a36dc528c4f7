//! Bi-directional Path Tracer
//!
//! Veach-style bidirectional path tracing: an importance subpath walked from
//! a light and a radiance subpath walked from the camera are connected at
//! every admissible prefix pair, and every connection is weighted with the
//! balance heuristic so the strategies sum without double counting.

mod vertex;

// Re-export.
pub use vertex::*;

use indicatif::{ProgressBar, ProgressStyle};
use lumen_api::Scene;
use lumen_bxdfs::{correct_shading_normal, BxdfEvent, TraceMode};
use lumen_core::base::{max, Float, EPSILON_RAY};
use lumen_core::camera::Camera;
use lumen_core::colour::Colour;
use lumen_core::config::Config;
use lumen_core::film::Film;
use lumen_core::geometry::{Frame, Ray};
use lumen_core::interaction::Interaction;
use lumen_core::rng::RNG;
use std::thread;

/// Implements the bi-directional path tracing integrator. One instance runs
/// per render thread; the film is the only state shared between them.
pub struct Bdpt<'scene> {
    /// The camera.
    camera: &'scene Camera,

    /// The scene.
    scene: &'scene Scene,

    /// The film receiving pixel estimates and light-tracing splats.
    film: &'scene Film,

    /// Maximum number of path vertices per subpath.
    max_path_length: u8,

    /// Samples per pixel.
    max_samples: u16,

    /// Per-pixel random number stream.
    prng: RNG,
}

/// Balance heuristic (Veach 273). Power with beta = 2 would be
/// `value * value`.
#[inline]
fn mis(value: Float) -> Float {
    value
}

/// Generalized geometry term between two vertices, with the cosines clamped
/// to the front sides (Veach 301). Assumes neither vertex is Dirac.
///
/// * `a` - First vertex.
/// * `b` - Second vertex.
fn g_prime(a: &Vertex, b: &Vertex) -> Float {
    let delta = b.p() - a.p();
    let direction = delta.normalize();
    max(0.0, direction.dot(&a.ns())) * max(0.0, -direction.dot(&b.ns())) / delta.dot(&delta)
}

impl<'scene> Bdpt<'scene> {
    /// Creates a new `Bdpt` integrator instance.
    ///
    /// * `camera` - The camera.
    /// * `scene`  - The scene.
    /// * `film`   - The film receiving estimates and splats.
    /// * `config` - Render configuration.
    pub fn new(camera: &'scene Camera, scene: &'scene Scene, film: &'scene Film, config: &Config) -> Self {
        Self {
            camera,
            scene,
            film,
            max_path_length: config.max_path_length,
            max_samples: config.max_samples,
            prng: RNG::default(),
        }
    }

    /// Renders the scene: image rows are handed to a pool of worker threads,
    /// each running its own integrator instance. Per-pixel seeding makes the
    /// output invariant under the scheduling.
    ///
    /// * `scene`     - The scene.
    /// * `camera`    - The camera.
    /// * `film`      - The film receiving estimates and splats.
    /// * `config`    - Render configuration.
    /// * `n_threads` - Number of worker threads.
    pub fn render(scene: &Scene, camera: &Camera, film: &Film, config: &Config, n_threads: usize) {
        info!("Rendering {}x{} with {} threads", config.image_width, config.image_height, n_threads);

        let progress_style = ProgressStyle::default_bar()
            .template("{msg:25.cyan.bold} [{bar:40.green/white}] {pos:>5}/{len:5} ({elapsed}|{eta})")
            .expect("valid progress bar template")
            .progress_chars("█▓▒░  ");
        let progress = ProgressBar::new(config.image_height as u64);
        progress.set_message("Rendering scene");
        progress.set_style(progress_style);

        thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<u16>(n_threads);

            // Spawn worker threads.
            for _ in 0..n_threads {
                let rxc = rx.clone();
                let progress = &progress;
                scope.spawn(move || {
                    let mut integrator = Bdpt::new(camera, scene, film, config);
                    for y in rxc.iter() {
                        for x in 0..config.image_width {
                            integrator.process(x, y);
                        }
                        progress.inc(1);
                    }
                });
            }
            drop(rx); // Drop the extra rx since each worker cloned one.

            // Send work.
            for y in 0..config.image_height {
                tx.send(y).unwrap();
            }
        });

        progress.finish_with_message("Render complete");
    }

    /// Renders one pixel: builds an emission and a camera subpath per sample,
    /// runs every connection strategy, and stores the accumulated estimate.
    ///
    /// * `x` - Pixel x-coordinate.
    /// * `y` - Pixel y-coordinate.
    pub fn process(&mut self, x: u16, y: u16) {
        self.prng = RNG::pixel(x, y);

        let mut accumulate = Colour::BLACK;

        for _ in 0..self.max_samples {
            // Generate paths.
            let emission_path = self.trace_emission_path();
            let camera_path = self.trace_camera_path(x, y);

            // Check if a path hit the element type sampled by the other one.
            let hit_camera = emission_path.last().is_some_and(|v| v.is_camera);
            let hit_emitter = camera_path.last().is_some_and(|v| v.is_emitter);
            // Subtract one from a path ending in such a hit; the full path is
            // only evaluated by the type 1 connections.
            let n_emission = emission_path.len() - usize::from(hit_camera);
            let n_camera = camera_path.len() - usize::from(hit_emitter);

            // Three types of connections.

            // Type 1) Direct hit on an emitter.
            if n_camera > 0 && hit_emitter {
                // s = 0, t > 1: a fully traced camera path striking an area
                // emitter. No visibility check is needed.
                let t = n_camera + 1;
                let vertex = &camera_path[t - 1];
                if !vertex.delta {
                    if let Some(emitter) = vertex.emitter {
                        let previous = &camera_path[t - 2];
                        let direction = (previous.p() - vertex.p()).normalize();
                        accumulate += vertex.throughput
                            * emitter.l(&vertex.p(), &direction)
                            * self.weight(0, t, &emission_path, &camera_path);
                    }
                }
            }

            // Type 1) Direct hit on a camera lens. Needs a camera with a
            // lens radius larger than zero; a pinhole cannot be struck, so
            // there is nothing to do for s > 1, t = 0 here.

            // Type 2) Connecting the camera path to an emitter (next event
            // estimation), except at the lens (t = 0) or at a struck emitter.
            if n_camera > 0 {
                let vertex_emitter = &emission_path[0];
                if let Some(emitter) = vertex_emitter.emitter {
                    let select_prob = self.scene.emitter_select_probability(vertex_emitter.emitter_id);
                    let emitter_point = vertex_emitter.p();

                    for t in 1..n_camera {
                        let vertex = &camera_path[t];
                        if vertex.delta {
                            continue;
                        }
                        let Some(material) = vertex.material else {
                            continue;
                        };

                        let surface_point = vertex.p();
                        let delta = emitter_point - surface_point;
                        let direction = delta.normalize();
                        let distance = delta.length();

                        let ray = Ray::spawn(surface_point, direction);
                        if self.scene.occluded(&ray, distance - 2.0 * EPSILON_RAY) {
                            continue;
                        }

                        let previous_direction = (camera_path[t - 1].p() - surface_point).normalize();
                        accumulate += vertex.throughput
                            * emitter.l(&emitter_point, &-direction)
                            * material.factor(&previous_direction, &direction, &vertex.it, TraceMode::Radiance)
                            * g_prime(vertex, vertex_emitter)
                            * self.weight(1, t, &emission_path, &camera_path)
                            / (emitter.pdf_pos(&emitter_point, &-direction) * select_prob);
                    }
                }
            }

            // Type 2) Connecting the emission path to the camera lens (light
            // tracing), except at the emitter (s = 0) or at a struck lens.
            if n_emission > 0 {
                let vertex_camera = &camera_path[0];
                let lens_point = self.camera.sample_lens(&mut self.prng);

                for s in 1..n_emission {
                    let vertex = &emission_path[s];
                    if vertex.delta {
                        continue;
                    }
                    let Some(material) = vertex.material else {
                        continue;
                    };
                    let Some(raster) = self.camera.raster(&vertex.p(), &lens_point) else {
                        continue;
                    };

                    let delta = vertex.p() - lens_point;
                    let direction = delta.normalize();
                    let distance = delta.length();

                    let ray = Ray::spawn(lens_point, direction);
                    if self.scene.occluded(&ray, distance - 2.0 * EPSILON_RAY) {
                        continue;
                    }

                    let previous_direction = (emission_path[s - 1].p() - vertex.p()).normalize();
                    // The result lands in the splat buffer, not the pixel
                    // buffer the camera traces accumulate into.
                    let splat = vertex.throughput
                        * correct_shading_normal(&direction, &vertex.it.wo, &vertex.it, TraceMode::Importance)
                        * material.factor(&previous_direction, &-direction, &vertex.it, TraceMode::Importance)
                        * g_prime(vertex, vertex_camera)
                        * self.weight(s, 1, &emission_path, &camera_path)
                        / self.camera.we(&lens_point, &direction);
                    self.film.add_splat(&raster, splat);
                }
            }

            // Type 3) Connect all non-Dirac material vertices from one path
            // to the other.
            if n_emission < 2 && n_camera < 2 {
                continue;
            }

            for s in 2..=n_emission {
                let s_vertex = &emission_path[s - 1];
                if s_vertex.delta {
                    continue;
                }
                let Some(s_material) = s_vertex.material else {
                    continue;
                };

                for t in 2..=n_camera {
                    let t_vertex = &camera_path[t - 1];
                    if t_vertex.delta {
                        continue;
                    }
                    let Some(t_material) = t_vertex.material else {
                        continue;
                    };

                    // The connecting edge (Veach 301); its visibility term is
                    // evaluated independently.
                    let delta = t_vertex.p() - s_vertex.p();
                    let direction = delta.normalize();
                    let distance = delta.length();

                    let ray = Ray::spawn(s_vertex.p(), direction);
                    if self.scene.occluded(&ray, distance - 2.0 * EPSILON_RAY) {
                        continue;
                    }

                    let previous_direction_emission = (emission_path[s - 2].p() - s_vertex.p()).normalize();
                    let previous_direction_camera = (camera_path[t - 2].p() - t_vertex.p()).normalize();

                    accumulate +=
                        // Flow from the emitter.
                        s_vertex.throughput
                        * correct_shading_normal(&direction, &s_vertex.it.wo, &s_vertex.it, TraceMode::Importance)
                        * s_material.factor(&previous_direction_emission, &direction, &s_vertex.it, TraceMode::Importance)
                        // Flow from the camera.
                        * t_vertex.throughput
                        * t_material.factor(&previous_direction_camera, &-direction, &t_vertex.it, TraceMode::Radiance)
                        // Geometry term and strategy weight.
                        * g_prime(s_vertex, t_vertex)
                        * self.weight(s, t, &emission_path, &camera_path);
                }
            }
        }

        self.film.set_pixel(x, y, accumulate);
    }

    /// Walks an importance subpath from a uniformly selected emitter
    /// (Veach 92). The emitter vertex y0 is always stored; each bounce
    /// appends a vertex until the walk terminates or runs out of length.
    fn trace_emission_path(&mut self) -> Vec<Vertex<'scene>> {
        let scene = self.scene;
        let mut vertices: Vec<Vertex<'scene>> = Vec::with_capacity(self.max_path_length as usize + 2);

        let emitter_id = scene.random_emitter(&mut self.prng);
        let (emitter, select_prob) = scene.emitter(emitter_id);
        let le = emitter.sample_le(&mut self.prng);

        let mut throughput = le.value * (le.cos_theta / (select_prob * le.pdf_dir * le.pdf_pos));

        // The emitter vertex is y0.
        let mut it = Interaction::default();
        it.p = le.point;
        if !emitter.is_delta() {
            it.frame = Frame::new(&le.normal);
        }
        let pdf_rev = select_prob * le.pdf_pos;
        let pdf_fwd = if emitter.is_delta() {
            le.pdf_dir
        } else {
            le.pdf_dir / le.cos_theta
        };
        let mut y0 = Vertex::new(it, throughput, pdf_fwd, pdf_rev, emitter.is_delta(), true);
        y0.emitter = Some(emitter);
        y0.emitter_id = emitter_id;
        vertices.push(y0);

        let mut ray = Ray::spawn(le.point, le.direction);
        let mut depth: u16 = 1;

        loop {
            let Some((_, it)) = scene.intersect(&ray) else {
                return vertices;
            };
            let hit_point = it.p;

            let material = scene.material(it.material_id);
            let sample = material.sample(&it, TraceMode::Importance, &mut self.prng);
            let pdf_fwd = sample.pdf / sample.cos_theta;

            match sample.event {
                BxdfEvent::None | BxdfEvent::Emission | BxdfEvent::Transmit => {
                    return vertices;
                }
                BxdfEvent::Diffuse => {
                    let pdf_rev = if depth == 1 && emitter.is_delta() {
                        // Impossible to intersect the emitter again.
                        0.0
                    } else {
                        let eval = material.evaluate(&sample.wi, &-ray.direction, &it, TraceMode::Importance);
                        eval.pdf / eval.cos_theta
                    };
                    let mut vertex = Vertex::new(it, throughput, pdf_fwd, pdf_rev, false, false);
                    vertex.material = Some(material);
                    vertex.g = g_prime(&vertex, &vertices[vertices.len() - 1]);
                    throughput *= (sample.f / pdf_fwd)
                        * correct_shading_normal(&sample.wi, &vertex.it.wo, &vertex.it, TraceMode::Importance);
                    vertices.push(vertex);
                }
                BxdfEvent::Reflect => {
                    let pdf_rev = if depth == 1 && emitter.is_delta() { 0.0 } else { pdf_fwd };
                    let mut vertex = Vertex::new(it, throughput, pdf_fwd, pdf_rev, true, false);
                    vertex.material = Some(material);
                    vertex.g = g_prime(&vertex, &vertices[vertices.len() - 1]);
                    throughput *= sample.f
                        * correct_shading_normal(&sample.wi, &vertex.it.wo, &vertex.it, TraceMode::Importance);
                    vertices.push(vertex);
                }
            }

            depth += 1;
            if depth > self.max_path_length as u16 {
                break;
            }

            ray = Ray::spawn(hit_point, sample.wi);
        }

        vertices
    }

    /// Walks a radiance subpath from the camera lens (Veach 92). The lens
    /// vertex is z0; an emission event appends a terminal emitter vertex and
    /// ends the walk. No shading-normal correction applies on this path.
    ///
    /// * `x` - Pixel x-coordinate.
    /// * `y` - Pixel y-coordinate.
    fn trace_camera_path(&mut self, x: u16, y: u16) -> Vec<Vertex<'scene>> {
        let scene = self.scene;
        let camera = self.camera;
        let mut vertices: Vec<Vertex<'scene>> = Vec::with_capacity(self.max_path_length as usize + 2);

        let mut ray = camera.generate_ray(x, y, &mut self.prng);
        let pdf = camera.evaluate(&ray.origin, &ray.direction);
        let pdf_fwd = pdf.pdf_dir / pdf.cos_theta;
        let pdf_rev = pdf.pdf_pos;

        // The camera vertex is z0.
        let mut it = Interaction::default();
        it.p = ray.origin;
        it.frame = Frame::new(&camera.lens_normal(&ray.origin));
        vertices.push(Vertex::new(it, Colour::WHITE, pdf_fwd, pdf_rev, camera.is_delta(), false));

        let mut throughput = Colour::WHITE * (camera.we(&ray.origin, &ray.direction) / pdf_fwd);
        let mut depth: u16 = 1;

        loop {
            let Some((_, it)) = scene.intersect(&ray) else {
                return vertices;
            };
            let hit_point = it.p;

            let material = scene.material(it.material_id);
            let sample = material.sample(&it, TraceMode::Radiance, &mut self.prng);
            let pdf_fwd = sample.pdf / sample.cos_theta;

            match sample.event {
                BxdfEvent::None | BxdfEvent::Transmit => {
                    return vertices;
                }
                BxdfEvent::Emission => {
                    let (emitter, _) = scene.emitter(material.emitter_id());
                    let mut vertex = Vertex::new(it, throughput, 1.0, 1.0, false, true);
                    // The material is kept for the emitter id lookup in the
                    // weighting.
                    vertex.material = Some(material);
                    vertex.emitter = Some(emitter);
                    vertex.g = g_prime(&vertex, &vertices[vertices.len() - 1]);
                    vertices.push(vertex);
                    return vertices;
                }
                BxdfEvent::Diffuse => {
                    let pdf_rev = if depth == 1 && camera.is_delta() {
                        // Impossible to intersect the lens again.
                        0.0
                    } else {
                        let eval = material.evaluate(&sample.wi, &-ray.direction, &it, TraceMode::Radiance);
                        eval.pdf / eval.cos_theta
                    };
                    let mut vertex = Vertex::new(it, throughput, pdf_fwd, pdf_rev, false, false);
                    vertex.material = Some(material);
                    vertex.g = g_prime(&vertex, &vertices[vertices.len() - 1]);
                    throughput *= sample.f / pdf_fwd;
                    vertices.push(vertex);
                }
                BxdfEvent::Reflect => {
                    let pdf_rev = if depth == 1 && camera.is_delta() { 0.0 } else { pdf_fwd };
                    let mut vertex = Vertex::new(it, throughput, pdf_fwd, pdf_rev, true, false);
                    vertex.material = Some(material);
                    vertex.g = g_prime(&vertex, &vertices[vertices.len() - 1]);
                    throughput *= sample.f;
                    vertices.push(vertex);
                }
            }

            depth += 1;
            if depth > self.max_path_length as u16 {
                break;
            }

            ray = Ray::spawn(hit_point, sample.wi);
        }

        vertices
    }

    /// Computes the balance-heuristic weight of the (s, t) strategy against
    /// every other strategy that could have produced the same path
    /// (Veach 306).
    ///
    /// The full path x0..xk is laid out as k + 2 nodes holding the
    /// area-product densities of being generated from the emitter side
    /// (`p_fwd`) and from the camera side (`p_rev`). Two marches accumulate
    /// the density ratios of the alternative crossover points; whenever the
    /// hypothetical connection would involve a Dirac node its ratio is
    /// skipped, and a march stops at an endpoint that cannot be intersected
    /// (delta camera, delta emitter).
    ///
    /// * `s`             - Number of emission-path vertices in the strategy.
    /// * `t`             - Number of camera-path vertices in the strategy.
    /// * `emission_path` - The emission subpath.
    /// * `camera_path`   - The camera subpath.
    fn weight(&self, s: usize, t: usize, emission_path: &[Vertex], camera_path: &[Vertex]) -> Float {
        let k = s + t - 1;

        // Densities of the connecting edge, recomputed for this strategy.
        let mut pdf_s_fwd: Float = 0.0;
        let mut pdf_s_rev: Float = 0.0;
        let mut pdf_t_fwd: Float = 0.0;
        let mut pdf_t_rev: Float = 0.0;

        if s == 0 {
            let t_vertex = &camera_path[t - 1];
            if t_vertex.is_emitter {
                if let Some(emitter) = t_vertex.emitter {
                    let direction = (camera_path[t - 2].p() - t_vertex.p()).normalize();
                    let le_pdf = emitter.pdf_le(&t_vertex.p(), &direction);
                    let emitter_id = t_vertex.material.map_or(u32::MAX, |m| m.emitter_id());
                    pdf_t_fwd = le_pdf.pdf_pos * self.scene.emitter_select_probability(emitter_id);
                    pdf_t_rev = le_pdf.pdf_dir / le_pdf.cos_theta;
                }
            }
        } else if t == 0 {
            let s_vertex = &emission_path[s - 1];
            let point = s_vertex.p();
            let direction = (emission_path[s - 2].p() - point).normalize();
            let pdf = self.camera.evaluate(&point, &direction);
            pdf_s_fwd = pdf.pdf_pos;
            pdf_s_rev = pdf.pdf_dir / pdf.cos_theta;
        } else {
            let s_vertex = &emission_path[s - 1];
            let t_vertex = &camera_path[t - 1];
            let s_point = s_vertex.p();
            let t_point = t_vertex.p();

            {
                let direction = (t_point - s_point).normalize();
                if s == 1 {
                    if let Some(emitter) = s_vertex.emitter {
                        let pdf_dir = emitter.pdf_dir(&s_point, &direction);
                        pdf_s_fwd = if emitter.is_delta() {
                            pdf_dir
                        } else {
                            pdf_dir / s_vertex.ns().dot(&direction)
                        };
                    }
                    pdf_s_rev = s_vertex.pdf_rev;
                } else if let Some(material) = s_vertex.material {
                    let normal = s_vertex.ns();
                    let previous_direction = (emission_path[s - 2].p() - s_point).normalize();
                    pdf_s_fwd =
                        material.pdf(&previous_direction, &direction, &s_vertex.it) / normal.dot(&direction);
                    pdf_s_rev = material.pdf(&direction, &previous_direction, &s_vertex.it)
                        / normal.dot(&previous_direction);
                }
            }

            {
                let direction = (s_point - t_point).normalize();
                if t == 1 {
                    // Delta camera: the lens is sampled, never struck.
                    let normal = t_vertex.ns();
                    let pdf = self.camera.evaluate(&t_point, &direction);
                    pdf_t_fwd = pdf.pdf_dir / normal.dot(&direction);
                    pdf_t_rev = t_vertex.pdf_rev;
                } else if let Some(material) = t_vertex.material {
                    let normal = t_vertex.ns();
                    let previous_direction = (camera_path[t - 2].p() - t_point).normalize();
                    pdf_t_fwd =
                        material.pdf(&previous_direction, &direction, &t_vertex.it) / normal.dot(&direction);
                    pdf_t_rev = material.pdf(&direction, &previous_direction, &t_vertex.it)
                        / normal.dot(&previous_direction);
                }
            }
        }

        // Catch NaN and negative pdfs.
        let guard = |pdf: Float| if pdf.is_nan() || pdf < 0.0 { 0.0 } else { pdf };
        pdf_s_fwd = guard(pdf_s_fwd);
        pdf_s_rev = guard(pdf_s_rev);
        pdf_t_fwd = guard(pdf_t_fwd);
        pdf_t_rev = guard(pdf_t_rev);

        #[derive(Copy, Clone, Default)]
        struct Node {
            /// Density of the flow from the emitter.
            p_fwd: Float,
            /// Density of the flow from the camera.
            p_rev: Float,
            delta: bool,
        }

        let mut node = vec![Node::default(); k + 2];

        // Fill in the nodes: the light prefix, the camera suffix mirrored at
        // the far end, and the freshly evaluated connection endpoints.
        for i in 0..s.saturating_sub(1) {
            node[i].p_fwd = emission_path[i].pdf_fwd * emission_path[i + 1].g;
            node[i].p_rev = if i == 0 {
                emission_path[0].pdf_rev
            } else {
                emission_path[i].pdf_rev * emission_path[i].g
            };
            node[i].delta = emission_path[i].delta;
        }
        if s > 0 {
            node[s - 1].p_fwd = if s - 1 == k {
                pdf_s_fwd
            } else {
                pdf_s_fwd * g_prime(&emission_path[s - 1], &camera_path[t - 1])
            };
            node[s - 1].p_rev = if s == 1 {
                pdf_s_rev
            } else {
                pdf_s_rev * emission_path[s - 1].g
            };
            node[s - 1].delta = emission_path[s - 1].delta;
        }

        for i in 0..t.saturating_sub(1) {
            node[k - i].p_fwd = if i == 0 {
                camera_path[0].pdf_rev
            } else {
                camera_path[i].pdf_rev * camera_path[i].g
            };
            node[k - i].p_rev = camera_path[i].pdf_fwd * camera_path[i + 1].g;
            node[k - i].delta = camera_path[i].delta;
        }
        if t > 0 {
            node[k - (t - 1)].p_fwd = if t == 1 {
                pdf_t_rev
            } else {
                pdf_t_rev * camera_path[t - 1].g
            };
            node[k - (t - 1)].p_rev = if t - 1 == k {
                pdf_t_fwd
            } else {
                pdf_t_fwd * g_prime(&emission_path[s - 1], &camera_path[t - 1])
            };
            node[k - (t - 1)].delta = camera_path[t - 1].delta;
        }

        // Accumulate the relative weights of all alternative strategies; the
        // current one weights itself with one.
        let mut sum_path: Float = 1.0;

        // March toward the camera.
        let mut p_k: Float = 1.0;
        for i in s..=k {
            if i == 0 {
                p_k *= node[0].p_rev / node[1].p_rev;
                if node[1].delta {
                    continue;
                }
            } else if i == k {
                if self.camera.is_delta() {
                    break;
                }
                p_k *= node[k - 1].p_fwd / node[k].p_fwd;
            } else {
                p_k *= node[i - 1].p_fwd / node[i + 1].p_rev;
                if node[i].delta || node[i + 1].delta {
                    continue;
                }
            }
            sum_path += mis(p_k);
        }

        // March toward the emitter.
        p_k = 1.0;
        for i in (1..=s).rev() {
            if i == k + 1 {
                p_k *= node[k].p_fwd / node[k - 1].p_fwd;
                if node[k - 1].delta {
                    continue;
                }
            } else if i == 1 {
                if emission_path[0].emitter.is_some_and(|e| e.is_delta()) {
                    break;
                }
                p_k *= node[1].p_rev / node[0].p_rev;
            } else {
                p_k *= node[i].p_rev / node[i - 2].p_fwd;
                if node[i - 1].delta || node[i - 2].delta {
                    continue;
                }
            }
            sum_path += mis(p_k);
        }

        1.0 / sum_path
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
