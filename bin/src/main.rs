#[macro_use]
extern crate log;

use lumen_api::Scene;
use lumen_core::app::OPTIONS;
use lumen_core::camera::Camera;
use lumen_core::config::Config;
use lumen_core::film::Film;
use lumen_core::geometry::Point3f;
use lumen_core::image_io::write_tga;
use lumen_integrators::Bdpt;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    // Initialize `env_logger`.
    env_logger::init();

    let config = Config::new(
        OPTIONS.width,
        OPTIONS.height,
        OPTIONS.samples,
        OPTIONS.max_path_length,
    );
    let film = Film::new(&config);

    // Cornell camera; coordinates use the +Z axis as world up.
    let camera = Camera::new(
        &Point3f::new(-278.0, -800.0, 273.0),
        &Point3f::new(-278.0, 0.0, 273.0),
        50.0,
        &config,
    );

    let scene = Scene::cornell_box(!OPTIONS.mirror_block, !OPTIONS.four_lights);
    if !scene.is_valid() {
        eprintln!("Nothing to render, no light and/or object(s).");
        return ExitCode::FAILURE;
    }

    println!("Render start");
    let start = Instant::now();
    Bdpt::render(&scene, &camera, &film, &config, OPTIONS.threads());
    let elapsed = start.elapsed();
    println!("Render time: {} ms.", elapsed.as_millis());
    info!("Render finished in {:?}", elapsed);

    println!("Saving image.");
    if let Err(e) = write_tga(&OPTIONS.image_file, &film, OPTIONS.libgdk) {
        eprintln!("PANIC! Could not save image.");
        error!("{e}");
        return ExitCode::FAILURE;
    }

    println!("Work complete.");
    ExitCode::SUCCESS
}
