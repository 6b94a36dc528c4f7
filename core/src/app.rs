//! Application related stuff

use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// System wide options.
#[derive(Parser, Clone)]
#[command(author, version, about = "Bidirectional path tracer", long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 = all logical CPUs)."
    )]
    n_threads: usize,

    /// Image width in pixels.
    #[arg(long, value_name = "NUM", default_value_t = 400, help = "Image width in pixels.")]
    pub width: u16,

    /// Image height in pixels.
    #[arg(long, value_name = "NUM", default_value_t = 400, help = "Image height in pixels.")]
    pub height: u16,

    /// Samples per pixel.
    #[arg(
        long,
        short = 's',
        value_name = "NUM",
        default_value_t = 25,
        help = "Samples per pixel."
    )]
    pub samples: u16,

    /// Maximum number of path vertices per subpath.
    #[arg(
        long = "depth",
        short = 'd',
        value_name = "NUM",
        default_value_t = 5,
        help = "Maximum number of path vertices per subpath (clamped to at least 3)."
    )]
    pub max_path_length: u8,

    /// Path to the image file, without extension.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "result",
        help = "Write the final image to the given filename (\".tga\" is appended)."
    )]
    pub image_file: String,

    /// Make the tall block a mirror.
    #[arg(long = "mirror-block", help = "Make the tall block a mirror instead of diffuse white.")]
    pub mirror_block: bool,

    /// Use four ceiling light triangles.
    #[arg(
        long = "four-lights",
        help = "Split the ceiling light into four triangles instead of two."
    )]
    pub four_lights: bool,

    /// TGA libgdk workaround.
    #[arg(long, help = "Write a one-byte TGA image id to work around a libgdk loader bug.")]
    pub libgdk: bool,
}

impl Options {
    /// Returns the number of threads to use; zero selects all logical CPUs.
    pub fn threads(&self) -> usize {
        let max_threads = std::thread::available_parallelism().map_or(1, |n| n.get());
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}
