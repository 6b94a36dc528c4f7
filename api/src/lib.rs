//! Scene assembly and queries.

#[macro_use]
extern crate log;

mod cornell;
mod scene;

// Re-export.
pub use scene::*;
