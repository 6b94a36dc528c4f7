//! Core

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod base;
pub mod camera;
pub mod colour;
pub mod config;
pub mod film;
pub mod geometry;
pub mod image_io;
pub mod interaction;
pub mod rng;
pub mod sampling;
