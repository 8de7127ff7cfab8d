//! Procedural drawing of decorative illustration plates.
//!
//! Plates are composed in two phases: generators produce plain geometry
//! (branch trees, filaments, dots), which is laid out into a [`scene::Scene`]
//! and rasterized by [`render::Rasterizer`].

pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod plates;
pub mod render;
pub mod scene;

pub use config::{FontConfig, RenderConfig};
pub use error::PlateError;
pub use plates::{render_plate, Plate, PlateKind};
