//! The finished plates and their output.

use std::path::PathBuf;

use crate::{
    config::RenderConfig,
    error::PlateError,
    render::{save_png, Rasterizer},
    scene::Scene,
};

pub mod blended;
pub mod illuminated;
pub mod laboratory;
pub mod ornament;

pub use blended::Blended;
pub use illuminated::Illuminated;
pub use laboratory::Laboratory;

/// A decorative illustration composed onto a fresh scene.
pub trait Plate {
    /// Human readable name.
    fn name(&self) -> &'static str;

    /// File name of the written PNG.
    fn file_name(&self) -> &'static str;

    /// Compose the plate. Composition is deterministic.
    fn compose(&self) -> Scene;
}

/// The available plates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PlateKind {
    Laboratory,
    Illuminated,
    Blended,
}

impl PlateKind {
    pub fn all() -> [PlateKind; 3] {
        [
            PlateKind::Laboratory,
            PlateKind::Illuminated,
            PlateKind::Blended,
        ]
    }

    pub fn plate(&self) -> &'static dyn Plate {
        match self {
            PlateKind::Laboratory => &Laboratory,
            PlateKind::Illuminated => &Illuminated,
            PlateKind::Blended => &Blended,
        }
    }
}

/// Compose, rasterize and write one plate into the configured directory.
pub fn render_plate(kind: PlateKind, config: &RenderConfig) -> Result<PathBuf, PlateError> {
    write_plate(kind.plate(), &Rasterizer::new(config), config)
}

/// Compose, rasterize and write a plate with an existing rasterizer.
///
/// Returns the path of the written file.
pub fn write_plate(
    plate: &dyn Plate,
    rasterizer: &Rasterizer,
    config: &RenderConfig,
) -> Result<PathBuf, PlateError> {
    let scene = plate.compose();
    log::debug!("composed {} with {} elements", plate.name(), scene.len());

    let pixmap = rasterizer.render(&scene)?;
    std::fs::create_dir_all(&config.output_dir).map_err(|source| PlateError::Io {
        path: config.output_dir.clone(),
        source,
    })?;
    let path = config.output_path(plate.file_name());
    save_png(&pixmap, &path)?;
    log::info!("created {}", path.display());
    Ok(path)
}
