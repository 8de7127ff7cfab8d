use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering or writing a plate.
#[derive(Debug, Error)]
pub enum PlateError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode PNG: {0}")]
    Encode(String),
    #[error("cannot allocate a {width}x{height} pixel canvas")]
    Canvas { width: u32, height: u32 },
}
