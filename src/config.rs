use std::path::{Path, PathBuf};

use crate::scene::style::Face;

/// Dots per canvas unit of the written plates.
pub const DEFAULT_DPI: f64 = 300.0;

const SERIF_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSerif-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "/Library/Fonts/Times New Roman.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

const ITALIC_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Italic.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif-Italic.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif-Italic.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Italic.ttf",
    "/usr/share/fonts/liberation/LiberationSerif-Italic.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman Italic.ttf",
    "/Library/Fonts/Times New Roman Italic.ttf",
    "C:\\Windows\\Fonts\\timesi.ttf",
];

const MONO_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Candidate font files for each face, tried in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub serif: Vec<PathBuf>,
    pub italic: Vec<PathBuf>,
    pub mono: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        let paths = |candidates: &[&str]| -> Vec<PathBuf> {
            candidates.iter().map(PathBuf::from).collect()
        };
        Self {
            serif: paths(SERIF_CANDIDATES),
            italic: paths(ITALIC_CANDIDATES),
            mono: paths(MONO_CANDIDATES),
        }
    }
}

impl FontConfig {
    /// A configuration without any font; text is skipped when rendering.
    pub fn none() -> Self {
        Self {
            serif: Vec::new(),
            italic: Vec::new(),
            mono: Vec::new(),
        }
    }

    /// Put `path` first in the candidates of the face.
    pub fn prefer(mut self, face: Face, path: impl Into<PathBuf>) -> Self {
        let list = match face {
            Face::Serif => &mut self.serif,
            Face::Italic => &mut self.italic,
            Face::Mono => &mut self.mono,
        };
        list.insert(0, path.into());
        self
    }

    pub fn candidates(&self, face: Face) -> &[PathBuf] {
        match face {
            Face::Serif => &self.serif,
            Face::Italic => &self.italic,
            Face::Mono => &self.mono,
        }
    }
}

/// Configuration of the rasterizer and the output location.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub dpi: f64,
    pub output_dir: PathBuf,
    pub fonts: FontConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            output_dir: PathBuf::from("."),
            fonts: FontConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn set_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn set_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn set_fonts(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn output_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = RenderConfig::default();
        assert_eq!(config.dpi, DEFAULT_DPI);
        assert_eq!(config.output_path("a.png"), PathBuf::from(".").join("a.png"));
        assert!(!config.fonts.candidates(Face::Italic).is_empty());
    }

    #[test]
    fn test_builders() {
        let config = RenderConfig::default()
            .set_dpi(20.0)
            .set_output_dir("out")
            .set_fonts(FontConfig::none().prefer(Face::Mono, "mono.ttf"));
        assert_eq!(config.dpi, 20.0);
        assert_eq!(
            config.output_path("blended-mode.png"),
            PathBuf::from("out").join("blended-mode.png")
        );
        assert_eq!(
            config.fonts.candidates(Face::Mono),
            &[PathBuf::from("mono.ttf")]
        );
        assert!(config.fonts.candidates(Face::Serif).is_empty());
    }
}
