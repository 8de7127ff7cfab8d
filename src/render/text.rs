use std::path::PathBuf;

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use tiny_skia::{Mask, Paint, Pixmap, Rect, Transform};

use crate::{
    config::FontConfig,
    scene::style::{Face, HAlign, TextStyle, VAlign},
};

/// Fonts loaded for each face.
pub struct FontBook {
    serif: Option<FontVec>,
    italic: Option<FontVec>,
    mono: Option<FontVec>,
}

impl FontBook {
    /// Load the first readable font of every face.
    pub fn load(config: &FontConfig) -> Self {
        let book = Self {
            serif: load_first(config.candidates(Face::Serif)),
            italic: load_first(config.candidates(Face::Italic)),
            mono: load_first(config.candidates(Face::Mono)),
        };
        if book.is_empty() {
            log::warn!("no usable font found, text will be skipped");
        }
        book
    }

    pub fn empty() -> Self {
        Self {
            serif: None,
            italic: None,
            mono: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.serif.is_none() && self.italic.is_none() && self.mono.is_none()
    }

    /// Font of the face; faces without a font fall back to serif, then to
    /// any loaded font.
    pub fn face(&self, face: Face) -> Option<&FontVec> {
        let preferred = match face {
            Face::Serif => self.serif.as_ref(),
            Face::Italic => self.italic.as_ref(),
            Face::Mono => self.mono.as_ref(),
        };
        preferred
            .or(self.serif.as_ref())
            .or(self.italic.as_ref())
            .or(self.mono.as_ref())
    }
}

fn load_first(paths: &[PathBuf]) -> Option<FontVec> {
    for path in paths {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                log::debug!("loaded font {}", path.display());
                return Some(font);
            }
            Err(err) => log::warn!("ignoring invalid font {}: {}", path.display(), err),
        }
    }
    None
}

/// Lay out a single line of text.
///
/// Returns the glyphs positioned relative to `origin` and the line width.
fn layout(font: &FontVec, scale: PxScale, content: &str) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut previous = None;
    let mut glyphs = Vec::with_capacity(content.len());
    for c in content.chars() {
        let id = scaled.glyph_id(c);
        if let Some(previous) = previous {
            caret += scaled.kern(previous, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, 0.0)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }
    (glyphs, caret)
}

/// Rasterizes text through a coverage mask the size of the target pixmap.
pub(crate) struct TextPainter<'a> {
    fonts: &'a FontBook,
    mask: Mask,
}

impl<'a> TextPainter<'a> {
    pub fn new(fonts: &'a FontBook, width: u32, height: u32) -> Option<Self> {
        Some(Self {
            fonts,
            mask: Mask::new(width, height)?,
        })
    }

    /// Draw `content` anchored at the pixel `origin` with an em size of `em_px`.
    ///
    /// Returns false when no font is available for the face.
    pub fn draw(
        &mut self,
        pixmap: &mut Pixmap,
        content: &str,
        origin: (f32, f32),
        em_px: f32,
        style: &TextStyle,
        paint: &Paint,
    ) -> bool {
        let Some(font) = self.fonts.face(style.face) else {
            return false;
        };

        // PxScale measures ascent to descent, not the em square
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let scale = PxScale::from(em_px * font.height_unscaled() / units_per_em);
        let scaled = font.as_scaled(scale);

        let (glyphs, width) = layout(font, scale, content);
        let dx = match style.h_align {
            HAlign::Left => 0.0,
            HAlign::Center => -width / 2.0,
            HAlign::Right => -width,
        };
        let baseline = match style.v_align {
            VAlign::Baseline => origin.1,
            VAlign::Center => origin.1 + (scaled.ascent() + scaled.descent()) / 2.0,
        };

        let (mask_width, mask_height) = (self.mask.width() as i32, self.mask.height() as i32);
        let mut dirty: Option<(i32, i32, i32, i32)> = None;
        let data = self.mask.data_mut();

        for mut glyph in glyphs {
            glyph.position = point(origin.0 + dx + glyph.position.x, baseline);
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                let (x, y) = (left + gx as i32, top + gy as i32);
                if x < 0 || y < 0 || x >= mask_width || y >= mask_height {
                    return;
                }
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let cell = &mut data[(y * mask_width + x) as usize];
                *cell = (*cell).max(value);
            });
            let right = left + bounds.width().ceil() as i32 + 1;
            let bottom = top + bounds.height().ceil() as i32 + 1;
            dirty = Some(match dirty {
                None => (left, top, right, bottom),
                Some((l, t, r, b)) => (l.min(left), t.min(top), r.max(right), b.max(bottom)),
            });
        }

        let Some((left, top, right, bottom)) = dirty else {
            return true;
        };
        let (left, top) = (left.max(0), top.max(0));
        let (right, bottom) = (right.min(mask_width), bottom.min(mask_height));
        if left >= right || top >= bottom {
            return true;
        }

        if let Some(rect) = Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32) {
            pixmap.fill_rect(rect, paint, Transform::identity(), Some(&self.mask));
        }

        // reset the touched region for the next text element
        let data = self.mask.data_mut();
        for y in top..bottom {
            let row = (y * mask_width) as usize;
            data[row + left as usize..row + right as usize].fill(0);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book() {
        let book = FontBook::empty();
        assert!(book.is_empty());
        assert!(book.face(Face::Italic).is_none());
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let config = FontConfig::none().prefer(Face::Serif, "/nonexistent/plate-engine/font.ttf");
        assert!(FontBook::load(&config).is_empty());
    }

    #[test]
    fn test_draw_without_fonts() {
        let book = FontBook::empty();
        let mut painter = TextPainter::new(&book, 10, 10).unwrap();
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let style = TextStyle::new(8.0, crate::scene::style::Color::hex(0x000000));
        assert!(!painter.draw(
            &mut pixmap,
            "Plate I",
            (0.0, 5.0),
            8.0,
            &style,
            &Paint::default()
        ));
    }
}
