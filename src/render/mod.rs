//! Rasterization of scenes with tiny-skia.

use std::path::Path;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::{
    config::RenderConfig,
    core::geometry::{angle::Angle, rect::Rect, site::Site},
    error::PlateError,
    scene::{
        element::{Element, MarkerKind, Shape},
        style::{Color, FillStyle, LineCap, StrokeStyle},
        Scene,
    },
};

pub mod text;

use text::{FontBook, TextPainter};

/// Points per canvas unit (inch).
const POINTS_PER_UNIT: f64 = 72.0;
/// Number of chords used to approximate a full turn of an arc.
const ARC_STEPS: usize = 96;

/// Mapping from canvas units (y up) to pixels (y down).
#[derive(Debug, Clone, Copy)]
struct CanvasTransform {
    bounds: Rect,
    dpi: f64,
}

impl CanvasTransform {
    fn point(&self, site: Site) -> (f32, f32) {
        (
            ((site.x - self.bounds.x()) * self.dpi) as f32,
            ((self.bounds.max().y - site.y) * self.dpi) as f32,
        )
    }

    fn points_to_px(&self, points: f64) -> f32 {
        (points * self.dpi / POINTS_PER_UNIT) as f32
    }
}

/// Renders scenes into pixmaps.
pub struct Rasterizer {
    dpi: f64,
    fonts: FontBook,
}

impl Rasterizer {
    /// Create a rasterizer, loading the configured fonts.
    pub fn new(config: &RenderConfig) -> Self {
        Self::with_fonts(config.dpi, FontBook::load(&config.fonts))
    }

    pub fn with_fonts(dpi: f64, fonts: FontBook) -> Self {
        Self { dpi, fonts }
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Pixel dimensions of the scene at this rasterizer's resolution.
    pub fn pixel_size(&self, scene: &Scene) -> (u32, u32) {
        let to_px = |units: f64| (units * self.dpi).round().max(0.0) as u32;
        (to_px(scene.bounds().width()), to_px(scene.bounds().height()))
    }

    pub fn render(&self, scene: &Scene) -> Result<Pixmap, PlateError> {
        let (width, height) = self.pixel_size(scene);
        let canvas_error = || PlateError::Canvas { width, height };
        let mut pixmap = Pixmap::new(width, height).ok_or_else(canvas_error)?;
        pixmap.fill(skia_color(scene.background(), 1.0));

        let transform = CanvasTransform {
            bounds: scene.bounds(),
            dpi: self.dpi,
        };
        let mut painter =
            TextPainter::new(&self.fonts, width, height).ok_or_else(canvas_error)?;
        let mut skipped_text = 0;

        for element in scene.elements().iter().filter(|e| e.is_visible()) {
            match element {
                Element::Polyline { points, stroke } => {
                    stroke_polyline(&mut pixmap, &transform, points, stroke, false);
                }
                Element::Shape {
                    shape,
                    fill,
                    stroke,
                } => draw_shape(&mut pixmap, &transform, shape, fill.as_ref(), stroke.as_ref()),
                Element::Marker {
                    at,
                    kind,
                    size,
                    color,
                    alpha,
                } => draw_marker(&mut pixmap, &transform, *at, *kind, *size, *color, *alpha),
                Element::Text { at, content, style } => {
                    let drawn = painter.draw(
                        &mut pixmap,
                        content,
                        transform.point(*at),
                        transform.points_to_px(style.size),
                        style,
                        &paint(style.color, style.alpha),
                    );
                    if !drawn {
                        skipped_text += 1;
                    }
                }
            }
        }

        if skipped_text > 0 {
            log::warn!("skipped {} text elements without a font", skipped_text);
        }
        log::debug!(
            "rendered {} elements into {}x{} pixels",
            scene.len(),
            width,
            height
        );
        Ok(pixmap)
    }
}

/// Encode the pixmap as PNG and write it to `path`.
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<(), PlateError> {
    let data = pixmap
        .encode_png()
        .map_err(|err| PlateError::Encode(err.to_string()))?;
    std::fs::write(path, data).map_err(|source| PlateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn skia_color(color: Color, alpha: f64) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, alpha_u8(alpha))
}

fn alpha_u8(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn paint(color: Color, alpha: f64) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, alpha_u8(alpha));
    paint.anti_alias = true;
    paint
}

fn skia_stroke(transform: &CanvasTransform, style: &StrokeStyle) -> Stroke {
    let mut stroke = Stroke {
        width: transform.points_to_px(style.width),
        line_cap: match style.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: tiny_skia::LineJoin::Round,
        ..Default::default()
    };
    if let Some((on, off)) = style.dash {
        stroke.dash = StrokeDash::new(
            vec![transform.points_to_px(on), transform.points_to_px(off)],
            0.0,
        );
    }
    stroke
}

fn polyline_path(
    transform: &CanvasTransform,
    points: &[Site],
    closed: bool,
) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    let mut iter = points.iter();
    let (x, y) = transform.point(*iter.next()?);
    builder.move_to(x, y);
    for site in iter {
        let (x, y) = transform.point(*site);
        builder.line_to(x, y);
    }
    if closed {
        builder.close();
    }
    builder.finish()
}

fn stroke_polyline(
    pixmap: &mut Pixmap,
    transform: &CanvasTransform,
    points: &[Site],
    style: &StrokeStyle,
    closed: bool,
) {
    if let Some(path) = polyline_path(transform, points, closed) {
        pixmap.stroke_path(
            &path,
            &paint(style.color, style.alpha),
            &skia_stroke(transform, style),
            Transform::identity(),
            None,
        );
    }
}

/// Outline of a shape as a closed list of canvas sites.
fn shape_outline(shape: &Shape) -> Vec<Site> {
    match shape {
        Shape::Circle { center, radius } => ellipse_outline(*center, *radius, *radius),
        Shape::Ellipse {
            center,
            width,
            height,
        } => ellipse_outline(*center, width / 2.0, height / 2.0),
        Shape::Rect(rect) => rect_outline(rect),
        Shape::RoundedRect { rect, radius } => rounded_rect_outline(rect, *radius),
        Shape::Wedge {
            center,
            radius,
            from_deg,
            to_deg,
        } => {
            let sweep = (to_deg - from_deg).rem_euclid(360.0);
            let sweep = if sweep == 0.0 { 360.0 } else { sweep };
            let steps = ((ARC_STEPS as f64 * sweep / 360.0).ceil() as usize).max(2);
            let mut outline = vec![*center];
            outline.extend((0..=steps).map(|i| {
                let degree = from_deg + sweep * i as f64 / steps as f64;
                center.extend(Angle::new(degree.to_radians()), *radius)
            }));
            outline
        }
        Shape::Polygon(points) => points.clone(),
    }
}

fn ellipse_outline(center: Site, rx: f64, ry: f64) -> Vec<Site> {
    Angle::iter_full_turn(ARC_STEPS)
        .map(|angle| {
            center.offset(
                rx * angle.radian().cos(),
                ry * angle.radian().sin(),
            )
        })
        .collect()
}

fn rect_outline(rect: &Rect) -> Vec<Site> {
    let [lower_left, lower_right, upper_left, upper_right] = rect.corners();
    vec![lower_left, lower_right, upper_right, upper_left]
}

fn rounded_rect_outline(rect: &Rect, radius: f64) -> Vec<Site> {
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    if radius == 0.0 {
        return rect_outline(rect);
    }
    let (min, max) = (rect.min(), rect.max());
    let corners = [
        (Site::new(max.x - radius, min.y + radius), -90.0),
        (Site::new(max.x - radius, max.y - radius), 0.0),
        (Site::new(min.x + radius, max.y - radius), 90.0),
        (Site::new(min.x + radius, min.y + radius), 180.0),
    ];
    let steps = ARC_STEPS / 4;
    corners
        .iter()
        .flat_map(|(center, start)| {
            (0..=steps).map(move |i| {
                let degree: f64 = start + 90.0 * i as f64 / steps as f64;
                center.extend(Angle::new(degree.to_radians()), radius)
            })
        })
        .collect()
}

fn draw_shape(
    pixmap: &mut Pixmap,
    transform: &CanvasTransform,
    shape: &Shape,
    fill: Option<&FillStyle>,
    stroke: Option<&StrokeStyle>,
) {
    let outline = shape_outline(shape);
    let Some(path) = polyline_path(transform, &outline, true) else {
        return;
    };
    if let Some(fill) = fill {
        pixmap.fill_path(
            &path,
            &paint(fill.color, fill.alpha),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    if let Some(stroke) = stroke {
        pixmap.stroke_path(
            &path,
            &paint(stroke.color, stroke.alpha),
            &skia_stroke(transform, stroke),
            Transform::identity(),
            None,
        );
    }
}

fn draw_marker(
    pixmap: &mut Pixmap,
    transform: &CanvasTransform,
    at: Site,
    kind: MarkerKind,
    size: f64,
    color: Color,
    alpha: f64,
) {
    let (cx, cy) = transform.point(at);
    let diameter = transform.points_to_px(size);
    let path = match kind {
        MarkerKind::Dot => PathBuilder::from_circle(cx, cy, (diameter / 4.0).max(0.5)),
        MarkerKind::Circle => PathBuilder::from_circle(cx, cy, (diameter / 2.0).max(0.5)),
        MarkerKind::Star => star_path(cx, cy, (diameter / 2.0).max(1.0)),
    };
    if let Some(path) = path {
        pixmap.fill_path(
            &path,
            &paint(color, alpha),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Five-pointed star in pixel space, pointing up.
fn star_path(cx: f32, cy: f32, outer: f32) -> Option<tiny_skia::Path> {
    let inner = outer * 0.38;
    let mut builder = PathBuilder::new();
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
        let (x, y) = (cx + radius * angle.cos(), cy + radius * angle.sin());
        if i == 0 {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }
    builder.close();
    builder.finish()
}
