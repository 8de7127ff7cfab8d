use crate::core::geometry::{rect::Rect, site::Site};

use super::style::{Color, FillStyle, StrokeStyle, TextStyle};

/// Closed outlines, in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Site,
        radius: f64,
    },
    /// `width` and `height` are the full axes.
    Ellipse {
        center: Site,
        width: f64,
        height: f64,
    },
    Rect(Rect),
    RoundedRect {
        rect: Rect,
        radius: f64,
    },
    /// Pie slice from `from_deg` to `to_deg`, counterclockwise.
    Wedge {
        center: Site,
        radius: f64,
        from_deg: f64,
        to_deg: f64,
    },
    Polygon(Vec<Site>),
}

/// Marker glyphs; sizes are in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Small filled point, half the diameter of `Circle`.
    Dot,
    Circle,
    /// Five-pointed star.
    Star,
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Polyline {
        points: Vec<Site>,
        stroke: StrokeStyle,
    },
    Shape {
        shape: Shape,
        fill: Option<FillStyle>,
        stroke: Option<StrokeStyle>,
    },
    Marker {
        at: Site,
        kind: MarkerKind,
        size: f64,
        color: Color,
        alpha: f64,
    },
    Text {
        at: Site,
        content: String,
        style: TextStyle,
    },
}

impl Element {
    /// Whether the element draws anything at all.
    pub fn is_visible(&self) -> bool {
        match self {
            Element::Polyline { points, stroke } => points.len() >= 2 && stroke.alpha > 0.0,
            Element::Shape { fill, stroke, .. } => {
                fill.is_some_and(|fill| fill.alpha > 0.0)
                    || stroke.is_some_and(|stroke| stroke.alpha > 0.0)
            }
            Element::Marker { size, alpha, .. } => *size > 0.0 && *alpha > 0.0,
            Element::Text { content, style, .. } => {
                !content.trim().is_empty() && style.alpha > 0.0
            }
        }
    }
}
