//! The drawing surface: an ordered list of vector elements in canvas units.
//!
//! The canvas origin is the lower-left corner and the y axis points up.

use crate::{
    core::geometry::{rect::Rect, site::Site},
    generator::{branch::BranchTree, filament::Filament, Dot},
};

pub mod element;
pub mod palette;
pub mod style;

use element::{Element, MarkerKind, Shape};
use style::{Color, FillStyle, LineCap, StrokeStyle, TextStyle};

/// Canvas width of every plate, in canvas units (inches).
pub const CANVAS_WIDTH: f64 = 14.0;
/// Canvas height of every plate, in canvas units (inches).
pub const CANVAS_HEIGHT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    bounds: Rect,
    background: Color,
    elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            background,
            elements: Vec::new(),
        }
    }

    /// A 14 x 10 canvas.
    pub fn plate(background: Color) -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT, background)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn polyline(&mut self, points: Vec<Site>, stroke: StrokeStyle) {
        self.push(Element::Polyline { points, stroke });
    }

    pub fn line(&mut self, from: Site, to: Site, stroke: StrokeStyle) {
        self.polyline(vec![from, to], stroke);
    }

    pub fn shape(&mut self, shape: Shape, fill: Option<FillStyle>, stroke: Option<StrokeStyle>) {
        self.push(Element::Shape {
            shape,
            fill,
            stroke,
        });
    }

    pub fn marker(&mut self, at: Site, kind: MarkerKind, size: f64, color: Color, alpha: f64) {
        self.push(Element::Marker {
            at,
            kind,
            size,
            color,
            alpha,
        });
    }

    pub fn text(&mut self, at: Site, content: impl Into<String>, style: TextStyle) {
        self.push(Element::Text {
            at,
            content: content.into(),
            style,
        });
    }

    /// Stroke every segment of the tree with `cap`, followed by its spines.
    pub fn extend_branch(&mut self, tree: &BranchTree, color: Color, cap: LineCap) {
        for segment in tree.iter() {
            self.polyline(
                segment.points.clone(),
                StrokeStyle::new(color, segment.width)
                    .alpha(segment.opacity)
                    .cap(cap),
            );
            for spine in &segment.spines {
                self.line(
                    spine.from,
                    spine.to,
                    StrokeStyle::new(color, spine.width).alpha(spine.opacity),
                );
            }
        }
    }

    /// Stroke the strands of the filament and scatter its stipples.
    pub fn extend_filament(&mut self, filament: &Filament, color: Color) {
        for strand in &filament.strands {
            self.polyline(
                strand.points.clone(),
                StrokeStyle::new(color, strand.width).alpha(strand.opacity),
            );
        }
        self.dots(&filament.stipples, MarkerKind::Dot, color);
    }

    pub fn dots(&mut self, dots: &[Dot], kind: MarkerKind, color: Color) {
        for dot in dots {
            self.marker(dot.at, kind, dot.size, color, dot.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::{
        branch::BranchGenerator,
        filament::{FilamentGenerator, FilamentParams},
    };

    use super::*;

    #[test]
    fn test_plate_bounds() {
        let scene = Scene::plate(Color::hex(0xF5F0E8));
        assert_eq!(scene.bounds(), Rect::new(0.0, 0.0, 14.0, 10.0));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_extend_branch() {
        let tree = BranchGenerator::default().generate(
            Site::new(2.5, 5.2),
            std::f64::consts::FRAC_PI_2,
            0.7,
            0,
        );
        let spines = tree.iter().map(|segment| segment.spines.len()).sum::<usize>();
        let mut scene = Scene::plate(Color::hex(0xF5F0E8));
        scene.extend_branch(&tree, Color::hex(0x3A3530), LineCap::Round);
        assert_eq!(scene.len(), tree.len() + spines);
        match &scene.elements()[0] {
            Element::Polyline { points, stroke } => {
                assert_eq!(points, &tree.segments()[0].points);
                assert_eq!(stroke.cap, LineCap::Round);
                assert_eq!(stroke.width, 1.2);
            }
            element => panic!("unexpected element {:?}", element),
        }
    }

    #[test]
    fn test_extend_filament() {
        let filament = FilamentGenerator::new(FilamentParams::default().set_thickness(0.6))
            .generate(Site::new(6.0, 6.0), Site::new(7.5, 5.0));
        let mut scene = Scene::plate(Color::hex(0xF5F0E8));
        scene.extend_filament(&filament, Color::hex(0x3A3530));
        assert_eq!(
            scene.len(),
            filament.strands.len() + filament.stipples.len()
        );
        assert!(scene.elements().iter().all(Element::is_visible));
    }

    #[test]
    fn test_invisible_elements() {
        let color = Color::hex(0x000000);
        assert!(!Element::Polyline {
            points: vec![Site::new(0.0, 0.0)],
            stroke: StrokeStyle::new(color, 1.0),
        }
        .is_visible());
        assert!(!Element::Shape {
            shape: Shape::Circle {
                center: Site::new(0.0, 0.0),
                radius: 1.0
            },
            fill: None,
            stroke: None,
        }
        .is_visible());
        assert!(!Element::Text {
            at: Site::new(0.0, 0.0),
            content: "  ".to_string(),
            style: TextStyle::new(8.0, color),
        }
        .is_visible());
    }
}
