//! Decorations shared between plates.

use crate::{
    core::geometry::{
        angle::Angle,
        path::linspace,
        rect::Rect,
        site::Site,
    },
    scene::{
        element::{MarkerKind, Shape},
        style::{Color, FillStyle, StrokeStyle, TextStyle},
        Scene,
    },
};

/// Points per canvas unit.
const POINTS_PER_UNIT: f64 = 72.0;

/// An illuminated initial letter in a square frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DropCap {
    pub letter: char,
    /// Lower-left corner of the letter square.
    pub origin: Site,
    pub size: f64,
    /// Frame padding relative to `size`.
    pub pad: f64,
    pub rounding: f64,
    pub fill: Color,
    pub frame: StrokeStyle,
    /// Dashed frame drawn just inside the letter square.
    pub inner_frame: Option<StrokeStyle>,
    pub corner_dot: (Color, f64),
    pub ink: Color,
    /// Letter size in points per canvas unit of `size`.
    pub letter_scale: f64,
    /// Wavy ring around the letter.
    pub vine: Option<StrokeStyle>,
}

impl DropCap {
    pub fn draw(&self, scene: &mut Scene) {
        let pad = self.size * self.pad;
        let frame = Rect::new(
            self.origin.x - pad,
            self.origin.y - pad,
            self.size + 2.0 * pad,
            self.size + 2.0 * pad,
        );
        scene.shape(
            Shape::RoundedRect {
                rect: frame,
                radius: self.rounding,
            },
            Some(FillStyle::new(self.fill)),
            Some(self.frame),
        );
        if let Some(inner) = self.inner_frame {
            scene.shape(
                Shape::RoundedRect {
                    rect: Rect::new(
                        self.origin.x + 0.05,
                        self.origin.y + 0.05,
                        self.size - 0.1,
                        self.size - 0.1,
                    ),
                    radius: self.rounding * 2.0 / 3.0,
                },
                None,
                Some(inner),
            );
        }

        let square = Rect::new(self.origin.x, self.origin.y, self.size, self.size);
        let (dot_color, dot_size) = self.corner_dot;
        for corner in square.corners() {
            scene.marker(corner, MarkerKind::Circle, dot_size, dot_color, 1.0);
        }

        scene.text(
            square.center(),
            self.letter,
            TextStyle::new(self.size * self.letter_scale, self.ink)
                .italic()
                .centered()
                .middle(),
        );

        if let Some(vine) = self.vine {
            let radius = self.size * 0.38;
            let center = square.center();
            let ring = linspace(40)
                .map(|t| {
                    let theta = t * 2.0 * std::f64::consts::PI;
                    center.offset(
                        radius * theta.cos() * (1.0 + 0.08 * (4.0 * theta).sin()),
                        radius * theta.sin() * (1.0 + 0.08 * (3.0 * theta).cos()),
                    )
                })
                .collect();
            scene.polyline(ring, vine);
        }
    }
}

/// Draw `count` evenly spaced rays between the radii `inner` and `outer`.
pub fn rays(
    scene: &mut Scene,
    center: Site,
    count: usize,
    inner: f64,
    outer: f64,
    stroke: StrokeStyle,
) {
    for angle in Angle::iter_full_turn(count) {
        scene.line(
            center.extend(angle, inner),
            center.extend(angle, outer),
            stroke,
        );
    }
}

/// Draw a line ending in an open arrow head.
///
/// The head dimensions are in points.
pub fn arrow(
    scene: &mut Scene,
    from: Site,
    to: Site,
    stroke: StrokeStyle,
    head_length: f64,
    head_width: f64,
) {
    scene.line(from, to, stroke);
    if from == to {
        return;
    }
    let back = to.get_angle(&from);
    let (length, width) = (head_length / POINTS_PER_UNIT, head_width / POINTS_PER_UNIT);
    let base = to.extend(back, length);
    for side in [1.0, -1.0] {
        let barb = base.extend(back.perpendicular(side), width);
        scene.line(barb, to, stroke);
    }
}

/// Outline of a four-pointed star.
pub fn sparkle(center: Site, outer: f64, inner: f64) -> Vec<Site> {
    Angle::iter_full_turn(8)
        .enumerate()
        .map(|(i, angle)| {
            let radius = if i % 2 == 0 { outer } else { inner };
            center.extend(angle.rotated(std::f64::consts::FRAC_PI_2), radius)
        })
        .collect()
}

/// Italic plate number in the lower-right corner.
pub fn plate_number(scene: &mut Scene, label: &str, color: Color) {
    scene.text(
        Site::new(13.3, 0.6),
        label,
        TextStyle::new(8.0, color).italic().right(),
    );
}

#[cfg(test)]
mod tests {
    use crate::scene::element::Element;

    use super::*;

    #[test]
    fn test_rays() {
        let mut scene = Scene::plate(Color::hex(0xFAF8F2));
        let center = Site::new(12.3, 2.0);
        rays(
            &mut scene,
            center,
            8,
            0.242,
            0.308,
            StrokeStyle::new(Color::hex(0x9A7B35), 0.8),
        );
        assert_eq!(scene.len(), 8);
        for element in scene.elements() {
            let Element::Polyline { points, .. } = element else {
                panic!("unexpected element {:?}", element);
            };
            assert!((points[0].distance(&center) - 0.242).abs() < 1e-9);
            assert!((points[1].distance(&center) - 0.308).abs() < 1e-9);
        }
    }

    #[test]
    fn test_arrow_head_meets_tip() {
        let mut scene = Scene::plate(Color::hex(0xFAF8F2));
        let (from, to) = (Site::new(0.75, 1.8), Site::new(0.87, 1.88));
        arrow(
            &mut scene,
            from,
            to,
            StrokeStyle::new(Color::hex(0xC4A86A), 0.4),
            2.4,
            1.2,
        );
        assert_eq!(scene.len(), 3);
        for element in &scene.elements()[1..] {
            let Element::Polyline { points, .. } = element else {
                panic!("unexpected element {:?}", element);
            };
            assert_eq!(points[1], to);
            assert!(points[0].distance(&from) < to.distance(&from));
        }
    }

    #[test]
    fn test_sparkle() {
        let center = Site::new(7.0, 6.74);
        let outline = sparkle(center, 0.05, 0.015);
        assert_eq!(outline.len(), 8);
        assert!(outline[0].distance(&Site::new(7.0, 6.79)) < 1e-9);
        assert!((outline[1].distance(&center) - 0.015).abs() < 1e-9);
    }

    #[test]
    fn test_drop_cap_elements() {
        let gold = Color::hex(0x9A7B35);
        let cap = DropCap {
            letter: 'I',
            origin: Site::new(1.0, 6.2),
            size: 2.0,
            pad: 0.12,
            rounding: 0.03,
            fill: Color::hex(0xFFFCF5),
            frame: StrokeStyle::new(gold, 2.0),
            inner_frame: Some(StrokeStyle::new(gold, 0.8).dashed(2.96, 1.28)),
            corner_dot: (gold, 4.0),
            ink: Color::hex(0x2A2520),
            letter_scale: 38.0,
            vine: Some(StrokeStyle::new(gold, 0.4).alpha(0.4)),
        };
        let mut scene = Scene::plate(Color::hex(0xFAF8F2));
        cap.draw(&mut scene);
        // frame, inner frame, four dots, letter and vine
        assert_eq!(scene.len(), 8);
        match &scene.elements()[6] {
            Element::Text { at, content, style } => {
                assert_eq!(*at, Site::new(2.0, 7.2));
                assert_eq!(content, "I");
                assert_eq!(style.size, 76.0);
            }
            element => panic!("unexpected element {:?}", element),
        }
    }
}
