//! Plate II: drop caps, celestial imagery and decorative borders.

use std::f64::consts::FRAC_PI_2;

use crate::{
    core::{
        geometry::{path::linspace, rect::Rect, site::Site},
        random::{RandomF64, RandomF64Provider},
    },
    generator::scatter::constellation,
    scene::{
        element::{MarkerKind, Shape},
        palette::Palette,
        style::{FillStyle, StrokeStyle, TextStyle},
        Scene,
    },
};

use super::{
    ornament::{arrow, plate_number, rays, sparkle, DropCap},
    Plate,
};

const BORDER_STAR_SEED: u64 = 42;
const CONSTELLATION_SEED: u64 = 888;

const TEXT_BLOCK: [&str; 8] = [
    "In the beginning was the question: not what is,",
    "but what ought to be. The alignment problem lives here—",
    "in the space between measurement and meaning,",
    "between what systems do and what we want.",
    "",
    "Wonder is epistemically valid. Beauty is not opposed",
    "to rigor. Some ideas deserve ceremonial containers,",
    "illuminated beginnings, the gold leaf of careful attention.",
];

/// Manuscript page with celestial ornaments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Illuminated;

impl Plate for Illuminated {
    fn name(&self) -> &'static str {
        "Illuminated Mode"
    }

    fn file_name(&self) -> &'static str {
        "illuminated-mode.png"
    }

    fn compose(&self) -> Scene {
        let palette = Palette::illuminated();
        let mut scene = Scene::plate(palette.bg);

        celestial_border(&mut scene, &palette, Rect::new(0.4, 0.4, 13.2, 9.2));
        DropCap {
            letter: 'I',
            origin: Site::new(1.0, 6.2),
            size: 2.0,
            pad: 0.12,
            rounding: 0.03,
            fill: palette.cream,
            frame: StrokeStyle::new(palette.gold, 2.0),
            inner_frame: Some(StrokeStyle::new(palette.gold_light, 0.8).dashed(2.96, 1.28)),
            corner_dot: (palette.gold, 4.0),
            ink: palette.ink,
            letter_scale: 38.0,
            vine: Some(StrokeStyle::new(palette.gold_light, 0.4).alpha(0.4)),
        }
        .draw(&mut scene);
        heading(&mut scene, &palette);

        let body = TextStyle::new(11.0, palette.ink_light);
        for (i, line) in TEXT_BLOCK.iter().enumerate() {
            if !line.is_empty() {
                scene.text(Site::new(3.3, 6.3 - i as f64 * 0.42), *line, body);
            }
        }

        celestial_map(&mut scene, &palette, Site::new(11.5, 5.5), 1.2);
        scene.text(
            Site::new(11.5, 4.0),
            "Celestial Map",
            TextStyle::new(8.0, palette.ink_faint).italic().centered(),
        );

        moon(&mut scene, &palette, Site::new(1.8, 2.8), 0.5);
        scene.text(
            Site::new(1.8, 2.0),
            "First Quarter",
            TextStyle::new(7.0, palette.ink_faint).italic().centered(),
        );

        sun(&mut scene, &palette, Site::new(12.3, 2.0), 0.22);
        margin_vine(&mut scene, &palette);
        quote_box(&mut scene, &palette, Rect::new(4.2, 1.3, 5.5, 1.4));

        scene.shape(
            Shape::Polygon(sparkle(Site::new(7.0, 6.74), 0.05, 0.015)),
            Some(FillStyle::new(palette.gold).alpha(0.6)),
            None,
        );
        plate_number(&mut scene, "Plate II", palette.ink_light);
        scene
    }
}

fn heading(scene: &mut Scene, palette: &Palette) {
    scene.text(
        Site::new(3.4, 7.7),
        "lluminated",
        TextStyle::new(30.0, palette.ink).italic(),
    );
    scene.text(
        Site::new(7.6, 7.7),
        "Mode",
        TextStyle::new(30.0, palette.ink_light).italic(),
    );
    scene.text(
        Site::new(7.0, 7.1),
        "— what things mean —",
        TextStyle::new(11.0, palette.ink_faint).italic().centered(),
    );
    scene.line(
        Site::new(3.5, 6.85),
        Site::new(10.5, 6.85),
        StrokeStyle::new(palette.gold_light, 0.5).alpha(0.5),
    );
}

/// Double rule with eight-rayed corner stars and a row of stars on top.
fn celestial_border(scene: &mut Scene, palette: &Palette, frame: Rect) {
    scene.shape(
        Shape::Rect(frame),
        None,
        Some(StrokeStyle::new(palette.gold_light, 1.5)),
    );
    scene.shape(
        Shape::Rect(frame.inset(0.08)),
        None,
        Some(StrokeStyle::new(palette.gold_light, 0.5).alpha(0.5)),
    );

    let ray = StrokeStyle::new(palette.gold, 0.8).alpha(0.7);
    for corner in frame.corners() {
        rays(scene, corner, 8, 0.0, 0.12, ray);
    }

    let mut rnd = RandomF64::new(BORDER_STAR_SEED);
    let (left, right) = (frame.x() + 0.4, frame.max().x - 0.4);
    for t in linspace(15) {
        let y = frame.max().y - 0.12 + rnd.gen_uniform(-0.02, 0.02);
        let size = rnd.gen_uniform(2.0, 5.0);
        scene.marker(
            Site::new(left + (right - left) * t, y),
            MarkerKind::Star,
            size,
            palette.gold_light,
            0.7,
        );
    }
}

fn celestial_map(scene: &mut Scene, palette: &Palette, center: Site, radius: f64) {
    scene.shape(
        Shape::Circle { center, radius },
        Some(FillStyle::new(palette.cream).alpha(0.5)),
        Some(StrokeStyle::new(palette.gold_light, 0.8).alpha(0.5)),
    );

    let constellation = constellation(center, radius, 15, CONSTELLATION_SEED);
    for star in &constellation.stars {
        scene.marker(star.at, MarkerKind::Star, star.size, palette.gold, star.opacity);
    }
    let link = StrokeStyle::new(palette.gold_light, 0.4).alpha(0.5);
    for &(i, j) in &constellation.links {
        scene.line(constellation.stars[i].at, constellation.stars[j].at, link);
    }
}

/// First quarter moon: lit disc with a shadow crescent on the right.
fn moon(scene: &mut Scene, palette: &Palette, center: Site, radius: f64) {
    scene.shape(
        Shape::Circle { center, radius },
        Some(FillStyle::new(palette.cream)),
        Some(StrokeStyle::new(palette.border, 0.5)),
    );
    scene.shape(
        Shape::Wedge {
            center,
            radius,
            from_deg: -90.0,
            to_deg: 90.0,
        },
        Some(FillStyle::new(palette.cream)),
        None,
    );

    let limb = linspace(30)
        .map(|t| -FRAC_PI_2 + t * 2.0 * FRAC_PI_2)
        .collect::<Vec<_>>();
    // outer limb upwards, then the terminator back down
    let mut crescent = limb
        .iter()
        .map(|theta| center.offset(radius * theta.cos(), radius * theta.sin()))
        .collect::<Vec<_>>();
    crescent.extend(
        limb.iter()
            .rev()
            .map(|theta| center.offset(radius * 0.3 * theta.cos(), radius * theta.sin())),
    );
    scene.shape(
        Shape::Polygon(crescent),
        Some(FillStyle::new(palette.shadow).alpha(0.8)),
        None,
    );
}

fn sun(scene: &mut Scene, palette: &Palette, center: Site, radius: f64) {
    scene.shape(
        Shape::Circle { center, radius },
        Some(FillStyle::new(palette.gold_light)),
        Some(StrokeStyle::new(palette.gold, 1.0)),
    );
    scene.marker(center, MarkerKind::Dot, 4.0, palette.gold, 1.0);
    rays(
        scene,
        center,
        8,
        radius * 1.1,
        radius * 1.4,
        StrokeStyle::new(palette.gold, 0.8),
    );
}

/// Wavy vine down the left margin with leaves every sixth sample.
fn margin_vine(scene: &mut Scene, palette: &Palette) {
    let vine = linspace(40)
        .map(|t| {
            let y = 1.8 + (8.0 - 1.8) * t;
            Site::new(0.75 + 0.08 * (y * 2.5).sin(), y)
        })
        .collect::<Vec<_>>();
    scene.polyline(
        vine.clone(),
        StrokeStyle::new(palette.gold_light, 0.8).alpha(0.4),
    );

    let leaf = StrokeStyle::new(palette.gold_light, 0.4);
    for (i, site) in vine.iter().enumerate().step_by(6) {
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        arrow(
            scene,
            *site,
            site.offset(0.12 * direction, 0.08),
            leaf,
            2.4,
            1.2,
        );
    }
}

fn quote_box(scene: &mut Scene, palette: &Palette, frame: Rect) {
    scene.shape(
        Shape::RoundedRect {
            rect: frame.inset(-0.02),
            radius: 0.04,
        },
        Some(FillStyle::new(palette.cream).alpha(0.8)),
        Some(StrokeStyle::new(palette.gold_light, 0.8).alpha(0.8)),
    );
    scene.text(
        Site::new(frame.x() + 0.15, frame.max().y - 0.25),
        "\"",
        TextStyle::new(20.0, palette.gold).alpha(0.5),
    );
    let center = frame.center();
    scene.text(
        center.offset(0.0, 0.12),
        "Wonder is the beginning of wisdom.",
        TextStyle::new(11.0, palette.ink_light).italic().centered(),
    );
    scene.text(
        center.offset(0.0, -0.25),
        "— the practice of observational patience",
        TextStyle::new(8.0, palette.ink_faint).centered(),
    );
}
