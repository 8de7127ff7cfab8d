//! Plate III: laboratory precision with illuminated thresholds.

use std::f64::consts::FRAC_PI_2;

use crate::{
    core::geometry::{
        path::{bezier::PathBezier, SampledPath},
        rect::Rect,
        site::Site,
    },
    generator::branch::{BranchGenerator, BranchParams, BranchTree, CurveStyle, SeedStrategy},
    scene::{
        element::{MarkerKind, Shape},
        palette::Palette,
        style::{Color, FillStyle, LineCap, StrokeStyle, TextStyle},
        Scene,
    },
};

use super::{
    ornament::{plate_number, DropCap},
    Plate,
};

const PATTERN_SEED: u64 = 123;

const CLAIMS: [(f64, &str); 5] = [
    (0.82, "value specification"),
    (0.65, "corrigibility"),
    (0.48, "mesa-optimization"),
    (0.71, "interpretability"),
    (0.55, "distributional shift"),
];

const DAG_NODES: [(f64, f64, &str); 5] = [
    (7.0, 5.5, "α"),
    (8.5, 6.2, "β"),
    (8.5, 4.8, "γ"),
    (10.0, 5.5, "δ"),
    (10.0, 6.5, "ε"),
];

const DAG_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (1, 3), (2, 3), (1, 4), (3, 4)];

/// Height of the apex of a DAG edge above its chord midpoint.
const EDGE_LIFT: f64 = 0.2;

/// Epistemic claims, a reasoning graph and an abstract branching pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blended;

impl Plate for Blended {
    fn name(&self) -> &'static str {
        "Blended Mode"
    }

    fn file_name(&self) -> &'static str {
        "blended-mode.png"
    }

    fn compose(&self) -> Scene {
        let palette = Palette::blended();
        let mut scene = Scene::plate(palette.bg);

        let frame = Rect::new(0.35, 0.35, 13.3, 9.3);
        scene.shape(
            Shape::Rect(frame),
            None,
            Some(StrokeStyle::new(palette.gold_light, 0.8).alpha(0.4)),
        );
        for corner in frame.corners() {
            scene.marker(corner, MarkerKind::Star, 6.0, palette.gold_light, 0.5);
        }

        heading(&mut scene, &palette);

        scene.text(
            Site::new(1.5, 6.6),
            "epistemic status",
            TextStyle::new(9.0, palette.ink_faint).mono(),
        );
        for (i, (confidence, label)) in CLAIMS.iter().enumerate() {
            confidence_bar(
                &mut scene,
                &palette,
                Site::new(1.5, 6.1 - i as f64 * 0.6),
                3.0,
                *confidence,
                label,
            );
        }

        reasoning_graph(&mut scene, &palette);

        let pattern = branching_pattern(Site::new(12.0, 5.5), 1.8);
        scene.extend_branch(&pattern, palette.ink_mid, LineCap::Butt);
        scene.text(
            Site::new(12.0, 3.8),
            "pattern",
            TextStyle::new(8.0, palette.ink_faint).italic().centered(),
        );

        quote(&mut scene, &palette, Site::new(1.2, 2.0));

        let notation = TextStyle::new(7.0, palette.ink_faint).mono().centered();
        scene.text(Site::new(12.5, 1.5), "confidence: 0.67", notation);
        scene.text(Site::new(12.5, 1.2), "importance: high", notation);

        plate_number(&mut scene, "Plate III", palette.ink_light);

        // separator
        scene.line(
            Site::new(1.0, 3.0),
            Site::new(6.0, 3.0),
            StrokeStyle::new(palette.wash, 0.5),
        );
        scene
    }
}

fn heading(scene: &mut Scene, palette: &Palette) {
    DropCap {
        letter: 'B',
        origin: Site::new(1.0, 7.5),
        size: 1.5,
        pad: 0.1,
        rounding: 0.02,
        fill: palette.cream,
        frame: StrokeStyle::new(palette.gold_light, 1.5),
        inner_frame: None,
        corner_dot: (palette.gold_light, 2.5),
        ink: palette.ink,
        letter_scale: 32.0,
        vine: None,
    }
    .draw(scene);

    scene.text(
        Site::new(2.8, 8.2),
        "lended",
        TextStyle::new(26.0, palette.ink).italic(),
    );
    scene.text(
        Site::new(5.8, 8.2),
        "Mode",
        TextStyle::new(26.0, palette.ink_light).italic(),
    );
    scene.text(
        Site::new(7.0, 7.6),
        "— where measurement meets meaning —",
        TextStyle::new(10.0, palette.ink_faint).italic().centered(),
    );
}

/// Colour of a confidence value: green above 0.7, yellow above 0.5, red
/// otherwise.
pub fn confidence_color(palette: &Palette, confidence: f64) -> Color {
    if confidence > 0.7 {
        palette.green
    } else if confidence > 0.5 {
        palette.yellow
    } else {
        palette.red
    }
}

/// Horizontal bar centered vertically on `at.y`, starting at `at.x`.
fn confidence_bar(
    scene: &mut Scene,
    palette: &Palette,
    at: Site,
    width: f64,
    confidence: f64,
    label: &str,
) {
    let height = 0.22;
    let bottom = at.y - height / 2.0;
    scene.shape(
        Shape::Rect(Rect::new(at.x, bottom, width, height)),
        Some(FillStyle::new(palette.wash).alpha(0.5)),
        None,
    );
    scene.shape(
        Shape::Rect(Rect::new(at.x, bottom, width * confidence, height)),
        Some(FillStyle::new(confidence_color(palette, confidence)).alpha(0.6)),
        None,
    );
    scene.text(
        at.offset(-0.12, 0.0),
        format!("{:.2}", confidence),
        TextStyle::new(7.0, palette.ink_mid).mono().right().middle(),
    );
    scene.text(
        at.offset(width + 0.15, 0.0),
        label,
        TextStyle::new(8.0, palette.ink_light).mono().middle(),
    );
}

fn reasoning_graph(scene: &mut Scene, palette: &Palette) {
    let nodes = DAG_NODES.map(|(x, y, label)| (Site::new(x, y), label));

    let edge = StrokeStyle::new(palette.wash, 1.0).alpha(0.6);
    for (i, j) in DAG_EDGES {
        let arch = PathBezier::new_arch(nodes[i].0, nodes[j].0, EDGE_LIFT);
        scene.polyline(arch.sample(30), edge);
    }

    for (center, label) in nodes {
        scene.shape(
            Shape::Circle {
                center,
                radius: 0.18,
            },
            Some(FillStyle::new(palette.cream)),
            Some(StrokeStyle::new(palette.accent, 1.2)),
        );
        scene.text(
            center,
            label,
            TextStyle::new(9.0, palette.ink_mid)
                .italic()
                .centered()
                .middle(),
        );
    }

    scene.text(
        Site::new(8.5, 4.0),
        "reasoning structure",
        TextStyle::new(8.0, palette.ink_faint).mono().centered(),
    );
}

fn pattern_generator() -> BranchGenerator {
    BranchGenerator::new(
        BranchParams::default()
            .set_max_depth(3)
            .set_min_length(0.1)
            .set_base_width(1.0)
            .set_opacity(0.7)
            .set_samples(20)
            .set_curve(CurveStyle::Bezier { jitter: 0.1 })
            .set_children(1, 2)
            .set_spread(0.6)
            .set_length_factor(0.5, 0.7)
            .set_seed(SeedStrategy::Fixed(PATTERN_SEED))
            .set_spines(None),
    )
}

/// Abstract branching from `root`: a long trunk upwards and a shorter one
/// downwards, both drawn from one seeded generator.
pub fn branching_pattern(root: Site, scale: f64) -> BranchTree {
    let generator = pattern_generator();
    let mut rnd = generator.seeded_rng();
    let mut tree = generator.generate_with(root, FRAC_PI_2, 0.6 * scale, 0, &mut rnd);
    tree.merge(generator.generate_with(root, -FRAC_PI_2, 0.4 * scale, 1, &mut rnd));
    tree
}

fn quote(scene: &mut Scene, palette: &Palette, at: Site) {
    scene.text(
        at.offset(0.0, 0.3),
        "\"",
        TextStyle::new(18.0, palette.gold_light).alpha(0.6),
    );
    let line = TextStyle::new(10.0, palette.ink_light).italic();
    scene.text(
        at.offset(0.25, 0.1),
        "The trace is more valuable than the result.",
        line,
    );
    scene.text(
        at.offset(0.25, -0.25),
        "Confidence is metadata, not binary.",
        line,
    );
}

#[cfg(test)]
mod tests {
    use crate::{core::Depth, scene::element::Element};

    use super::*;

    #[test]
    fn test_confidence_color() {
        let palette = Palette::blended();
        assert_eq!(confidence_color(&palette, 0.82), palette.green);
        assert_eq!(confidence_color(&palette, 0.71), palette.green);
        assert_eq!(confidence_color(&palette, 0.7), palette.yellow);
        assert_eq!(confidence_color(&palette, 0.55), palette.yellow);
        assert_eq!(confidence_color(&palette, 0.5), palette.red);
        assert_eq!(confidence_color(&palette, 0.48), palette.red);
    }

    #[test]
    fn test_branching_pattern() {
        let root = Site::new(12.0, 5.5);
        let tree = branching_pattern(root, 1.8);
        assert_eq!(tree, branching_pattern(root, 1.8));

        let roots = tree.roots().collect::<Vec<_>>();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].depth, Depth::new(0));
        assert_eq!(roots[1].depth, Depth::new(1));
        assert!((roots[0].length - 1.08).abs() < 1e-9);
        assert!((roots[1].length - 0.72).abs() < 1e-9);
        assert!(roots.iter().all(|segment| segment.first() == Some(root)));

        for segment in tree.iter() {
            assert!(segment.depth.as_num() <= 3);
            assert!(segment.length >= 0.1);
            assert!(segment.spines.is_empty());
            assert_eq!(segment.points.len(), 20);
        }
    }

    #[test]
    fn test_pattern_trunks_share_one_sequence() {
        let root = Site::new(12.0, 5.5);
        let tree = branching_pattern(root, 1.8);
        let generator = pattern_generator();
        assert_eq!(generator.params().seed, SeedStrategy::Fixed(PATTERN_SEED));

        // the upward trunk alone is what a fresh run from the fixed seed gives
        let up = generator.generate(root, FRAC_PI_2, 1.08, 0);
        assert_eq!(&tree.segments()[..up.len()], up.segments());
        // the downward trunk continues the sequence instead of restarting it
        let restarted = generator.generate(root, -FRAC_PI_2, 0.72, 1);
        assert_ne!(&tree.segments()[up.len()..], restarted.segments());
    }

    #[test]
    fn test_pattern_strokes_use_butt_caps() {
        let mut scene = Scene::plate(Palette::blended().bg);
        let pattern = branching_pattern(Site::new(12.0, 5.5), 1.8);
        scene.extend_branch(&pattern, Palette::blended().ink_mid, LineCap::Butt);
        assert_eq!(scene.len(), pattern.len());
        for element in scene.elements() {
            let Element::Polyline { stroke, .. } = element else {
                panic!("unexpected element {:?}", element);
            };
            assert_eq!(stroke.cap, LineCap::Butt);
        }
    }

    #[test]
    fn test_confidence_bar_elements() {
        let palette = Palette::blended();
        let mut scene = Scene::plate(palette.bg);
        confidence_bar(
            &mut scene,
            &palette,
            Site::new(1.5, 6.1),
            3.0,
            0.65,
            "corrigibility",
        );
        assert_eq!(scene.len(), 4);
        match &scene.elements()[1] {
            Element::Shape {
                shape: Shape::Rect(rect),
                fill: Some(fill),
                ..
            } => {
                assert!((rect.width() - 1.95).abs() < 1e-9);
                assert_eq!(fill.color, palette.yellow);
            }
            element => panic!("unexpected element {:?}", element),
        }
        match &scene.elements()[2] {
            Element::Text { content, .. } => assert_eq!(content, "0.65"),
            element => panic!("unexpected element {:?}", element),
        }
    }
}
