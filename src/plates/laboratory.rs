//! Plate I: flowing lines, organic branching and stippled density.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::{
    core::{
        geometry::{path::linspace, rect::Rect, site::Site},
        random::{RandomF64, RandomF64Provider},
    },
    generator::{
        branch::{BranchGenerator, BranchParams},
        filament::{FilamentGenerator, FilamentParams},
        scatter::cluster,
    },
    scene::{
        element::{MarkerKind, Shape},
        palette::Palette,
        style::{FillStyle, LineCap, StrokeStyle, TextStyle},
        Scene,
    },
};

use super::{ornament::plate_number, Plate};

/// Cluster positions of the cosmic web.
const WEB_NODES: [(f64, f64); 11] = [
    (6.0, 6.0),
    (7.5, 5.0),
    (9.0, 6.5),
    (8.0, 4.0),
    (10.0, 5.0),
    (11.0, 6.0),
    (6.5, 4.5),
    (9.5, 4.0),
    (10.5, 4.5),
    (7.0, 7.0),
    (11.5, 5.5),
];

/// Filaments as pairs of indices into [`WEB_NODES`].
const WEB_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (1, 3),
    (2, 4),
    (4, 5),
    (3, 4),
    (0, 6),
    (3, 7),
    (4, 8),
    (0, 9),
    (5, 10),
    (2, 5),
];

const CLUSTER_SEED: u64 = 42;

/// Neurons and the cosmic web side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct Laboratory;

impl Plate for Laboratory {
    fn name(&self) -> &'static str {
        "Laboratory Mode"
    }

    fn file_name(&self) -> &'static str {
        "laboratory-mode.png"
    }

    fn compose(&self) -> Scene {
        let palette = Palette::laboratory();
        let mut scene = Scene::plate(palette.bg);

        title(&mut scene, &palette);
        neuron(&mut scene, &palette);
        cosmic_web(&mut scene, &palette);
        notation(&mut scene, &palette);

        // border
        scene.shape(
            Shape::Rect(Rect::new(0.3, 0.3, 13.4, 9.4)),
            None,
            Some(StrokeStyle::new(palette.wash, 0.5).alpha(0.5)),
        );
        scene
    }
}

fn title(scene: &mut Scene, palette: &Palette) {
    scene.text(
        Site::new(7.0, 9.3),
        "Laboratory Mode",
        TextStyle::new(28.0, palette.ink).italic().centered(),
    );
    scene.text(
        Site::new(7.0, 8.85),
        "after Cajal — how things are measured",
        TextStyle::new(11.0, palette.ink_faint).italic().centered(),
    );
    scene.line(
        Site::new(4.0, 8.65),
        Site::new(10.0, 8.65),
        StrokeStyle::new(palette.wash, 0.5),
    );
}

/// Soma outline, slightly lobed.
fn cell_body(scene: &mut Scene, palette: &Palette, center: Site, size: f64) {
    let outline = linspace(50)
        .map(|t| {
            let theta = t * 2.0 * PI;
            let radius = size * (1.0 + 0.06 * (5.0 * theta).sin());
            center.offset(radius * theta.cos(), radius * theta.sin())
        })
        .collect();
    scene.shape(
        Shape::Polygon(outline),
        Some(FillStyle::new(palette.bg)),
        Some(StrokeStyle::new(palette.ink_mid, 1.0)),
    );
    scene.shape(
        Shape::Circle {
            center,
            radius: size * 0.35,
        },
        Some(FillStyle::new(palette.wash).alpha(0.6)),
        Some(StrokeStyle::new(palette.ink_light, 0.5).alpha(0.6)),
    );
    scene.marker(center, MarkerKind::Dot, 2.0, palette.ink, 1.0);
}

/// A Purkinje cell: soma, three dendrite trees and a wavy axon.
fn neuron(scene: &mut Scene, palette: &Palette) {
    cell_body(scene, palette, Site::new(2.5, 5.0), 0.25);

    let dendrites = BranchGenerator::new(BranchParams::default().set_max_depth(5));
    for angle in [FRAC_PI_2 - 0.3, FRAC_PI_2, FRAC_PI_2 + 0.3] {
        let tree = dendrites.generate(Site::new(2.5, 5.2), angle, 0.7, 0);
        log::debug!("dendrite at {:.2} rad has {} segments", angle, tree.len());
        scene.extend_branch(&tree, palette.ink_mid, LineCap::Round);
    }

    let axon = linspace(30)
        .map(|t| {
            let y = 4.75 + (3.2 - 4.75) * t;
            Site::new(2.5 + 0.03 * (y * 8.0).sin(), y)
        })
        .collect();
    scene.polyline(axon, StrokeStyle::new(palette.ink_mid, 0.8));

    scene.text(
        Site::new(2.5, 2.8),
        "Purkinje cell",
        TextStyle::new(8.0, palette.ink_faint).italic().centered(),
    );
    scene.text(
        Site::new(2.5, 2.5),
        "cerebellum",
        TextStyle::new(7.0, palette.ink_faint).mono().centered(),
    );
}

fn cosmic_web(scene: &mut Scene, palette: &Palette) {
    let nodes = WEB_NODES.map(Site::from);

    let filaments = FilamentGenerator::new(FilamentParams::default().set_thickness(0.6));
    for (i, j) in WEB_EDGES {
        let filament = filaments.generate(nodes[i], nodes[j]);
        scene.extend_filament(&filament, palette.ink_mid);
    }

    let mut rnd = RandomF64::new(CLUSTER_SEED);
    for node in nodes {
        let size = rnd.gen_uniform(0.08, 0.15);
        scene.dots(&cluster(node, size), MarkerKind::Dot, palette.ink);
    }

    // void
    scene.shape(
        Shape::Ellipse {
            center: Site::new(8.0, 5.5),
            width: 1.2,
            height: 0.8,
        },
        Some(FillStyle::new(palette.bg).alpha(0.3)),
        None,
    );

    scene.text(
        Site::new(8.5, 3.2),
        "cosmic web",
        TextStyle::new(8.0, palette.ink_faint).italic().centered(),
    );
    scene.text(
        Site::new(8.5, 2.9),
        "z ~ 0",
        TextStyle::new(7.0, palette.ink_faint).mono().centered(),
    );
}

/// Scale bar, plate number and quote.
fn notation(scene: &mut Scene, palette: &Palette) {
    let bar = StrokeStyle::new(palette.ink, 0.8);
    scene.line(Site::new(0.8, 1.2), Site::new(1.6, 1.2), bar);
    scene.line(Site::new(0.8, 1.15), Site::new(0.8, 1.25), bar);
    scene.line(Site::new(1.6, 1.15), Site::new(1.6, 1.25), bar);
    scene.text(
        Site::new(1.2, 1.0),
        "100 μm / 100 Mpc",
        TextStyle::new(7.0, palette.ink_faint).mono().centered(),
    );

    plate_number(scene, "Plate I", palette.ink_light);

    let quote = TextStyle::new(9.0, palette.ink_light).italic();
    scene.text(
        Site::new(0.8, 8.0),
        "The same optimization mathematics",
        quote,
    );
    scene.text(
        Site::new(0.8, 7.65),
        "across twenty orders of magnitude.",
        quote,
    );
}

#[cfg(test)]
mod tests {
    use crate::scene::element::Element;

    use super::*;

    #[test]
    fn test_web_edges_reference_nodes() {
        for (i, j) in WEB_EDGES {
            assert!(i < WEB_NODES.len() && j < WEB_NODES.len());
            assert_ne!(i, j);
        }
    }

    #[test]
    fn test_compose() {
        let scene = Laboratory.compose();
        assert_eq!(scene.background(), Palette::laboratory().bg);
        let texts = scene
            .elements()
            .iter()
            .filter_map(|element| match element {
                Element::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert!(texts.contains(&"Laboratory Mode"));
        assert!(texts.contains(&"Plate I"));
        assert!(texts.contains(&"Purkinje cell"));

        let dots = scene
            .elements()
            .iter()
            .filter(|element| matches!(element, Element::Marker { .. }))
            .count();
        assert!(dots > WEB_NODES.len());
    }

    #[test]
    fn test_elements_inside_canvas() {
        let scene = Laboratory.compose();
        let canvas = scene.bounds();
        for element in scene.elements() {
            if let Element::Polyline { points, .. } = element {
                assert!(points.iter().all(|site| canvas.contains(site)));
            }
        }
    }
}
