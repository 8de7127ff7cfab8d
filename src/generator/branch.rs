use rand::rngs::StdRng;

use crate::core::{
    geometry::{
        angle::Angle,
        path::{bezier::PathBezier, spline::smooth_curve, SampledPath},
        site::Site,
    },
    random::{node_seed, RandomF64, RandomF64Provider},
    Depth,
};

/// Lower bound of the child-to-parent length ratio.
pub const LENGTH_FACTOR_FLOOR: f64 = 0.5;
/// Upper bound of the child-to-parent length ratio.
pub const LENGTH_FACTOR_CEIL: f64 = 0.75;
/// Maximum number of children spawned by one node.
pub const MAX_CHILDREN: usize = 3;

/// How the curvature of a segment is introduced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveStyle {
    /// Quadratic bezier whose handle is the chord midpoint jittered by up to
    /// `jitter` on each axis.
    Bezier { jitter: f64 },
    /// Natural cubic spline through a midpoint found by walking half the
    /// length along the direction rotated by up to `bend` radians.
    Spline { bend: f64 },
}

/// Where the randomness of each node comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    /// Every node reseeds from its start site and depth (plus `salt`).
    Spatial { salt: u64 },
    /// One generator is seeded once and threaded through the recursion.
    Fixed(u64),
}

/// Parameters of perpendicular spine ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpineParams {
    /// Spines only appear on segments deeper than this.
    pub min_depth: usize,
    pub probability: f64,
    pub count_min: usize,
    pub count_max: usize,
    pub length: f64,
    pub width: f64,
    pub opacity: f64,
}

impl Default for SpineParams {
    fn default() -> Self {
        Self {
            min_depth: 1,
            probability: 0.6,
            count_min: 2,
            count_max: 3,
            length: 0.04,
            width: 0.3,
            opacity: 0.5,
        }
    }
}

/// Parameters of a branch generator.
///
/// The defaults describe a dendrite: spline curvature, spatial seeding and
/// spines on deeper segments.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchParams {
    pub max_depth: usize,
    pub min_length: f64,
    pub base_width: f64,
    pub width_decay: f64,
    pub opacity: f64,
    pub samples: usize,
    pub curve: CurveStyle,
    pub children_min: usize,
    pub children_max: usize,
    pub spread: f64,
    pub length_factor_min: f64,
    pub length_factor_max: f64,
    pub seed: SeedStrategy,
    pub spines: Option<SpineParams>,
}

impl Default for BranchParams {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_length: 0.08,
            base_width: 1.2,
            width_decay: 0.7,
            opacity: 0.85,
            samples: 30,
            curve: CurveStyle::Spline { bend: 0.3 },
            children_min: 1,
            children_max: 2,
            spread: 0.7,
            length_factor_min: LENGTH_FACTOR_FLOOR,
            length_factor_max: LENGTH_FACTOR_CEIL,
            seed: SeedStrategy::Spatial { salt: 0 },
            spines: Some(SpineParams::default()),
        }
    }
}

impl BranchParams {
    pub fn set_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn set_min_length(mut self, min_length: f64) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn set_base_width(mut self, base_width: f64) -> Self {
        self.base_width = base_width;
        self
    }

    pub fn set_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn set_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn set_curve(mut self, curve: CurveStyle) -> Self {
        self.curve = curve;
        self
    }

    /// Set the range of the number of children; clamped into `1..=3`.
    pub fn set_children(mut self, min: usize, max: usize) -> Self {
        self.children_min = min.clamp(1, MAX_CHILDREN);
        self.children_max = max.clamp(self.children_min, MAX_CHILDREN);
        self
    }

    pub fn set_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Set the range of the child length ratio; clamped into `[0.5, 0.75]`.
    pub fn set_length_factor(mut self, min: f64, max: f64) -> Self {
        self.length_factor_min = min.clamp(LENGTH_FACTOR_FLOOR, LENGTH_FACTOR_CEIL);
        self.length_factor_max = max.clamp(self.length_factor_min, LENGTH_FACTOR_CEIL);
        self
    }

    pub fn set_seed(mut self, seed: SeedStrategy) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_spines(mut self, spines: Option<SpineParams>) -> Self {
        self.spines = spines;
        self
    }

    /// Width of a segment at the depth.
    pub fn width_at(&self, depth: Depth) -> f64 {
        self.base_width * self.width_decay.powi(depth.as_num() as i32)
    }

    fn children_range(&self) -> (usize, usize) {
        let min = self.children_min.clamp(1, MAX_CHILDREN);
        (min, self.children_max.clamp(min, MAX_CHILDREN))
    }

    fn length_factor_range(&self) -> (f64, f64) {
        let min = self
            .length_factor_min
            .clamp(LENGTH_FACTOR_FLOOR, LENGTH_FACTOR_CEIL);
        (min, self.length_factor_max.clamp(min, LENGTH_FACTOR_CEIL))
    }
}

/// A short perpendicular tick along a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spine {
    pub from: Site,
    pub to: Site,
    pub width: f64,
    pub opacity: f64,
}

/// One smoothed segment of a branch tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSegment {
    pub points: Vec<Site>,
    pub depth: Depth,
    pub angle: Angle,
    pub length: f64,
    pub width: f64,
    pub opacity: f64,
    /// Index of the parent segment in the tree, None for roots.
    pub parent: Option<usize>,
    pub spines: Vec<Spine>,
}

impl BranchSegment {
    pub fn first(&self) -> Option<Site> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Site> {
        self.points.last().copied()
    }
}

/// Segments of a branch tree in depth-first pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchTree {
    segments: Vec<BranchSegment>,
}

impl BranchTree {
    pub fn segments(&self) -> &[BranchSegment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &BranchSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Deepest depth reached, or None for an empty tree.
    pub fn max_depth(&self) -> Option<Depth> {
        self.segments.iter().map(|segment| segment.depth).max()
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = (usize, &BranchSegment)> {
        self.segments
            .iter()
            .enumerate()
            .filter(move |(_, segment)| segment.parent == Some(index))
    }

    pub fn roots(&self) -> impl Iterator<Item = &BranchSegment> {
        self.segments
            .iter()
            .filter(|segment| segment.parent.is_none())
    }

    /// Append another tree, shifting its parent indices.
    pub fn merge(&mut self, other: BranchTree) {
        let offset = self.segments.len();
        self.segments
            .extend(other.segments.into_iter().map(|mut segment| {
                segment.parent = segment.parent.map(|parent| parent + offset);
                segment
            }));
    }
}

impl IntoIterator for BranchTree {
    type Item = BranchSegment;
    type IntoIter = std::vec::IntoIter<BranchSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Ephemeral recursion state.
#[derive(Debug, Clone, Copy)]
struct GrowthNode {
    start: Site,
    angle: f64,
    length: f64,
    depth: Depth,
}

/// Recursive generator of branching curve structures.
#[derive(Debug, Clone, Default)]
pub struct BranchGenerator {
    params: BranchParams,
}

impl BranchGenerator {
    pub fn new(params: BranchParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BranchParams {
        &self.params
    }

    /// A fresh generator seeded from the seed strategy.
    ///
    /// Passing one such generator to several [`Self::generate_with`] calls
    /// threads a single fixed sequence through all of them.
    pub fn seeded_rng(&self) -> RandomF64<StdRng> {
        match self.params.seed {
            SeedStrategy::Fixed(seed) => RandomF64::new(seed),
            SeedStrategy::Spatial { salt } => RandomF64::new(salt),
        }
    }

    /// Generate a tree growing from `start` along `angle` (radians).
    pub fn generate(&self, start: Site, angle: f64, length: f64, depth: usize) -> BranchTree {
        self.generate_with(start, angle, length, depth, &mut self.seeded_rng())
    }

    /// Generate a tree drawing shared randomness from `rnd`.
    ///
    /// With [`SeedStrategy::Spatial`] every node reseeds itself and `rnd` is
    /// left untouched.
    pub fn generate_with(
        &self,
        start: Site,
        angle: f64,
        length: f64,
        depth: usize,
        rnd: &mut dyn RandomF64Provider,
    ) -> BranchTree {
        let mut segments = Vec::new();
        let root = GrowthNode {
            start,
            angle,
            length,
            depth: Depth::new(depth),
        };
        self.grow(root, None, rnd, &mut segments);
        log::debug!(
            "generated {} branch segments from ({:.3}, {:.3})",
            segments.len(),
            start.x,
            start.y
        );
        BranchTree { segments }
    }

    fn is_terminal(&self, node: &GrowthNode) -> bool {
        node.depth.as_num() > self.params.max_depth
            || !node.length.is_finite()
            || node.length < self.params.min_length
    }

    fn grow(
        &self,
        node: GrowthNode,
        parent: Option<usize>,
        shared: &mut dyn RandomF64Provider,
        segments: &mut Vec<BranchSegment>,
    ) {
        if self.is_terminal(&node) {
            return;
        }

        let mut local;
        let rnd: &mut dyn RandomF64Provider = match self.params.seed {
            SeedStrategy::Spatial { salt } => {
                local = RandomF64::new(
                    node_seed(node.start, node.depth.as_num()).wrapping_add(salt),
                );
                &mut local
            }
            SeedStrategy::Fixed(_) => &mut *shared,
        };

        let angle = Angle::new(node.angle);
        let end = node.start.extend(angle, node.length);
        let points = self.curve_points(&node, end, rnd);
        let spines = self.spines(&node, &points, rnd);

        let children = if node.depth.as_num() < self.params.max_depth {
            let (children_min, children_max) = self.params.children_range();
            let (factor_min, factor_max) = self.params.length_factor_range();
            (0..rnd.gen_count(children_min, children_max))
                .map(|_| GrowthNode {
                    start: end,
                    angle: node.angle + rnd.gen_uniform(-self.params.spread, self.params.spread),
                    length: node.length * rnd.gen_uniform(factor_min, factor_max),
                    depth: node.depth.incremented(),
                })
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        let index = segments.len();
        segments.push(BranchSegment {
            points,
            depth: node.depth,
            angle,
            length: node.length,
            width: self.params.width_at(node.depth),
            opacity: self.params.opacity,
            parent,
            spines,
        });

        for child in children {
            self.grow(child, Some(index), shared, segments);
        }
    }

    fn curve_points(
        &self,
        node: &GrowthNode,
        end: Site,
        rnd: &mut dyn RandomF64Provider,
    ) -> Vec<Site> {
        let samples = self.params.samples.max(2);
        match self.params.curve {
            CurveStyle::Bezier { jitter } => {
                let handle = node.start.midpoint(&end).offset(
                    rnd.gen_uniform(-jitter, jitter),
                    rnd.gen_uniform(-jitter, jitter),
                );
                PathBezier::new_quadratic(node.start, end, handle).sample(samples)
            }
            CurveStyle::Spline { bend } => {
                let bent = Angle::new(node.angle + rnd.gen_uniform(-bend, bend));
                let mid = node.start.extend(bent, node.length * 0.5);
                smooth_curve(&[node.start, mid, end], samples)
            }
        }
    }

    fn spines(
        &self,
        node: &GrowthNode,
        points: &[Site],
        rnd: &mut dyn RandomF64Provider,
    ) -> Vec<Spine> {
        let Some(params) = self.params.spines else {
            return Vec::new();
        };
        if node.depth.as_num() <= params.min_depth
            || points.is_empty()
            || !rnd.gen_bool(params.probability)
        {
            return Vec::new();
        }
        (0..rnd.gen_count(params.count_min, params.count_max))
            .map(|_| {
                let t = rnd.gen_uniform(0.3, 0.7);
                let from = points[(t * (points.len() - 1) as f64) as usize];
                let direction = Angle::new(node.angle).perpendicular(rnd.gen_sign());
                Spine {
                    from,
                    to: from.extend(direction, params.length),
                    width: params.width,
                    opacity: params.opacity,
                }
            })
            .collect()
    }
}

/// Generate a dendrite with default parameters.
pub fn generate_branch(
    start: Site,
    angle: f64,
    length: f64,
    depth: usize,
    max_depth: usize,
    base_width: f64,
) -> BranchTree {
    BranchGenerator::new(
        BranchParams::default()
            .set_max_depth(max_depth)
            .set_base_width(base_width),
    )
    .generate(start, angle, length, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blended_params() -> BranchParams {
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
            .set_seed(SeedStrategy::Fixed(123))
            .set_spines(None)
    }

    #[test]
    fn test_example_scenario() {
        let tree = generate_branch(
            Site::new(0.0, 0.0),
            std::f64::consts::FRAC_PI_2,
            0.6,
            0,
            3,
            1.0,
        );
        assert!(!tree.is_empty());
        for segment in tree.iter() {
            assert!(segment.depth.as_num() <= 3);
            assert!(segment.length >= 0.08);
        }
    }

    #[test]
    fn test_terminates_immediately() {
        let generator = BranchGenerator::default();
        assert!(generator
            .generate(Site::new(1.0, 1.0), 0.0, 0.0, 0)
            .is_empty());
        assert!(generator
            .generate(Site::new(1.0, 1.0), 0.0, 0.5, 5)
            .is_empty());
        assert!(generator
            .generate(Site::new(1.0, 1.0), 0.0, f64::NAN, 0)
            .is_empty());
    }

    #[test]
    fn test_root_segment() {
        let tree = BranchGenerator::new(blended_params()).generate(
            Site::new(12.0, 5.5),
            std::f64::consts::FRAC_PI_2,
            1.08,
            0,
        );
        let root = &tree.segments()[0];
        assert_eq!(root.parent, None);
        assert_eq!(root.points.len(), 20);
        assert_eq!(root.first(), Some(Site::new(12.0, 5.5)));
        let end = root.last().unwrap();
        assert!(end.distance(&Site::new(12.0, 6.58)) < 1e-9);
        assert_eq!(root.width, 1.0);
        assert_eq!(root.opacity, 0.7);
    }

    #[test]
    fn test_width_decay() {
        let params = BranchParams::default().set_base_width(1.2);
        assert_eq!(params.width_at(Depth::new(0)), 1.2);
        assert!((params.width_at(Depth::new(2)) - 1.2 * 0.49).abs() < 1e-12);

        let tree = BranchGenerator::new(params.clone()).generate(
            Site::new(2.5, 5.2),
            std::f64::consts::FRAC_PI_2,
            0.7,
            0,
        );
        for segment in tree.iter() {
            assert_eq!(segment.width, params.width_at(segment.depth));
        }
    }

    #[test]
    fn test_connectivity_and_decay() {
        let tree = BranchGenerator::new(BranchParams::default().set_max_depth(5)).generate(
            Site::new(2.5, 5.2),
            std::f64::consts::FRAC_PI_2 - 0.3,
            0.7,
            0,
        );
        assert!(tree.len() > 1);
        for segment in tree.iter() {
            if let Some(parent) = segment.parent {
                let parent = &tree.segments()[parent];
                assert_eq!(segment.first(), parent.last());
                assert_eq!(segment.depth, parent.depth.incremented());
                assert!(segment.length <= parent.length * LENGTH_FACTOR_CEIL + 1e-12);
                assert!(segment.length >= parent.length * LENGTH_FACTOR_FLOOR - 1e-12);
            }
        }
    }

    #[test]
    fn test_children_bounded() {
        let tree = BranchGenerator::new(BranchParams::default().set_children(3, 3)).generate(
            Site::new(5.0, 5.0),
            0.0,
            1.0,
            0,
        );
        for index in 0..tree.len() {
            assert!(tree.children_of(index).count() <= MAX_CHILDREN);
        }
    }

    #[test]
    fn test_spines_only_on_deep_segments() {
        let tree = BranchGenerator::new(BranchParams::default().set_max_depth(5)).generate(
            Site::new(2.5, 5.2),
            std::f64::consts::FRAC_PI_2,
            0.7,
            0,
        );
        for segment in tree.iter() {
            if segment.depth.as_num() <= 1 {
                assert!(segment.spines.is_empty());
            }
            assert!(segment.spines.len() <= 3);
            for spine in &segment.spines {
                assert!((spine.from.distance(&spine.to) - 0.04).abs() < 1e-9);
                assert!(segment.points.contains(&spine.from));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        for params in [BranchParams::default(), blended_params()] {
            let generator = BranchGenerator::new(params);
            let a = generator.generate(Site::new(3.0, 4.0), 1.0, 0.8, 0);
            let b = generator.generate(Site::new(3.0, 4.0), 1.0, 0.8, 0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_shared_randomness_advances() {
        let generator = BranchGenerator::new(blended_params());
        let mut rnd = generator.seeded_rng();
        let up = generator.generate_with(
            Site::new(12.0, 5.5),
            std::f64::consts::FRAC_PI_2,
            1.08,
            0,
            &mut rnd,
        );
        let down = generator.generate_with(
            Site::new(12.0, 5.5),
            -std::f64::consts::FRAC_PI_2,
            0.72,
            1,
            &mut rnd,
        );
        assert!(!up.is_empty());
        assert!(!down.is_empty());
        assert_eq!(
            up,
            generator.generate(Site::new(12.0, 5.5), std::f64::consts::FRAC_PI_2, 1.08, 0)
        );
        assert!(down.iter().all(|segment| segment.depth.as_num() >= 1));

        let mut merged = up.clone();
        merged.merge(down.clone());
        assert_eq!(merged.len(), up.len() + down.len());
        assert_eq!(merged.roots().count(), 2);
        for segment in merged.iter() {
            if let Some(parent) = segment.parent {
                assert_eq!(segment.first(), merged.segments()[parent].last());
            }
        }
    }

    #[test]
    fn test_param_clamping() {
        let params = BranchParams::default()
            .set_children(0, 9)
            .set_length_factor(0.1, 0.95);
        assert_eq!((params.children_min, params.children_max), (1, 3));
        assert_eq!(
            (params.length_factor_min, params.length_factor_max),
            (0.5, 0.75)
        );
    }
}
