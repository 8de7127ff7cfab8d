use glam::DVec2;

use crate::core::{
    geometry::{path::spline::smooth_curve, site::Site},
    random::{filament_seed, RandomF64, RandomF64Provider},
};

use super::Dot;

/// Parameters of a filament generator.
#[derive(Debug, Clone, PartialEq)]
pub struct FilamentParams {
    pub thickness: f64,
    pub samples: usize,
    pub controls_min: usize,
    pub controls_max: usize,
    /// Interior control points are placed at chord parameters drawn from this range.
    pub interior_range: (f64, f64),
    /// Maximum perpendicular displacement, as a fraction of `length * displacement_scale`.
    pub displacement: f64,
    pub displacement_scale: f64,
    pub strand_count: usize,
    pub strand_spread: f64,
    pub strand_opacity: f64,
    /// Stipple dots per unit of length and thickness.
    pub stipple_density: f64,
    pub stipple_sigma: f64,
    pub stipple_size: (f64, f64),
    pub stipple_opacity: f64,
}

impl Default for FilamentParams {
    fn default() -> Self {
        Self {
            thickness: 0.8,
            samples: 60,
            controls_min: 3,
            controls_max: 4,
            interior_range: (0.2, 0.8),
            displacement: 0.2,
            displacement_scale: 0.3,
            strand_count: 3,
            strand_spread: 0.01,
            strand_opacity: 0.5,
            stipple_density: 12.0,
            stipple_sigma: 0.015,
            stipple_size: (0.2, 0.5),
            stipple_opacity: 0.4,
        }
    }
}

impl FilamentParams {
    pub fn set_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn set_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn set_stipple_density(mut self, density: f64) -> Self {
        self.stipple_density = density;
        self
    }

    /// Number of stipple dots for a chord of the length.
    pub fn stipple_count(&self, length: f64) -> usize {
        (length * self.stipple_density * self.thickness).max(0.0) as usize
    }

    /// Perpendicular offsets of the strands, evenly spread and symmetric.
    fn strand_offsets(&self) -> Vec<f64> {
        let spread = self.strand_spread * self.thickness;
        match self.strand_count {
            0 => Vec::new(),
            1 => vec![0.0],
            n => (0..n)
                .map(|i| -spread + 2.0 * spread * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

/// One stroked pass of a filament.
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    pub points: Vec<Site>,
    pub width: f64,
    pub opacity: f64,
}

/// A curve connecting two fixed endpoints with stippled texture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filament {
    /// Smoothed center line, from start to end.
    pub path: Vec<Site>,
    pub strands: Vec<Strand>,
    pub stipples: Vec<Dot>,
}

impl Filament {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Generator of filaments between fixed endpoints.
#[derive(Debug, Clone, Default)]
pub struct FilamentGenerator {
    params: FilamentParams,
}

impl FilamentGenerator {
    pub fn new(params: FilamentParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FilamentParams {
        &self.params
    }

    /// Generate a filament seeded from its endpoints.
    pub fn generate(&self, start: Site, end: Site) -> Filament {
        let mut rnd = RandomF64::new(filament_seed(start, end));
        self.generate_with(start, end, &mut rnd)
    }

    /// Generate a filament drawing randomness from `rnd`.
    ///
    /// Coincident endpoints produce an empty filament.
    pub fn generate_with(
        &self,
        start: Site,
        end: Site,
        rnd: &mut dyn RandomF64Provider,
    ) -> Filament {
        let chord = DVec2::from(end) - DVec2::from(start);
        let length = chord.length();
        if length == 0.0 || !length.is_finite() {
            return Filament::default();
        }
        let perp = chord.perp() / length;

        let control_num = rnd.gen_count(self.params.controls_min.max(2), self.params.controls_max);
        let mut ts = vec![0.0, 1.0];
        ts.extend(
            (0..control_num.saturating_sub(2))
                .map(|_| rnd.gen_uniform(self.params.interior_range.0, self.params.interior_range.1)),
        );
        ts.sort_by(f64::total_cmp);

        // endpoints stay fixed, only interior controls are displaced
        let max_disp = self.params.displacement;
        let last = ts.len() - 1;
        let controls = ts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if i == 0 {
                    return start;
                }
                if i == last {
                    return end;
                }
                let disp =
                    rnd.gen_uniform(-max_disp, max_disp) * length * self.params.displacement_scale;
                Site::from(DVec2::from(start) + chord * *t + perp * disp)
            })
            .collect::<Vec<_>>();

        let path = smooth_curve(&controls, self.params.samples);

        let strands = self
            .params
            .strand_offsets()
            .into_iter()
            .map(|offset| Strand {
                points: path
                    .iter()
                    .map(|site| Site::from(DVec2::from(*site) + perp * offset))
                    .collect(),
                width: self.params.thickness * (1.0 - offset.abs() * 30.0),
                opacity: self.params.strand_opacity,
            })
            .collect::<Vec<_>>();

        let (size_min, size_max) = self.params.stipple_size;
        let stipples = (0..self.params.stipple_count(length))
            .map(|_| {
                let t = rnd.gen_f64();
                let anchor = path[(t * (path.len() - 1) as f64) as usize];
                let offset = rnd.gen_normal(0.0, self.params.stipple_sigma * self.params.thickness);
                Dot {
                    at: Site::from(DVec2::from(anchor) + perp * offset),
                    size: rnd.gen_uniform(size_min, size_max),
                    opacity: self.params.stipple_opacity,
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "generated filament of length {:.3} with {} stipples",
            length,
            stipples.len()
        );

        Filament {
            path,
            strands,
            stipples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_generator() -> FilamentGenerator {
        FilamentGenerator::new(FilamentParams::default().set_thickness(0.6))
    }

    #[test]
    fn test_endpoints_on_chord() {
        let start = Site::new(6.0, 6.0);
        let end = Site::new(7.5, 5.0);
        let filament = web_generator().generate(start, end);
        assert_eq!(filament.path.len(), 60);
        assert_eq!(filament.path[0], start);
        assert_eq!(filament.path[59], end);
    }

    #[test]
    fn test_strands() {
        let filament = web_generator().generate(Site::new(1.0, 1.0), Site::new(3.0, 1.0));
        assert_eq!(filament.strands.len(), 3);
        let widths = filament
            .strands
            .iter()
            .map(|strand| strand.width)
            .collect::<Vec<_>>();
        // offsets are -0.006, 0, 0.006 -> widths 0.6 * (1 - 0.18), 0.6, 0.6 * (1 - 0.18)
        assert!((widths[0] - 0.492).abs() < 1e-9);
        assert!((widths[1] - 0.6).abs() < 1e-12);
        assert!((widths[2] - 0.492).abs() < 1e-9);
        // the middle strand is the center line
        assert_eq!(filament.strands[1].points, filament.path);
    }

    #[test]
    fn test_stipple_count() {
        let start = Site::new(0.0, 0.0);
        let end = Site::new(3.0, 4.0);
        let filament = web_generator().generate(start, end);
        // floor(5 * 12 * 0.6) = 36
        assert_eq!(filament.stipples.len(), 36);
        for dot in &filament.stipples {
            assert!((0.2..0.5).contains(&dot.size));
            assert_eq!(dot.opacity, 0.4);
        }
    }

    #[test]
    fn test_degenerate_chord() {
        let site = Site::new(2.0, 2.0);
        let filament = web_generator().generate(site, site);
        assert!(filament.is_empty());
        assert!(filament.stipples.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let generator = web_generator();
        let a = generator.generate(Site::new(9.0, 6.5), Site::new(10.0, 5.0));
        let b = generator.generate(Site::new(9.0, 6.5), Site::new(10.0, 5.0));
        assert_eq!(a, b);
    }
}
