use crate::core::{
    geometry::{angle::Angle, site::Site},
    random::{cluster_seed, RandomF64, RandomF64Provider},
};

use super::Dot;

/// Generate a galaxy cluster: dots concentrated around `center` with
/// exponentially distributed radii, fading in size towards the rim.
pub fn cluster(center: Site, size: f64) -> Vec<Dot> {
    let mut rnd = RandomF64::new(cluster_seed(center));
    let count = (40.0 * size).max(0.0) as usize;
    (0..count)
        .map(|_| {
            let radius = rnd.gen_exponential(size * 0.4);
            let theta = rnd.gen_uniform(0.0, 2.0 * std::f64::consts::PI);
            let dot_size = rnd.gen_uniform(0.3, 1.2) * (1.0 - radius / (size * 2.0));
            Dot {
                at: center.extend(Angle::new(theta), radius),
                size: dot_size.max(0.2),
                opacity: 0.6,
            }
        })
        .collect()
}

/// Stars scattered in a disc with a few connecting links.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constellation {
    pub stars: Vec<Dot>,
    /// Pairs of indices into `stars`.
    pub links: Vec<(usize, usize)>,
}

/// Generate a constellation of `count` stars inside a disc of `radius`.
///
/// Consecutive pairs among the first eight stars are linked.
pub fn constellation(center: Site, radius: f64, count: usize, seed: u64) -> Constellation {
    let mut rnd = RandomF64::new(seed);
    let stars = (0..count)
        .map(|_| {
            let angle = Angle::new(rnd.gen_uniform(0.0, 2.0 * std::f64::consts::PI));
            let distance = rnd.gen_uniform(0.0, radius * 0.85);
            Dot {
                at: center.extend(angle, distance),
                size: rnd.gen_uniform(2.0, 5.0),
                opacity: 0.8,
            }
        })
        .collect::<Vec<_>>();
    let links = (0..8.min(stars.len().saturating_sub(1)))
        .step_by(2)
        .map(|i| (i, i + 1))
        .collect();
    Constellation { stars, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_count_and_sizes() {
        let dots = cluster(Site::new(6.0, 6.0), 0.125);
        assert_eq!(dots.len(), 5);
        for dot in &dots {
            assert!(dot.size >= 0.2);
            assert!(dot.size < 1.2);
        }
        assert_eq!(dots, cluster(Site::new(6.0, 6.0), 0.125));
    }

    #[test]
    fn test_cluster_empty() {
        assert!(cluster(Site::new(1.0, 1.0), 0.0).is_empty());
    }

    #[test]
    fn test_constellation() {
        let center = Site::new(11.5, 5.5);
        let constellation = constellation(center, 1.2, 15, 888);
        assert_eq!(constellation.stars.len(), 15);
        assert_eq!(constellation.links, vec![(0, 1), (2, 3), (4, 5), (6, 7)]);
        for star in &constellation.stars {
            assert!(star.at.distance(&center) <= 1.2 * 0.85 + 1e-9);
            assert!((2.0..5.0).contains(&star.size));
        }
    }

    #[test]
    fn test_small_constellation_links() {
        assert!(constellation(Site::new(0.0, 0.0), 1.0, 1, 1).links.is_empty());
        assert_eq!(
            constellation(Site::new(0.0, 0.0), 1.0, 4, 1).links,
            vec![(0, 1), (2, 3)]
        );
    }
}
