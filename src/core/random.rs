use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use super::geometry::site::Site;

/// Provider of random values.
///
/// `gen_f64` yields values uniformly distributed in `[0, 1)`.
pub trait RandomF64Provider {
    fn gen_f64(&mut self) -> f64;

    /// Draw from a normal distribution.
    fn gen_normal(&mut self, mean: f64, std_dev: f64) -> f64;

    /// Draw from an exponential distribution with the given mean.
    fn gen_exponential(&mut self, mean: f64) -> f64;

    /// Draw uniformly from `[low, high)`.
    fn gen_uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.gen_f64()
    }

    /// Draw an integer uniformly from `low..=high`.
    fn gen_count(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as f64;
        low + ((self.gen_f64() * span) as usize).min(high - low)
    }

    /// Return true with the given probability.
    fn gen_bool(&mut self, probability: f64) -> bool {
        self.gen_f64() < probability
    }

    /// Return `1.0` or `-1.0` with equal probability.
    fn gen_sign(&mut self) -> f64 {
        if self.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }
}

/// Seeded pseudo-random provider.
pub struct RandomF64<R> {
    rng: R,
}

impl<R: Rng> RandomF64Provider for RandomF64<R> {
    fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    fn gen_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev.abs()) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    fn gen_exponential(&mut self, mean: f64) -> f64 {
        if mean <= 0.0 {
            return 0.0;
        }
        match Exp::new(1.0 / mean) {
            Ok(exp) => exp.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }
}

impl RandomF64<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Derive a seed from weighted coordinates.
///
/// The weighted sum is truncated towards zero, so nearby inputs within the
/// same integer bucket share a seed.
pub fn spatial_seed(weighted: &[(f64, f64)]) -> u64 {
    let sum: f64 = weighted.iter().map(|(value, weight)| value * weight).sum();
    (sum.trunc() as i64) as u64
}

/// Seed for a branch node starting at `site` at the given depth.
pub fn node_seed(site: Site, depth: usize) -> u64 {
    spatial_seed(&[(site.x, 1000.0), (site.y, 100.0), (depth as f64, 10.0)])
}

/// Seed for a filament between two sites.
pub fn filament_seed(start: Site, end: Site) -> u64 {
    spatial_seed(&[(start.x, 100.0), (end.y, 50.0)])
}

/// Seed for a dot cluster centered at `site`.
pub fn cluster_seed(site: Site) -> u64 {
    spatial_seed(&[(site.x, 1000.0), (site.y, 100.0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomF64::new(7);
        let mut b = RandomF64::new(7);
        for _ in 0..16 {
            assert_eq!(a.gen_f64(), b.gen_f64());
        }
    }

    #[test]
    fn test_ranges() {
        let mut rnd = RandomF64::new(0);
        for _ in 0..1000 {
            let v = rnd.gen_uniform(-0.3, 0.3);
            assert!((-0.3..0.3).contains(&v));
            let n = rnd.gen_count(1, 3);
            assert!((1..=3).contains(&n));
            assert!(rnd.gen_exponential(0.05) >= 0.0);
            let s = rnd.gen_sign();
            assert!(s == 1.0 || s == -1.0);
        }
        assert_eq!(rnd.gen_count(4, 2), 4);
    }

    #[test]
    fn test_spatial_seeds() {
        assert_eq!(node_seed(Site::new(2.5, 5.2), 0), 3020);
        assert_eq!(node_seed(Site::new(2.5, 5.2), 2), 3040);
        assert_eq!(filament_seed(Site::new(6.0, 6.0), Site::new(7.5, 5.0)), 850);
        assert_eq!(cluster_seed(Site::new(6.0, 6.0)), 6600);
    }
}
