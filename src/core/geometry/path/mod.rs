use super::site::Site;

pub mod bezier;
pub mod handle;
pub mod spline;

/// Trait for curves that can be flattened into a polyline.
pub trait SampledPath {
    /// Sample the curve at `sample_num` evenly spaced parameters.
    ///
    /// The first and last samples are exactly the endpoints of the curve.
    fn sample(&self, sample_num: usize) -> Vec<Site>;

    /// Get the endpoints of the curve.
    fn endpoints(&self) -> (Site, Site);
}

/// Evenly spaced parameters over `[0, 1]`, both ends included.
pub(crate) fn linspace(sample_num: usize) -> impl Iterator<Item = f64> {
    let denom = sample_num.saturating_sub(1).max(1) as f64;
    (0..sample_num).map(move |i| i as f64 / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(3).collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(1).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(linspace(0).count(), 0);
    }
}
