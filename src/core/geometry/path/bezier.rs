use bezier_rs::{Bezier, TValue};

use crate::core::geometry::site::Site;

use super::{handle::PathBezierHandle, linspace, SampledPath};

/// Representation of a bezier curve.
///
/// This is a wrapper around the bezier-rs crate.
#[derive(Debug, Clone, PartialEq)]
pub struct PathBezier {
    curve: Bezier,
}

impl Eq for PathBezier {}

impl PathBezier {
    /// Create a new quadratic bezier curve.
    ///
    /// This function is a shortcut for `Path::new` with `PathBezierHandle::Quadratic`.
    pub fn new_quadratic(start: Site, end: Site, handle: Site) -> Self {
        Self::new(start, end, PathBezierHandle::Quadratic(handle))
    }

    /// Create a new bezier curve.
    pub fn new(start: Site, end: Site, handles: PathBezierHandle) -> Self {
        match handles {
            PathBezierHandle::Linear => Self {
                curve: Bezier::from_linear_coordinates(start.x, start.y, end.x, end.y),
            },
            PathBezierHandle::Quadratic(handle) => Self {
                curve: Bezier::from_quadratic_coordinates(
                    start.x, start.y, handle.x, handle.y, end.x, end.y,
                ),
            },
        }
    }

    /// Create a quadratic arch between two sites whose handle sits above the
    /// chord midpoint by `lift`.
    pub fn new_arch(start: Site, end: Site, lift: f64) -> Self {
        let handle = start.midpoint(&end).offset(0.0, lift);
        Self::new_quadratic(start, end, handle)
    }

    /// Get the handle of the bezier curve.
    pub fn get_handle(&self) -> PathBezierHandle {
        let points = self
            .curve
            .get_points()
            .map(|point| Site::new(point.x, point.y))
            .collect::<Vec<Site>>();
        match points.len() {
            3 => PathBezierHandle::Quadratic(points[1]),
            _ => PathBezierHandle::Linear,
        }
    }

    /// Evaluate the curve at the parametric position `t` in `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> Site {
        let point = self.curve.evaluate(TValue::Parametric(t.clamp(0.0, 1.0)));
        Site::new(point.x, point.y)
    }
}

impl SampledPath for PathBezier {
    fn sample(&self, sample_num: usize) -> Vec<Site> {
        let (start, end) = self.endpoints();
        if sample_num < 2 {
            return vec![start, end];
        }
        let mut samples = linspace(sample_num)
            .map(|t| self.evaluate(t))
            .collect::<Vec<_>>();
        // pin the endpoints so that chained curves share them exactly
        samples[0] = start;
        samples[sample_num - 1] = end;
        samples
    }

    fn endpoints(&self) -> (Site, Site) {
        (
            Site::new(self.curve.start.x, self.curve.start.y),
            Site::new(self.curve.end.x, self.curve.end.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        let start = Site::new(0.3, 0.7);
        let end = Site::new(2.1, -1.9);
        let curve = PathBezier::new_quadratic(start, end, Site::new(1.0, 1.0));
        let samples = curve.sample(20);
        assert_eq!(samples.len(), 20);
        assert_eq!(samples[0], start);
        assert_eq!(samples[19], end);
    }

    #[test]
    fn test_quadratic_midpoint() {
        // B(0.5) = 0.25 * p0 + 0.5 * p1 + 0.25 * p2
        let curve = PathBezier::new_quadratic(
            Site::new(0.0, 0.0),
            Site::new(2.0, 0.0),
            Site::new(1.0, 2.0),
        );
        let mid = curve.evaluate(0.5);
        assert!(mid.distance(&Site::new(1.0, 1.0)) < 1e-9);
    }

    #[test]
    fn test_arch() {
        let curve = PathBezier::new_arch(Site::new(7.0, 5.0), Site::new(9.0, 6.0), 0.25);
        match curve.get_handle() {
            PathBezierHandle::Quadratic(handle) => {
                assert!(handle.distance(&Site::new(8.0, 5.75)) < 1e-12)
            }
            handle => panic!("unexpected handle {:?}", handle),
        }
    }
}
