use crate::core::geometry::site::Site;

use super::{linspace, SampledPath};

/// Natural cubic spline over uniformly spaced knots on `[0, 1]`.
///
/// The second derivative vanishes at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    values: Vec<f64>,
    second_derivatives: Vec<f64>,
    step: f64,
}

impl NaturalCubicSpline {
    /// Fit a spline through the values.
    ///
    /// Return None if there are fewer than 3 values or any of them is not finite.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.len() < 3 || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let step = 1.0 / (values.len() - 1) as f64;

        // M[i-1] + 4 M[i] + M[i+1] = 6 / h^2 (y[i+1] - 2 y[i] + y[i-1]), M[0] = M[n-1] = 0
        let rhs = values
            .windows(3)
            .map(|w| 6.0 * (w[2] - 2.0 * w[1] + w[0]) / (step * step))
            .collect::<Vec<_>>();
        let interior = solve_tridiagonal(1.0, 4.0, 1.0, &rhs)?;

        let mut second_derivatives = Vec::with_capacity(values.len());
        second_derivatives.push(0.0);
        second_derivatives.extend(interior);
        second_derivatives.push(0.0);

        Some(Self {
            values: values.to_vec(),
            second_derivatives,
            step,
        })
    }

    /// Evaluate the spline at `t`, clamped into `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let h = self.step;
        let last = self.values.len() - 1;
        let t = t.clamp(0.0, 1.0);
        let i = ((t / h).floor() as usize).min(last - 1);

        let (t0, t1) = (i as f64 * h, (i + 1) as f64 * h);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.second_derivatives[i], self.second_derivatives[i + 1]);
        let (a, b) = (t1 - t, t - t0);

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 - m0 * h * h / 6.0) * a / h
            + (y1 - m1 * h * h / 6.0) * b / h
    }
}

/// Solve a constant-coefficient tridiagonal system with the Thomas algorithm.
fn solve_tridiagonal(lower: f64, diag: f64, upper: f64, rhs: &[f64]) -> Option<Vec<f64>> {
    let n = rhs.len();
    if n == 0 {
        return Some(Vec::new());
    }
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    c_prime[0] = upper / diag;
    d_prime[0] = rhs[0] / diag;
    for i in 1..n {
        let denom = diag - lower * c_prime[i - 1];
        if denom == 0.0 {
            return None;
        }
        c_prime[i] = upper / denom;
        d_prime[i] = (rhs[i] - lower * d_prime[i - 1]) / denom;
    }

    let mut solution = vec![0.0; n];
    solution[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        solution[i] = d_prime[i] - c_prime[i] * solution[i + 1];
    }
    Some(solution)
}

/// A planar curve interpolating control sites with independent natural cubic
/// splines for each coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSpline {
    x: NaturalCubicSpline,
    y: NaturalCubicSpline,
    start: Site,
    end: Site,
}

impl PathSpline {
    /// Create a spline through the control sites, or None if it cannot be fitted.
    pub fn new(controls: &[Site]) -> Option<Self> {
        let xs = controls.iter().map(|site| site.x).collect::<Vec<_>>();
        let ys = controls.iter().map(|site| site.y).collect::<Vec<_>>();
        Some(Self {
            x: NaturalCubicSpline::fit(&xs)?,
            y: NaturalCubicSpline::fit(&ys)?,
            start: *controls.first()?,
            end: *controls.last()?,
        })
    }

    pub fn evaluate(&self, t: f64) -> Site {
        Site::new(self.x.evaluate(t), self.y.evaluate(t))
    }
}

impl SampledPath for PathSpline {
    fn sample(&self, sample_num: usize) -> Vec<Site> {
        if sample_num < 2 {
            return vec![self.start, self.end];
        }
        let mut samples = linspace(sample_num)
            .map(|t| self.evaluate(t))
            .collect::<Vec<_>>();
        samples[0] = self.start;
        samples[sample_num - 1] = self.end;
        samples
    }

    fn endpoints(&self) -> (Site, Site) {
        (self.start, self.end)
    }
}

/// Smooth a curve through the control sites.
///
/// With fewer than 3 sites, or when the fit produces non-finite values, the
/// sites are returned unchanged.
pub fn smooth_curve(controls: &[Site], sample_num: usize) -> Vec<Site> {
    let Some(spline) = PathSpline::new(controls) else {
        return controls.to_vec();
    };
    let samples = spline.sample(sample_num);
    if samples.iter().all(Site::is_finite) {
        samples
    } else {
        log::debug!("spline produced non-finite samples, using control sites");
        controls.to_vec()
    }
}
