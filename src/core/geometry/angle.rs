/// Provides calculation of angles.
#[derive(Debug, Clone, Copy)]
pub struct Angle(f64);

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Angle {}

impl Angle {
    /// Create an angle from the radian.
    pub fn new(radian: f64) -> Self {
        Self(radian).normalize()
    }

    /// Get the radian.
    pub fn radian(&self) -> f64 {
        self.0
    }

    /// Normalize to the range of (-PI, PI].
    fn normalize(&self) -> Self {
        let radian = self.0.rem_euclid(2.0 * std::f64::consts::PI);
        let radian = if radian > std::f64::consts::PI {
            radian - 2.0 * std::f64::consts::PI
        } else {
            radian
        };
        Self(radian)
    }

    /// Rotate by the radian.
    pub fn rotated(&self, radian: f64) -> Self {
        Self::new(self.0 + radian)
    }

    /// Rotate by a quarter turn, counterclockwise when `side` is positive.
    pub fn perpendicular(&self, side: f64) -> Self {
        self.rotated(side.signum() * std::f64::consts::FRAC_PI_2)
    }

    /// Create an iterator of `step_num` angles evenly spaced over a full turn,
    /// starting at zero and excluding the closing angle.
    pub fn iter_full_turn(step_num: usize) -> AngleIter {
        AngleIter {
            rad_from: 0.0,
            rad_to: 2.0 * std::f64::consts::PI,
            step_num,
            step_current: 0,
        }
    }
}

/// An iterator of angles.
pub struct AngleIter {
    rad_from: f64,
    rad_to: f64,
    step_num: usize,
    step_current: usize,
}

impl Iterator for AngleIter {
    type Item = Angle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step_current < self.step_num {
            let angle = self.rad_from
                + (self.rad_to - self.rad_from) * (self.step_current as f64)
                    / (self.step_num as f64);
            self.step_current += 1;
            Some(Angle::new(angle))
        } else {
            None
        }
    }
}
