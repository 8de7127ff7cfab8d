use glam::DVec2;

use super::angle::Angle;

/// Representation of a 2D site in canvas units.
#[derive(Debug, Copy, Clone)]
pub struct Site {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Site {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Site {}

impl PartialOrd for Site {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Site {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let ordering = self.x.total_cmp(&other.x);
        if ordering == std::cmp::Ordering::Equal {
            self.y.total_cmp(&other.y)
        } else {
            ordering
        }
    }
}

impl From<DVec2> for Site {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Site> for DVec2 {
    fn from(site: Site) -> Self {
        DVec2::new(site.x, site.y)
    }
}

impl From<(f64, f64)> for Site {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Site {
    /// Create a site from x and y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the euclidean distance to the other site.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Calculate the squared euclidean distance to the other site.
    pub fn distance_2(&self, other: &Self) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Calculate the site moved by the angle and distance.
    pub fn extend(&self, angle: Angle, distance: f64) -> Self {
        let x = self.x + angle.radian().cos() * distance;
        let y = self.y + angle.radian().sin() * distance;
        Self::new(x, y)
    }

    /// Calculate the site moved by the offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation towards the other site (`t = 0` is `self`).
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Calculate the midpoint between two sites.
    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// Calculate the angle to the other site.
    pub fn get_angle(&self, other: &Self) -> Angle {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return Angle::new(0.0);
        }
        Angle::new(dy.atan2(dx))
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
