use super::site::Site;

/// Representation of an axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Create a rectangle from x, y (lower-left corner), width, and height.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn min(&self) -> Site {
        Site::new(self.x, self.y)
    }

    pub fn max(&self) -> Site {
        Site::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Site {
        Site::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in the order lower-left, lower-right, upper-left, upper-right.
    pub fn corners(&self) -> [Site; 4] {
        let (min, max) = (self.min(), self.max());
        [
            min,
            Site::new(max.x, min.y),
            Site::new(min.x, max.y),
            max,
        ]
    }

    /// Shrink (or grow, for negative values) the rectangle on every side.
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// Whether the site lies inside the rectangle, borders included.
    pub fn contains(&self, site: &Site) -> bool {
        site.x >= self.x
            && site.x <= self.x + self.width
            && site.y >= self.y
            && site.y <= self.y + self.height
    }
}
