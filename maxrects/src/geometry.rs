/// An axis-aligned rectangle inside of a bin.
///
/// The bin's origin is `(0, 0)`. Whether `y` grows up or down is up to the
/// caller, the packer only needs it to be consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn min(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> (f64, f64) {
        (self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Tells whether the two rectangles share a region of positive area.
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (self_max_x, self_max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();

        self.x < other_max_x
            && other.x < self_max_x
            && self.y < other_max_y
            && other.y < self_max_y
    }

    /// Tells whether `other` lies entirely within `self`, edges included.
    pub fn contains(&self, other: &Rect) -> bool {
        let (self_max_x, self_max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();

        other.x >= self.x
            && other.y >= self.y
            && other_max_x <= self_max_x
            && other_max_y <= self_max_y
    }

    /// Splits `self` around `used`, returning the maximal pieces of `self`
    /// that `used` does not cover: left, right, bottom and top, in that order.
    ///
    /// Pieces span the whole of `self` along one axis, so they overlap each
    /// other. Pieces with no area are skipped.
    pub(crate) fn split_around(&self, used: &Rect) -> impl Iterator<Item = Rect> {
        let (self_max_x, self_max_y) = self.max();
        let (used_max_x, used_max_y) = used.max();

        let left = if used.x > self.x {
            Some(Rect::new(self.x, self.y, used.x - self.x, self.height))
        } else {
            None
        };

        let right = if used_max_x < self_max_x {
            Some(Rect::new(
                used_max_x,
                self.y,
                self_max_x - used_max_x,
                self.height,
            ))
        } else {
            None
        };

        let bottom = if used.y > self.y {
            Some(Rect::new(self.x, self.y, self.width, used.y - self.y))
        } else {
            None
        };

        let top = if used_max_y < self_max_y {
            Some(Rect::new(
                self.x,
                used_max_y,
                self.width,
                self_max_y - used_max_y,
            ))
        } else {
            None
        };

        left.into_iter()
            .chain(right)
            .chain(bottom)
            .chain(top)
            .filter(|piece| piece.width > 0.0 && piece.height > 0.0)
    }
}

/// Length of the overlap between the intervals `[a_start, a_end]` and
/// `[b_start, b_end]`, or zero if they are disjoint.
pub(crate) fn common_interval_length(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    if a_end < b_start || b_end < a_start {
        return 0.0;
    }

    a_end.min(b_end) - a_start.max(b_start)
}
