use std::{fmt, str::FromStr};

use crate::geometry::Rect;

/// The rule used to choose where a rectangle goes among all free rectangles
/// that can hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Minimize the shorter leftover side of the free rectangle, then the
    /// longer one.
    BestShortSideFit,

    /// Place the rectangle as low as possible, then as far left as possible.
    BottomLeft,

    /// Maximize the length of edges touching the bin border or rectangles
    /// that were already placed.
    ContactPoint,

    /// Minimize the longer leftover side of the free rectangle, then the
    /// shorter one.
    BestLongSideFit,

    /// Minimize the unused area of the free rectangle, then the shorter
    /// leftover side.
    BestAreaFit,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::BestShortSideFit,
        Heuristic::BottomLeft,
        Heuristic::ContactPoint,
        Heuristic::BestLongSideFit,
        Heuristic::BestAreaFit,
    ];

    fn name(self) -> &'static str {
        match self {
            Heuristic::BestShortSideFit => "best-short-side-fit",
            Heuristic::BottomLeft => "bottom-left",
            Heuristic::ContactPoint => "contact-point",
            Heuristic::BestLongSideFit => "best-long-side-fit",
            Heuristic::BestAreaFit => "best-area-fit",
        }
    }

    /// Scores putting `candidate` at the origin of `free`. `contact` computes
    /// the contact length of a candidate and is only invoked for
    /// `ContactPoint`.
    pub(crate) fn score<F>(self, free: &Rect, candidate: &Rect, contact: F) -> Score
    where
        F: FnOnce(&Rect) -> f64,
    {
        let leftover_horiz = free.width - candidate.width;
        let leftover_vert = free.height - candidate.height;
        let short_side = leftover_horiz.min(leftover_vert);
        let long_side = leftover_horiz.max(leftover_vert);

        match self {
            Heuristic::BestShortSideFit => Score::new(short_side, long_side),
            Heuristic::BestLongSideFit => Score::new(long_side, short_side),
            Heuristic::BestAreaFit => Score::new(free.area() - candidate.area(), short_side),
            Heuristic::BottomLeft => Score::new(candidate.max().1, candidate.x),

            // More contact is better, but scores are minimized.
            Heuristic::ContactPoint => Score::new(-contact(candidate), 0.0),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::BestShortSideFit
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(value: &str) -> Result<Heuristic, Self::Err> {
        Heuristic::ALL
            .iter()
            .copied()
            .find(|heuristic| heuristic.name() == value)
            .ok_or_else(|| {
                format!(
                    "Invalid heuristic '{}'. Valid options are 'best-short-side-fit', \
                     'bottom-left', 'contact-point', 'best-long-side-fit' and 'best-area-fit'.",
                    value
                )
            })
    }
}

/// How well a rectangle fits a spot. Lower is better.
///
/// Scores compare lexicographically with exact float equality, so ties on the
/// primary key fall through to the secondary key and full ties are left to the
/// caller's iteration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub primary: f64,
    pub secondary: f64,
}

impl Score {
    #[inline]
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    #[inline]
    pub fn is_better_than(&self, other: &Score) -> bool {
        self.primary < other.primary
            || (self.primary == other.primary && self.secondary < other.secondary)
    }
}

/// The best spot found for a request, before it has been committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    pub rotated: bool,
    pub score: Score,
}
