use crate::{error::PackError, geometry::Rect};

/// A request to the packing routines.
///
/// `RectSize` is a 2D size and a cookie of the caller's choosing. The packer
/// never looks at the cookie, it only hands it back alongside the placement so
/// consumers can associate results with their own objects.
#[derive(Debug, Clone, PartialEq)]
pub struct RectSize<T> {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) cookie: T,
}

impl<T> RectSize<T> {
    #[inline]
    pub fn new(width: f64, height: f64, cookie: T) -> Self {
        Self {
            width,
            height,
            cookie,
        }
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cookie(&self) -> &T {
        &self.cookie
    }

    #[inline]
    pub fn into_cookie(self) -> T {
        self.cookie
    }

    /// Checks that both sides are finite and positive.
    pub fn validate(&self) -> Result<(), PackError> {
        if is_valid_size(self.width, self.height) {
            Ok(())
        } else {
            Err(PackError::InvalidRectSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// A rectangle that was placed by a packing function.
///
/// `PlacedRect` corresponds 1:1 to a request passed into the packer. The size
/// is the footprint inside the bin, so it is the requested size swapped when
/// [`is_rotated`](#method.is_rotated) is true.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRect<T> {
    pub(crate) rect: Rect,
    pub(crate) rotated: bool,
    pub(crate) cookie: T,
}

impl<T> PlacedRect<T> {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.rect.min()
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.rect.width, self.rect.height)
    }

    #[inline]
    pub fn min(&self) -> (f64, f64) {
        self.rect.min()
    }

    #[inline]
    pub fn max(&self) -> (f64, f64) {
        self.rect.max()
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    #[inline]
    pub fn cookie(&self) -> &T {
        &self.cookie
    }

    #[inline]
    pub fn into_cookie(self) -> T {
        self.cookie
    }
}

/// The outcome of inserting a single rectangle.
///
/// Running out of room is an expected outcome, not an error: the request is
/// handed back untouched so the caller can grow the bin, start another one or
/// drop it.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertResult<T> {
    Placed(PlacedRect<T>),
    Unplaceable(RectSize<T>),
}

impl<T> InsertResult<T> {
    #[inline]
    pub fn is_placed(&self) -> bool {
        matches!(self, InsertResult::Placed(_))
    }

    pub fn placed(self) -> Option<PlacedRect<T>> {
        match self {
            InsertResult::Placed(placed) => Some(placed),
            InsertResult::Unplaceable(_) => None,
        }
    }
}

/// The results from inserting a batch of rectangles.
#[derive(Debug, Clone)]
pub struct BatchOutput<T> {
    pub(crate) placed: Vec<PlacedRect<T>>,
    pub(crate) unplaced: Vec<RectSize<T>>,
}

impl<T> BatchOutput<T> {
    /// Placed rectangles, in the order they were committed to the bin.
    #[inline]
    pub fn placed(&self) -> &[PlacedRect<T>] {
        &self.placed
    }

    /// Requests that did not fit anywhere, in the order they were given.
    #[inline]
    pub fn unplaced(&self) -> &[RectSize<T>] {
        &self.unplaced
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<PlacedRect<T>>, Vec<RectSize<T>>) {
        (self.placed, self.unplaced)
    }
}

pub(crate) fn is_valid_size(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}
