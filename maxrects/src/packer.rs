use rayon::prelude::*;

use crate::{
    error::PackError,
    free_rects::FreeRectangles,
    geometry::{common_interval_length, Rect},
    heuristic::{Candidate, Heuristic},
    types::{is_valid_size, BatchOutput, InsertResult, PlacedRect, RectSize},
};

const UPRIGHT: &[bool] = &[false];
const UPRIGHT_AND_ROTATED: &[bool] = &[false, true];

/// Packs rectangles into a single fixed-size bin.
///
/// The packer keeps track of the rectangles placed so far and of the free
/// regions left over. Rectangles can be inserted one at a time with
/// [`insert`](#method.insert), or as a batch with
/// [`insert_batch`](#method.insert_batch), which lets the packer pick the
/// order.
#[derive(Debug, Clone)]
pub struct MaxRectsPacker {
    width: f64,
    height: f64,
    allow_flip: bool,
    used: Vec<Rect>,
    free_rects: FreeRectangles,
}

impl MaxRectsPacker {
    pub fn new(width: f64, height: f64, allow_flip: bool) -> Result<Self, PackError> {
        if !is_valid_size(width, height) {
            return Err(PackError::InvalidBinSize { width, height });
        }

        Ok(Self {
            width,
            height,
            allow_flip,
            used: Vec::new(),
            free_rects: FreeRectangles::new(Rect::new(0.0, 0.0, width, height)),
        })
    }

    /// Empties the packer and gives it a new bin.
    pub fn reset(&mut self, width: f64, height: f64, allow_flip: bool) -> Result<(), PackError> {
        *self = Self::new(width, height, allow_flip)?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn allow_flip(&self) -> bool {
        self.allow_flip
    }

    /// The footprints of every rectangle placed so far, in placement order.
    #[inline]
    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    #[inline]
    pub fn free_rects(&self) -> &FreeRectangles {
        &self.free_rects
    }

    /// The fraction of the bin's area covered by placed rectangles.
    pub fn occupancy(&self) -> f64 {
        let used_area: f64 = self.used.iter().map(Rect::area).sum();

        used_area / (self.width * self.height)
    }

    /// Inserts a single rectangle, committing it to the bin if it fits.
    pub fn insert<T>(
        &mut self,
        width: f64,
        height: f64,
        heuristic: Heuristic,
        cookie: T,
    ) -> Result<InsertResult<T>, PackError> {
        let request = RectSize::new(width, height, cookie);
        request.validate()?;

        match self.score(width, height, heuristic) {
            Some(candidate) => {
                log::trace!(
                    "Placing {}x{} at {:?} using {}",
                    width,
                    height,
                    candidate.rect,
                    heuristic
                );

                Ok(InsertResult::Placed(self.commit(candidate, request.cookie)))
            }
            None => {
                log::trace!("{}x{} did not fit in this bin", width, height);

                Ok(InsertResult::Unplaceable(request))
            }
        }
    }

    /// Inserts a batch of rectangles.
    ///
    /// Each round scores every pending request against the current free
    /// rectangles and commits only the best of them, so requests are not
    /// placed in input order. Packing stops once nothing left fits. If any
    /// request has an invalid size, nothing is placed.
    pub fn insert_batch<T, I>(
        &mut self,
        requests: I,
        heuristic: Heuristic,
    ) -> Result<BatchOutput<T>, PackError>
    where
        I: IntoIterator<Item = RectSize<T>>,
    {
        let mut pending: Vec<RectSize<T>> = requests.into_iter().collect();

        for request in &pending {
            request.validate()?;
        }

        let num_requests = pending.len();
        log::trace!("Packing batch of {} rectangles using {}", num_requests, heuristic);

        let mut placed = Vec::with_capacity(num_requests);

        while !pending.is_empty() {
            let sizes: Vec<(f64, f64)> = pending.iter().map(RectSize::size).collect();

            // Scoring only reads the bin, so every request is scored in
            // parallel. All scores are in before anything is committed.
            let candidates: Vec<Option<Candidate>> = sizes
                .par_iter()
                .map(|&(width, height)| self.score(width, height, heuristic))
                .collect();

            let best = candidates
                .into_iter()
                .enumerate()
                .filter_map(|(index, candidate)| candidate.map(|candidate| (index, candidate)))
                .fold(None, |best: Option<(usize, Candidate)>, (index, candidate)| {
                    match best {
                        Some((_, current)) if !candidate.score.is_better_than(&current.score) => {
                            best
                        }
                        _ => Some((index, candidate)),
                    }
                });

            let (index, candidate) = match best {
                Some(best) => best,
                None => {
                    log::trace!("None of the {} remaining rectangles fit", pending.len());
                    break;
                }
            };

            let request = pending.remove(index);
            log::trace!(
                "Placing {}x{} at {:?}",
                request.width,
                request.height,
                candidate.rect
            );

            placed.push(self.commit(candidate, request.cookie));
        }

        log::debug!(
            "Placed {} of {} rectangles, occupancy is now {:.3}",
            placed.len(),
            num_requests,
            self.occupancy()
        );

        Ok(BatchOutput {
            placed,
            unplaced: pending,
        })
    }

    /// Finds where a `width` by `height` rectangle would go without placing
    /// it. Returns `None` if no free rectangle can hold it in any allowed
    /// orientation, or if the size is not finite and positive.
    pub fn score(&self, width: f64, height: f64, heuristic: Heuristic) -> Option<Candidate> {
        if !is_valid_size(width, height) {
            return None;
        }

        let orientations = if self.allow_flip {
            UPRIGHT_AND_ROTATED
        } else {
            UPRIGHT
        };

        let mut best: Option<Candidate> = None;

        for free in self.free_rects.iter() {
            for &rotated in orientations {
                let (width, height) = if rotated {
                    (height, width)
                } else {
                    (width, height)
                };

                if free.width < width || free.height < height {
                    continue;
                }

                let rect = Rect::new(free.x, free.y, width, height);
                let score = heuristic.score(free, &rect, |rect| self.contact_score(rect));

                let is_better = match &best {
                    Some(best) => score.is_better_than(&best.score),
                    None => true,
                };

                if is_better {
                    best = Some(Candidate {
                        rect,
                        rotated,
                        score,
                    });
                }
            }
        }

        best
    }

    /// Total length of the edges of `rect` that touch the bin's border or a
    /// placed rectangle.
    pub(crate) fn contact_score(&self, rect: &Rect) -> f64 {
        let (max_x, max_y) = rect.max();
        let mut score = 0.0;

        if rect.x == 0.0 || max_x == self.width {
            score += rect.height;
        }

        if rect.y == 0.0 || max_y == self.height {
            score += rect.width;
        }

        for used in &self.used {
            let (used_max_x, used_max_y) = used.max();

            if used.x == max_x || used_max_x == rect.x {
                score += common_interval_length(used.y, used_max_y, rect.y, max_y);
            }

            if used.y == max_y || used_max_y == rect.y {
                score += common_interval_length(used.x, used_max_x, rect.x, max_x);
            }
        }

        score
    }

    fn commit<T>(&mut self, candidate: Candidate, cookie: T) -> PlacedRect<T> {
        self.free_rects.place(&candidate.rect);
        self.used.push(candidate.rect);

        PlacedRect {
            rect: candidate.rect,
            rotated: candidate.rotated,
            cookie,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_no_overlap(packer: &MaxRectsPacker) {
        let used = packer.used_rects();

        for (i, a) in used.iter().enumerate() {
            for b in &used[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn rejects_invalid_bins() {
        assert_eq!(
            MaxRectsPacker::new(0.0, 10.0, false).unwrap_err(),
            PackError::InvalidBinSize {
                width: 0.0,
                height: 10.0
            }
        );
        assert!(MaxRectsPacker::new(10.0, -1.0, false).is_err());
        assert!(MaxRectsPacker::new(f64::INFINITY, 10.0, false).is_err());
        assert!(MaxRectsPacker::new(f64::NAN, 10.0, false).is_err());
    }

    #[test]
    fn rejects_invalid_rects() {
        let mut packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();

        assert_eq!(
            packer
                .insert(0.0, 3.0, Heuristic::BestShortSideFit, ())
                .unwrap_err(),
            PackError::InvalidRectSize {
                width: 0.0,
                height: 3.0
            }
        );
        assert!(packer.used_rects().is_empty());
    }

    #[test]
    fn score_skips_invalid_sizes() {
        let packer = MaxRectsPacker::new(10.0, 10.0, true).unwrap();

        for &heuristic in &Heuristic::ALL {
            assert_eq!(packer.score(f64::NAN, 2.0, heuristic), None);
            assert_eq!(packer.score(-1.0, 2.0, heuristic), None);
            assert_eq!(packer.score(2.0, 0.0, heuristic), None);
            assert_eq!(packer.score(f64::INFINITY, 2.0, heuristic), None);
            assert!(packer.score(2.0, 2.0, heuristic).is_some());
        }
    }

    #[test]
    fn first_rect_goes_in_the_corner() {
        let mut packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();

        let placed = packer
            .insert(4.0, 6.0, Heuristic::BestShortSideFit, "a")
            .unwrap()
            .placed()
            .unwrap();

        assert_eq!(placed.rect(), Rect::new(0.0, 0.0, 4.0, 6.0));
        assert!(!placed.is_rotated());
        assert_eq!(placed.cookie(), &"a");
        assert_eq!(
            packer.free_rects().as_slice(),
            &[
                Rect::new(4.0, 0.0, 6.0, 10.0),
                Rect::new(0.0, 6.0, 10.0, 4.0),
            ]
        );
    }

    #[test]
    fn flips_when_only_rotated_fits() {
        let mut packer = MaxRectsPacker::new(10.0, 4.0, true).unwrap();

        let placed = packer
            .insert(2.0, 8.0, Heuristic::BestAreaFit, ())
            .unwrap()
            .placed()
            .unwrap();

        assert!(placed.is_rotated());
        assert_eq!(placed.size(), (8.0, 2.0));
    }

    #[test]
    fn unplaceable_returns_request() {
        let mut packer = MaxRectsPacker::new(5.0, 5.0, true).unwrap();

        let result = packer.insert(6.0, 2.0, Heuristic::BestShortSideFit, 7).unwrap();

        match result {
            InsertResult::Unplaceable(request) => {
                assert_eq!(request.size(), (6.0, 2.0));
                assert_eq!(request.into_cookie(), 7);
            }
            InsertResult::Placed(placed) => panic!("unexpectedly placed at {:?}", placed),
        }

        assert!(packer.used_rects().is_empty());
        assert_eq!(packer.free_rects().len(), 1);
        assert_eq!(packer.occupancy(), 0.0);
    }

    #[test]
    fn bottom_left_stacks() {
        let mut packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();

        for expected_y in &[0.0, 3.0, 6.0] {
            let placed = packer
                .insert(10.0, 3.0, Heuristic::BottomLeft, ())
                .unwrap()
                .placed()
                .unwrap();

            assert_eq!(placed.position(), (0.0, *expected_y));
        }

        let fourth = packer.insert(10.0, 3.0, Heuristic::BottomLeft, ()).unwrap();
        assert!(!fourth.is_placed());
        assert_eq!(packer.free_rects().as_slice(), &[Rect::new(0.0, 9.0, 10.0, 1.0)]);
    }

    #[test]
    fn contact_score_counts_bin_border() {
        let packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();

        assert_eq!(packer.contact_score(&Rect::new(0.0, 0.0, 2.0, 3.0)), 5.0);
        assert_eq!(packer.contact_score(&Rect::new(8.0, 7.0, 2.0, 3.0)), 5.0);
        assert_eq!(packer.contact_score(&Rect::new(4.0, 4.0, 2.0, 2.0)), 0.0);
    }

    #[test]
    fn contact_score_counts_neighbors() {
        let mut packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();
        packer.insert(4.0, 4.0, Heuristic::BottomLeft, ()).unwrap();

        // Shares the placed rectangle's right edge along its whole height, and
        // touches the bottom border.
        let flush = Rect::new(4.0, 0.0, 2.0, 2.0);
        // Shares only a corner with the placed rectangle.
        let corner = Rect::new(4.0, 4.0, 2.0, 2.0);
        let isolated = Rect::new(6.0, 6.0, 2.0, 2.0);

        assert_eq!(packer.contact_score(&flush), 4.0);
        assert_eq!(packer.contact_score(&corner), 0.0);
        assert_eq!(packer.contact_score(&isolated), 0.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();
        packer.insert(4.0, 4.0, Heuristic::BestAreaFit, ()).unwrap();

        packer.reset(20.0, 5.0, true).unwrap();

        assert!(packer.used_rects().is_empty());
        assert_eq!(packer.free_rects().as_slice(), &[Rect::new(0.0, 0.0, 20.0, 5.0)]);
        assert!(packer.allow_flip());
        assert!(packer.reset(0.0, 5.0, true).is_err());
    }

    #[test]
    fn batch_places_best_fit_first() {
        let mut packer = MaxRectsPacker::new(10.0, 10.0, false).unwrap();

        let requests = vec![
            RectSize::new(3.0, 3.0, "small"),
            RectSize::new(10.0, 5.0, "half"),
        ];

        let output = packer
            .insert_batch(requests, Heuristic::BestShortSideFit)
            .unwrap();

        let order: Vec<_> = output.placed().iter().map(|placed| *placed.cookie()).collect();
        assert_eq!(order, vec!["half", "small"]);
        assert!(output.unplaced().is_empty());
        assert_no_overlap(&packer);
    }

    #[test]
    fn batch_reports_leftovers() {
        let mut packer = MaxRectsPacker::new(4.0, 4.0, false).unwrap();

        let requests = vec![
            RectSize::new(4.0, 3.0, 0),
            RectSize::new(4.0, 3.0, 1),
            RectSize::new(4.0, 1.0, 2),
        ];

        let (placed, unplaced) = packer
            .insert_batch(requests, Heuristic::BestAreaFit)
            .unwrap()
            .into_parts();

        assert_eq!(placed.len(), 2);
        assert_eq!(unplaced.len(), 1);
        assert_eq!(unplaced[0].cookie(), &1);
        assert_eq!(packer.occupancy(), 1.0);
    }

    #[test]
    fn batch_with_invalid_request_places_nothing() {
        let mut packer = MaxRectsPacker::new(4.0, 4.0, false).unwrap();

        let requests = vec![RectSize::new(1.0, 1.0, ()), RectSize::new(1.0, -1.0, ())];

        assert!(packer
            .insert_batch(requests, Heuristic::BestAreaFit)
            .is_err());
        assert!(packer.used_rects().is_empty());
    }
}
