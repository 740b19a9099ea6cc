use crate::geometry::Rect;

/// The set of unoccupied regions of a bin.
///
/// Free rectangles are maximal: they may overlap each other, but after every
/// placement no free rectangle lies inside another one. Together with the
/// placed rectangles they cover the whole bin.
///
/// Each `MaxRectsPacker` owns exactly one of these and is the only thing that
/// can change it.
#[derive(Debug, Clone)]
pub struct FreeRectangles {
    rects: Vec<Rect>,
}

impl FreeRectangles {
    pub(crate) fn new(bin: Rect) -> Self {
        Self { rects: vec![bin] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Rect> {
        self.rects.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    /// Removes the area covered by `used` from the free set.
    ///
    /// Every free rectangle overlapping `used` is replaced with the pieces of
    /// it that `used` leaves uncovered, then redundant pieces are pruned.
    pub(crate) fn place(&mut self, used: &Rect) {
        let mut kept = Vec::with_capacity(self.rects.len());
        let mut pieces = Vec::new();

        for free in self.rects.drain(..) {
            if free.intersects(used) {
                pieces.extend(free.split_around(used));
            } else {
                kept.push(free);
            }
        }

        log::trace!(
            "Placing {:?} split free rectangles into {} kept and {} new",
            used,
            kept.len(),
            pieces.len()
        );

        let pieces = prune_pieces(&kept, pieces);

        kept.extend(pieces);
        self.rects = kept;
    }
}

/// Drops every new piece that is contained in another free rectangle.
///
/// Kept rectangles were already pairwise non-redundant and none of them can
/// lie inside a piece, because every piece lies inside a rectangle that was
/// free before and overlapped the placement. Only pieces need checking. Of two
/// identical pieces, the first one survives.
fn prune_pieces(kept: &[Rect], pieces: Vec<Rect>) -> Vec<Rect> {
    let redundant: Vec<bool> = pieces
        .iter()
        .enumerate()
        .map(|(index, piece)| {
            kept.iter().any(|other| other.contains(piece))
                || pieces.iter().enumerate().any(|(other_index, other)| {
                    other_index != index
                        && other.contains(piece)
                        && (other != piece || other_index < index)
                })
        })
        .collect();

    let before = pieces.len();
    let pieces: Vec<Rect> = pieces
        .into_iter()
        .zip(redundant)
        .filter_map(|(piece, redundant)| if redundant { None } else { Some(piece) })
        .collect();

    log::trace!("Pruned {} redundant free rectangles", before - pieces.len());

    pieces
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_minimal(free: &FreeRectangles) {
        let rects = free.as_slice();

        for (i, a) in rects.iter().enumerate() {
            for (j, b) in rects.iter().enumerate() {
                if i != j {
                    assert!(!a.contains(b), "{:?} contains {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn starts_with_whole_bin() {
        let free = FreeRectangles::new(Rect::new(0.0, 0.0, 10.0, 5.0));

        assert_eq!(free.len(), 1);
        assert_eq!(free.get(0), Some(&Rect::new(0.0, 0.0, 10.0, 5.0)));
        assert_eq!(free.get(1), None);
    }

    #[test]
    fn corner_placement_leaves_two_strips() {
        let mut free = FreeRectangles::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        free.place(&Rect::new(0.0, 0.0, 4.0, 6.0));

        assert_eq!(
            free.as_slice(),
            &[
                Rect::new(4.0, 0.0, 6.0, 10.0),
                Rect::new(0.0, 6.0, 10.0, 4.0),
            ]
        );
    }

    #[test]
    fn filling_the_bin_empties_the_set() {
        let mut free = FreeRectangles::new(Rect::new(0.0, 0.0, 4.0, 4.0));
        free.place(&Rect::new(0.0, 0.0, 4.0, 4.0));

        assert!(free.is_empty());
    }

    #[test]
    fn redundant_pieces_are_pruned() {
        let mut free = FreeRectangles::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        free.place(&Rect::new(0.0, 0.0, 4.0, 6.0));
        free.place(&Rect::new(4.0, 4.0, 2.0, 4.0));

        assert_minimal(&free);
        assert_eq!(
            free.as_slice(),
            &[
                Rect::new(6.0, 0.0, 4.0, 10.0),
                Rect::new(4.0, 0.0, 6.0, 4.0),
                Rect::new(0.0, 6.0, 4.0, 4.0),
                Rect::new(0.0, 8.0, 10.0, 2.0),
            ]
        );
    }

    #[test]
    fn untouched_rectangles_keep_their_order() {
        let mut free = FreeRectangles::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        free.place(&Rect::new(0.0, 0.0, 4.0, 6.0));
        free.place(&Rect::new(0.0, 6.0, 2.0, 2.0));

        assert_minimal(&free);
        assert_eq!(
            free.as_slice(),
            &[
                Rect::new(4.0, 0.0, 6.0, 10.0),
                Rect::new(2.0, 6.0, 8.0, 4.0),
                Rect::new(0.0, 8.0, 10.0, 2.0),
            ]
        );
    }

    #[test]
    fn stacked_placements() {
        let mut free = FreeRectangles::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        free.place(&Rect::new(0.0, 0.0, 10.0, 4.0));
        free.place(&Rect::new(0.0, 4.0, 2.0, 2.0));

        assert_minimal(&free);
        assert_eq!(
            free.as_slice(),
            &[
                Rect::new(2.0, 4.0, 8.0, 6.0),
                Rect::new(0.0, 6.0, 10.0, 4.0),
            ]
        );
    }

    #[test]
    fn middle_placement_stays_minimal() {
        let mut free = FreeRectangles::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        free.place(&Rect::new(3.0, 3.0, 2.0, 2.0));
        free.place(&Rect::new(6.0, 6.0, 2.0, 2.0));

        assert_minimal(&free);
        for rect in free.iter() {
            assert!(!rect.intersects(&Rect::new(3.0, 3.0, 2.0, 2.0)));
            assert!(!rect.intersects(&Rect::new(6.0, 6.0, 2.0, 2.0)));
        }
    }
}
