// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Set of pointers currently touching the surface.
//!
//! ## Minimal example
//!
//! ```
//! use inscribe_gesture::pointers::PointerSet;
//! use kurbo::Point;
//!
//! let mut pointers = PointerSet::new();
//! pointers.down(1_u32, Point::new(0.0, 0.0));
//! pointers.down(2, Point::new(10.0, 20.0));
//! assert_eq!(pointers.centroid(), Some(Point::new(5.0, 10.0)));
//!
//! pointers.up(&1);
//! assert_eq!(pointers.centroid(), Some(Point::new(10.0, 20.0)));
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Positions of the pointers that are currently down, in the order they went down.
///
/// `P` is the host's pointer identifier type.
#[derive(Clone, Debug)]
pub struct PointerSet<P> {
    pointers: SmallVec<[(P, Point); 4]>,
}

impl<P> Default for PointerSet<P> {
    fn default() -> Self {
        Self {
            pointers: SmallVec::new(),
        }
    }
}

impl<P: Copy + PartialEq> PointerSet<P> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` going down at `pos`. A pointer already down is moved instead.
    pub fn down(&mut self, id: P, pos: Point) {
        if self.update(&id, pos) {
            tracing::warn!("pointer went down twice; treating as a move");
        } else {
            self.pointers.push((id, pos));
        }
    }

    /// Moves a pointer that is down. Returns `false` for unknown pointers.
    pub fn update(&mut self, id: &P, pos: Point) -> bool {
        match self.pointers.iter_mut().find(|(p, _)| p == id) {
            Some(entry) => {
                entry.1 = pos;
                true
            }
            None => false,
        }
    }

    /// Removes a pointer. Returns its last position if it was down.
    pub fn up(&mut self, id: &P) -> Option<Point> {
        let idx = self.pointers.iter().position(|(p, _)| p == id)?;
        Some(self.pointers.remove(idx).1)
    }

    /// Forgets all pointers.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    /// Arithmetic mean of all pointer positions, or `None` when no pointer is down.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.pointers.is_empty() {
            return None;
        }
        let (sx, sy) = self
            .pointers
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (_, p)| (sx + p.x, sy + p.y));
        #[allow(
            clippy::cast_precision_loss,
            reason = "pointer counts are tiny"
        )]
        let n = self.pointers.len() as f64;
        Some(Point::new(sx / n, sy / n))
    }

    /// Position of `id`, if it is down.
    #[must_use]
    pub fn get(&self, id: &P) -> Option<Point> {
        self.pointers.iter().find(|(p, _)| p == id).map(|(_, pos)| *pos)
    }

    /// Pointer positions in the order the pointers went down.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.pointers.iter().map(|(_, pos)| *pos)
    }

    /// Number of pointers down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` if no pointer is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::PointerSet;

    #[test]
    fn empty_set_has_no_centroid() {
        let set = PointerSet::<u8>::new();
        assert_eq!(set.centroid(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn centroid_is_mean_of_three() {
        let mut set = PointerSet::new();
        set.down(1, Point::new(0.0, 0.0));
        set.down(2, Point::new(30.0, 0.0));
        set.down(3, Point::new(0.0, 30.0));
        assert_eq!(set.centroid(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn down_twice_moves_instead_of_duplicating() {
        let mut set = PointerSet::new();
        set.down(7, Point::new(1.0, 1.0));
        set.down(7, Point::new(3.0, 5.0));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&7), Some(Point::new(3.0, 5.0)));
    }

    #[test]
    fn update_and_up_ignore_unknown_pointers() {
        let mut set = PointerSet::new();
        set.down(1, Point::ZERO);
        assert!(!set.update(&2, Point::new(5.0, 5.0)));
        assert_eq!(set.up(&2), None);
        assert_eq!(set.up(&1), Some(Point::ZERO));
        assert!(set.is_empty());
    }

    #[test]
    fn order_is_preserved_after_removal() {
        let mut set = PointerSet::new();
        set.down('a', Point::new(1.0, 0.0));
        set.down('b', Point::new(2.0, 0.0));
        set.down('c', Point::new(3.0, 0.0));
        set.up(&'b');
        let xs: alloc::vec::Vec<f64> = set.positions().map(|p| p.x).collect();
        assert_eq!(xs, [1.0, 3.0]);
    }
}
