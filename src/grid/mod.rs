mod window;

pub use self::window::GridWindow;
use crate::Pos2;
use std::collections::{HashSet, hash_set};

/// The live cells of one generation.
///
/// A coordinate present in the set is alive, anything absent is dead. There is no
/// bound on the coordinates, negative and distant cells are stored the same way as
/// the ones near the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    alive: HashSet<Pos2>,
}

impl Grid {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_alive<I: IntoIterator<Item = Pos2>>(alive: I) -> Self {
        Self {
            alive: alive.into_iter().collect(),
        }
    }

    /// Marks `pos` alive. Adding a live cell does nothing.
    #[inline]
    pub fn add(&mut self, pos: Pos2) {
        self.alive.insert(pos);
    }

    #[inline]
    pub fn has(&self, pos: Pos2) -> bool {
        self.alive.contains(&pos)
    }

    /// Marks `pos` dead. Removing a dead cell does nothing.
    #[inline]
    pub fn remove(&mut self, pos: Pos2) {
        self.alive.remove(&pos);
    }

    /// Flips the state of `pos`, returning whether it is now alive.
    pub fn toggle(&mut self, pos: Pos2) -> bool {
        if self.alive.remove(&pos) {
            false
        } else {
            self.alive.insert(pos);
            true
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.alive.clear();
    }

    /// Copies out every live cell, sorted by row then column.
    ///
    /// The returned vector is detached from the grid; later edits do not show up
    /// in it.
    pub fn snapshot(&self) -> Vec<Pos2> {
        let mut cells: Vec<Pos2> = self.alive.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Walks the live cells in no particular order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.alive.iter(),
        }
    }

    /// Swaps in a whole generation at once and returns the previous one.
    pub fn replace(&mut self, next: Grid) -> Grid {
        std::mem::replace(self, next)
    }

    pub fn window(&self, top_left: Pos2, bottom_right: Pos2) -> GridWindow<'_> {
        GridWindow::new(self, top_left, bottom_right)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }
}

impl FromIterator<Pos2> for Grid {
    fn from_iter<I: IntoIterator<Item = Pos2>>(iter: I) -> Self {
        Self::from_alive(iter)
    }
}

impl Extend<Pos2> for Grid {
    fn extend<I: IntoIterator<Item = Pos2>>(&mut self, iter: I) {
        self.alive.extend(iter);
    }
}

pub struct Iter<'a> {
    inner: hash_set::Iter<'a, Pos2>,
}
impl Iterator for Iter<'_> {
    type Item = Pos2;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = Pos2;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
