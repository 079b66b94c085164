use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    ops::{Add, Neg, Sub},
};

/// A grid coordinate. Persisted as a two element `[x, y]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    /// Offsets of the 8 cells surrounding a cell, diagonals included.
    pub const NEIGHBORS: [Pos2; 8] = [
        Pos2::new(-1, -1),
        Pos2::new(0, -1),
        Pos2::new(1, -1),
        Pos2::new(1, 0),
        Pos2::new(1, 1),
        Pos2::new(0, 1),
        Pos2::new(-1, 1),
        Pos2::new(-1, 0),
    ];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
    #[inline]
    pub fn one() -> Self {
        Self { x: 1, y: 1 }
    }

    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Pos2> {
        Self::NEIGHBORS.into_iter().map(move |offset| self + offset)
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<[i32; 2]> for Pos2 {
    #[inline]
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}
impl From<Pos2> for [i32; 2] {
    #[inline]
    fn from(pos: Pos2) -> Self {
        [pos.x, pos.y]
    }
}
impl From<(i32, i32)> for Pos2 {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // rows first, then columns within a row
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Neg for Pos2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }
}
// Wrapping arithmetic: the grid has no edge, and a coordinate at i32::MAX still has
// a right-hand neighbor to count.
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.wrapping_add(rhs.x),
            y: self.y.wrapping_add(rhs.y),
        }
    }
}
impl Sub for Pos2 {
    type Output = Pos2;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.wrapping_sub(rhs.x),
            y: self.y.wrapping_sub(rhs.y),
        }
    }
}
