use crate::{Grid, Pos2};

/// The pattern a fresh session starts with when nothing was saved: a glider
/// heading down and to the right.
pub const DEFAULT_SEED: [Pos2; 5] = [
    Pos2::new(11, 10),
    Pos2::new(12, 11),
    Pos2::new(10, 12),
    Pos2::new(11, 12),
    Pos2::new(12, 12),
];

#[inline]
pub fn default_grid() -> Grid {
    Grid::from_alive(DEFAULT_SEED)
}
