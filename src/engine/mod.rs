//! Generation stepping.
//!
//! Only live cells and their neighbors are ever looked at: every live cell adds
//! one to the counter of each of its 8 neighbors, and every coordinate that ends
//! up with a counter is decided by the ruleset. A dead cell with no live neighbor
//! never gets a counter, which is fine since it cannot be born.

mod rule;

use crate::{Grid, Pos2};
use rayon::prelude::*;
use std::collections::HashMap;

/// Live neighbors seen so far, per coordinate.
pub type NeighborCounts = HashMap<Pos2, u8>;

/// Counts live neighbors around every cell of `alive`.
///
/// Each live cell also gets an entry of its own (zero if nothing touches it) so
/// that isolated cells are still evaluated and die.
pub fn neighbor_counts<I: IntoIterator<Item = Pos2>>(alive: I) -> NeighborCounts {
    let alive = alive.into_iter();
    let mut counts = NeighborCounts::with_capacity(alive.size_hint().0 * 4);
    for cell in alive {
        counts.entry(cell).or_insert(0);
        for neighbor in cell.neighbors() {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }
    counts
}

/// Computes the generation after `grid` without touching it.
pub fn next_generation(grid: &Grid) -> Grid {
    decide(grid, neighbor_counts(grid.iter()))
}

/// Same as [`next_generation`], with the counting split across the rayon pool.
pub fn next_generation_parallel(grid: &Grid) -> Grid {
    if grid.is_empty() {
        return Grid::new();
    }

    // each band counts its own slice of the live cells, the partial counts are
    // then summed, so a coordinate next to two bands still gets its full count
    let alive: Vec<Pos2> = grid.iter().collect();
    let band_len = alive.len().div_ceil(rayon::current_num_threads()).max(1);
    let counts = alive
        .par_chunks(band_len)
        .map(|band| neighbor_counts(band.iter().copied()))
        .reduce(NeighborCounts::new, merge_counts);

    let next = counts
        .into_par_iter()
        .filter(|&(pos, neighbors)| rule::next_state(grid.has(pos), neighbors))
        .map(|(pos, _)| pos)
        .collect::<Vec<_>>();
    Grid::from_alive(next)
}

fn merge_counts(a: NeighborCounts, b: NeighborCounts) -> NeighborCounts {
    let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (pos, neighbors) in from {
        *into.entry(pos).or_insert(0) += neighbors;
    }
    into
}

/// Applies the ruleset to every counted coordinate. `current` is only read.
fn decide(current: &Grid, counts: NeighborCounts) -> Grid {
    counts
        .into_iter()
        .filter(|&(pos, neighbors)| rule::next_state(current.has(pos), neighbors))
        .map(|(pos, _)| pos)
        .collect()
}

impl Grid {
    /// Advances the grid by one generation.
    ///
    /// The whole next generation is computed from the current one before it is
    /// swapped in, nothing reads a half updated grid.
    pub fn step(&mut self) {
        let next = next_generation(self);
        log::trace!("step: {} -> {} alive", self.len(), next.len());
        self.replace(next);
    }

    pub fn step_parallel(&mut self) {
        let next = next_generation_parallel(self);
        log::trace!("parallel step: {} -> {} alive", self.len(), next.len());
        self.replace(next);
    }
}
