/// The most live neighbors a cell can have.
pub(super) const MAX_NEIGHBORS: usize = 8;

type RuleTable = [[bool; MAX_NEIGHBORS + 1]; 2];

/// Next-state lookup, indexed by `[alive as usize][neighbor count]`.
static RULE: RuleTable = generate_rule();

/// Returns whether a cell is alive in the next generation.
///
/// Counts above [`MAX_NEIGHBORS`] cannot come out of a real neighborhood and are
/// treated as overcrowded.
#[inline]
pub(super) fn next_state(alive: bool, neighbors: u8) -> bool {
    RULE[alive as usize]
        .get(neighbors as usize)
        .copied()
        .unwrap_or(false)
}

/// Builds the lookup table for the Game of Life ruleset.
///
/// A live cell dies with 1 or fewer neighbors, dies with 4 or more, and survives
/// with 2 or 3. A dead cell is born with exactly 3.
const fn generate_rule() -> RuleTable {
    let mut table = [[false; MAX_NEIGHBORS + 1]; 2];
    let mut n = 0;
    while n <= MAX_NEIGHBORS {
        table[0][n] = n == 3;
        table[1][n] = !(n <= 1 || n >= 4);
        n += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_conway_life() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(next_state(false, 3));

        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(!next_state(true, 8));
        assert!(!next_state(false, 0));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 4));
    }

    #[test]
    fn out_of_range_counts_are_dead() {
        assert!(!next_state(true, 9));
        assert!(!next_state(false, u8::MAX));
    }
}
