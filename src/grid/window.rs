use super::Grid;
use crate::Pos2;

/// A rectangular view onto a grid, `top_left` inclusive and `bottom_right`
/// exclusive.
pub struct GridWindow<'a> {
    tl: Pos2,
    br: Pos2,
    grid: &'a Grid,
}
impl<'a> GridWindow<'a> {
    pub fn new(grid: &'a Grid, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            grid,
        }
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        (self.tl.x..self.br.x).contains(&pos.x) && (self.tl.y..self.br.y).contains(&pos.y)
    }

    /// Live cells inside the window, unordered.
    pub fn iter(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.grid.iter().filter(move |&pos| self.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(window: &GridWindow<'_>) -> Vec<Pos2> {
        let mut cells: Vec<Pos2> = window.iter().collect();
        cells.sort();
        cells
    }

    #[test]
    fn filters_to_bounds() {
        let grid = Grid::from_alive([
            Pos2::new(-1, 0),
            Pos2::new(0, 0),
            Pos2::new(2, 1),
            Pos2::new(3, 1),
            Pos2::new(1, 2),
        ]);
        let window = grid.window(Pos2::new(0, 0), Pos2::new(3, 2));

        assert_eq!(sorted(&window), vec![Pos2::new(0, 0), Pos2::new(2, 1)]);
        assert!(window.contains(Pos2::new(2, 1)));
        assert!(!window.contains(Pos2::new(3, 1)));
    }

    #[test]
    fn works_at_the_left_edge_of_i32() {
        let grid = Grid::from_alive([
            Pos2::new(i32::MIN, 0),
            Pos2::new(i32::MIN + 2, 0),
            Pos2::new(i32::MAX, 0),
        ]);
        let window = grid.window(Pos2::new(i32::MIN, 0), Pos2::new(i32::MIN + 3, 1));

        assert_eq!(
            sorted(&window),
            vec![Pos2::new(i32::MIN, 0), Pos2::new(i32::MIN + 2, 0)]
        );
    }
}
