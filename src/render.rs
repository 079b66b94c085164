//! Geometry shared by front ends: where a cell is drawn, and which cell a pointer
//! is over. None of it touches the grid itself.

use crate::Pos2;

/// Screen space rectangle covered by a cell, as `(x1, y1, x2, y2)`.
#[inline]
pub fn cell_rect(pos: Pos2, cell_size: u32) -> (i64, i64, i64, i64) {
    let size = cell_size as i64;
    let x1 = pos.x as i64 * size;
    let y1 = pos.y as i64 * size;
    (x1, y1, x1 + size, y1 + size)
}

/// Two triangles covering a cell, as 6 `(x, y)` vertices.
pub fn quad_vertices(pos: Pos2, cell_size: u32) -> [f32; 12] {
    let (x1, y1, x2, y2) = cell_rect(pos, cell_size);
    let (x1, y1, x2, y2) = (x1 as f32, y1 as f32, x2 as f32, y2 as f32);
    #[rustfmt::skip]
    let vertices = [
        x1, y1,
        x2, y1,
        x1, y2,
        x1, y2,
        x2, y1,
        x2, y2,
    ];
    vertices
}

/// Vertices for a whole generation, one quad per live cell.
pub fn vertex_buffer<I: IntoIterator<Item = Pos2>>(cells: I, cell_size: u32) -> Vec<f32> {
    let cells = cells.into_iter();
    let mut buffer = Vec::with_capacity(cells.size_hint().0 * 12);
    for cell in cells {
        buffer.extend_from_slice(&quad_vertices(cell, cell_size));
    }
    buffer
}

/// Maps a pointer position to the cell under it, flooring on both axes so the
/// cells left of and above the origin get negative coordinates.
#[inline]
pub fn cell_at(x: f64, y: f64, cell_size: u32) -> Pos2 {
    let size = cell_size.max(1) as f64;
    Pos2 {
        x: (x / size).floor() as i32,
        y: (y / size).floor() as i32,
    }
}
