//! The immutable cell grid.
//!
//! Cells are stored flat in row-major layout: `cells[y * width + x]`, which
//! is also the row/column order of the serialized board.

use crate::cell::Cell;
use crate::coord::{Coord, CoordSet};
use crate::error::BoardError;
use crate::serial::{SerializedBoard, SerializedCell};

/// A `width × height` board of cells. Updates return a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Every cell unassigned and hidden.
    pub fn empty(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::empty(Coord::new(x, y))))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// The cell at `(x, y)`. Panics when out of bounds.
    #[inline(always)]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * self.width + x]
    }

    pub fn cell_at(&self, coord: &Coord) -> &Cell {
        self.cell(coord.x, coord.y)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Rows from top to bottom. A zero-width grid has no rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// A copy where only the cell at `cell.coordinates` is replaced.
    ///
    /// Panics if the coordinates are outside the board.
    pub fn copy_with_cell(&self, cell: Cell) -> Grid {
        let Coord { x, y } = cell.coordinates;
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) is outside a {}x{} board",
            self.width,
            self.height
        );
        let mut cells = self.cells.clone();
        cells[y * self.width + x] = cell;
        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Every coordinate on the board, row by row.
    pub fn board_coordinates(&self) -> CoordSet {
        self.cells.iter().map(|cell| cell.coordinates).collect()
    }

    /// True when every cell belongs to a group.
    pub fn is_fully_partitioned(&self) -> bool {
        self.cells.iter().all(|cell| cell.group_id.is_some())
    }

    /// True when every cell has group, terrain and crop.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_complete)
    }

    /// A stable key for the full cell content.
    ///
    /// One token per cell, in row-major order, covering every serialized
    /// field. Grids with the same content always produce the same key.
    pub fn hash(&self) -> String {
        let mut key = String::with_capacity(self.cells.len() * 12);
        key.push_str(&format!("{}x{}", self.width, self.height));
        for cell in &self.cells {
            key.push('|');
            match cell.group_id {
                Some(id) => key.push_str(&id.to_string()),
                None => key.push('_'),
            }
            key.push(':');
            key.push_str(cell.terrain.map_or("_", |t| t.as_str()));
            key.push(':');
            match cell.crop {
                Some(crop) => key.push_str(&crop.to_string()),
                None => key.push('_'),
            }
            key.push(':');
            key.push(if cell.field_hidden { 'h' } else { 'v' });
            key.push(if cell.crop_hidden { 'h' } else { 'v' });
        }
        key
    }

    /// Plain-data form: `height` rows of `width` cells.
    pub fn serialize(&self) -> SerializedBoard {
        self.rows()
            .map(|row| row.iter().map(SerializedCell::from).collect())
            .collect()
    }

    /// Rebuild a grid from its plain-data form.
    ///
    /// Rejects empty or ragged boards and cells whose coordinates do not
    /// match their position.
    pub fn deserialize(board: &SerializedBoard) -> Result<Grid, BoardError> {
        let height = board.len();
        let width = board.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(BoardError::EmptyBoard);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in board.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for (column, serialized) in row.iter().enumerate() {
                let cell = Cell::from(serialized);
                if cell.coordinates != Coord::new(column, row_index) {
                    return Err(BoardError::CoordinateMismatch {
                        row: row_index,
                        column,
                        x: cell.coordinates.x,
                        y: cell.coordinates.y,
                    });
                }
                cells.push(cell);
            }
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellPatch, Crop, Terrain};

    fn planted(grid: &Grid, x: usize, y: usize, id: u32, terrain: Terrain, crop: Crop) -> Grid {
        grid.copy_with_cell(grid.cell(x, y).copy_with(
            CellPatch::new()
                .group_id(Some(id))
                .terrain(Some(terrain))
                .crop(Some(crop)),
        ))
    }

    #[test]
    fn test_empty_grid_layout() {
        let g = Grid::empty(9, 5);
        assert_eq!(g.width(), 9);
        assert_eq!(g.height(), 5);
        assert_eq!(g.cells().count(), 45);
        assert_eq!(g.rows().count(), 5);
        for y in 0..5 {
            for x in 0..9 {
                let cell = g.cell(x, y);
                assert_eq!(cell.coordinates, Coord::new(x, y));
                assert!(cell.field_hidden && cell.crop_hidden);
                assert!(cell.group_id.is_none());
            }
        }
    }

    #[test]
    fn test_copy_with_cell_changes_one_cell() {
        let g = Grid::empty(5, 5);
        let updated = planted(&g, 3, 1, 0, Terrain::Forest, Crop::One);
        assert_eq!(updated.cell(3, 1).group_id, Some(0));
        assert!(g.cell(3, 1).group_id.is_none());
        let differing = g
            .cells()
            .zip(updated.cells())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(differing, 1);
    }

    #[test]
    #[should_panic]
    fn test_copy_with_cell_out_of_bounds_panics() {
        let g = Grid::empty(2, 2);
        g.copy_with_cell(Cell::empty(Coord::new(2, 0)));
    }

    #[test]
    fn test_board_coordinates() {
        let g = Grid::empty(3, 2);
        let coords = g.board_coordinates();
        assert_eq!(coords.len(), 6);
        assert!(coords.has(&Coord::new(2, 1)));
    }

    #[test]
    fn test_hash_stable_and_sensitive() {
        let a = planted(&Grid::empty(5, 5), 1, 1, 0, Terrain::Valley, Crop::One);
        let b = planted(&Grid::empty(5, 5), 1, 1, 0, Terrain::Valley, Crop::One);
        assert_eq!(a.hash(), b.hash());

        let other_terrain = planted(&Grid::empty(5, 5), 1, 1, 0, Terrain::Forest, Crop::One);
        assert_ne!(a.hash(), other_terrain.hash());

        let other_crop = planted(&Grid::empty(5, 5), 1, 1, 0, Terrain::Valley, Crop::Two);
        assert_ne!(a.hash(), other_crop.hash());

        let revealed = a.copy_with_cell(a.cell(4, 4).copy_with(CellPatch::new().field_hidden(false)));
        assert_ne!(a.hash(), revealed.hash());

        // group ids 1 and 11 must not collide with neighboring tokens
        let g1 = planted(&Grid::empty(2, 1), 0, 0, 1, Terrain::Desert, Crop::One);
        let g11 = planted(&Grid::empty(2, 1), 0, 0, 11, Terrain::Desert, Crop::One);
        assert_ne!(g1.hash(), g11.hash());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let g = planted(&Grid::empty(4, 3), 2, 1, 5, Terrain::Mountain, Crop::Three);
        let serialized = g.serialize();
        assert_eq!(serialized.len(), 3);
        assert_eq!(serialized[0].len(), 4);
        let back = Grid::deserialize(&serialized).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.serialize(), serialized);
    }

    #[test]
    fn test_deserialize_rejects_ragged_rows() {
        let mut serialized = Grid::empty(3, 2).serialize();
        serialized[1].pop();
        assert!(matches!(
            Grid::deserialize(&serialized),
            Err(BoardError::RaggedRow { row: 1, expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_deserialize_rejects_misplaced_coordinates() {
        let mut serialized = Grid::empty(3, 2).serialize();
        serialized[0].swap(0, 1);
        assert!(matches!(
            Grid::deserialize(&serialized),
            Err(BoardError::CoordinateMismatch { row: 0, column: 0, .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(matches!(Grid::deserialize(&Vec::new()), Err(BoardError::EmptyBoard)));
        assert!(matches!(Grid::deserialize(&vec![Vec::new()]), Err(BoardError::EmptyBoard)));
    }

    #[test]
    fn test_fully_partitioned_and_complete() {
        let mut g = Grid::empty(2, 1);
        assert!(!g.is_fully_partitioned());
        g = planted(&g, 0, 0, 0, Terrain::Forest, Crop::One);
        g = g.copy_with_cell(g.cell(1, 0).copy_with(
            CellPatch::new().group_id(Some(0)).terrain(Some(Terrain::Forest)),
        ));
        assert!(g.is_fully_partitioned());
        assert!(!g.is_complete());
        g = g.copy_with_cell(g.cell(1, 0).copy_with(CellPatch::new().crop(Some(Crop::Two))));
        assert!(g.is_complete());
    }

    #[test]
    fn test_hash_encoding() {
        let g = planted(&Grid::empty(2, 1), 1, 0, 12, Terrain::Valley, Crop::Four);
        assert_eq!(g.hash(), "2x1|_:_:_:hh|12:valley:4:hh");
    }

    #[test]
    fn test_zero_width_grid_serializes_to_nothing() {
        let g = Grid::empty(0, 3);
        assert_eq!(g.rows().count(), 0);
        assert!(g.serialize().is_empty());
    }
}
