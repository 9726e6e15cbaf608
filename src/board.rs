//! The finished game board handed to the player.
//!
//! Built from a complete generation state plus the hint set. Afterwards the
//! only changes are reveals, each a pure single-cell update.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellPatch, Terrain};
use crate::coord::CoordSet;
use crate::error::BoardError;
use crate::grid::Grid;
use crate::serial::{SerializedBoard, SerializedGame};
use crate::state::GenerationState;

/// How many cells of each terrain still have their field hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenFieldCounts {
    pub forest: usize,
    pub desert: usize,
    pub mountain: usize,
    pub valley: usize,
}

impl HiddenFieldCounts {
    pub fn get(&self, terrain: Terrain) -> usize {
        match terrain {
            Terrain::Forest => self.forest,
            Terrain::Desert => self.desert,
            Terrain::Mountain => self.mountain,
            Terrain::Valley => self.valley,
        }
    }

    pub fn total(&self) -> usize {
        self.forest + self.desert + self.mountain + self.valley
    }

    fn increment(&mut self, terrain: Terrain) {
        match terrain {
            Terrain::Forest => self.forest += 1,
            Terrain::Desert => self.desert += 1,
            Terrain::Mountain => self.mountain += 1,
            Terrain::Valley => self.valley += 1,
        }
    }
}

/// A complete board: every cell has group, terrain and crop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameBoard {
    grid: Grid,
}

impl GameBoard {
    /// Build from a complete state. Cells in `hints` start with field and crop
    /// revealed, all others hidden.
    pub fn from_complete_state(state: &GenerationState, hints: &CoordSet) -> Result<Self, BoardError> {
        let mut grid = state.grid().clone();
        for cell in state.grid().cells() {
            ensure_complete(cell)?;
            let hidden = !hints.has(&cell.coordinates);
            grid = grid.copy_with_cell(
                cell.copy_with(CellPatch::new().field_hidden(hidden).crop_hidden(hidden)),
            );
        }
        Ok(Self { grid })
    }

    /// Rebuild from the plain-data form. Incomplete cells are rejected.
    pub fn from_serialized(board: &SerializedBoard) -> Result<Self, BoardError> {
        let grid = Grid::deserialize(board)?;
        for cell in grid.cells() {
            ensure_complete(cell)?;
        }
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, BoardError> {
        if !self.grid.in_bounds(x, y) {
            return Err(BoardError::OutOfBounds { x, y });
        }
        Ok(self.grid.cell(x, y))
    }

    /// A copy with the field of `(x, y)` revealed.
    pub fn reveal_field(&self, x: usize, y: usize) -> Result<GameBoard, BoardError> {
        self.update(x, y, CellPatch::new().field_hidden(false))
    }

    /// A copy with the crop of `(x, y)` revealed.
    pub fn reveal_crop(&self, x: usize, y: usize) -> Result<GameBoard, BoardError> {
        self.update(x, y, CellPatch::new().crop_hidden(false))
    }

    /// Reveal the field of `(x, y)` if it is still hidden, its crop otherwise.
    pub fn reveal_next(&self, x: usize, y: usize) -> Result<GameBoard, BoardError> {
        if self.cell(x, y)?.field_hidden {
            self.reveal_field(x, y)
        } else {
            self.reveal_crop(x, y)
        }
    }

    /// True once nothing is hidden anymore.
    pub fn is_solved(&self) -> bool {
        self.grid
            .cells()
            .all(|cell| !cell.field_hidden && !cell.crop_hidden)
    }

    pub fn hidden_field_counts(&self) -> HiddenFieldCounts {
        let mut counts = HiddenFieldCounts::default();
        for cell in self.grid.cells().filter(|cell| cell.field_hidden) {
            if let Some(terrain) = cell.terrain {
                counts.increment(terrain);
            }
        }
        counts
    }

    pub fn serialize(&self) -> SerializedBoard {
        self.grid.serialize()
    }

    /// The board together with its hidden-field counter.
    pub fn serialize_game(&self) -> SerializedGame {
        SerializedGame {
            board: self.serialize(),
            hidden_fields: self.hidden_field_counts(),
        }
    }

    fn update(&self, x: usize, y: usize, patch: CellPatch) -> Result<GameBoard, BoardError> {
        let cell = self.cell(x, y)?.copy_with(patch);
        Ok(GameBoard {
            grid: self.grid.copy_with_cell(cell),
        })
    }
}

fn ensure_complete(cell: &Cell) -> Result<(), BoardError> {
    if cell.is_complete() {
        Ok(())
    } else {
        Err(BoardError::IncompleteCell {
            x: cell.coordinates.x,
            y: cell.coordinates.y,
        })
    }
}
