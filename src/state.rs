//! Generation snapshots: a grid paired with its derived group map.
//!
//! Groups are maintained incrementally. Each [`GenerationState::copy_with_cell`]
//! rebuilds at most the one group the cell belongs to; every other group is
//! shared with the previous snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cell::Cell;
use crate::coord::CoordSet;
use crate::grid::Grid;
use crate::group::Group;
use crate::stack::Snapshot;

#[derive(Clone, Debug)]
pub struct GenerationState {
    grid: Grid,
    groups: BTreeMap<u32, Arc<Group>>,
}

impl GenerationState {
    /// An empty board with no groups.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::empty(width, height),
            groups: BTreeMap::new(),
        }
    }

    /// Rebuild the group map from scratch by scanning `grid`.
    ///
    /// Produces the same groups the incremental updates would have.
    pub fn from_grid(grid: Grid) -> Self {
        let mut groups = BTreeMap::new();
        for cell in grid.cells() {
            update_groups(&mut groups, cell);
        }
        Self { grid, groups }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        self.grid.cell(x, y)
    }

    pub fn group(&self, id: u32) -> Option<&Group> {
        self.groups.get(&id).map(Arc::as_ref)
    }

    /// Groups in ascending id order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values().map(Arc::as_ref)
    }

    pub fn group_ids(&self) -> Vec<u32> {
        self.groups.keys().copied().collect()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// A new snapshot with `cell` replaced and its group updated.
    pub fn copy_with_cell(&self, cell: Cell) -> GenerationState {
        let mut groups = self.groups.clone();
        update_groups(&mut groups, &cell);
        GenerationState {
            grid: self.grid.copy_with_cell(cell),
            groups,
        }
    }

    /// Content key of the grid, see [`Grid::hash`].
    pub fn hash(&self) -> String {
        self.grid.hash()
    }
}

impl Snapshot for GenerationState {
    fn snapshot_hash(&self) -> String {
        self.hash()
    }
}

/// Record `cell` in `groups`: create its group on first sight, extend it
/// otherwise. Cells without a group id or terrain are ignored.
fn update_groups(groups: &mut BTreeMap<u32, Arc<Group>>, cell: &Cell) {
    let Some(group_id) = cell.group_id else {
        return;
    };
    let coord = cell.coordinates;

    let group = match groups.get(&group_id) {
        Some(existing) if existing.has(&coord) => return,
        Some(existing) => existing.with_coord(coord),
        None => match cell.terrain {
            Some(terrain) => Group::new(group_id, terrain, CoordSet::from_iter([coord])),
            None => return,
        },
    };
    groups.insert(group_id, Arc::new(group));
}
