//! Groups: same-terrain regions tracked alongside the grid.

use crate::cell::Terrain;
use crate::coord::{Coord, CoordSet};

/// The largest size a group may grow to.
pub const MAX_GROUP_SIZE: usize = 5;

/// An immutable set of coordinates sharing one group id and one terrain.
///
/// The terrain is fixed when the group is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    id: u32,
    terrain: Terrain,
    coords: CoordSet,
}

impl Group {
    pub fn new(id: u32, terrain: Terrain, coords: CoordSet) -> Self {
        Self {
            id,
            terrain,
            coords,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn coords(&self) -> &CoordSet {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn has(&self, coord: &Coord) -> bool {
        self.coords.has(coord)
    }

    /// A copy extended with `coord`; same id and terrain.
    pub fn with_coord(&self, coord: Coord) -> Group {
        Group {
            id: self.id,
            terrain: self.terrain,
            coords: self.coords.with_coord(coord),
        }
    }

    /// The growth frontier: orthogonal neighbors of every member, minus the
    /// members themselves.
    pub fn orthogonal_neighbors(&self, width: usize, height: usize) -> CoordSet {
        self.coords
            .flat_map(|coord| coord.orthogonal_neighbors(width, height))
            .difference(&self.coords)
    }
}
