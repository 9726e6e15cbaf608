//! Cells and the closed enums they carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::BoardError;
use crate::rng::BoardRng;

/// The terrain ("field") of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Forest,
    Desert,
    Mountain,
    Valley,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [
        Terrain::Forest,
        Terrain::Desert,
        Terrain::Mountain,
        Terrain::Valley,
    ];

    /// A uniformly random terrain.
    pub fn random(rng: &mut BoardRng) -> Terrain {
        Self::ALL[rng.gen_range(Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Forest => "forest",
            Terrain::Desert => "desert",
            Terrain::Mountain => "mountain",
            Terrain::Valley => "valley",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The numbered marker planted in a cell, 1 through 5.
///
/// Serialized as a bare integer; anything outside 1..=5 is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Crop {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Crop {
    /// The largest crop, which is also the largest group size.
    pub const MAX: u8 = 5;

    pub const ALL: [Crop; 5] = [Crop::One, Crop::Two, Crop::Three, Crop::Four, Crop::Five];

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Crop {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Crop::One),
            2 => Ok(Crop::Two),
            3 => Ok(Crop::Three),
            4 => Ok(Crop::Four),
            5 => Ok(Crop::Five),
            other => Err(BoardError::InvalidCrop(other)),
        }
    }
}

impl From<Crop> for u8 {
    fn from(crop: Crop) -> u8 {
        crop.value()
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One square of the board.
///
/// Cells are values: updates go through [`Cell::copy_with`] and never mutate
/// the original.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub group_id: Option<u32>,
    pub coordinates: Coord,
    pub terrain: Option<Terrain>,
    pub crop: Option<Crop>,
    pub field_hidden: bool,
    pub crop_hidden: bool,
}

impl Cell {
    /// An unassigned cell with both field and crop hidden.
    pub fn empty(coordinates: Coord) -> Self {
        Self {
            group_id: None,
            coordinates,
            terrain: None,
            crop: None,
            field_hidden: true,
            crop_hidden: true,
        }
    }

    /// True once group, terrain and crop are all set.
    pub fn is_complete(&self) -> bool {
        self.group_id.is_some() && self.terrain.is_some() && self.crop.is_some()
    }

    /// Apply `patch` to a copy of this cell. Coordinates never change.
    pub fn copy_with(&self, patch: CellPatch) -> Cell {
        Cell {
            group_id: patch.group_id.unwrap_or(self.group_id),
            coordinates: self.coordinates,
            terrain: patch.terrain.unwrap_or(self.terrain),
            crop: patch.crop.unwrap_or(self.crop),
            field_hidden: patch.field_hidden.unwrap_or(self.field_hidden),
            crop_hidden: patch.crop_hidden.unwrap_or(self.crop_hidden),
        }
    }
}

/// A partial update for a [`Cell`].
///
/// The outer `Option` tells whether the field is part of the update, the inner
/// one is the new value, so a field can be explicitly reset to unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellPatch {
    group_id: Option<Option<u32>>,
    terrain: Option<Option<Terrain>>,
    crop: Option<Option<Crop>>,
    field_hidden: Option<bool>,
    crop_hidden: Option<bool>,
}

impl CellPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_id(mut self, group_id: Option<u32>) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn terrain(mut self, terrain: Option<Terrain>) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn crop(mut self, crop: Option<Crop>) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn field_hidden(mut self, hidden: bool) -> Self {
        self.field_hidden = Some(hidden);
        self
    }

    pub fn crop_hidden(mut self, hidden: bool) -> Self {
        self.crop_hidden = Some(hidden);
        self
    }
}
