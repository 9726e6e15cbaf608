//! Plain-data board form used across the worker boundary and for storage.
//!
//! Field names follow the JS side (`groupId`, `hiddenField`, ...). Unset
//! values are omitted rather than written as `null`. Terrain is a closed
//! string enum and crop an integer in 1..=5; anything else fails to parse.

use serde::{Deserialize, Serialize};

use crate::board::HiddenFieldCounts;
use crate::cell::{Cell, Crop, Terrain};
use crate::coord::Coord;
use crate::error::BoardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedCoord {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Terrain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    pub coordinates: SerializedCoord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
    pub hidden_field: bool,
    pub hidden_crop: bool,
}

/// `height` rows of `width` cells.
pub type SerializedBoard = Vec<Vec<SerializedCell>>;

/// A serialized board together with its hidden-field counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedGame {
    pub board: SerializedBoard,
    pub hidden_fields: HiddenFieldCounts,
}

impl From<Coord> for SerializedCoord {
    fn from(coord: Coord) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
        }
    }
}

impl From<SerializedCoord> for Coord {
    fn from(coord: SerializedCoord) -> Self {
        Coord::new(coord.x, coord.y)
    }
}

impl From<&Cell> for SerializedCell {
    fn from(cell: &Cell) -> Self {
        Self {
            field: cell.terrain,
            crop: cell.crop,
            coordinates: cell.coordinates.into(),
            group_id: cell.group_id,
            hidden_field: cell.field_hidden,
            hidden_crop: cell.crop_hidden,
        }
    }
}

impl From<&SerializedCell> for Cell {
    fn from(cell: &SerializedCell) -> Self {
        Self {
            group_id: cell.group_id,
            coordinates: cell.coordinates.into(),
            terrain: cell.field,
            crop: cell.crop,
            field_hidden: cell.hidden_field,
            crop_hidden: cell.hidden_crop,
        }
    }
}

/// Encode a serialized board as JSON, for storage.
pub fn to_json(board: &SerializedBoard) -> Result<String, BoardError> {
    Ok(serde_json::to_string(board)?)
}

/// Decode a serialized board from JSON. Unknown terrains and out-of-range
/// crops are rejected.
pub fn from_json(json: &str) -> Result<SerializedBoard, BoardError> {
    Ok(serde_json::from_str(json)?)
}
