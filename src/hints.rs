//! Hint selection: which cells start the game already revealed.
//!
//! Hints favour the outer border, then the second ring, then the core.

use log::debug;

use crate::coord::{Coord, CoordSet};
use crate::rng::BoardRng;

/// Draws made before settling for fewer hints than targeted.
pub const HINT_MAX_TRIES: usize = 100;

/// Zone weights, in percent: border, inner ring, core.
const ZONE_WEIGHTS: [u32; 3] = [76, 18, 6];

/// The board split into three concentric zones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardZones {
    /// First and last rows and columns.
    pub border: Vec<Coord>,
    /// Second ring in from the border.
    pub inner_ring: Vec<Coord>,
    /// Everything inside the inner ring.
    pub core: Vec<Coord>,
}

impl BoardZones {
    pub fn new(width: usize, height: usize) -> Self {
        let mut zones = BoardZones {
            border: Vec::new(),
            inner_ring: Vec::new(),
            core: Vec::new(),
        };
        for y in 0..height {
            for x in 0..width {
                let coord = Coord::new(x, y);
                match ring(x, width).min(ring(y, height)) {
                    0 => zones.border.push(coord),
                    1 => zones.inner_ring.push(coord),
                    _ => zones.core.push(coord),
                }
            }
        }
        zones
    }
}

/// Distance of `i` from the nearest edge of `0..len`.
fn ring(i: usize, len: usize) -> usize {
    i.min(len - 1 - i)
}

/// Choose between `min_hints` and `max_hints` coordinates to reveal.
///
/// Best effort: each of at most [`HINT_MAX_TRIES`] draws picks a zone by
/// weight and a coordinate within it, and duplicates are absorbed, so the
/// result may fall short of the target. A `max_hints` below `min_hints` is
/// raised to it.
pub fn select_hints(
    width: usize,
    height: usize,
    min_hints: usize,
    max_hints: usize,
    rng: &mut BoardRng,
) -> CoordSet {
    let target = rng.random_int(min_hints, max_hints.max(min_hints));
    let zones = BoardZones::new(width, height);
    // empty zones must never be drawn
    let weighted: Vec<(&[Coord], u32)> = [&zones.border, &zones.inner_ring, &zones.core]
        .into_iter()
        .zip(ZONE_WEIGHTS)
        .filter(|(zone, _)| !zone.is_empty())
        .map(|(zone, weight)| (zone.as_slice(), weight))
        .collect();

    let mut hints = CoordSet::new();
    let mut tries = 0;
    while hints.len() < target && tries < HINT_MAX_TRIES {
        tries += 1;
        let Some(zone) = rng.weighted_choice(&weighted) else {
            break;
        };
        if let Some(&coord) = rng.pick(zone) {
            hints = hints.with_coord(coord);
        }
    }

    if hints.len() < target {
        debug!("Selected {} hints out of {target} targeted", hints.len());
    }
    hints
}
