//! Board coordinates and value-equal coordinate sets.
//!
//! A [`CoordSet`] keeps insertion order so that iteration (and therefore every
//! random draw made from it) is reproducible under a seeded RNG.

use std::collections::HashSet;

use crate::rng::BoardRng;

/// Orthogonal offsets: left, right, above, below.
const ORTHOGONAL_OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Orthogonal offsets followed by the four diagonals.
const ALL_OFFSETS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// An immutable position on the board. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True for the 8 surrounding coordinates (Chebyshev distance 1).
    pub fn is_neighbor_of(&self, other: &Coord) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }

    /// True for the 4 edge-sharing coordinates (Manhattan distance 1).
    pub fn is_orthogonal_neighbor_of(&self, other: &Coord) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Up to 4 neighbors sharing an edge, clipped to the board.
    pub fn orthogonal_neighbors(&self, width: usize, height: usize) -> Vec<Coord> {
        self.offsets(&ORTHOGONAL_OFFSETS, width, height)
    }

    /// Up to 8 neighbors including diagonals, clipped to the board.
    pub fn neighbors(&self, width: usize, height: usize) -> Vec<Coord> {
        self.offsets(&ALL_OFFSETS, width, height)
    }

    fn offsets(&self, offsets: &[(i64, i64)], width: usize, height: usize) -> Vec<Coord> {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = self.x as i64 + dx;
                let ny = self.y as i64 + dy;
                if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
                    Some(Coord::new(nx as usize, ny as usize))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// An immutable set of coordinates compared by value.
///
/// Every operation returns a new set and leaves the receiver untouched.
#[derive(Clone, Debug, Default)]
pub struct CoordSet {
    order: Vec<Coord>,
    members: HashSet<Coord>,
}

impl CoordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn has(&self, coord: &Coord) -> bool {
        self.members.contains(coord)
    }

    /// The first coordinate in iteration order.
    pub fn first(&self) -> Option<Coord> {
        self.order.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.order.iter()
    }

    pub fn to_vec(&self) -> Vec<Coord> {
        self.order.clone()
    }

    pub fn with_coord(&self, coord: Coord) -> CoordSet {
        let mut copy = self.clone();
        copy.insert(coord);
        copy
    }

    pub fn without_coord(&self, coord: &Coord) -> CoordSet {
        if !self.has(coord) {
            return self.clone();
        }
        self.filter(|c| c != coord)
    }

    pub fn union(&self, other: &CoordSet) -> CoordSet {
        let mut copy = self.clone();
        for &coord in other.iter() {
            copy.insert(coord);
        }
        copy
    }

    pub fn difference(&self, other: &CoordSet) -> CoordSet {
        self.filter(|c| !other.has(c))
    }

    pub fn filter<F>(&self, mut predicate: F) -> CoordSet
    where
        F: FnMut(&Coord) -> bool,
    {
        self.order.iter().copied().filter(|c| predicate(c)).collect()
    }

    pub fn flat_map<F, I>(&self, f: F) -> CoordSet
    where
        F: FnMut(&Coord) -> I,
        I: IntoIterator<Item = Coord>,
    {
        self.order.iter().flat_map(f).collect()
    }

    /// A copy whose iteration order is a Fisher–Yates shuffle of this one.
    pub fn copy_shuffled(&self, rng: &mut BoardRng) -> CoordSet {
        rng.shuffled_copy(&self.order).into_iter().collect()
    }

    fn insert(&mut self, coord: Coord) {
        if self.members.insert(coord) {
            self.order.push(coord);
        }
    }
}

impl PartialEq for CoordSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for CoordSet {}

impl FromIterator<Coord> for CoordSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut set = CoordSet::new();
        for coord in iter {
            set.insert(coord);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CoordSet {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(coords: &[(usize, usize)]) -> CoordSet {
        coords.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    #[test]
    fn test_neighbor_predicates() {
        let c = Coord::new(2, 2);
        assert!(c.is_neighbor_of(&Coord::new(1, 1)));
        assert!(c.is_neighbor_of(&Coord::new(2, 3)));
        assert!(!c.is_neighbor_of(&c));
        assert!(!c.is_neighbor_of(&Coord::new(4, 2)));

        assert!(c.is_orthogonal_neighbor_of(&Coord::new(2, 1)));
        assert!(c.is_orthogonal_neighbor_of(&Coord::new(3, 2)));
        assert!(!c.is_orthogonal_neighbor_of(&Coord::new(3, 3)));
        assert!(!c.is_orthogonal_neighbor_of(&c));
    }

    #[test]
    fn test_neighbors_corners_and_edges() {
        // Corner (0,0) should have 3 neighbors, 2 orthogonal
        assert_eq!(Coord::new(0, 0).neighbors(5, 5).len(), 3);
        assert_eq!(Coord::new(0, 0).orthogonal_neighbors(5, 5).len(), 2);
        // Edge (0,2) should have 5 neighbors, 3 orthogonal
        assert_eq!(Coord::new(0, 2).neighbors(5, 5).len(), 5);
        assert_eq!(Coord::new(0, 2).orthogonal_neighbors(5, 5).len(), 3);
        // Center (2,2) should have 8 neighbors, 4 orthogonal
        assert_eq!(Coord::new(2, 2).neighbors(5, 5).len(), 8);
        assert_eq!(Coord::new(2, 2).orthogonal_neighbors(5, 5).len(), 4);
        // Far corner on a wide board
        assert_eq!(Coord::new(8, 4).neighbors(9, 5).len(), 3);
    }

    #[test]
    fn test_neighbors_deterministic_order() {
        let c = Coord::new(1, 1);
        assert_eq!(c.neighbors(3, 3), c.neighbors(3, 3));
        assert_eq!(
            c.orthogonal_neighbors(3, 3),
            vec![Coord::new(0, 1), Coord::new(2, 1), Coord::new(1, 0), Coord::new(1, 2)]
        );
        for n in c.neighbors(3, 3) {
            assert!(c.is_neighbor_of(&n));
        }
    }

    #[test]
    fn test_coord_set_dedupes_by_value() {
        let s = set(&[(1, 1), (1, 1), (2, 3)]);
        assert_eq!(s.len(), 2);
        assert!(s.has(&Coord::new(2, 3)));
        let same = s.with_coord(Coord::new(1, 1));
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn test_coord_set_is_immutable() {
        let s = set(&[(0, 0), (1, 0)]);
        let added = s.with_coord(Coord::new(4, 4));
        let removed = s.without_coord(&Coord::new(0, 0));
        assert_eq!(s.len(), 2);
        assert_eq!(added.len(), 3);
        assert_eq!(removed.to_vec(), vec![Coord::new(1, 0)]);
    }

    #[test]
    fn test_union_and_difference() {
        let a = set(&[(0, 0), (1, 0), (2, 0)]);
        let b = set(&[(2, 0), (3, 0)]);
        assert_eq!(a.union(&b), set(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
        assert_eq!(a.difference(&b), set(&[(0, 0), (1, 0)]));
        assert_eq!(b.difference(&a), set(&[(3, 0)]));
    }

    #[test]
    fn test_filter_and_flat_map() {
        let s = set(&[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(s.filter(|c| c.x > 0), set(&[(1, 1), (2, 2)]));
        let neighbors = set(&[(0, 0)]).flat_map(|c| c.orthogonal_neighbors(3, 3));
        assert_eq!(neighbors, set(&[(1, 0), (0, 1)]));
    }

    #[test]
    fn test_copy_shuffled_keeps_members() {
        let mut rng = BoardRng::from_seed(3);
        let s: CoordSet = (0..5).flat_map(|x| (0..5).map(move |y| Coord::new(x, y))).collect();
        let shuffled = s.copy_shuffled(&mut rng);
        assert_eq!(shuffled, s);
        assert_eq!(shuffled.len(), 25);
    }

    #[test]
    fn test_first_follows_insertion_order() {
        let s = set(&[(3, 1), (0, 0)]);
        assert_eq!(s.first(), Some(Coord::new(3, 1)));
        assert_eq!(CoordSet::new().first(), None);
    }
}
