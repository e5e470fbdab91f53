use itertools::iproduct;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{Direction, Position, WallMask, ALL_DIRECTIONS};
use crate::errors::{ErrorKind, Result};
use crate::units::{EdgesCount, Height, NodesCount, Width};

pub type NeighbourSmallVec = SmallVec<[(Direction, Position); 4]>;
pub type PositionSmallVec = SmallVec<[Position; 4]>;

/// Dense `height x width` wall state, stored row major with `x` as the outer index.
#[derive(Clone, Eq, PartialEq)]
pub struct WallGrid {
    width: Width,
    height: Height,
    walls: Vec<WallMask>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveError {
    InvalidGridCoordinate,
    NoNeighbour,
}

impl fmt::Debug for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WallGrid :: width: {:?}, height: {:?}, interior openings: {:?}",
               self.width, self.height, self.interior_openings())
    }
}

impl WallGrid {
    /// A fully walled grid.
    pub fn new(width: Width, height: Height) -> Result<WallGrid> {
        let (Width(w), Height(h)) = (width, height);

        let representable = w > 0 && h > 0 && w <= u32::MAX as usize && h <= u32::MAX as usize;
        let cells_count = if representable { w.checked_mul(h) } else { None };

        match cells_count {
            Some(count) => Ok(WallGrid {
                width,
                height,
                walls: vec![WallMask::CLOSED; count],
            }),
            None => Err(ErrorKind::InvalidDimensions(w, h).into()),
        }
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.walls.len())
    }

    #[inline]
    pub fn is_valid_position(&self, pos: Position) -> bool {
        (pos.x as usize) < self.height.0 && (pos.y as usize) < self.width.0
    }

    /// Convert a position to its row major index in the range 0..grid.size().
    /// Returns None if the position is outside the grid.
    #[inline]
    pub fn position_to_index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.x as usize * self.width.0 + pos.y as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn wall_mask(&self, pos: Position) -> Option<WallMask> {
        self.position_to_index(pos).map(|index| self.walls[index])
    }

    /// Positions in row major order, `x` outer and `y` inner.
    pub fn iter(&self) -> impl Iterator<Item = Position> {
        let (Width(w), Height(h)) = (self.width, self.height);
        iproduct!(0..h as u32, 0..w as u32).map(|(x, y)| Position::new(x, y))
    }

    pub fn neighbour_at_direction(&self, pos: Position, dir: Direction) -> Option<Position> {
        if !self.is_valid_position(pos) {
            return None;
        }
        let (dx, dy) = dir.offset();
        let x = i64::from(pos.x) + dx;
        let y = i64::from(pos.y) + dy;
        if x < 0 || y < 0 {
            return None;
        }
        let neighbour = Position::new(x as u32, y as u32);
        if self.is_valid_position(neighbour) {
            Some(neighbour)
        } else {
            None
        }
    }

    /// In-grid neighbours, in LEFT, RIGHT, UP, BOTTOM order, whether or not a passage joins them.
    pub fn neighbours(&self, pos: Position) -> NeighbourSmallVec {
        ALL_DIRECTIONS.iter()
            .filter_map(|&dir| self.neighbour_at_direction(pos, dir).map(|n| (dir, n)))
            .collect()
    }

    /// Remove the wall between `pos` and its neighbour at `dir` on both cells.
    pub fn carve(&mut self, pos: Position, dir: Direction) -> std::result::Result<(), CarveError> {
        let index = self.position_to_index(pos).ok_or(CarveError::InvalidGridCoordinate)?;
        let neighbour = self.neighbour_at_direction(pos, dir).ok_or(CarveError::NoNeighbour)?;
        let neighbour_index = self.position_to_index(neighbour)
            .ok_or(CarveError::InvalidGridCoordinate)?;

        self.walls[index].remove(dir);
        self.walls[neighbour_index].remove(dir.opposite());
        Ok(())
    }

    /// Which boundary edge a position lies on, checked LEFT, RIGHT, UP then BOTTOM.
    /// Interior and out of grid positions have no edge.
    pub fn edge_of(&self, pos: Position) -> Option<Direction> {
        if !self.is_valid_position(pos) {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x == 0 {
            Some(Direction::Left)
        } else if x == self.height.0 - 1 {
            Some(Direction::Right)
        } else if y == 0 {
            Some(Direction::Up)
        } else if y == self.width.0 - 1 {
            Some(Direction::Bottom)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_on_boundary(&self, pos: Position) -> bool {
        self.edge_of(pos).is_some()
    }

    /// Open the outward wall of a boundary cell. Returns the side that was opened.
    pub fn punch(&mut self, pos: Position) -> Option<Direction> {
        let edge = self.edge_of(pos)?;
        let index = self.position_to_index(pos)?;
        self.walls[index].remove(edge);
        Some(edge)
    }

    /// Open on this side of `pos` and on the matching side of the neighbour.
    pub fn is_passage(&self, pos: Position, dir: Direction) -> bool {
        match (self.wall_mask(pos), self.neighbour_at_direction(pos, dir)) {
            (Some(mask), Some(neighbour)) => {
                !mask.has_wall(dir) &&
                self.wall_mask(neighbour).map_or(false, |n| !n.has_wall(dir.opposite()))
            }
            _ => false,
        }
    }

    /// Neighbours reachable from `pos` through an opening.
    pub fn passages(&self, pos: Position) -> PositionSmallVec {
        self.neighbours(pos)
            .into_iter()
            .filter(|&(dir, _)| self.is_passage(pos, dir))
            .map(|(_, neighbour)| neighbour)
            .collect()
    }

    /// Count of carved walls between adjacent cells. Boundary punches are not counted.
    pub fn interior_openings(&self) -> EdgesCount {
        let count = self.iter()
            .map(|pos| {
                [Direction::Right, Direction::Bottom]
                    .iter()
                    .filter(|&&dir| self.is_passage(pos, dir))
                    .count()
            })
            .sum();
        EdgesCount(count)
    }
}
