use serde_derive::{Deserialize, Serialize};
use std::convert::From;

/// A cell location. `x` runs over the grid height and `y` over the grid width.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }
}

impl From<(u32, u32)> for Position {
    fn from(x_y_pair: (u32, u32)) -> Position {
        Position::new(x_y_pair.0, x_y_pair.1)
    }
}

impl From<Position> for (u32, u32) {
    fn from(pos: Position) -> (u32, u32) {
        (pos.x, pos.y)
    }
}

/// The four sides of a cell.
///
/// LEFT/RIGHT step along the first axis (`x`), UP/BOTTOM along the second (`y`). Renderers
/// consuming the grid data depend on this pairing.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Left,
    Right,
    Up,
    Bottom,
}

/// Neighbour scan order used by the generators.
pub const ALL_DIRECTIONS: [Direction; 4] = [Direction::Left,
                                            Direction::Right,
                                            Direction::Up,
                                            Direction::Bottom];

impl Direction {
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Bottom,
            Direction::Bottom => Direction::Up,
        }
    }

    /// Coordinate delta `(dx, dy)` of the neighbour on this side.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Bottom => (0, 1),
        }
    }

    #[inline]
    fn wall_bit(self) -> u8 {
        match self {
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 4,
            Direction::Bottom => 8,
        }
    }
}

/// Packed wall state of one cell, one bit per side. A set bit is a wall.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallMask(u8);

impl WallMask {
    pub const CLOSED: WallMask = WallMask(0b1111);
    #[cfg(test)]
    pub fn from_bits(bits: u8) -> WallMask {
        WallMask(bits & WallMask::CLOSED.0)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn has_wall(self, dir: Direction) -> bool {
        self.0 & dir.wall_bit() != 0
    }

    #[inline]
    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.wall_bit();
    }

    #[cfg(test)]
    pub fn open_sides(self) -> usize {
        ALL_DIRECTIONS.iter().filter(|&&dir| !self.has_wall(dir)).count()
    }

    pub fn walls(self) -> Walls {
        Walls {
            left: self.has_wall(Direction::Left),
            right: self.has_wall(Direction::Right),
            up: self.has_wall(Direction::Up),
            bottom: self.has_wall(Direction::Bottom),
        }
    }
}

impl Default for WallMask {
    fn default() -> WallMask {
        WallMask::CLOSED
    }
}

/// The four resolved wall flags handed to consumers. `true` means blocked.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Walls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub bottom: bool,
}

impl Walls {
    #[cfg(test)]
    pub fn is_blocked(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Bottom => self.bottom,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CellType {
    Entry,
    Exit,
    Normal,
}

/// One entry of the flattened grid data.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct CellRecord {
    pub position: Position,
    pub walls: Walls,
    #[serde(rename = "type")]
    pub cell_type: CellType,
}
