//! **perfect_maze** generates perfect rectangular mazes with an entry and an exit on the outer
//! wall, and answers distance and path queries over them.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod units;
pub mod utils;

pub use crate::cells::{CellRecord, CellType, Direction, Position, Walls};
pub use crate::maze::{Maze, MazeBuilder};
