//! A perfect maze with an entry and an exit punched through its outer wall.

use rand::Rng;
use std::cmp;
use tracing::debug;

use crate::cells::{CellRecord, CellType, Direction, Position};
use crate::errors::{ErrorKind, Result};
use crate::generators::{self, DEFAULT_MAX_BOUNDARY_ATTEMPTS};
use crate::grid::WallGrid;
use crate::units::{Height, Width};

const DEFAULT_SIDE_LENGTH: usize = 10;
const MIN_LEVEL_SIDE_LENGTH: usize = 3;

/// Square maze side length for a game level. Levels below 3 get the 3x3 floor.
pub fn side_length_for_level(level: u32) -> usize {
    cmp::max(MIN_LEVEL_SIDE_LENGTH, level as usize)
}

/// Generated maze, read only once built. Build another to get a new maze.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: WallGrid,
    entry: Position,
    exit: Position,
}

#[derive(Debug, Clone)]
pub struct MazeBuilder {
    width: Width,
    height: Height,
    entry: Option<Position>,
    exit: Option<Position>,
    max_boundary_attempts: usize,
}

impl Default for MazeBuilder {
    fn default() -> MazeBuilder {
        MazeBuilder::new(Width(DEFAULT_SIDE_LENGTH), Height(DEFAULT_SIDE_LENGTH))
    }
}

impl MazeBuilder {
    pub fn new(width: Width, height: Height) -> MazeBuilder {
        MazeBuilder {
            width,
            height,
            entry: None,
            exit: None,
            max_boundary_attempts: DEFAULT_MAX_BOUNDARY_ATTEMPTS,
        }
    }

    pub fn for_level(level: u32) -> MazeBuilder {
        let side = side_length_for_level(level);
        MazeBuilder::new(Width(side), Height(side))
    }

    pub fn entry(mut self, entry: Position) -> MazeBuilder {
        self.entry = Some(entry);
        self
    }

    pub fn exit(mut self, exit: Position) -> MazeBuilder {
        self.exit = Some(exit);
        self
    }

    pub fn max_boundary_attempts(mut self, attempts: usize) -> MazeBuilder {
        self.max_boundary_attempts = attempts;
        self
    }

    /// Choose the boundary points, carve the maze, then punch the entry and exit.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Maze> {
        let mut grid = WallGrid::new(self.width, self.height)?;

        let entry = self.entry.map(|pos| validate_boundary_point(&grid, pos)).transpose()?;
        let exit = self.exit.map(|pos| validate_boundary_point(&grid, pos)).transpose()?;

        let (entry, exit) = match (entry, exit) {
            (Some(entry), Some(exit)) => {
                if !generators::are_apart(&grid, entry, exit) {
                    return Err(ErrorKind::ConflictingBoundaryPoints(entry.into(), exit.into())
                        .into());
                }
                (entry, exit)
            }
            (Some(entry), None) => {
                let exit = generators::random_edge_position_apart(&grid,
                                                                  entry,
                                                                  self.max_boundary_attempts,
                                                                  rng)?;
                (entry, exit)
            }
            (None, Some(exit)) => {
                let entry = generators::random_edge_position_apart(&grid,
                                                                   exit,
                                                                   self.max_boundary_attempts,
                                                                   rng)?;
                (entry, exit)
            }
            (None, None) => {
                let entry = generators::random_edge_position(&grid, rng);
                let exit = generators::random_edge_position_apart(&grid,
                                                                  entry,
                                                                  self.max_boundary_attempts,
                                                                  rng)?;
                (entry, exit)
            }
        };

        generators::recursive_backtracker(&mut grid, rng);
        grid.punch(entry);
        grid.punch(exit);

        debug!(width = self.width.0,
               height = self.height.0,
               ?entry,
               ?exit,
               "generated maze");

        Ok(Maze { grid, entry, exit })
    }
}

fn validate_boundary_point(grid: &WallGrid, pos: Position) -> Result<Position> {
    if grid.is_on_boundary(pos) {
        Ok(pos)
    } else {
        Err(ErrorKind::InvalidBoundaryPoint(pos.x, pos.y).into())
    }
}

impl Maze {
    /// Random entry and exit on a `width x height` grid.
    pub fn new<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<Maze> {
        MazeBuilder::new(width, height).build(rng)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.grid.height()
    }

    #[inline]
    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    #[inline]
    pub fn entry_position(&self) -> Position {
        self.entry
    }

    #[inline]
    pub fn exit_position(&self) -> Position {
        self.exit
    }

    pub fn cell_type(&self, pos: Position) -> CellType {
        if pos == self.entry {
            CellType::Entry
        } else if pos == self.exit {
            CellType::Exit
        } else {
            CellType::Normal
        }
    }

    pub fn cell(&self, pos: Position) -> Option<CellRecord> {
        self.grid.wall_mask(pos).map(|mask| {
            CellRecord {
                position: pos,
                walls: mask.walls(),
                cell_type: self.cell_type(pos),
            }
        })
    }

    /// Every cell, `x` outer and `y` inner.
    pub fn grid_data(&self) -> Vec<CellRecord> {
        self.grid.iter().filter_map(|pos| self.cell(pos)).collect()
    }

    #[inline]
    pub fn edge_of(&self, pos: Position) -> Option<Direction> {
        self.grid.edge_of(pos)
    }

    #[inline]
    pub fn is_same_edge(&self, a: Position, b: Position) -> bool {
        self.grid.edge_of(a) == self.grid.edge_of(b)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::cells::{WallMask, ALL_DIRECTIONS};
    use crate::pathing::{self, Distances};
    use crate::units::{EdgesCount, NodesCount};
    use crate::utils::seeded_rng;

    fn maze(w: usize, h: usize, seed: u64) -> Maze {
        Maze::new(Width(w), Height(h), &mut seeded_rng(seed)).expect("maze build failed")
    }

    fn expect_error_kind(result: Result<Maze>) -> ErrorKind {
        match result {
            Ok(maze) => panic!("expected an error, built {:?}", maze),
            Err(err) => err.0,
        }
    }

    #[test]
    fn three_by_three_maze() {
        let m = maze(3, 3, 2024);
        let data = m.grid_data();
        assert_eq!(data.len(), 9);
        assert_eq!(m.grid().size(), NodesCount(9));
        assert_eq!(m.grid().interior_openings(), EdgesCount(8));

        let (entry, exit) = (m.entry_position(), m.exit_position());
        assert_ne!(entry, exit);
        assert!(m.edge_of(entry).is_some());
        assert!(m.edge_of(exit).is_some());
        assert!(!m.is_same_edge(entry, exit));

        let distances = Distances::new(m.grid(), entry).unwrap();
        assert!(distances.distance_from_start_to(exit).is_some());
        assert_eq!(distances.reachable_count(), 9);
    }

    #[test]
    fn explicit_entry_and_exit() {
        let entry = Position::new(0, 0);
        let exit = Position::new(2, 2);
        let m = MazeBuilder::new(Width(3), Height(3))
            .entry(entry)
            .exit(exit)
            .build(&mut seeded_rng(8))
            .unwrap();

        assert_eq!(m.entry_position(), entry);
        assert_eq!(m.exit_position(), exit);
        assert_eq!(m.edge_of(entry), Some(Direction::Left));
        assert_eq!(m.edge_of(exit), Some(Direction::Right));

        let entry_cell = m.cell(entry).unwrap();
        let exit_cell = m.cell(exit).unwrap();
        assert!(!entry_cell.walls.left);
        assert!(!exit_cell.walls.right);
        assert_eq!(entry_cell.cell_type, CellType::Entry);
        assert_eq!(exit_cell.cell_type, CellType::Exit);
    }

    #[test]
    fn single_cell_maze_is_degenerate() {
        match expect_error_kind(Maze::new(Width(1), Height(1), &mut seeded_rng(1))) {
            ErrorKind::DegenerateBoundary(attempts) => {
                assert_eq!(attempts, DEFAULT_MAX_BOUNDARY_ATTEMPTS)
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn single_row_maze_is_degenerate() {
        let result = MazeBuilder::new(Width(8), Height(1))
            .max_boundary_attempts(20)
            .build(&mut seeded_rng(3));
        match expect_error_kind(result) {
            ErrorKind::DegenerateBoundary(20) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn single_column_maze_builds() {
        let m = maze(1, 5, 77);
        assert_eq!(m.grid_data().len(), 5);
        assert!(!m.is_same_edge(m.entry_position(), m.exit_position()));
        assert!(pathing::is_fully_connected(m.grid()));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        match expect_error_kind(Maze::new(Width(0), Height(4), &mut seeded_rng(1))) {
            ErrorKind::InvalidDimensions(0, 4) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn interior_entry_is_rejected() {
        let result = MazeBuilder::new(Width(5), Height(5))
            .entry(Position::new(2, 2))
            .build(&mut seeded_rng(1));
        match expect_error_kind(result) {
            ErrorKind::InvalidBoundaryPoint(2, 2) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn out_of_grid_exit_is_rejected() {
        let result = MazeBuilder::new(Width(5), Height(5))
            .exit(Position::new(5, 0))
            .build(&mut seeded_rng(1));
        match expect_error_kind(result) {
            ErrorKind::InvalidBoundaryPoint(5, 0) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn same_edge_points_conflict() {
        let result = MazeBuilder::new(Width(5), Height(5))
            .entry(Position::new(0, 1))
            .exit(Position::new(0, 3))
            .build(&mut seeded_rng(1));
        match expect_error_kind(result) {
            ErrorKind::ConflictingBoundaryPoints((0, 1), (0, 3)) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn explicit_exit_gets_an_entry_elsewhere() {
        let exit = Position::new(4, 2);
        for seed in 0..20 {
            let m = MazeBuilder::new(Width(5), Height(5))
                .exit(exit)
                .build(&mut seeded_rng(seed))
                .unwrap();
            assert_eq!(m.exit_position(), exit);
            assert!(!m.is_same_edge(m.entry_position(), exit));
        }
    }

    #[test]
    fn explicit_entry_gets_an_exit_elsewhere() {
        let entry = Position::new(3, 0);
        for seed in 0..20 {
            let m = MazeBuilder::new(Width(4), Height(6))
                .entry(entry)
                .build(&mut seeded_rng(seed))
                .unwrap();
            assert_eq!(m.entry_position(), entry);
            assert_ne!(m.edge_of(m.exit_position()), Some(Direction::Up));
        }
    }

    #[test]
    fn grid_data_is_row_major_and_typed() {
        let m = maze(4, 3, 9);
        let data = m.grid_data();
        let positions = data.iter().map(|cell| cell.position).collect::<Vec<_>>();
        assert_eq!(positions, m.grid().iter().collect::<Vec<_>>());
        assert_eq!(positions[1], Position::new(0, 1));

        let entries = data.iter().filter(|c| c.cell_type == CellType::Entry).count();
        let exits = data.iter().filter(|c| c.cell_type == CellType::Exit).count();
        assert_eq!((entries, exits), (1, 1));

        for cell in &data {
            let mask = m.grid().wall_mask(cell.position).unwrap();
            assert_eq!(cell.walls, mask.walls());
        }
        assert_eq!(m.cell(Position::new(3, 0)), None);
    }

    #[test]
    fn default_builder_is_ten_by_ten() {
        let m = MazeBuilder::default().build(&mut seeded_rng(10)).unwrap();
        assert_eq!((m.width(), m.height()), (Width(10), Height(10)));
    }

    #[test]
    fn level_sizes() {
        assert_eq!(side_length_for_level(0), 3);
        assert_eq!(side_length_for_level(1), 3);
        assert_eq!(side_length_for_level(3), 3);
        assert_eq!(side_length_for_level(12), 12);

        let m = MazeBuilder::for_level(5).build(&mut seeded_rng(5)).unwrap();
        assert_eq!((m.width(), m.height()), (Width(5), Height(5)));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = maze(11, 6, 31337);
        let b = maze(11, 6, 31337);
        assert_eq!(a.grid_data(), b.grid_data());
        assert_eq!(a.entry_position(), b.entry_position());
        assert_eq!(a.exit_position(), b.exit_position());
    }

    #[test]
    fn perfect_maze_properties() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 14 + 1, h as usize % 14 + 2);
            let m = match Maze::new(Width(w), Height(h), &mut seeded_rng(seed)) {
                Ok(m) => m,
                Err(_) => return TestResult::failed(),
            };
            let g = m.grid();
            let (entry, exit) = (m.entry_position(), m.exit_position());

            let apart = entry != exit && !m.is_same_edge(entry, exit);

            let punched = [entry, exit].iter().all(|&pos| {
                m.edge_of(pos)
                    .map_or(false, |edge| !g.wall_mask(pos).unwrap().has_wall(edge))
            });

            // only entry and exit may be open towards the outside
            let sealed = g.iter().filter(|&pos| pos != entry && pos != exit).all(|pos| {
                ALL_DIRECTIONS.iter().all(|&dir| {
                    g.neighbour_at_direction(pos, dir).is_some() ||
                    g.wall_mask(pos).map_or(false, |mask: WallMask| mask.has_wall(dir))
                })
            });

            let distances = Distances::new(g, entry).unwrap();

            TestResult::from_bool(apart && punched && sealed &&
                                  g.interior_openings() == EdgesCount(w * h - 1) &&
                                  distances.reachable_count() == w * h &&
                                  distances.distance_from_start_to(exit).is_some())
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
