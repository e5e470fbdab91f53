use std::fmt;

use crate::cells::{Direction, Position};
use crate::grid::PositionSmallVec;
use crate::maze::Maze;
use crate::pathing::Distances;
use crate::units::{Height, Width};
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Position) -> String {
        String::from("   ")
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, pos: Position) -> String {
        if let Some(d) = self.distance_from_start_to(pos) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_positions: FnvHashSet<Position>,
    start: Option<Position>,
    end: Option<Position>,
}
impl PathDisplay {
    pub fn new(path: &[Position]) -> Self {
        let mut on_path_positions = utils::fnv_hashset(path.len());
        on_path_positions.extend(path.iter().cloned());
        PathDisplay {
            on_path_positions,
            start: path.first().cloned(),
            end: path.last().cloned(),
        }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, pos: Position) -> String {
        if self.start == Some(pos) {
            String::from(" S ")
        } else if self.end == Some(pos) {
            String::from(" E ")
        } else if self.on_path_positions.contains(&pos) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_positions: PositionSmallVec,
    end_positions: PositionSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: PositionSmallVec, ends: PositionSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_positions: starts,
            end_positions: ends,
        }
    }

    pub fn for_maze(maze: &Maze) -> StartEndPointsDisplay {
        StartEndPointsDisplay::new(std::iter::once(maze.entry_position()).collect(),
                                   std::iter::once(maze.exit_position()).collect())
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, pos: Position) -> String {
        if self.start_positions.contains(&pos) {
            String::from(" S ")
        } else if self.end_positions.contains(&pos) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Plain text picture of a maze with a cell body overlay.
///
/// `x` is drawn left to right and `y` top to bottom, so LEFT/RIGHT walls come out as `|` and
/// UP/BOTTOM walls as `---`.
pub struct MazeText<'a> {
    maze: &'a Maze,
    display: &'a dyn GridDisplay,
}

impl Maze {
    pub fn display_with<'a>(&'a self, display: &'a dyn GridDisplay) -> MazeText<'a> {
        MazeText {
            maze: self,
            display,
        }
    }
}

impl<'a> fmt::Display for MazeText<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const OPEN_LR_3: &str = "   ";
        const WALL_UD: &str = "|";
        const OPEN_UD: &str = " ";

        let grid = self.maze.grid();
        let (Width(width), Height(height)) = (grid.width(), grid.height());
        let blocked = |x: usize, y: usize, dir: Direction| {
            grid.wall_mask(Position::new(x as u32, y as u32))
                .map_or(true, |mask| mask.has_wall(dir))
        };

        let mut output = String::new();
        for x in 0..height {
            output.push_str(CORNER);
            output.push_str(if blocked(x, 0, Direction::Up) { WALL_LR_3 } else { OPEN_LR_3 });
        }
        output.push_str(CORNER);
        output.push('\n');

        for y in 0..width {
            let mut middle = String::from(if blocked(0, y, Direction::Left) { WALL_UD } else { OPEN_UD });
            let mut bottom = String::new();

            for x in 0..height {
                let body = self.display.render_cell_body(Position::new(x as u32, y as u32));
                middle.push_str(&body);
                middle.push_str(if blocked(x, y, Direction::Right) { WALL_UD } else { OPEN_UD });

                bottom.push_str(CORNER);
                bottom.push_str(if blocked(x, y, Direction::Bottom) { WALL_LR_3 } else { OPEN_LR_3 });
            }
            bottom.push_str(CORNER);

            output.push_str(&middle);
            output.push('\n');
            output.push_str(&bottom);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let start_end = StartEndPointsDisplay::for_maze(self);
        write!(f, "{}", self.display_with(&start_end))
    }
}
