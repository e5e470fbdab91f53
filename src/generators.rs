use bit_set::BitSet;
use rand::Rng;
use tracing::trace;

use crate::cells::Position;
use crate::errors::{ErrorKind, Result};
use crate::grid::{NeighbourSmallVec, WallGrid};
use crate::units::{Height, NodesCount, Width};

/// Retry cap for placing an exit away from the entry's edge.
pub const DEFAULT_MAX_BOUNDARY_ATTEMPTS: usize = 1000;

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// A random walk from (0, 0) that only ever steps to unvisited cells, carving as it goes. When
/// the walk is boxed in it backtracks along its own path until it finds a cell with an
/// unvisited neighbour. It stops when it has backtracked to the start, by which point every
/// cell has been visited exactly once and the carved walls form a spanning tree.
pub fn recursive_backtracker<R: Rng>(grid: &mut WallGrid, rng: &mut R) {
    let NodesCount(cells_count) = grid.size();
    let mut visited = BitSet::with_capacity(cells_count);
    let mut stack: Vec<Position> = Vec::new();

    let mut current = Position::new(0, 0);
    if let Some(index) = grid.position_to_index(current) {
        visited.insert(index);
    } else {
        return;
    }

    loop {
        let unvisited = unvisited_neighbours(grid, current, &visited);

        if !unvisited.is_empty() {
            let (dir, next) = unvisited[rng.gen_range(0..unvisited.len())];
            stack.push(current);

            if let Err(e) = grid.carve(current, dir) {
                debug_assert!(false, "carving to an in-grid neighbour failed: {:?}", e);
            }

            current = next;
            if let Some(index) = grid.position_to_index(current) {
                visited.insert(index);
            }
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            break;
        }
    }
}

fn unvisited_neighbours(grid: &WallGrid, pos: Position, visited: &BitSet) -> NeighbourSmallVec {
    grid.neighbours(pos)
        .into_iter()
        .filter(|&(_, neighbour)| {
            grid.position_to_index(neighbour)
                .map_or(false, |index| !visited.contains(index))
        })
        .collect()
}

/// Pick one of the four edges uniformly, then a uniform offset along that edge.
pub fn random_edge_position<R: Rng>(grid: &WallGrid, rng: &mut R) -> Position {
    let (Width(w), Height(h)) = (grid.width(), grid.height());
    let (w, h) = (w as u32, h as u32);

    match rng.gen_range(0..4) {
        0 => Position::new(0, rng.gen_range(0..w)),
        1 => Position::new(h - 1, rng.gen_range(0..w)),
        2 => Position::new(rng.gen_range(0..h), 0),
        _ => Position::new(rng.gen_range(0..h), w - 1),
    }
}

/// Entry and exit must differ and must not share an edge classification.
pub fn are_apart(grid: &WallGrid, a: Position, b: Position) -> bool {
    a != b && grid.edge_of(a) != grid.edge_of(b)
}

/// Sample boundary positions until one is apart from `other`.
///
/// Fails with `DegenerateBoundary` after `max_attempts` rejections, which is what happens on
/// grids where every boundary cell shares one edge classification (1x1, or a single row).
pub fn random_edge_position_apart<R: Rng>(grid: &WallGrid,
                                          other: Position,
                                          max_attempts: usize,
                                          rng: &mut R)
                                          -> Result<Position> {
    for attempt in 0..max_attempts {
        let candidate = random_edge_position(grid, rng);
        if are_apart(grid, candidate, other) {
            return Ok(candidate);
        }
        trace!(attempt, ?candidate, ?other, "rejected boundary sample");
    }

    Err(ErrorKind::DegenerateBoundary(max_attempts).into())
}
