// Flood fill distances over the passages of a carved grid.
//
// Every step is one from the previous cell so there are no weights to consider: a breadth first
// frontier gives the shortest distance the first time a cell is reached, and the distances map
// doubles as the visited set.

use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::Position;
use crate::grid::WallGrid;
use crate::units::NodesCount;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct Distances {
    start: Position,
    distances: FnvHashMap<Position, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if `start` is not on the grid.
    pub fn new(grid: &WallGrid, start: Position) -> Option<Distances> {
        if !grid.is_valid_position(start) {
            return None;
        }

        let NodesCount(cells_count) = grid.size();
        let mut distances = utils::fnv_hashmap(cells_count);
        distances.insert(start, 0);
        let mut max = 0;

        let mut frontier = vec![start];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for pos in &frontier {
                let distance_to_cell = distances[pos];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for linked in grid.passages(*pos) {
                    if !distances.contains_key(&linked) {
                        distances.insert(linked, distance_to_cell + 1);
                        new_frontier.push(linked);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, pos: Position) -> Option<u32> {
        self.distances.get(&pos).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// All cells at the maximum distance, sorted.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Position; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(pos, _)| *pos)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a
/// linked neighbour one closer. Returns the path start first, or None if `end_point` was
/// never reached.
pub fn shortest_path(grid: &WallGrid,
                     distances_from_start: &Distances,
                     end_point: Position)
                     -> Option<Vec<Position>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current = end_point;

    while current != start {
        let closer = grid.passages(current)
            .into_iter()
            .filter_map(|pos| distances_from_start.distance_from_start_to(pos).map(|d| (pos, d)))
            .min_by_key(|&(_, d)| d);

        match closer {
            Some((closer_pos, closer_distance)) if closer_distance < current_distance => {
                current = closer_pos;
                current_distance = closer_distance;
                path.push(current);
            }
            // Not getting any closer, the distances were computed for some other grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in a perfect maze: the furthest point from an arbitrary start is one end,
/// the furthest point from that is the other.
pub fn longest_path(grid: &WallGrid) -> Option<Vec<Position>> {
    let first_distances = Distances::new(grid, Position::new(0, 0))?;
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

/// Can every cell be reached from (0, 0)?
pub fn is_fully_connected(grid: &WallGrid) -> bool {
    let NodesCount(cells_count) = grid.size();
    Distances::new(grid, Position::new(0, 0))
        .map_or(false, |distances| distances.reachable_count() == cells_count)
}
