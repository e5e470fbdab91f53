use docopt::Docopt;
use error_chain::bail;
use serde_derive::{Deserialize, Serialize};
use perfect_maze::{
    cells::{CellRecord, Position},
    grid_displays::PathDisplay,
    maze::{Maze, MazeBuilder},
    pathing,
    units::{Height, Width},
    utils::seeded_rng,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Maze driver

Usage:
    maze_driver -h | --help
    maze_driver [(--level=<n>|[--width=<w> --height=<h>])] [--seed=<s>] [--entry-x=<ex> --entry-y=<ey>] [--exit-x=<xx> --exit-y=<xy>] [--max-attempts=<n>] [--json | --show-path | --show-distances | --longest-path] [--out=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            Cells along the second (y) axis [default: 10].
    --height=<h>           Cells along the first (x) axis [default: 10].
    --level=<n>            Square maze sized for a game level, never smaller than 3x3.
    --seed=<s>             Seed for a reproducible maze. A random seed is used and logged otherwise.
    --entry-x=<ex>         x coordinate of the entry, which must be on the maze boundary.
    --entry-y=<ey>         y coordinate of the entry.
    --exit-x=<xx>          x coordinate of the exit, which must be on the maze boundary.
    --exit-y=<xy>          y coordinate of the exit.
    --max-attempts=<n>     How many times to resample the entry/exit before giving up, at least 1 [default: 1000].
    --json                 Output the grid data, entry and exit as JSON.
    --show-path            Draw the path from the entry to the exit.
    --show-distances       Draw the distance (hex) from the entry to every cell.
    --longest-path         Draw the longest path in the maze.
    --out=<path>           Output file path. Prints to stdout if not given.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_level: Option<u32>,
    flag_seed: Option<u64>,
    flag_entry_x: Option<u32>,
    flag_entry_y: Option<u32>,
    flag_exit_x: Option<u32>,
    flag_exit_y: Option<u32>,
    flag_max_attempts: usize,
    flag_json: bool,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_longest_path: bool,
    flag_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(perfect_maze::errors::Error, perfect_maze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            JsonFailure(::serde_json::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

/// Shape of the `--json` output.
#[derive(Debug, Serialize)]
struct MazeJson {
    width: usize,
    height: usize,
    entry: Position,
    exit: Position,
    cells: Vec<CellRecord>,
}

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let builder = maze_builder_from_args(&args)?;

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!(seed, "maze rng seeded");

    let maze = builder.build(&mut seeded_rng(seed))?;
    info!(entry = ?maze.entry_position(), exit = ?maze.exit_position(), "maze ready");

    let output = render_maze(&maze, &args)?;

    if args.flag_out.is_empty() {
        print!("{}", output);
    } else {
        write_text_to_file(&output, &args.flag_out)
            .chain_err(|| format!("Failed to write maze to file {}", args.flag_out))?;
    }

    Ok(())
}

fn maze_builder_from_args(maze_args: &MazeArgs) -> Result<MazeBuilder> {
    if maze_args.flag_max_attempts == 0 {
        bail!("--max-attempts must be at least 1");
    }

    let mut builder = if let Some(level) = maze_args.flag_level {
        MazeBuilder::for_level(level)
    } else {
        MazeBuilder::new(Width(maze_args.flag_width), Height(maze_args.flag_height))
    };

    if let Some(entry) = point_from_args("entry", maze_args.flag_entry_x, maze_args.flag_entry_y)? {
        builder = builder.entry(entry);
    }
    if let Some(exit) = point_from_args("exit", maze_args.flag_exit_x, maze_args.flag_exit_y)? {
        builder = builder.exit(exit);
    }

    Ok(builder.max_boundary_attempts(maze_args.flag_max_attempts))
}

fn point_from_args(name: &str, x: Option<u32>, y: Option<u32>) -> Result<Option<Position>> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(Some(Position::new(x, y))),
        (None, None) => Ok(None),
        _ => bail!("--{0}-x and --{0}-y must be given together", name),
    }
}

fn render_maze(maze: &Maze, maze_args: &MazeArgs) -> Result<String> {

    if maze_args.flag_json {
        let data = MazeJson {
            width: maze.width().0,
            height: maze.height().0,
            entry: maze.entry_position(),
            exit: maze.exit_position(),
            cells: maze.grid_data(),
        };
        let mut json = serde_json::to_string_pretty(&data)?;
        json.push('\n');
        return Ok(json);
    }

    if maze_args.flag_show_path || maze_args.flag_show_distances {
        let distances = pathing::Distances::new(maze.grid(), maze.entry_position())
            .ok_or("Maze entry is not a valid grid position.")?;

        if maze_args.flag_show_distances {
            return Ok(format!("{}", maze.display_with(&distances)));
        }

        let path = pathing::shortest_path(maze.grid(), &distances, maze.exit_position())
            .ok_or("No route from the entry to the exit, the maze is not perfect.")?;
        info!(cells = path.len(), "entry to exit path");
        return Ok(format!("{}", maze.display_with(&PathDisplay::new(&path))));
    }

    if maze_args.flag_longest_path {
        let path = pathing::longest_path(maze.grid())
            .ok_or("Could not find the longest path.")?;
        info!(cells = path.len(), "longest path");
        return Ok(format!("{}", maze.display_with(&PathDisplay::new(&path))));
    }

    Ok(format!("{}", maze))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
