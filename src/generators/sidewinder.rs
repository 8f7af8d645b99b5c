use crate::{generators::MazeRng, maze::Maze};
use rand::Rng;

/// Carves row by row. The top row is one east-west corridor; on every other
/// row a run of nodes grows east until it is closed by a single passage north
/// from one of its nodes.
pub fn sidewinder(maze: &mut Maze, rng: &mut MazeRng) {
    let width = maze.lattice_width();

    for y in 0..maze.lattice_height() {
        let mut run_start = 0;
        for x in 0..width {
            maze.open_node((x, y));
            let at_east_edge = x + 1 == width;

            if y == 0 {
                if !at_east_edge {
                    maze.carve_between((x, y), (x + 1, y));
                }
                continue;
            }

            if at_east_edge || rng.random_bool(0.5) {
                let member = rng.random_range(run_start..=x);
                maze.carve_between((member, y), (member, y - 1));
                run_start = x + 1;
            } else {
                maze.carve_between((x, y), (x + 1, y));
            }
        }
    }
}
