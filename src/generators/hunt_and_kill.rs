use crate::{
    generators::MazeRng,
    maze::{Maze, get_neighbors},
};
use rand::{Rng, seq::IndexedRandom};

pub fn hunt_and_kill(maze: &mut Maze, rng: &mut MazeRng) {
    let mut current: (u16, u16) = (
        rng.random_range(0..maze.lattice_width()),
        rng.random_range(0..maze.lattice_height()),
    );
    maze.open_node(current);

    // Rows above this one have no unvisited nodes left
    let mut hunt_row = 0;

    loop {
        // Kill: random walk until every neighbor is visited
        loop {
            let unvisited = get_neighbors(current, maze)
                .filter(|&n| !maze.is_node_open(n))
                .collect::<Vec<_>>();
            match unvisited.choose(rng) {
                Some(&next) => {
                    maze.carve_between(current, next);
                    current = next;
                }
                None => break,
            }
        }

        // Hunt: restart the walk from the first unvisited node touching the maze
        match hunt(maze, &mut hunt_row, rng) {
            Some(node) => current = node,
            None => break,
        }
    }
}

/// Scans row-major from `hunt_row` for an unvisited node with a visited
/// neighbor and connects it to one of them at random.
fn hunt(maze: &mut Maze, hunt_row: &mut u16, rng: &mut MazeRng) -> Option<(u16, u16)> {
    for y in *hunt_row..maze.lattice_height() {
        let mut row_done = true;
        for x in 0..maze.lattice_width() {
            if maze.is_node_open((x, y)) {
                continue;
            }
            row_done = false;
            let visited = get_neighbors((x, y), maze)
                .filter(|&n| maze.is_node_open(n))
                .collect::<Vec<_>>();
            if let Some(&neighbor) = visited.choose(rng) {
                maze.carve_between(neighbor, (x, y));
                return Some((x, y));
            }
        }
        if row_done && y == *hunt_row {
            *hunt_row += 1;
        }
    }
    None
}
