use rand::{Rng, seq::IndexedRandom};

use crate::generators::MazeRng;
use crate::maze::{Grid, Maze, get_neighbors};

/// Adds the unvisited neighbors of `node` to the frontier, once each.
fn mark_frontiers(
    node: (u16, u16),
    maze: &Maze,
    frontiers: &mut Vec<(u16, u16)>,
    in_frontier: &mut Grid<bool>,
) {
    for neighbor in get_neighbors(node, maze) {
        if !maze.is_node_open(neighbor) && !in_frontier[neighbor] {
            in_frontier[neighbor] = true;
            frontiers.push(neighbor);
        }
    }
}

pub fn randomized_prim(maze: &mut Maze, rng: &mut MazeRng) {
    // Initialize the starting point
    let start: (u16, u16) = (
        rng.random_range(0..maze.lattice_width()),
        rng.random_range(0..maze.lattice_height()),
    );
    maze.open_node(start);

    // Frontier nodes are kept in a Vec so picking one at random only depends on the RNG
    let mut in_frontier = Grid::new(maze.lattice_width(), maze.lattice_height(), false);
    let mut frontiers = Vec::new();
    mark_frontiers(start, maze, &mut frontiers, &mut in_frontier);

    while !frontiers.is_empty() {
        // Randomly select a node from the frontiers
        let idx = rng.random_range(0..frontiers.len());
        let frontier = frontiers.swap_remove(idx);

        // Frontier nodes always touch at least one node of the maze
        let open_neighbors = get_neighbors(frontier, maze)
            .filter(|&n| maze.is_node_open(n))
            .collect::<Vec<_>>();

        if let Some(&neighbor) = open_neighbors.choose(rng) {
            // Carve a passage between the frontier and the neighbor
            maze.carve_between(frontier, neighbor);
            mark_frontiers(frontier, maze, &mut frontiers, &mut in_frontier);
        }
    }
}
