use crate::{
    generators::MazeRng,
    maze::{Maze, get_neighbors},
};
use rand::Rng;

pub fn recursive_backtrack(maze: &mut Maze, rng: &mut MazeRng) {
    // Initialize the starting point
    let start: (u16, u16) = (
        rng.random_range(0..maze.lattice_width()),
        rng.random_range(0..maze.lattice_height()),
    );
    maze.open_node(start);

    // The stack will keep only open nodes
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        let neighbors = get_neighbors(node, maze)
            .filter(|&n| !maze.is_node_open(n))
            .collect::<Vec<_>>();

        if !neighbors.is_empty() {
            let neighbor = neighbors[rng.random_range(0..neighbors.len())];
            maze.carve_between(node, neighbor);
            // Put the node back first so we can look at another neighbor of this node later
            stack.push(node);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        }
    }
}
