use crate::{
    generators::{MazeRng, union_find::UnionFind},
    maze::Maze,
};
use rand::seq::SliceRandom;

/// Wall edge between two adjacent lattice nodes
#[derive(Clone, Copy)]
struct Edge {
    node1: (u16, u16),
    node2: (u16, u16),
}

pub fn randomized_kruskal(maze: &mut Maze, rng: &mut MazeRng) {
    let width = maze.lattice_width();
    let height = maze.lattice_height();

    // Every node is its own tree at the start
    (0..height).for_each(|y| {
        (0..width).for_each(|x| maze.open_node((x, y)));
    });

    let mut uf = UnionFind::new(width as usize * height as usize);

    // Collect all possible edges (walls between adjacent nodes)
    let mut edges: Vec<Edge> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            [
                (x + 1 < width).then(|| Edge {
                    node1: (x, y),
                    node2: (x + 1, y),
                }),
                (y + 1 < height).then(|| Edge {
                    node1: (x, y),
                    node2: (x, y + 1),
                }),
            ]
        })
        .flatten()
        .collect();

    // A uniform shuffle is the same as sorting by independent random weights
    edges.shuffle(rng);

    for edge in edges {
        let (x1, y1) = edge.node1;
        let (x2, y2) = edge.node2;

        // Convert node coordinates to UnionFind indices
        let idx1 = y1 as usize * width as usize + x1 as usize;
        let idx2 = y2 as usize * width as usize + x2 as usize;

        // If nodes are not yet connected, remove the wall between them
        if uf.unite(idx1, idx2) {
            maze.carve_between(edge.node1, edge.node2);
        }
    }
}
