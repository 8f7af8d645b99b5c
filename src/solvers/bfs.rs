use std::collections::VecDeque;

use super::Path;
use crate::maze::{Coord, Grid, Maze};

/// Adjacency list over every grid cell, indexed row-major (`y * width + x`).
///
/// Two cells share an edge when they are 4-neighbors and both passable;
/// walls are isolated vertices.
#[derive(Debug, Clone)]
pub struct PathGraph {
    adjacency: Vec<Vec<usize>>,
    passable: Vec<bool>,
    width: u16,
    height: u16,
}

impl PathGraph {
    pub fn new(maze: &Maze) -> Self {
        let (width, height) = (maze.width(), maze.height());
        let row = width as usize;
        let mut adjacency = Vec::with_capacity(row * height as usize);
        let mut passable = Vec::with_capacity(row * height as usize);

        for y in 0..height {
            for x in 0..width {
                let vertex = y as usize * row + x as usize;
                let is_open = maze.is_passable((x, y));
                passable.push(is_open);
                if !is_open {
                    adjacency.push(Vec::new());
                    continue;
                }

                // West, east, north, south; `is_passable` rejects wrapped coordinates
                let edges = [
                    (x.wrapping_sub(1), y, vertex.wrapping_sub(1)),
                    (x + 1, y, vertex + 1),
                    (x, y.wrapping_sub(1), vertex.wrapping_sub(row)),
                    (x, y + 1, vertex + row),
                ]
                .into_iter()
                .filter(|&(nx, ny, _)| maze.is_passable((nx, ny)))
                .map(|(_, _, neighbor)| neighbor)
                .collect();
                adjacency.push(edges);
            }
        }

        PathGraph {
            adjacency,
            passable,
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn vertex_index(&self, coord: Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    pub fn coord_of(&self, vertex: usize) -> Coord {
        let row = self.width as usize;
        Coord::new((vertex % row) as u16, (vertex / row) as u16)
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Breadth-first search from `start`, which must be inside the grid.
    pub fn search(&self, start: Coord) -> SearchTree {
        debug_assert!(start.x < self.width && start.y < self.height);
        let count = self.vertex_count();
        let mut tree = SearchTree {
            visited: vec![false; count],
            parents: vec![None; count],
            distances: vec![0; count],
        };

        let start = self.vertex_index(start);
        let mut queue = VecDeque::from([start]);
        tree.visited[start] = true;
        while let Some(vertex) = queue.pop_front() {
            for &adjacent in &self.adjacency[vertex] {
                if !tree.visited[adjacent] {
                    tree.visited[adjacent] = true;
                    tree.distances[adjacent] = tree.distances[vertex] + 1;
                    tree.parents[adjacent] = Some(vertex);
                    queue.push_back(adjacent);
                }
            }
        }
        tree
    }

    /// Number of connected regions formed by the passable cells.
    pub fn component_count(&self) -> usize {
        let mut seen = vec![false; self.vertex_count()];
        let mut components = 0;
        for root in 0..self.vertex_count() {
            if !self.passable[root] || seen[root] {
                continue;
            }
            components += 1;
            seen[root] = true;
            let mut stack = vec![root];
            while let Some(vertex) = stack.pop() {
                for &adjacent in &self.adjacency[vertex] {
                    if !seen[adjacent] {
                        seen[adjacent] = true;
                        stack.push(adjacent);
                    }
                }
            }
        }
        components
    }
}

/// Visited flags, BFS-tree parents and distances from the search start.
#[derive(Debug, Clone)]
pub struct SearchTree {
    visited: Vec<bool>,
    parents: Vec<Option<usize>>,
    distances: Vec<usize>,
}

impl SearchTree {
    pub fn is_reached(&self, vertex: usize) -> bool {
        self.visited[vertex]
    }

    /// Edges between the start and `vertex`, if it was reached.
    pub fn distance(&self, vertex: usize) -> Option<usize> {
        self.visited[vertex].then(|| self.distances[vertex])
    }

    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parents[vertex]
    }

    /// Vertices from the start to `vertex`, following parent links.
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        if !self.visited[vertex] {
            return None;
        }
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(parent) = self.parents[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest walkable path from `start` to `end`.
///
/// Endpoints should be passable; callers clamp and check them first. An
/// unreachable `end` is an ordinary outcome: the returned path is empty with
/// length 0. Endpoints outside the grid are never wrapped into another row and
/// have no path.
pub fn shortest_path(maze: &Maze, start: Coord, end: Coord) -> Path {
    if let Some(outside) = [start, end]
        .into_iter()
        .find(|&endpoint| !maze.is_in_bounds(endpoint.into()))
    {
        tracing::warn!("[path] {} is outside the {} grid", outside, maze.size());
        return Path::unreachable(maze.width(), maze.height());
    }
    let graph = PathGraph::new(maze);
    let tree = graph.search(start);
    let end_vertex = graph.vertex_index(end);

    let Some(vertices) = tree.path_to(end_vertex) else {
        tracing::warn!("[path] {} is not reachable from {}", end, start);
        return Path::unreachable(maze.width(), maze.height());
    };

    let mut grid = Grid::new(maze.width(), maze.height(), false);
    let cells = vertices
        .into_iter()
        .map(|vertex| {
            let coord = graph.coord_of(vertex);
            grid.set(coord.into(), true);
            coord
        })
        .collect::<Vec<_>>();
    let length = tree.distances[end_vertex] + 1;
    debug_assert_eq!(length, cells.len());
    tracing::debug!("[path] {} -> {}: {} cells", start, end, length);

    Path {
        grid,
        cells,
        length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeSize;

    fn maze(text: &str) -> Maze {
        text.parse().unwrap()
    }

    #[test]
    fn test_graph_edges() {
        let maze = maze(
            "
            ..#
            .##
            ...
            ",
        );
        let graph = PathGraph::new(&maze);
        assert_eq!(graph.vertex_count(), 9);
        assert_eq!(graph.neighbors(0), &[1, 3]);
        assert_eq!(graph.neighbors(2), &[] as &[usize]);
        assert_eq!(graph.neighbors(6), &[7, 3]);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.coord_of(7), Coord::new(1, 2));
        assert_eq!(graph.vertex_index(Coord::new(1, 2)), 7);
    }

    #[test]
    fn test_single_corridor() {
        let maze = maze(
            "
            .....
            ####.
            .....
            .####
            .....
            ",
        );
        let path = shortest_path(&maze, Coord::new(0, 0), Coord::new(4, 4));
        assert_eq!(path.length, 17);
        assert_eq!(path.cells.len(), 17);
        assert_eq!(path.cells.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.cells.last(), Some(&Coord::new(4, 4)));
        // The corridor is the only open area, so the path covers every passable cell
        assert_eq!(path.grid.map(crate::maze::GridCell::from), *maze.grid());
        // Consecutive cells are 4-neighbors
        assert!(
            path.cells
                .windows(2)
                .all(|w| w[0].x.abs_diff(w[1].x) + w[0].y.abs_diff(w[1].y) == 1)
        );
    }

    #[test]
    fn test_picks_the_shorter_branch() {
        let maze = maze(
            "
            .....
            .###.
            .....
            ",
        );
        let path = shortest_path(&maze, Coord::new(0, 1), Coord::new(2, 0));
        assert_eq!(path.length, 4);
        assert!(path.contains(Coord::new(0, 0)));
        assert!(!path.contains(Coord::new(0, 2)));
    }

    #[test]
    fn test_unreachable() {
        let maze = maze(
            "
            ..#..
            ..#..
            ..#..
            ..#..
            ..#..
            ",
        );
        let path = shortest_path(&maze, Coord::new(0, 0), Coord::new(4, 4));
        assert!(!path.is_reachable());
        assert_eq!(path.length, 0);
        assert!(path.cells.is_empty());
        assert!(path.grid.cells().iter().all(|&on_path| !on_path));
        assert_eq!(PathGraph::new(&maze).component_count(), 2);
    }

    #[test]
    fn test_same_cell() {
        let maze = Maze::from_rows(&vec![vec![true; 5]; 5]).unwrap();
        let path = shortest_path(&maze, Coord::new(2, 2), Coord::new(2, 2));
        assert_eq!(path.length, 1);
        assert_eq!(path.cells, vec![Coord::new(2, 2)]);
        assert_eq!(path.grid.cells().iter().filter(|&&on_path| on_path).count(), 1);
        assert!(path.contains(Coord::new(2, 2)));
    }

    #[test]
    fn test_open_grid_distance_is_manhattan() {
        let maze = Maze::from_rows(&vec![vec![true; 7]; 4]).unwrap();
        let graph = PathGraph::new(&maze);
        let tree = graph.search(Coord::new(1, 1));
        assert_eq!(tree.distance(graph.vertex_index(Coord::new(6, 3))), Some(7));
        assert_eq!(tree.parent(graph.vertex_index(Coord::new(1, 1))), None);
        let path = shortest_path(&maze, Coord::new(1, 1), Coord::new(6, 3));
        assert_eq!(path.length, 8);
    }

    #[test]
    fn test_walled_start_reaches_nothing() {
        let maze = maze(
            "
            #..
            ...
            ...
            ",
        );
        let graph = PathGraph::new(&maze);
        let tree = graph.search(Coord::new(0, 0));
        assert!(tree.is_reached(0));
        assert!((1..9).all(|v| !tree.is_reached(v)));
        assert_eq!(graph.component_count(), 1);
        assert_eq!(graph.width(), MazeSize::new(3, 3).unwrap().width());
        assert_eq!(graph.height(), 3);
    }

    #[test]
    fn test_endpoints_outside_the_grid_are_not_wrapped() {
        let maze = Maze::from_rows(&vec![vec![true; 5]; 5]).unwrap();
        let path = shortest_path(&maze, Coord::new(0, 0), Coord::new(5, 0));
        assert!(!path.is_reachable());
        assert!(path.cells.is_empty());
        let path = shortest_path(&maze, Coord::new(0, 7), Coord::new(4, 4));
        assert!(!path.is_reachable());
    }
}
