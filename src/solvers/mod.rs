pub mod bfs;

use serde::{Deserialize, Serialize};

pub use bfs::{PathGraph, SearchTree, shortest_path};

use crate::maze::{Coord, Grid, MazeSize};

/// Endpoints of a path query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start: Coord,
    pub end: Coord,
}

impl PathRequest {
    pub fn new(start: Coord, end: Coord) -> Self {
        PathRequest { start, end }
    }

    /// From the top-left corner to the bottom-right corner of `size`.
    pub fn corner_to_corner(size: MazeSize) -> Self {
        PathRequest {
            start: Coord::new(0, 0),
            end: Coord::new(size.width() - 1, size.height() - 1),
        }
    }

    /// Both endpoints clamped into the grid.
    pub fn clamp_to(self, size: MazeSize) -> Self {
        PathRequest {
            start: self.start.clamp_to(size),
            end: self.end.clamp_to(size),
        }
    }
}

/// A shortest path laid over the maze grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// `true` for every cell on the path.
    pub grid: Grid<bool>,
    /// Cells from start to end.
    pub cells: Vec<Coord>,
    /// Number of cells on the path, both endpoints included; 0 if unreachable.
    pub length: usize,
}

impl Path {
    /// The empty result for endpoints with no path between them.
    pub fn unreachable(width: u16, height: u16) -> Self {
        Path {
            grid: Grid::new(width, height, false),
            cells: Vec::new(),
            length: 0,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.length > 0
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.grid.is_in_bounds(coord.into()) && self.grid[coord.into()]
    }
}
