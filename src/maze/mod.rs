pub mod cell;
pub mod grid;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use cell::{GridCell, Tile};
pub use grid::Grid;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Dimensions of a maze grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMazeSize", into = "RawMazeSize")]
pub struct MazeSize {
    width: u16,
    height: u16,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawMazeSize {
    width: u32,
    height: u32,
}

impl MazeSize {
    /// Narrower than this and a maze has no interior topology.
    pub const MIN: u16 = 3;
    pub const MAX: u16 = 9999;

    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        Ok(MazeSize {
            width: Self::check_axis("width", width)?,
            height: Self::check_axis("height", height)?,
        })
    }

    fn check_axis(axis: &'static str, value: u32) -> Result<u16, ConfigError> {
        if (Self::MIN as u32..=Self::MAX as u32).contains(&value) {
            Ok(value as u16)
        } else {
            Err(ConfigError::SizeOutOfRange {
                axis,
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

impl Default for MazeSize {
    fn default() -> Self {
        MazeSize {
            width: 5,
            height: 5,
        }
    }
}

impl TryFrom<RawMazeSize> for MazeSize {
    type Error = ConfigError;

    fn try_from(raw: RawMazeSize) -> Result<Self, Self::Error> {
        MazeSize::new(raw.width, raw.height)
    }
}

impl From<MazeSize> for RawMazeSize {
    fn from(size: MazeSize) -> Self {
        RawMazeSize {
            width: size.width as u32,
            height: size.height as u32,
        }
    }
}

impl fmt::Display for MazeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A grid position; `x` is the column and `y` the row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Coord { x, y }
    }

    /// Clamps each axis into `[0, dimension - 1]` of `size`.
    pub fn clamp_to(self, size: MazeSize) -> Self {
        Coord {
            x: self.x.min(size.width() - 1),
            y: self.y.min(size.height() - 1),
        }
    }
}

impl From<(u16, u16)> for Coord {
    fn from((x, y): (u16, u16)) -> Self {
        Coord { x, y }
    }
}

impl From<Coord> for (u16, u16) {
    fn from(coord: Coord) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A maze grid of passages and walls.
///
/// Generators carve on a half-resolution lattice: node `(i, j)` lives at grid
/// cell `(2i, 2j)` and the cell between two adjacent nodes is the wall that
/// separates them. For an even dimension the trailing column (or row) has no
/// node and stays solid unless post-processing opens it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Maze {
    grid: Grid<GridCell>,
    size: MazeSize,
}

impl Maze {
    /// Creates a maze of the given size with every cell walled.
    pub fn new(size: MazeSize) -> Self {
        Maze {
            grid: Grid::new(size.width(), size.height(), GridCell::Wall),
            size,
        }
    }

    /// Imports a grid given as rows of passable flags.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, ConfigError> {
        let expected = rows.first().ok_or(ConfigError::EmptyGrid)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(ConfigError::RaggedGrid {
                row,
                expected,
                found,
            });
        }
        let size = MazeSize::new(expected as u32, rows.len() as u32)?;
        let data = rows
            .iter()
            .flat_map(|row| row.iter().map(|&passable| GridCell::from(passable)))
            .collect();
        Ok(Maze {
            grid: Grid::from_vec(size.width(), size.height(), data),
            size,
        })
    }

    /// Exports the grid as rows of passable flags.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.grid
            .rows()
            .map(|row| row.iter().map(|cell| cell.is_passable()).collect())
            .collect()
    }

    pub fn size(&self) -> MazeSize {
        self.size
    }

    pub fn height(&self) -> u16 {
        self.size.height()
    }

    pub fn width(&self) -> u16 {
        self.size.width()
    }

    pub fn grid(&self) -> &Grid<GridCell> {
        &self.grid
    }

    pub fn is_in_bounds(&self, coord: (u16, u16)) -> bool {
        self.grid.is_in_bounds(coord)
    }

    /// `false` for walls and for anything out of bounds.
    pub fn is_passable(&self, coord: (u16, u16)) -> bool {
        self.is_in_bounds(coord) && self.grid[coord].is_passable()
    }

    pub fn set(&mut self, coord: (u16, u16), cell: GridCell) {
        self.grid.set(coord, cell);
    }

    pub fn passable_count(&self) -> usize {
        self.grid.cells().iter().filter(|c| c.is_passable()).count()
    }

    /// Number of lattice nodes per row.
    pub fn lattice_width(&self) -> u16 {
        self.width().div_ceil(2)
    }

    /// Number of lattice nodes per column.
    pub fn lattice_height(&self) -> u16 {
        self.height().div_ceil(2)
    }

    pub fn is_node_in_bounds(&self, node: (u16, u16)) -> bool {
        node.0 < self.lattice_width() && node.1 < self.lattice_height()
    }

    /// Grid cell a lattice node sits on.
    pub fn node_cell(node: (u16, u16)) -> (u16, u16) {
        (node.0 * 2, node.1 * 2)
    }

    /// Grid cell separating two adjacent lattice nodes.
    pub fn wall_between(a: (u16, u16), b: (u16, u16)) -> (u16, u16) {
        debug_assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
        (a.0 + b.0, a.1 + b.1)
    }

    pub fn is_node_open(&self, node: (u16, u16)) -> bool {
        self.grid[Self::node_cell(node)].is_passable()
    }

    pub fn open_node(&mut self, node: (u16, u16)) {
        self.grid.set(Self::node_cell(node), GridCell::Path);
    }

    /// Opens both nodes and the wall between them.
    pub fn carve_between(&mut self, a: (u16, u16), b: (u16, u16)) {
        self.open_node(a);
        self.open_node(b);
        self.grid.set(Self::wall_between(a, b), GridCell::Path);
    }

    /// Opens every cell covered by the lattice: the whole grid for odd
    /// dimensions, all but the trailing column/row for even ones.
    pub fn open_lattice(&mut self) {
        let max_x = self.lattice_width() * 2 - 1;
        let max_y = self.lattice_height() * 2 - 1;
        (0..max_y).for_each(|y| {
            (0..max_x).for_each(|x| {
                self.grid.set((x, y), GridCell::Path);
            });
        });
    }

    fn wall_cell_after(&self, from: (u16, u16), orientation: &Orientation) -> (u16, u16) {
        if !self.is_node_in_bounds(from) {
            panic!("The given node {:?} is out of bounds", from);
        }
        match orientation {
            Orientation::Horizontal => {
                if from.1 + 1 >= self.lattice_height() {
                    panic!("Cannot address a wall after the bottommost node");
                }
                Self::wall_between(from, (from.0, from.1 + 1))
            }
            Orientation::Vertical => {
                if from.0 + 1 >= self.lattice_width() {
                    panic!("Cannot address a wall after the rightmost node");
                }
                Self::wall_between(from, (from.0 + 1, from.1))
            }
        }
    }

    /// Removes the wall adjacent to the given node in the specified direction.
    ///
    /// # Arguments
    /// * `from` - The lattice node `(x, y)` to remove a wall from
    /// * `orientation` - The orientation of the wall to remove:
    ///   - `Vertical`: the wall to the right of the node
    ///   - `Horizontal`: the wall below the node
    ///
    /// # Returns
    /// `true` if a wall was removed, `false` if the cell was already open
    ///
    /// # Panics
    /// * If `from` is out of bounds
    /// * If there is no node on the other side of the wall
    pub fn remove_wall_cell_after(&mut self, from: (u16, u16), orientation: Orientation) -> bool {
        let wall_coord = self.wall_cell_after(from, &orientation);
        if self.grid[wall_coord] == GridCell::Wall {
            self.grid.set(wall_coord, GridCell::Path);
            true
        } else {
            false
        }
    }

    pub fn is_wall_cell_after(&self, from: (u16, u16), orientation: Orientation) -> bool {
        let wall_coord = self.wall_cell_after(from, &orientation);
        self.grid[wall_coord] == GridCell::Wall
    }

    /// Inserts a line of walls after the given lattice row or column.
    ///
    /// The line spans nodes `start..=end` (inclusive) perpendicular to the
    /// wall and covers the pillars between them.
    ///
    /// * `Horizontal`: walls between node rows `from` and `from + 1`
    /// * `Vertical`: walls between node columns `from` and `from + 1`
    ///
    /// # Panics
    /// * If there is no node row/column after `from`
    /// * If `start` or `end` is out of the lattice
    pub fn insert_wall_line_after(&mut self, from: u16, start: u16, end: u16, orientation: Orientation) {
        let (limit, span) = match orientation {
            Orientation::Horizontal => (self.lattice_height(), self.lattice_width()),
            Orientation::Vertical => (self.lattice_width(), self.lattice_height()),
        };
        if from + 1 >= limit {
            panic!("Cannot insert a wall line after the last lattice line");
        }
        if start >= span || end >= span {
            panic!(
                "The range for inserting walls (start={}, end={}) is out of bounds",
                start, end
            );
        }
        let line = from * 2 + 1;
        (start * 2..=end * 2).for_each(|along| {
            let coord = match orientation {
                Orientation::Horizontal => (along, line),
                Orientation::Vertical => (line, along),
            };
            self.grid.set(coord, GridCell::Wall);
        });
    }
}

impl std::ops::Index<(u16, u16)> for Maze {
    type Output = GridCell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.grid[index]
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.rows() {
            let line = row.iter().map(|cell| cell.symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Maze {
    type Err = ConfigError;

    /// Parses one row per non-empty line, `.` for passages and `#` for walls.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        GridCell::from_symbol(ch)
                            .map(GridCell::is_passable)
                            .ok_or(ConfigError::InvalidGridChar { row, col, ch })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Maze::from_rows(&rows)
    }
}

/// Get the lattice neighbors of a node: west, east, north, south.
pub fn get_neighbors(node: (u16, u16), maze: &Maze) -> impl Iterator<Item = (u16, u16)> {
    let neighbors: Vec<(u16, u16)> = if maze.is_node_in_bounds(node) {
        let (x, y) = node;
        vec![
            // NOTE: This way of handling underflow/overflow is overflow-safe.
            // When x < 1 or y < 1, wrap x - 1 or y - 1 to u16::MAX to avoid underflow,
            // and automatically filter it out in the comparison.
            (x.wrapping_sub(1), y),
            (x.saturating_add(1), y),
            (x, y.wrapping_sub(1)),
            (x, y.saturating_add(1)),
        ]
    } else {
        // No neighbors if the node is out of bounds
        vec![]
    };

    neighbors
        .into_iter()
        .filter(move |&n| maze.is_node_in_bounds(n))
}
