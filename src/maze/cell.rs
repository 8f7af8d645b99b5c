use crossterm::style::{Color, Stylize};

use std::fmt;

/// A cell of the maze grid, either walkable or blocked.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    Path,
    #[default]
    Wall,
}

impl GridCell {
    pub const PATH_SYMBOL: char = '.';
    pub const WALL_SYMBOL: char = '#';

    pub fn is_passable(self) -> bool {
        self == GridCell::Path
    }

    /// Plain-text symbol used by text dumps of a maze.
    pub fn symbol(self) -> char {
        match self {
            GridCell::Path => Self::PATH_SYMBOL,
            GridCell::Wall => Self::WALL_SYMBOL,
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            Self::PATH_SYMBOL => Some(GridCell::Path),
            Self::WALL_SYMBOL => Some(GridCell::Wall),
            _ => None,
        }
    }
}

impl From<bool> for GridCell {
    fn from(passable: bool) -> Self {
        if passable {
            GridCell::Path
        } else {
            GridCell::Wall
        }
    }
}

/// What the presentation layer draws for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Passable cell on the computed path.
    Route,
    /// Passable cell off the path.
    Floor,
    Wall,
    /// Perimeter ring drawn around the grid.
    Outline,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Route => "🟨".with(Color::Yellow),
            Tile::Floor => "  ".with(Color::Reset),
            Tile::Wall => "⬜".with(Color::White),
            Tile::Outline => "🟫".with(Color::DarkGrey),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
