use std::io::Write;

use crossterm::{
    QueueableCommand, queue,
    style::{self, Attribute, Color, Stylize},
    terminal,
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{builder::BuiltMaze, maze::Tile};

/// Draws a built maze to any writer, one line per grid row.
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Renderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Terminal width in columns, if the output is a terminal.
    fn terminal_width() -> Option<u16> {
        terminal::size().ok().map(|(width, _)| width)
    }

    /// Summary line under the maze: algorithm, size, seed and path length.
    pub fn legend(built: &BuiltMaze) -> String {
        let config = &built.config;
        let path = match &built.path {
            None => "no path requested".to_string(),
            Some(path) if path.is_reachable() => format!("path: {} cells", path.length),
            Some(_) => "path: unreachable".to_string(),
        };
        format!(
            "{} | {} | seed {} | {}",
            config.algorithm, config.size, config.seed, path
        )
    }

    /// Styled rendering with a one-tile outline around the grid.
    ///
    /// Falls back to [`Renderer::render_plain`] when the terminal is too
    /// narrow for two-column tiles.
    pub fn render(&mut self, built: &BuiltMaze) -> std::io::Result<()> {
        let width = built.maze.width();
        let term_width = Self::terminal_width();
        let needed = (width + 2) * Tile::CELL_WIDTH;
        if term_width.is_some_and(|columns| columns < needed) {
            let msg = format!(
                "Terminal is too narrow ({} columns) for styled output ({} columns), printing plain text.\n",
                term_width.unwrap_or_default(),
                needed
            );
            queue!(
                self.out,
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold))
            )?;
            return self.render_plain(built);
        }

        let outline_row = |out: &mut W| -> std::io::Result<()> {
            (0..width + 2).try_for_each(|_| out.queue(style::Print(Tile::Outline)).map(|_| ()))?;
            out.queue(style::Print("\n"))?;
            Ok(())
        };

        outline_row(&mut self.out)?;
        let mut tiles = built.tiles().peekable();
        while tiles.peek().is_some() {
            self.out.queue(style::Print(Tile::Outline))?;
            for (_, tile) in tiles.by_ref().take(width as usize) {
                self.out.queue(style::Print(tile))?;
            }
            self.out.queue(style::Print(Tile::Outline))?;
            self.out.queue(style::Print("\n"))?;
        }
        outline_row(&mut self.out)?;

        let legend = Self::legend(built);
        let legend = match term_width {
            Some(columns) => legend.unicode_truncate(columns as usize).0.to_string(),
            None => legend,
        };
        queue!(
            self.out,
            style::PrintStyledContent(legend.with(Color::Green).attribute(Attribute::Bold)),
            style::Print("\n")
        )?;
        self.out.flush()
    }

    /// Plain text: `#` wall, `.` floor, `*` path, then the legend.
    pub fn render_plain(&mut self, built: &BuiltMaze) -> std::io::Result<()> {
        let width = built.maze.width() as usize;
        let mut line = String::with_capacity(width);
        for (coord, tile) in built.tiles() {
            line.push(match tile {
                Tile::Route => '*',
                Tile::Floor => '.',
                Tile::Wall | Tile::Outline => '#',
            });
            if coord.x as usize + 1 == width {
                writeln!(self.out, "{}", line)?;
                line.clear();
            }
        }
        writeln!(self.out, "{}", Self::legend(built))?;
        self.out.flush()
    }
}
