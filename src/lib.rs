//! Seeded maze generation on a cell grid, loop and room post-processing, and
//! breadth-first shortest paths.

pub mod app;
pub mod builder;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod post_process;
pub mod solvers;

pub use builder::{BuiltMaze, build};
pub use config::{MazeConfig, PostProcessOrder};
pub use error::{AppError, ConfigError};
pub use generators::{Generator, generate_maze};
pub use maze::{Coord, Maze, MazeSize};
pub use solvers::{Path, PathRequest, shortest_path};
