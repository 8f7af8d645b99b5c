//! Terminal front end: builds a maze from a configuration and draws it.

mod renderer;

use std::{
    io::Write,
    time::{Duration, Instant},
};

pub use renderer::Renderer;

use crate::{
    builder::{BuiltMaze, build},
    config::MazeConfig,
    error::AppError,
    generators::Generator,
    maze::MazeSize,
};

#[derive(Default)]
pub struct App {
    /// Print `#`/`.`/`*` text instead of styled tiles
    plain: bool,
}

impl App {
    pub fn new(plain: bool) -> Self {
        App { plain }
    }

    /// Builds the configured maze and draws it to `out`.
    pub fn run<W: Write>(&self, config: &MazeConfig, out: W) -> Result<BuiltMaze, AppError> {
        let built = build(config)?;
        let mut renderer = Renderer::new(out);
        if self.plain {
            renderer.render_plain(&built)?;
        } else {
            renderer.render(&built)?;
        }
        Ok(built)
    }

    /// Generates `iterations` mazes of `size` with every generator and writes
    /// the mean generation time of each.
    pub fn profile<W: Write>(
        &self,
        size: MazeSize,
        iterations: usize,
        mut out: W,
    ) -> Result<(), AppError> {
        let iterations = iterations.max(1);
        for generator in Generator::ALL {
            let started = Instant::now();
            for seed in 0..iterations {
                let maze = generator.generate(size, seed as i32);
                std::hint::black_box(maze);
            }
            let mean = mean_duration(started.elapsed(), iterations);
            tracing::info!("[profile] {} {}: {:?} per maze", generator, size, mean);
            writeln!(out, "{:<24} {:>12?}", generator.to_string(), mean)?;
        }
        Ok(())
    }
}

/// `total` spread over `iterations` runs.
fn mean_duration(total: Duration, iterations: usize) -> Duration {
    total.div_f64(iterations.max(1) as f64)
}
