//! Loop and room carving applied on top of a generated maze.
//!
//! Both passes only ever open cells, so a connected maze stays connected and
//! the grid keeps its dimensions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    generators::{LOOP_STREAM, MazeRng, ROOM_STREAM, get_rng},
    maze::{GridCell, Maze},
};

/// Bounds, in cells, of the half-extent of a carved room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRadius {
    pub min: u16,
    pub max: u16,
}

impl RoomRadius {
    pub const MAX: u16 = 32;

    pub fn new(min: u16, max: u16) -> Result<Self, ConfigError> {
        let radius = RoomRadius { min, max };
        radius.validate()?;
        Ok(radius)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max || self.max > Self::MAX {
            return Err(ConfigError::InvalidRoomRadius {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for RoomRadius {
    fn default() -> Self {
        RoomRadius { min: 1, max: 2 }
    }
}

/// Tuning of the loop and room pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcess {
    /// Chance of carving each wall that separates two open nodes.
    pub loop_factor: f32,
    /// Chance that a candidate room centre becomes a room.
    pub room_chance: f32,
    pub room_radius: RoomRadius,
    /// Number of candidate room centres; derived from the maze size when unset.
    pub room_attempts: Option<u32>,
}

impl Default for PostProcess {
    fn default() -> Self {
        PostProcess {
            loop_factor: 0.0,
            room_chance: 0.0,
            room_radius: RoomRadius::default(),
            room_attempts: None,
        }
    }
}

/// One candidate room centre per this many lattice nodes when `room_attempts` is unset.
const NODES_PER_ROOM_ATTEMPT: u32 = 25;

fn check_probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange { name, value })
    }
}

impl PostProcess {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("loop_factor", self.loop_factor)?;
        check_probability("room_chance", self.room_chance)?;
        self.room_radius.validate()
    }

    pub fn is_noop(&self) -> bool {
        self.loop_factor <= 0.0 && self.room_chance <= 0.0
    }

    /// Carves loops, then rooms, drawing from `seed`'s post-processing streams.
    ///
    /// Out-of-range settings are refused before the maze is touched.
    pub fn apply(&self, maze: &mut Maze, seed: i32) -> Result<(), ConfigError> {
        self.validate()?;
        let loops = carve_loops(maze, self.loop_factor, &mut get_rng(seed, LOOP_STREAM))?;
        let attempts = self.room_attempts.unwrap_or_else(|| {
            let nodes = maze.lattice_width() as u32 * maze.lattice_height() as u32;
            (nodes / NODES_PER_ROOM_ATTEMPT).max(1)
        });
        let rooms = carve_rooms(
            maze,
            self.room_chance,
            self.room_radius,
            attempts,
            &mut get_rng(seed, ROOM_STREAM),
        )?;
        tracing::debug!(
            "[post-process] carved {} loops and {} rooms out of {} attempts",
            loops,
            rooms,
            attempts
        );
        Ok(())
    }
}

/// Opens each wall between two open lattice nodes with probability
/// `loop_factor`, scanning row-major. Returns the number of walls opened.
pub fn carve_loops(
    maze: &mut Maze,
    loop_factor: f32,
    rng: &mut MazeRng,
) -> Result<usize, ConfigError> {
    check_probability("loop_factor", loop_factor)?;
    if loop_factor == 0.0 {
        return Ok(0);
    }
    let mut carved = 0;
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            // Lattice walls have exactly one odd coordinate; pillars have two
            let (odd_x, odd_y) = (x % 2 == 1, y % 2 == 1);
            if odd_x == odd_y || maze.is_passable((x, y)) {
                continue;
            }
            let (a, b) = if odd_x {
                ((x - 1, y), (x + 1, y))
            } else {
                ((x, y - 1), (x, y + 1))
            };
            if maze.is_passable(a) && maze.is_passable(b) && rng.random_bool(loop_factor as f64) {
                maze.set((x, y), GridCell::Path);
                carved += 1;
            }
        }
    }
    Ok(carved)
}

/// Tries `attempts` random lattice nodes as room centres; each becomes a
/// rectangle of open cells with probability `room_chance`, its half-extents
/// drawn from `radius` and clipped to the grid. Returns the number of rooms.
pub fn carve_rooms(
    maze: &mut Maze,
    room_chance: f32,
    radius: RoomRadius,
    attempts: u32,
    rng: &mut MazeRng,
) -> Result<usize, ConfigError> {
    check_probability("room_chance", room_chance)?;
    radius.validate()?;
    if room_chance == 0.0 {
        return Ok(0);
    }
    let mut rooms = 0;
    for _ in 0..attempts {
        let centre = Maze::node_cell((
            rng.random_range(0..maze.lattice_width()),
            rng.random_range(0..maze.lattice_height()),
        ));
        if !rng.random_bool(room_chance as f64) {
            continue;
        }
        let radius_x = rng.random_range(radius.min..=radius.max);
        let radius_y = rng.random_range(radius.min..=radius.max);

        let x_range = centre.0.saturating_sub(radius_x)..=(centre.0 + radius_x).min(maze.width() - 1);
        let y_range = centre.1.saturating_sub(radius_y)..=(centre.1 + radius_y).min(maze.height() - 1);
        for y in y_range {
            for x in x_range.clone() {
                maze.set((x, y), GridCell::Path);
            }
        }
        rooms += 1;
    }
    Ok(rooms)
}
