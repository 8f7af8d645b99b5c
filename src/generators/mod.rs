use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

mod eller;
mod hunt_and_kill;
mod kruskal;
mod prim;
mod recur_backtrack;
mod recur_div;
pub mod registry;
mod sidewinder;
mod union_find;

use crate::{
    error::ConfigError,
    maze::{Maze, MazeSize},
};

/// The random number generator every generation call owns.
///
/// ChaCha8 is pinned so a `(size, seed, algorithm)` triple keeps producing the
/// same maze across platforms and dependency upgrades.
pub type MazeRng = ChaCha8Rng;

/// Stream the generators draw from.
pub const GENERATION_STREAM: u64 = 0;
/// Stream loop carving draws from.
pub const LOOP_STREAM: u64 = 1;
/// Stream room carving draws from.
pub const ROOM_STREAM: u64 = 2;

/// Get a random number generator for a seed, on the given ChaCha stream.
pub fn get_rng(seed: i32, stream: u64) -> MazeRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u32 as u64);
    rng.set_stream(stream);
    rng
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Generator {
    #[default]
    RecurBacktrack,
    RecurDiv,
    HuntAndKill,
    Sidewinder,
    Kruskal,
    Eller,
    Prim,
}

impl Generator {
    /// Every generator, in registry order.
    pub const ALL: [Generator; 7] = [
        Generator::RecurBacktrack,
        Generator::RecurDiv,
        Generator::HuntAndKill,
        Generator::Sidewinder,
        Generator::Kruskal,
        Generator::Eller,
        Generator::Prim,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn id(self) -> &'static str {
        match self {
            Generator::RecurBacktrack => "backtracker",
            Generator::RecurDiv => "division",
            Generator::HuntAndKill => "hunt-and-kill",
            Generator::Sidewinder => "sidewinder",
            Generator::Kruskal => "kruskal",
            Generator::Eller => "eller",
            Generator::Prim => "prim",
        }
    }

    /// Generates a maze of `size` from `seed`.
    pub fn generate(self, size: MazeSize, seed: i32) -> Maze {
        let mut maze = Maze::new(size);
        let mut rng = get_rng(seed, GENERATION_STREAM);
        tracing::debug!("[generate] {} {} with seed {}", self, size, seed);
        registry::carve_fn(self)(&mut maze, &mut rng);
        tracing::debug!(
            "[generate] {} done, {} passable cells",
            self,
            maze.passable_count()
        );
        maze
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracker"),
            Generator::RecurDiv => write!(f, "Recursive Division"),
            Generator::HuntAndKill => write!(f, "Hunt-and-Kill"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Eller => write!(f, "Eller's Algorithm"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

impl FromStr for Generator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::lookup(s)
    }
}

impl TryFrom<String> for Generator {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        registry::lookup(&s)
    }
}

impl From<Generator> for &'static str {
    fn from(generator: Generator) -> Self {
        generator.id()
    }
}

pub fn generate_maze(generator: Generator, size: MazeSize, seed: i32) -> Maze {
    generator.generate(size, seed)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::solvers::bfs::PathGraph;
    use rand::Rng;

    pub(crate) fn size(width: u32, height: u32) -> MazeSize {
        MazeSize::new(width, height).unwrap()
    }

    /// Checks the invariants every generator guarantees.
    pub(crate) fn assert_perfect_maze(maze: &Maze) {
        let graph = PathGraph::new(maze);
        assert_eq!(graph.component_count(), 1, "maze is not connected:\n{maze}");
        // A spanning tree over the open cells has exactly one edge fewer than vertices
        assert_eq!(
            graph.edge_count() + 1,
            maze.passable_count(),
            "maze has loops:\n{maze}"
        );
        // Every lattice node is reachable
        (0..maze.lattice_height()).for_each(|y| {
            (0..maze.lattice_width()).for_each(|x| assert!(maze.is_node_open((x, y))))
        });
    }

    #[test]
    fn test_rng_is_pinned_per_seed() {
        let a = get_rng(-7, GENERATION_STREAM).random::<u64>();
        let b = get_rng(-7, GENERATION_STREAM).random::<u64>();
        let other_stream = get_rng(-7, LOOP_STREAM).random::<u64>();
        assert_eq!(a, b);
        assert_ne!(a, other_stream);
        assert_ne!(a, get_rng(7, GENERATION_STREAM).random::<u64>());
    }

    #[test]
    fn test_every_generator_builds_a_perfect_maze() {
        for generator in Generator::ALL {
            for (w, h) in [(3, 3), (4, 4), (5, 5), (6, 9), (21, 11), (30, 17)] {
                for seed in [0, 1, -42, i32::MAX] {
                    let maze = generator.generate(size(w, h), seed);
                    assert_eq!(maze.width(), w as u16);
                    assert_eq!(maze.height(), h as u16);
                    assert_perfect_maze(&maze);
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for generator in Generator::ALL {
            let a = generator.generate(size(25, 19), 1234);
            let b = generate_maze(generator, size(25, 19), 1234);
            assert_eq!(a, b, "{generator} is not deterministic");
        }
    }

    #[test]
    fn test_large_maze_dimensions() {
        for generator in Generator::ALL {
            let maze = generator.generate(size(101, 101), 99);
            let rows = maze.to_rows();
            assert_eq!(rows.len(), 101);
            assert!(rows.iter().all(|row| row.len() == 101));
            assert_perfect_maze(&maze);
        }
    }

    #[test]
    fn test_even_dimensions_keep_trailing_strip_solid() {
        for generator in Generator::ALL {
            let maze = generator.generate(size(8, 6), 5);
            assert!((0..6).all(|y| !maze.is_passable((7, y))), "{generator}");
            assert!((0..8).all(|x| !maze.is_passable((x, 5))), "{generator}");
        }
    }

    #[test]
    fn test_odd_sizes_open_both_corners() {
        for generator in Generator::ALL {
            let maze = generator.generate(size(11, 7), 3);
            assert!(maze.is_passable((0, 0)));
            assert!(maze.is_passable((10, 6)));
        }
    }

    #[test]
    fn test_seeds_change_the_layout() {
        for generator in Generator::ALL {
            let a = generator.generate(size(31, 31), 1);
            let b = generator.generate(size(31, 31), 2);
            assert_ne!(a, b, "{generator} ignores its seed");
        }
    }

    #[test]
    fn test_parse_ids() {
        for generator in Generator::ALL {
            assert_eq!(generator.id().parse::<Generator>(), Ok(generator));
        }
        assert_eq!("PRIM".parse::<Generator>(), Ok(Generator::Prim));
        assert_eq!(
            "wilson".parse::<Generator>(),
            Err(ConfigError::UnknownAlgorithm("wilson".to_string()))
        );
    }
}
