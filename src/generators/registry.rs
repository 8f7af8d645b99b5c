//! Static table mapping each [`Generator`] to the function that carves it.
//!
//! Carve functions receive an all-wall maze and the call's own RNG; nothing
//! is shared between calls, so the table is safe to read from any thread.

use super::{
    Generator, MazeRng, eller::eller, hunt_and_kill::hunt_and_kill, kruskal::randomized_kruskal,
    prim::randomized_prim, recur_backtrack::recursive_backtrack, recur_div::recursive_division,
    sidewinder::sidewinder,
};
use crate::{error::ConfigError, maze::Maze};

pub type CarveFn = fn(&mut Maze, &mut MazeRng);

/// Indexed by the `Generator` discriminant.
static REGISTRY: [(Generator, CarveFn); 7] = [
    (Generator::RecurBacktrack, recursive_backtrack),
    (Generator::RecurDiv, recursive_division),
    (Generator::HuntAndKill, hunt_and_kill),
    (Generator::Sidewinder, sidewinder),
    (Generator::Kruskal, randomized_kruskal),
    (Generator::Eller, eller),
    (Generator::Prim, randomized_prim),
];

pub fn carve_fn(generator: Generator) -> CarveFn {
    REGISTRY[generator as usize].1
}

pub fn entries() -> impl Iterator<Item = (Generator, CarveFn)> {
    REGISTRY.iter().copied()
}

/// Resolves a generator id, ignoring ASCII case.
pub fn lookup(name: &str) -> Result<Generator, ConfigError> {
    let name = name.trim();
    Generator::ALL
        .into_iter()
        .find(|generator| generator.id().eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownAlgorithm(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_discriminants() {
        for (i, (generator, _)) in entries().enumerate() {
            assert_eq!(generator as usize, i);
            assert_eq!(Generator::ALL[i], generator);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(" Hunt-And-Kill "), Ok(Generator::HuntAndKill));
        assert_eq!(lookup("division"), Ok(Generator::RecurDiv));
        assert!(matches!(
            lookup("growing-tree"),
            Err(ConfigError::UnknownAlgorithm(name)) if name == "growing-tree"
        ));
    }
}
