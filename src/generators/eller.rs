use std::collections::BTreeMap;

use crate::{
    generators::{MazeRng, union_find::UnionFind},
    maze::Maze,
};
use rand::{Rng, seq::SliceRandom};

/// Carves one lattice row at a time, tracking which nodes of the current row
/// are already connected through the rows above.
pub fn eller(maze: &mut Maze, rng: &mut MazeRng) {
    let width = maze.lattice_width();
    let height = maze.lattice_height();
    let index = move |(x, y): (u16, u16)| y as usize * width as usize + x as usize;
    let mut sets = UnionFind::new(width as usize * height as usize);

    for y in 0..height {
        let last_row = y + 1 == height;
        (0..width).for_each(|x| maze.open_node((x, y)));

        // Join neighbors from different sets; the last row must join all of them
        for x in 0..width - 1 {
            let (west, east) = ((x, y), (x + 1, y));
            if sets.find(index(west)) != sets.find(index(east))
                && (last_row || rng.random_bool(0.5))
            {
                sets.unite(index(west), index(east));
                maze.carve_between(west, east);
            }
        }

        if last_row {
            break;
        }

        // Ordered by set root so the draws below do not depend on hashing
        let mut groups: BTreeMap<usize, Vec<u16>> = BTreeMap::new();
        for x in 0..width {
            groups.entry(sets.find(index((x, y)))).or_default().push(x);
        }

        // Every set continues into the next row through at least one passage
        for members in groups.values_mut() {
            members.shuffle(rng);
            let count = rng.random_range(1..=members.len());
            for &x in &members[..count] {
                sets.unite(index((x, y)), index((x, y + 1)));
                maze.carve_between((x, y), (x, y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{GENERATION_STREAM, get_rng, tests::{assert_perfect_maze, size}};

    #[test]
    fn test_eller() {
        let mut maze = Maze::new(size(25, 15));
        eller(&mut maze, &mut get_rng(31, GENERATION_STREAM));
        assert_perfect_maze(&maze);
    }

    #[test]
    fn test_two_row_maze() {
        // The first row is the only one deciding vertical passages
        for seed in 0..20 {
            let mut maze = Maze::new(size(15, 3));
            eller(&mut maze, &mut get_rng(seed, GENERATION_STREAM));
            assert_perfect_maze(&maze);
        }
    }
}
