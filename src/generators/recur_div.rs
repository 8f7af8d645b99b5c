use crate::{
    generators::MazeRng,
    maze::{Maze, Orientation},
};
use rand::Rng;
use std::cmp::Ordering;

/// A rectangle of lattice nodes still to be divided.
#[derive(Debug, Clone, Copy)]
struct Chamber {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

impl Chamber {
    /// Split direction: across the longer side, at random for squares.
    fn orientation(&self, rng: &mut MazeRng) -> Orientation {
        match self.width.cmp(&self.height) {
            Ordering::Less => Orientation::Horizontal,
            Ordering::Greater => Orientation::Vertical,
            Ordering::Equal if rng.random_bool(0.5) => Orientation::Horizontal,
            Ordering::Equal => Orientation::Vertical,
        }
    }
}

pub fn recursive_division(maze: &mut Maze, rng: &mut MazeRng) {
    // The trailing strip of an even side is outside the lattice and stays solid
    maze.open_lattice();

    let mut pending = vec![Chamber {
        x: 0,
        y: 0,
        width: maze.lattice_width(),
        height: maze.lattice_height(),
    }];
    while let Some(chamber) = pending.pop() {
        if chamber.width < 2 || chamber.height < 2 {
            continue;
        }
        let Chamber { x, y, width, height } = chamber;
        let (first, second) = match chamber.orientation(rng) {
            Orientation::Horizontal => {
                // Wall goes below node row `y + offset`, with one gap in it
                let offset = rng.random_range(0..height - 1);
                let gap = x + rng.random_range(0..width);
                maze.insert_wall_line_after(y + offset, x, x + width - 1, Orientation::Horizontal);
                maze.remove_wall_cell_after((gap, y + offset), Orientation::Horizontal);
                (
                    Chamber { height: offset + 1, ..chamber },
                    Chamber { y: y + offset + 1, height: height - offset - 1, ..chamber },
                )
            }
            Orientation::Vertical => {
                let offset = rng.random_range(0..width - 1);
                let gap = y + rng.random_range(0..height);
                maze.insert_wall_line_after(x + offset, y, y + height - 1, Orientation::Vertical);
                maze.remove_wall_cell_after((x + offset, gap), Orientation::Vertical);
                (
                    Chamber { width: offset + 1, ..chamber },
                    Chamber { x: x + offset + 1, width: width - offset - 1, ..chamber },
                )
            }
        };
        // Second pushed first so the first half is divided first
        pending.push(second);
        pending.push(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{GENERATION_STREAM, get_rng, tests::{assert_perfect_maze, size}};

    #[test]
    fn test_recursive_division() {
        let mut maze = Maze::new(size(15, 9));
        recursive_division(&mut maze, &mut get_rng(4, GENERATION_STREAM));
        assert_perfect_maze(&maze);
        // Pillars between nodes are always closed in the end
        assert!(!maze.is_passable((1, 1)));
        assert!(!maze.is_passable((13, 7)));
    }

    #[test]
    fn test_thin_maze() {
        let mut maze = Maze::new(size(9, 3));
        recursive_division(&mut maze, &mut get_rng(8, GENERATION_STREAM));
        assert_perfect_maze(&maze);
    }

    #[test]
    fn test_even_width_is_divided_within_the_lattice() {
        let mut maze = Maze::new(size(10, 10));
        recursive_division(&mut maze, &mut get_rng(2, GENERATION_STREAM));
        assert!((0..10).all(|i| !maze.is_passable((9, i)) && !maze.is_passable((i, 9))));
        assert_perfect_maze(&maze);
    }
}
