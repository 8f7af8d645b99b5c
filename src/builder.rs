use crate::{
    config::{MazeConfig, PostProcessOrder},
    error::ConfigError,
    maze::{Coord, Maze, Tile},
    post_process::PostProcess,
    solvers::{Path, PathRequest, shortest_path},
};

/// A generated maze with its optional path, ready for presentation.
#[derive(Debug, Clone)]
pub struct BuiltMaze {
    pub config: MazeConfig,
    pub maze: Maze,
    pub path: Option<Path>,
}

impl BuiltMaze {
    /// Path length in cells, if a path was requested and found.
    pub fn path_length(&self) -> Option<usize> {
        self.path
            .as_ref()
            .filter(|path| path.is_reachable())
            .map(|path| path.length)
    }

    /// What to draw for each cell, row-major. Path cells win over floor.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        (0..self.maze.height()).flat_map(move |y| {
            (0..self.maze.width()).map(move |x| {
                let coord = Coord::new(x, y);
                let tile = if self.path.as_ref().is_some_and(|path| path.contains(coord)) {
                    Tile::Route
                } else if self.maze.is_passable((x, y)) {
                    Tile::Floor
                } else {
                    Tile::Wall
                };
                (coord, tile)
            })
        })
    }
}

/// Validates `config`, generates the maze and runs post-processing and the
/// path search in the configured order.
pub fn build(config: &MazeConfig) -> Result<BuiltMaze, ConfigError> {
    config.validate()?;
    tracing::info!(
        "[build] {} {} with seed {}",
        config.algorithm,
        config.size,
        config.seed
    );

    let mut maze = config.algorithm.generate(config.size, config.seed);
    let path = match config.post_process_order {
        PostProcessOrder::BeforePath => {
            post_process(&config.post_process, &mut maze, config.seed)?;
            find_path(&maze, config.path)
        }
        PostProcessOrder::AfterPath => {
            let path = find_path(&maze, config.path);
            post_process(&config.post_process, &mut maze, config.seed)?;
            path
        }
    };

    if let Some(path) = &path {
        tracing::info!("[build] path length: {}", path.length);
    }

    Ok(BuiltMaze {
        config: config.clone(),
        maze,
        path,
    })
}

fn post_process(settings: &PostProcess, maze: &mut Maze, seed: i32) -> Result<(), ConfigError> {
    if settings.is_noop() {
        return Ok(());
    }
    settings.apply(maze, seed)
}

/// Clamps the endpoints into the grid and solves between them. Endpoints on
/// walls have no path.
fn find_path(maze: &Maze, request: Option<PathRequest>) -> Option<Path> {
    let PathRequest { start, end } = request?.clamp_to(maze.size());
    for endpoint in [start, end] {
        if !maze.is_passable(endpoint.into()) {
            tracing::warn!("[build] path endpoint {} is a wall", endpoint);
            return Some(Path::unreachable(maze.width(), maze.height()));
        }
    }
    Some(shortest_path(maze, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::Generator, maze::MazeSize, post_process::RoomRadius, solvers::PathGraph,
    };

    fn config(width: u32, height: u32) -> MazeConfig {
        MazeConfig {
            size: MazeSize::new(width, height).unwrap(),
            path: Some(PathRequest::corner_to_corner(
                MazeSize::new(width, height).unwrap(),
            )),
            ..MazeConfig::default()
        }
    }

    #[test]
    fn test_build_with_path() {
        for algorithm in Generator::ALL {
            let built = build(&MazeConfig {
                algorithm,
                seed: 77,
                ..config(15, 11)
            })
            .unwrap();
            let path = built.path.as_ref().unwrap();
            assert!(path.is_reachable());
            assert_eq!(path.cells.first(), Some(&Coord::new(0, 0)));
            assert_eq!(path.cells.last(), Some(&Coord::new(14, 10)));
            assert!(path.cells.iter().all(|&c| built.maze.is_passable(c.into())));
            assert_eq!(built.path_length(), Some(path.cells.len()));
        }
    }

    #[test]
    fn test_endpoints_are_clamped() {
        let mut config = config(9, 9);
        config.path = Some(PathRequest::new(Coord::new(0, 0), Coord::new(40, 40)));
        let built = build(&config).unwrap();
        let path = built.path.unwrap();
        assert_eq!(path.cells.last(), Some(&Coord::new(8, 8)));
    }

    #[test]
    fn test_wall_endpoint_has_no_path() {
        let mut config = config(9, 9);
        // Pillars are always walls
        config.path = Some(PathRequest::new(Coord::new(0, 0), Coord::new(1, 1)));
        let built = build(&config).unwrap();
        assert_eq!(built.path_length(), None);
        assert!(!built.path.unwrap().is_reachable());
    }

    #[test]
    fn test_no_path_requested() {
        let built = build(&MazeConfig::default()).unwrap();
        assert!(built.path.is_none());
        assert!(built.tiles().all(|(_, tile)| tile != Tile::Route));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = config(9, 9);
        config.post_process.loop_factor = 2.0;
        assert!(matches!(
            build(&config),
            Err(ConfigError::ParameterOutOfRange { name: "loop_factor", .. })
        ));
    }

    #[test]
    fn test_loops_shorten_paths_only_when_carved_first() {
        let mut config = config(41, 41);
        config.algorithm = Generator::RecurBacktrack;
        config.seed = 2024;
        config.post_process.loop_factor = 0.5;

        let tree_path = build(&MazeConfig {
            post_process: PostProcess::default(),
            ..config.clone()
        })
        .unwrap()
        .path_length()
        .unwrap();

        config.post_process_order = PostProcessOrder::AfterPath;
        let after = build(&config).unwrap();
        assert_eq!(after.path_length(), Some(tree_path));

        config.post_process_order = PostProcessOrder::BeforePath;
        let before = build(&config).unwrap();
        assert!(before.path_length().unwrap() <= tree_path);
        // Same grid either way, only the path search differs
        assert_eq!(before.maze, after.maze);
    }

    #[test]
    fn test_rooms_keep_the_maze_connected() {
        let mut config = config(31, 31);
        config.post_process.room_chance = 1.0;
        config.post_process.room_radius = RoomRadius::new(1, 3).unwrap();
        let built = build(&config).unwrap();
        assert_eq!(PathGraph::new(&built.maze).component_count(), 1);
        assert!(built.path_length().is_some());
    }

    #[test]
    fn test_tiles_follow_path_precedence() {
        let built = build(&config(7, 7)).unwrap();
        let tiles = built.tiles().collect::<Vec<_>>();
        assert_eq!(tiles.len(), 49);
        assert_eq!(tiles[0], (Coord::new(0, 0), Tile::Route));
        assert_eq!(tiles[48], (Coord::new(6, 6), Tile::Route));
        let routes = tiles.iter().filter(|(_, t)| *t == Tile::Route).count();
        assert_eq!(Some(routes), built.path_length());
        // Pillar
        assert_eq!(tiles[8], (Coord::new(1, 1), Tile::Wall));
    }
}
