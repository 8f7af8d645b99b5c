use mazeforge::{
    Generator, Maze, MazeSize, build,
    config::MazeConfig,
    post_process::PostProcess,
    solvers::{PathGraph, PathRequest},
};
use quickcheck::{TestResult, quickcheck};

fn pick(algorithm: u8) -> Generator {
    Generator::ALL[algorithm as usize % Generator::ALL.len()]
}

fn size(width: u8, height: u8) -> MazeSize {
    let side = |n: u8| 3 + u32::from(n) % 58;
    MazeSize::new(side(width), side(height)).unwrap()
}

fn is_perfect(maze: &Maze) -> bool {
    let graph = PathGraph::new(maze);
    graph.component_count() == 1 && graph.edge_count() + 1 == maze.passable_count()
}

quickcheck! {
    fn prop_same_seed_same_maze(algorithm: u8, width: u8, height: u8, seed: i32) -> bool {
        let generator = pick(algorithm);
        let size = size(width, height);
        generator.generate(size, seed) == generator.generate(size, seed)
    }

    fn prop_every_maze_is_perfect(algorithm: u8, width: u8, height: u8, seed: i32) -> TestResult {
        let maze = pick(algorithm).generate(size(width, height), seed);
        TestResult::from_bool(is_perfect(&maze))
    }

    fn prop_post_processing_keeps_one_component(
        algorithm: u8,
        width: u8,
        height: u8,
        seed: i32,
        loop_factor: u8,
        room_chance: u8
    ) -> TestResult {
        let post_process = PostProcess {
            loop_factor: f32::from(loop_factor) / 255.0,
            room_chance: f32::from(room_chance) / 255.0,
            ..PostProcess::default()
        };
        let config = MazeConfig {
            algorithm: pick(algorithm),
            size: size(width, height),
            seed,
            post_process,
            ..MazeConfig::default()
        };
        let built = match build(&config) {
            Ok(built) => built,
            Err(_) => return TestResult::failed(),
        };
        TestResult::from_bool(PathGraph::new(&built.maze).component_count() == 1)
    }

    fn prop_odd_corners_are_connected(algorithm: u8, width: u8, height: u8, seed: i32) -> TestResult {
        let size = size(width, height);
        if size.width() % 2 == 0 || size.height() % 2 == 0 {
            return TestResult::discard();
        }
        let config = MazeConfig {
            algorithm: pick(algorithm),
            size,
            seed,
            path: Some(PathRequest::corner_to_corner(size)),
            ..MazeConfig::default()
        };
        let built = build(&config).unwrap();
        let path = built.path.unwrap();
        let manhattan = usize::from(size.width() - 1) + usize::from(size.height() - 1);
        TestResult::from_bool(path.is_reachable() && path.length > manhattan)
    }
}

#[test]
fn test_grid_text_round_trip() {
    for generator in Generator::ALL {
        let maze = generator.generate(MazeSize::new(13, 9).unwrap(), 99);
        let text = maze.to_string();
        assert_eq!(text.parse::<Maze>().unwrap(), maze);
    }
}
