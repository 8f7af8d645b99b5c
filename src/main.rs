use std::{
    ffi::OsStr,
    path::{Path as FsPath, PathBuf},
};

use clap::Parser;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use mazeforge::{
    AppError, Coord, Generator, MazeConfig, MazeSize, PathRequest, PostProcessOrder, app::App,
    post_process::RoomRadius,
};

/// Generate a seeded maze and print it, optionally with the shortest path
/// between two cells.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON configuration file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generation algorithm id (backtracker, division, hunt-and-kill,
    /// sidewinder, kruskal, eller, prim)
    #[arg(short, long)]
    algorithm: Option<Generator>,

    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i32>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Share of interior walls to knock down, 0.0..=1.0
    #[arg(long)]
    loop_factor: Option<f32>,

    /// Chance that each room attempt carves a room, 0.0..=1.0
    #[arg(long)]
    room_chance: Option<f32>,

    #[arg(long)]
    room_min: Option<u16>,

    #[arg(long)]
    room_max: Option<u16>,

    #[arg(long)]
    room_attempts: Option<u32>,

    /// Path start cell
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    start: Option<Vec<u16>>,

    /// Path end cell
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    end: Option<Vec<u16>>,

    /// Solve from the top-left to the bottom-right corner
    #[arg(short, long)]
    path: bool,

    /// Search the path before carving loops and rooms
    #[arg(long)]
    path_first: bool,

    /// Pick a random size, algorithm and seed
    #[arg(short, long)]
    randomize: bool,

    /// Print `#`, `.` and `*` instead of styled tiles
    #[arg(long)]
    plain: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

impl Cli {
    fn to_config(&self) -> Result<MazeConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => MazeConfig::load(path)?,
            None => MazeConfig::default(),
        };
        if self.randomize {
            config.randomize(&mut rand::rng());
        }

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.width.is_some() || self.height.is_some() {
            config.size = MazeSize::new(
                self.width.unwrap_or(config.size.width() as u32),
                self.height.unwrap_or(config.size.height() as u32),
            )?;
        }

        let post_process = &mut config.post_process;
        if let Some(loop_factor) = self.loop_factor {
            post_process.loop_factor = loop_factor;
        }
        if let Some(room_chance) = self.room_chance {
            post_process.room_chance = room_chance;
        }
        if self.room_min.is_some() || self.room_max.is_some() {
            post_process.room_radius = RoomRadius::new(
                self.room_min.unwrap_or(post_process.room_radius.min),
                self.room_max.unwrap_or(post_process.room_radius.max),
            )?;
        }
        if self.room_attempts.is_some() {
            post_process.room_attempts = self.room_attempts;
        }
        if self.path_first {
            config.post_process_order = PostProcessOrder::AfterPath;
        }

        let corners = PathRequest::corner_to_corner(config.size);
        let cell = |xy: &Vec<u16>| Coord::new(xy[0], xy[1]);
        if self.start.is_some() || self.end.is_some() {
            let current = config.path.unwrap_or(corners);
            config.path = Some(PathRequest::new(
                self.start.as_ref().map_or(current.start, cell),
                self.end.as_ref().map_or(current.end, cell),
            ));
        } else if self.path {
            config.path = Some(corners);
        }
        Ok(config)
    }
}

fn init_tracing(log_file: Option<&FsPath>, level: Level) -> WorkerGuard {
    let (writer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(FsPath::new("."));
            let file_name = path.file_name().unwrap_or(OsStr::new("mazeforge.log"));
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(false)
        .init();
    guard
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref(), cli.log_level);

    let config = cli.to_config()?;
    if cli.print_config {
        println!("{}", config.to_json());
        return Ok(());
    }

    App::new(cli.plain).run(&config, std::io::stdout().lock())?;
    Ok(())
}
