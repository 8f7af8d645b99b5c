use mazeforge::{AppError, MazeSize, app::App};

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);
    let size = MazeSize::new(255, 255)?;
    App::default().profile(size, num_iters, std::io::stdout().lock())?;
    Ok(())
}
