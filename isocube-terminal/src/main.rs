/// isocube Terminal - plays the hero cube animation as ASCII art
///
/// Controls:
///   - Space: Pause / resume
///   - +/- or Up/Down: Playback speed
///   - R: Restart from t=0
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use isocube_core::SceneConfig;
use isocube_terminal::{snapshot, TerminalApp};
use std::io::stdout;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "isocube-terminal", about = "Isometric hero cube in the terminal")]
struct Args {
    /// JSON scene config; missing fields use the built-in illustration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the frame at this many seconds and exit instead of playing
    #[arg(short = 's', long = "snapshot")]
    snapshot: Option<f64>,

    /// Snapshot width in columns
    #[arg(long = "columns", default_value_t = 80)]
    columns: usize,

    /// Snapshot height in rows
    #[arg(long = "rows", default_value_t = 40)]
    rows: usize,

    /// Emit snapshots without ANSI colors
    #[arg(long = "plain")]
    plain: bool,

    /// Initial playback speed multiplier
    #[arg(long = "speed", default_value_t = 1.0)]
    speed: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    if let Some(time) = args.snapshot {
        log::info!("Rendering snapshot at t={}s ({}x{})", time, args.columns, args.rows);
        snapshot(&mut stdout(), &config, time, args.columns, args.rows, !args.plain)
            .context("Failed to write snapshot")?;
        return Ok(());
    }

    let mut app = TerminalApp::new(&config).context("Failed to query terminal size")?;
    app.set_speed(args.speed);
    app.run().context("Terminal playback failed")?;

    Ok(())
}
