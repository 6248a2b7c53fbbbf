mod app;
mod canvas;
mod config;
mod help;
mod petal;
mod raster;
mod scene;
mod settings;
mod terminal;
mod tree;

use clap::Parser;
use config::{palette, TreeConfig, DEFAULT_FPS, DEFAULT_LEVEL, MAX_LEVEL};
use settings::Settings;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blossom")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "blossom: a cherry blossom fractal tree that sheds petals as you prune it", long_about = None)]
struct Cli {
    /// Initial recursion level (0-10)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=MAX_LEVEL as i64))]
    level: Option<u32>,

    /// Seconds per frame, 0-1 (defaults to 1/fps from settings, 60 fps otherwise)
    #[arg(short, long, value_parser = parse_frame_time)]
    time: Option<f32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a single frame to stdout (no interactive display)
    #[arg(short, long)]
    print: bool,

    /// Settings file (default: <config dir>/blossom/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Longest pause between frames
const MAX_FRAME_TIME: f32 = 1.0;

fn parse_frame_time(s: &str) -> Result<f32, String> {
    let secs: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if secs.is_finite() && (0.0..=MAX_FRAME_TIME).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!("frame time must be between 0 and {} seconds", MAX_FRAME_TIME))
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Raw mode owns the screen, so logs only ever go to a file
    if let Some(ref path) = cli.log {
        init_logging(path)?;
    }

    let settings = Settings::load(cli.config.as_deref())?;

    let fps = settings.scene.fps.unwrap_or(DEFAULT_FPS).max(1);
    let time_step = cli.time.unwrap_or(1.0 / fps as f32);
    let sky = settings
        .scene
        .sky
        .map(|[r, g, b]| canvas::Rgba::rgb(r, g, b))
        .unwrap_or(palette::SKY);

    let config = TreeConfig {
        level: cli
            .level
            .or(settings.tree.level)
            .unwrap_or(DEFAULT_LEVEL)
            .min(MAX_LEVEL),
        time_step,
        seed: cli.seed,
        print: cli.print,
        sky,
    };
    app::run(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_accepts_sane_values() {
        assert_eq!(parse_frame_time("0"), Ok(0.0));
        assert_eq!(parse_frame_time("0.5"), Ok(0.5));
        assert_eq!(parse_frame_time("1"), Ok(1.0));
    }

    #[test]
    fn frame_time_rejects_values_sleep_cannot_take() {
        for bad in ["inf", "NaN", "1e30", "-0.1", "abc"] {
            assert!(parse_frame_time(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn cli_rejects_infinite_frame_time() {
        assert!(Cli::try_parse_from(["blossom", "--time", "inf"]).is_err());
        let cli = Cli::try_parse_from(["blossom", "--time", "0.02"]).unwrap();
        assert_eq!(cli.time, Some(0.02));
    }
}
