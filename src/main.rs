mod config;
mod player;
mod render;
mod screen;
mod tempo;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use termlife::Board;
use tracing::{Level, info, warn};

use config::Config;
use player::Player;
use render::{ColorMode, RenderMode};
use screen::Screen;
use tempo::Tempo;

const DEFAULT_ROWS: usize = 20;
const DEFAULT_COLS: usize = 20;
const DEFAULT_DENSITY: f64 = 0.3;
/// Interactive mode starts slow and stopped; `--plain` prints at a steady pace
const DEFAULT_INTERVAL_MS: u64 = 1000;
const PLAIN_INTERVAL_MS: u64 = 100;
/// Generations printed by `--plain` when no limit is given
const PLAIN_GENERATIONS: u64 = 100;

#[derive(Parser)]
#[command(name = "termlife", about = "Conway's Game of Life on a toroidal board")]
struct Cli {
    /// Board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Fraction of cells alive after randomizing (0.0-1.0)
    #[arg(short, long)]
    density: Option<f64>,

    /// Milliseconds between generations (100-60000; default 1000, --plain 100)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Stop after this many generations (0 = unbounded; --plain runs 100)
    #[arg(short, long)]
    generations: Option<u64>,

    /// Seed for the random board (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print frames as plain text instead of running full-screen
    #[arg(long)]
    plain: bool,

    /// Render mode
    #[arg(short, long, value_enum)]
    render: Option<RenderMode>,

    /// Color mode
    #[arg(short, long, value_enum)]
    color: Option<ColorMode>,

    /// Start the simulation running instead of stopped
    #[arg(long)]
    start: bool,

    /// Hide the status bar
    #[arg(long)]
    clean: bool,

    /// Write log output to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the config file path and a default config, then exit
    #[arg(long)]
    show_config: bool,
}

/// Effective run settings: CLI over config file over defaults.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    rows: usize,
    cols: usize,
    density: f64,
    interval: Duration,
    /// 0 = unbounded
    generations: u64,
    render: RenderMode,
    color: ColorMode,
    paused: bool,
    clean: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let interval_ms = cli
            .interval
            .or(config.interval_ms)
            .unwrap_or(if cli.plain {
                PLAIN_INTERVAL_MS
            } else {
                DEFAULT_INTERVAL_MS
            });
        Settings {
            rows: cli.rows.or(config.rows).unwrap_or(DEFAULT_ROWS),
            cols: cli.cols.or(config.cols).unwrap_or(DEFAULT_COLS),
            density: cli.density.or(config.density).unwrap_or(DEFAULT_DENSITY),
            interval: Duration::from_millis(interval_ms),
            generations: cli.generations.or(config.generations).unwrap_or(0),
            render: cli.render.or(config.render).unwrap_or(RenderMode::Ascii),
            color: cli.color.or(config.color).unwrap_or(ColorMode::TrueColor),
            paused: !cli.start && config.paused.unwrap_or(true),
            clean: cli.clean || config.clean.unwrap_or(false),
        }
    }

    fn limit(&self) -> Option<u64> {
        (self.generations > 0).then_some(self.generations)
    }
}

/// Log to `path` when given; otherwise only warnings reach stderr so the
/// full-screen view is left alone.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(Level::WARN)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref())?;

    if cli.show_config {
        match config::config_path() {
            Some(path) => println!("# Config file: {}", path.display()),
            None => println!("# No config directory on this platform"),
        }
        print!("{}", config::default_config_string());
        return Ok(());
    }

    let settings = Settings::resolve(&cli, &config::load_config());
    let tempo = Tempo::new(settings.interval);
    if tempo.interval() != settings.interval {
        warn!(
            requested = ?settings.interval,
            using = %tempo.label(),
            "interval out of range, clamped"
        );
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!(?settings, seed, "starting");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(settings.rows, settings.cols)?;
    board.randomize(&mut rng, settings.density)?;

    if cli.plain {
        let generations = settings.limit().unwrap_or(PLAIN_GENERATIONS);
        let mut stdout = io::stdout().lock();
        return player::run_plain(&mut stdout, &mut board, generations, tempo.interval());
    }

    let mut player = Player::new(
        board,
        rng,
        settings.density,
        tempo,
        !settings.paused,
        settings.limit(),
    );

    let writer = BufWriter::with_capacity(64 * 1024, io::stdout());
    let mut screen = Screen::enter(writer, screen::Crossterm)?;
    let result = player.run(screen.writer(), settings.render, settings.color, !settings.clean);
    // Restore the terminal before anything else is printed
    drop(screen);

    if let Err(ref e) = result {
        warn!("stopped with error: {}", e);
    }
    result
}
